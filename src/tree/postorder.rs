use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

pub struct IterPostorder<'a, T> {
    nodes: &'a Slab<InnerNode<T>>,
    stack: Vec<Ptr>,
}

// See: https://www.geeksforgeeks.org/iterative-postorder-traversal-using-stack/
impl<'a, T> IterPostorder<'a, T> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<T>>, root: Option<Ptr>) -> Self {
        let mut iter = Self {nodes, stack: Vec::new()};
        iter.descend(root);
        iter
    }

    /// Walks down the left edge from `current`, pushing each node's right child and then the node
    /// itself
    fn descend(&mut self, mut current: Option<Ptr>) {
        while let Some(ptr) = current {
            let node = &self.nodes[ptr];
            self.stack.extend(node.right);
            self.stack.push(ptr);
            current = node.left;
        }
    }
}

impl<'a, T> Iterator for IterPostorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_ptr) = self.stack.pop() {
            let nodes = self.nodes;
            let node = &nodes[current_ptr];

            match node.right {
                // The right subtree has not been visited yet, so visit it before this node
                Some(right) if self.stack.last() == Some(&right) => {
                    self.stack.pop();
                    self.stack.push(current_ptr);
                    self.descend(Some(right));
                },

                _ => return Some(&node.value),
            }
        }

        None
    }
}

impl<'a, T> FusedIterator for IterPostorder<'a, T> {}
