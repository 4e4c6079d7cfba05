use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

pub struct IterPreorder<'a, T> {
    nodes: &'a Slab<InnerNode<T>>,
    stack: Vec<Ptr>,
}

impl<'a, T> IterPreorder<'a, T> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<T>>, root: Option<Ptr>) -> Self {
        Self {
            nodes,
            stack: root.into_iter().collect(),
        }
    }
}

// See: https://www.geeksforgeeks.org/iterative-preorder-traversal/
impl<'a, T> Iterator for IterPreorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let top_ptr = self.stack.pop()?;
        let nodes = self.nodes;
        let node = &nodes[top_ptr];
        // Right goes first so that the left subtree is popped first
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(&node.value)
    }
}

impl<'a, T> FusedIterator for IterPreorder<'a, T> {}
