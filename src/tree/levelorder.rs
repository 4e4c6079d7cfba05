use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

pub struct IterLevelorder<'a, T> {
    nodes: &'a Slab<InnerNode<T>>,
    queue: VecDeque<Ptr>,
}

impl<'a, T> IterLevelorder<'a, T> {
    pub(super) fn new(nodes: &'a Slab<InnerNode<T>>, root: Option<Ptr>) -> Self {
        Self {
            nodes,
            queue: root.into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for IterLevelorder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let front_ptr = self.queue.pop_front()?;
        let nodes = self.nodes;
        let node = &nodes[front_ptr];
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some(&node.value)
    }
}

impl<'a, T> FusedIterator for IterLevelorder<'a, T> {}
