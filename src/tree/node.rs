use std::fmt;

use crate::slab::{Ptr, Slab};

use super::InnerNode;

/// A single node of the binary search tree
///
/// `Debug` output shows the values of the node's children, not whole subtrees.
///
/// Borrows the tree immutably, so the structure cannot change while a `Node` is alive.
pub struct Node<'a, T> {
    nodes: &'a Slab<InnerNode<T>>,
    node: &'a InnerNode<T>,
}

impl<'a, T> fmt::Debug for Node<'a, T>
    where T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", self.value())
            .field("left", &self.left().map(|node| node.value()))
            .field("right", &self.right().map(|node| node.value()))
            .finish()
    }
}

impl<'a, T> Clone for Node<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Node<'a, T> {}

impl<'a, T> Node<'a, T> {
    /// Creates a new `Node` for the occupied entry `ptr`
    pub(super) fn new(nodes: &'a Slab<InnerNode<T>>, ptr: Ptr) -> Self {
        Self {nodes, node: &nodes[ptr]}
    }

    /// Returns the value stored in this node
    pub fn value(&self) -> &'a T {
        &self.node.value
    }

    /// Returns true if this node has a left subtree
    pub fn has_left(&self) -> bool {
        self.node.left.is_some()
    }

    /// Returns true if this node has a right subtree
    pub fn has_right(&self) -> bool {
        self.node.right.is_some()
    }

    /// Returns the left child node (subtree) of this node, if any
    pub fn left(&self) -> Option<Self> {
        self.node.left.map(|ptr| Self::new(self.nodes, ptr))
    }

    /// Returns the right child node (subtree) of this node, if any
    pub fn right(&self) -> Option<Self> {
        self.node.right.map(|ptr| Self::new(self.nodes, ptr))
    }
}
