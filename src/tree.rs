mod graph;
mod inorder;
mod levelorder;
mod node;
mod postorder;
mod preorder;

pub use graph::*;
pub use inorder::*;
pub use levelorder::*;
pub use node::*;
pub use postorder::*;
pub use preorder::*;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::io;
use std::iter::FromIterator;
use std::mem;

use tracing::{debug, trace};

use crate::error::{Result, TreeError};
use crate::slab::{Ptr, Slab};

/// The separator written after each value by the traversal printing methods
pub const DEFAULT_SEPARATOR: &str = "  ";

#[derive(Debug, Clone)]
struct InnerNode<T> {
    value: T,
    left: Option<Ptr>,
    right: Option<Ptr>,
}

impl<T> InnerNode<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }
}

/// Where a descent for some item ended up
///
/// `node` is the node holding the item, if any, and `parent` is the last node visited before it.
/// When the item is missing, `parent` is the node the item would be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Location {
    node: Option<Ptr>,
    parent: Option<Ptr>,
}

impl Location {
    fn found(&self) -> bool {
        self.node.is_some()
    }
}

/// A binary search tree (BST)
///
/// BST properties: For each node with value `v`:
/// - The value of each node in the left subtree is less than `v`
/// - The value of each node in the right subtree is greater than `v`
///
/// Duplicate values are not allowed. Inserting a value that already exists in the tree fails with
/// [`TreeError::DuplicateKey`] and does not modify the tree.
///
/// The tree is not balanced. Inserting values in sorted order produces a tree shaped like a linked
/// list, where every operation takes `O(n)` time.
#[derive(Clone)]
pub struct OrderedTree<T> {
    nodes: Slab<InnerNode<T>>,
    root: Option<Ptr>,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
        }
    }
}

impl<T> fmt::Debug for OrderedTree<T>
    where T: Ord + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter_inorder())
            .finish()
    }
}

impl<T: Ord> PartialEq for OrderedTree<T> {
    /// Two trees are equal when they hold the same values, regardless of their shape
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter_inorder().eq(other.iter_inorder())
    }
}

impl<T: Ord> Eq for OrderedTree<T> {}

impl<T: Ord> OrderedTree<T> {
    /// Creates an empty `OrderedTree`
    ///
    /// The tree is initially created with a capacity of 0, so it will not allocate until it is
    /// first inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    /// let tree: OrderedTree<&str> = OrderedTree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree with space for at least `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of values in the tree
    ///
    /// Time complexity: `O(1)`
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree has no root
    ///
    /// Time complexity: `O(1)`
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert!(tree.is_empty());
    /// tree.insert(1).unwrap();
    /// assert!(!tree.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.nodes.is_empty(), self.root.is_none());
        self.root.is_none()
    }

    /// Returns the number of nodes the tree can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns `true` if the tree contains the given item
    ///
    /// The item may be any borrowed form of the tree's value type, but the ordering on the
    /// borrowed form must match the ordering on the value type.
    ///
    /// Time complexity: `O(height)`
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(String::from("abc")).unwrap();
    /// assert!(tree.search("abc"));
    /// assert!(!tree.search("def"));
    /// ```
    pub fn search<Q>(&self, item: &Q) -> bool
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        self.get(item).is_some()
    }

    /// Returns a reference to the value in the tree equal to `item`, if any
    pub fn get<Q>(&self, item: &Q) -> Option<&T>
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(ptr) = current {
            let node = &self.nodes[ptr];
            match item.cmp(node.value.borrow()) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Some(&node.value),
            }
        }

        None
    }

    /// Returns the depth of the node holding `item`, where the root is at level 0
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::ordered_tree;
    ///
    /// let tree = ordered_tree![5, 3, 8, 1];
    /// assert_eq!(tree.level(&5), Some(0));
    /// assert_eq!(tree.level(&1), Some(2));
    /// assert_eq!(tree.level(&6), None);
    /// ```
    pub fn level<Q>(&self, item: &Q) -> Option<usize>
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let mut level = 0;
        let mut current = self.root;
        while let Some(ptr) = current {
            let node = &self.nodes[ptr];
            match item.cmp(node.value.borrow()) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Some(level),
            }
            level += 1;
        }

        None
    }

    /// Returns the number of levels in the tree (0 for an empty tree, 1 for a lone root)
    ///
    /// Time complexity: `O(n)`
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root.into_iter().map(|ptr| (ptr, 1)).collect();
        while let Some((ptr, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[ptr];
            stack.extend(node.left.map(|ptr| (ptr, depth + 1)));
            stack.extend(node.right.map(|ptr| (ptr, depth + 1)));
        }

        height
    }

    /// Returns the smallest value in the tree
    pub fn min(&self) -> Option<&T> {
        let mut current = self.root?;
        while let Some(left) = self.nodes[current].left {
            current = left;
        }
        Some(&self.nodes[current].value)
    }

    /// Returns the largest value in the tree
    pub fn max(&self) -> Option<&T> {
        let mut current = self.root?;
        while let Some(right) = self.nodes[current].right {
            current = right;
        }
        Some(&self.nodes[current].value)
    }

    /// Inserts a new value into the tree
    ///
    /// The value becomes a new leaf. Returns [`TreeError::DuplicateKey`] without modifying the
    /// tree if an equal value is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{OrderedTree, TreeError};
    ///
    /// let mut tree = OrderedTree::new();
    /// assert_eq!(tree.insert(37), Ok(()));
    /// assert_eq!(tree.insert(37), Err(TreeError::DuplicateKey));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> Result<()> {
        let location = self.locate(&value);
        if location.found() {
            debug!(len = self.len(), "rejected insert of an item already in the tree");
            return Err(TreeError::DuplicateKey);
        }

        // Which side of the parent the new leaf goes on
        let link = location.parent.map(|parent| (parent, value < self.nodes[parent].value));
        let ptr = self.nodes.push(InnerNode::new(value));
        match link {
            None => self.root = Some(ptr),
            Some((parent, true)) => self.nodes[parent].left = Some(ptr),
            Some((parent, false)) => self.nodes[parent].right = Some(ptr),
        }

        trace!(len = self.len(), "inserted item");
        Ok(())
    }

    /// Removes the value equal to `item` from the tree and returns it
    ///
    /// Returns [`TreeError::KeyNotFound`] without modifying the tree if no such value exists.
    ///
    /// When the node holding `item` has two children, its inorder successor's value is moved into
    /// it and the successor's node is unlinked instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{ordered_tree, TreeError};
    ///
    /// let mut tree = ordered_tree![String::from("abc"), String::from("def")];
    /// assert_eq!(tree.remove("abc"), Ok(String::from("abc")));
    /// assert_eq!(tree.remove("abc"), Err(TreeError::KeyNotFound));
    /// ```
    pub fn remove<Q>(&mut self, item: &Q) -> Result<T>
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let Location {node, mut parent} = self.locate(item);
        let x = match node {
            Some(x) => x,
            None => {
                debug!(len = self.len(), "rejected removal of an item not in the tree");
                return Err(TreeError::KeyNotFound);
            },
        };

        // The node that actually gets unlinked. It has at most one child.
        let mut target = x;
        let case = match (self.nodes[x].left, self.nodes[x].right) {
            (Some(_), Some(right)) => {
                let (successor, successor_parent) = self.successor(x, right);
                target = successor;
                parent = Some(successor_parent);
                "two children"
            },
            (None, None) => "leaf",
            _ => "one child",
        };

        let target_node = &self.nodes[target];
        let subtree = target_node.left.or(target_node.right);
        match parent {
            None => self.root = subtree,
            Some(parent) => {
                let parent_node = &mut self.nodes[parent];
                if parent_node.left == Some(target) {
                    parent_node.left = subtree;
                } else {
                    parent_node.right = subtree;
                }
            },
        }

        let removed = match self.nodes.remove(target) {
            Some(InnerNode {value, ..}) => value,
            None => unreachable!("located node {} is missing from the arena", target.index()),
        };

        trace!(case, len = self.len(), "removed item");
        if target == x {
            Ok(removed)
        } else {
            // `removed` is the successor's value, which now takes the place of `item`
            Ok(mem::replace(&mut self.nodes[x].value, removed))
        }
    }

    /// Clears the tree, removing all values
    ///
    /// Note that this method has no effect on the allocated capacity of the tree.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Reserves capacity for at least `additional` more nodes
    pub fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional)
    }

    /// Shrinks the capacity of the tree as much as possible
    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit()
    }

    /// Performs a pre-order traversal of the tree
    pub fn iter_preorder(&self) -> IterPreorder<T> {
        IterPreorder::new(&self.nodes, self.root)
    }

    /// Performs an in-order traversal of the tree, yielding values in ascending order
    pub fn iter_inorder(&self) -> IterInorder<T> {
        IterInorder::new(&self.nodes, self.root)
    }

    /// Performs a post-order traversal of the tree
    pub fn iter_postorder(&self) -> IterPostorder<T> {
        IterPostorder::new(&self.nodes, self.root)
    }

    /// Performs a level-by-level traversal of the tree, left to right within each level
    pub fn iter_levelorder(&self) -> IterLevelorder<T> {
        IterLevelorder::new(&self.nodes, self.root)
    }

    /// Returns the root node of the tree, or `None` if the tree is empty
    ///
    /// This is a low-level API meant to be used for implementing custom traversals.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{ordered_tree, tree::Node};
    ///
    /// fn count_leaves(node: Option<Node<i32>>) -> usize {
    ///     match node {
    ///         None => 0,
    ///         Some(node) if !node.has_left() && !node.has_right() => 1,
    ///         Some(node) => count_leaves(node.left()) + count_leaves(node.right()),
    ///     }
    /// }
    ///
    /// let tree = ordered_tree![5, 3, 8, 1, 4];
    /// assert_eq!(count_leaves(tree.root()), 3);
    /// ```
    pub fn root(&self) -> Option<Node<T>> {
        self.root.map(|ptr| Node::new(&self.nodes, ptr))
    }

    /// Descends towards `item`, remembering the parent of each visited node
    fn locate<Q>(&self, item: &Q) -> Location
        where T: Borrow<Q>,
              Q: Ord + ?Sized,
    {
        let mut parent = None;
        let mut current = self.root;
        while let Some(ptr) = current {
            let node = &self.nodes[ptr];
            match item.cmp(node.value.borrow()) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Location {node: Some(ptr), parent},
            }
            parent = Some(ptr);
        }

        Location {node: None, parent}
    }

    /// Finds the inorder successor of `node` (whose right child is `right`) and the successor's
    /// parent
    ///
    /// If `right` has no left child, `right` is the successor and `node` is its parent.
    fn successor(&self, node: Ptr, right: Ptr) -> (Ptr, Ptr) {
        let mut parent = node;
        let mut current = right;
        while let Some(left) = self.nodes[current].left {
            parent = current;
            current = left;
        }

        (current, parent)
    }
}

impl<T: Ord + fmt::Display> OrderedTree<T> {
    /// Writes every value in ascending order, each followed by `separator`
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::ordered_tree;
    ///
    /// let tree = ordered_tree![5, 3, 8];
    /// let mut out = Vec::new();
    /// tree.inorder(&mut out, ",").unwrap();
    /// assert_eq!(out, b"3,5,8,");
    /// ```
    pub fn inorder<W: io::Write + ?Sized>(&self, out: &mut W, separator: &str) -> io::Result<()> {
        write_separated(out, self.iter_inorder(), separator)
    }

    /// Writes every value in pre-order (node, left, right), each followed by `separator`
    pub fn preorder<W: io::Write + ?Sized>(&self, out: &mut W, separator: &str) -> io::Result<()> {
        write_separated(out, self.iter_preorder(), separator)
    }

    /// Writes every value in post-order (left, right, node), each followed by `separator`
    pub fn postorder<W: io::Write + ?Sized>(&self, out: &mut W, separator: &str) -> io::Result<()> {
        write_separated(out, self.iter_postorder(), separator)
    }

    /// Writes every value level by level, each followed by `separator`
    pub fn levelorder<W: io::Write + ?Sized>(&self, out: &mut W, separator: &str) -> io::Result<()> {
        write_separated(out, self.iter_levelorder(), separator)
    }

    /// Writes a sideways drawing of the tree using the default [`GraphStyle`]
    ///
    /// The right subtree is drawn above its parent and the left subtree below, so reading the
    /// output top to bottom walks the tree right to left. Missing children are drawn as `_`.
    pub fn graph<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        self.graph_with(out, &GraphStyle::default())
    }

    /// Writes a sideways drawing of the tree using the given style
    pub fn graph_with<W: io::Write + ?Sized>(&self, out: &mut W, style: &GraphStyle) -> io::Result<()> {
        graph::render(out, &self.nodes, self.root, 0, style)
    }
}

fn write_separated<W, I>(out: &mut W, values: I, separator: &str) -> io::Result<()>
    where W: io::Write + ?Sized,
          I: Iterator,
          I::Item: fmt::Display,
{
    for value in values {
        write!(out, "{}{}", value, separator)?;
    }

    Ok(())
}

impl<T: Ord> Extend<T> for OrderedTree<T> {
    /// Inserts every value, skipping values that are already present
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            let _ = self.insert(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for OrderedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut tree = Self::with_capacity(iter.size_hint().0);
        tree.extend(iter);
        tree
    }
}
