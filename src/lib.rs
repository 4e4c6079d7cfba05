//! An unbalanced binary search tree whose nodes live in a slab and link to each other by index.
//!
//! ```
//! use ordered_tree::{OrderedTree, TreeError};
//!
//! let mut tree = OrderedTree::new();
//! for &value in &[5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(value).unwrap();
//! }
//! assert_eq!(tree.insert(4), Err(TreeError::DuplicateKey));
//!
//! tree.remove(&5).unwrap();
//!
//! let mut out = Vec::new();
//! tree.inorder(&mut out, ",").unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "1,3,4,7,8,9,");
//! ```

mod slab;

pub mod error;
pub mod tree;

pub use error::TreeError;
pub use tree::{GraphStyle, OrderedTree, DEFAULT_SEPARATOR};

/// Creates an [`OrderedTree`] containing the given values, inserted in order
///
/// Values that are already present are skipped.
#[macro_export(local_inner_macros)]
macro_rules! ordered_tree {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$(ordered_tree!(@single $rest)),*]));

    // trailing comma case
    ($($value:expr,)+) => { ordered_tree!($($value),+) };
    ($($value:expr),*) => {
        {
            let _cap = ordered_tree!(@count $($value),*);
            let mut _tree = $crate::OrderedTree::with_capacity(_cap);
            $(
                let _ = _tree.insert($value);
            )*
            _tree
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_tree_macro() {
        let tree = ordered_tree! {
            1,
            3,
            2, // trailing comma
        };

        let items: Vec<_> = tree.iter_inorder().copied().collect();
        assert_eq!(&items, &[1, 2, 3]);
        assert_eq!(tree.root().map(|node| *node.value()), Some(1));

        // No trailing comma
        let tree = ordered_tree![99];

        let items: Vec<_> = tree.iter_inorder().copied().collect();
        assert_eq!(&items, &[99]);

        // Duplicates are skipped
        let tree = ordered_tree![4, 4, 2];

        let items: Vec<_> = tree.iter_inorder().copied().collect();
        assert_eq!(&items, &[2, 4]);
        assert!(tree.capacity() >= 3);

        // Zero items
        let tree = ordered_tree!();

        let items: Vec<i32> = tree.iter_inorder().copied().collect();
        assert_eq!(&items, &[]);
    }
}
