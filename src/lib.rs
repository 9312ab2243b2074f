//! An ordered map and set backed by an AVL tree.
//!
//! The heights of the two child subtrees of every node differ by at most one, so lookups,
//! insertions and removals all visit `O(log n)` nodes.
//!
//! # Examples
//!
//! ```
//! use avl_collections::avl_tree::AvlMap;
//!
//! let mut map = AvlMap::new();
//! map.insert(10, "a");
//! map.insert(20, "b");
//! map.insert(30, "c");
//!
//! assert_eq!(map.height(), 2);
//! assert_eq!(map.get(&20), Some(&"b"));
//! assert!(map.check().is_ok());
//! ```

#[macro_use]
extern crate log;

mod entry;
pub mod avl_tree;
pub mod error;
