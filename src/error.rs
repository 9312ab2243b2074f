//! Errors reported when validating the structure of an AVL tree.

use std::error;
use std::fmt;
use std::result;

/// A violated structural invariant found by `AvlMap::check`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InvariantError {
    /// In-order traversal visited a key that was not strictly greater than its predecessor.
    OutOfOrder {
        position: usize,
    },
    /// A node's cached height does not match the height of its subtree.
    StaleHeight {
        position: usize,
        cached: usize,
        actual: usize,
    },
    /// The heights of a node's subtrees differ by more than one.
    Unbalanced {
        position: usize,
        balance: i32,
    },
    /// The tracked length disagrees with the number of nodes.
    LengthMismatch {
        expected: usize,
        actual: usize,
    },
}

impl error::Error for InvariantError {}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvariantError::OutOfOrder { position } => {
                write!(f, "key at in-order position {} is out of order", position)
            },
            InvariantError::StaleHeight { position, cached, actual } => write!(
                f,
                "node at in-order position {} caches height {}, but its height is {}",
                position, cached, actual,
            ),
            InvariantError::Unbalanced { position, balance } => write!(
                f,
                "node at in-order position {} has balance factor {}",
                position, balance,
            ),
            InvariantError::LengthMismatch { expected, actual } => write!(
                f,
                "map reports {} entries, but the tree holds {}",
                expected, actual,
            ),
        }
    }
}

pub type Result<T> = result::Result<T, InvariantError>;
