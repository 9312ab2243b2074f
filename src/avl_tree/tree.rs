use crate::avl_tree::node::Node;
use crate::entry::Entry;
use crate::error::{InvariantError, Result};
use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::mem;

pub type Tree<T, U> = Option<Box<Node<T, U>>>;

pub fn height<T, U>(tree: &Tree<T, U>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.height,
    }
}

fn rebalance<T, U>(tree: &mut Tree<T, U>) {
    if let Some(ref mut node) = tree {
        node.rebalance();
    }
}

// Detaches the minimum node of the tree, rebalancing every node on the path to it.
fn remove_min<T, U>(tree: &mut Tree<T, U>) -> Tree<T, U> {
    let min = match tree {
        Some(ref mut node) if node.left.is_some() => remove_min(&mut node.left),
        _ => {
            return tree.take().map(|mut node| {
                *tree = node.right.take();
                node
            });
        },
    };

    rebalance(tree);
    min
}

// The in-order successor of the removed node takes its place. The caller refreshes the new root.
fn combine_subtrees<T, U>(left_tree: Tree<T, U>, mut right_tree: Tree<T, U>) -> Tree<T, U> {
    match remove_min(&mut right_tree) {
        Some(mut new_root) => {
            new_root.left = left_tree;
            new_root.right = right_tree;
            Some(new_root)
        },
        None => left_tree,
    }
}

/// Inserts `new_node` into the tree. If the key already exists, only its value is replaced and
/// the old value is returned; nothing on the path is re-heighted or rotated in that case.
pub fn insert<T, U>(tree: &mut Tree<T, U>, new_node: Node<T, U>) -> Option<U>
where
    T: Ord,
{
    let ret = match tree {
        Some(ref mut node) => match new_node.entry.key.cmp(&node.entry.key) {
            Ordering::Less => insert(&mut node.left, new_node),
            Ordering::Greater => insert(&mut node.right, new_node),
            Ordering::Equal => {
                return Some(mem::replace(&mut node.entry.value, new_node.entry.value));
            },
        },
        None => {
            *tree = Some(Box::new(new_node));
            return None;
        },
    };

    if ret.is_none() {
        rebalance(tree);
    }
    ret
}

/// Removes the entry with a particular key, rebalancing every ancestor of the removed node.
pub fn remove<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> Option<Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let ret = match tree.take() {
        Some(mut node) => match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => {
                let ret = remove(&mut node.left, key);
                *tree = Some(node);
                ret
            },
            Ordering::Greater => {
                let ret = remove(&mut node.right, key);
                *tree = Some(node);
                ret
            },
            Ordering::Equal => {
                let Node {
                    entry, left, right, ..
                } = *node;
                *tree = match (left, right) {
                    (None, right) => right,
                    (left, None) => left,
                    (left, right) => combine_subtrees(left, right),
                };
                Some(entry)
            },
        },
        None => return None,
    };

    if ret.is_some() {
        rebalance(tree);
    }
    ret
}

pub fn get<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = tree;
    while let Some(node) = curr {
        match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return Some(&node.entry),
        }
    }
    None
}

pub fn get_mut<'a, T, U, V>(tree: &'a mut Tree<T, U>, key: &V) -> Option<&'a mut Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_mut().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Less => get_mut(&mut node.left, key),
        Ordering::Greater => get_mut(&mut node.right, key),
        Ordering::Equal => Some(&mut node.entry),
    })
}

pub fn ceil<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Greater => ceil(&node.right, key),
        Ordering::Less => match ceil(&node.left, key) {
            None => Some(&node.entry),
            res => res,
        },
        Ordering::Equal => Some(&node.entry),
    })
}

pub fn floor<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Less => floor(&node.left, key),
        Ordering::Greater => match floor(&node.right, key) {
            None => Some(&node.entry),
            res => res,
        },
        Ordering::Equal => Some(&node.entry),
    })
}

pub fn min<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.entry
    })
}

pub fn max<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.entry
    })
}

struct CheckState<'a, T> {
    prev: Option<&'a T>,
    position: usize,
}

// Returns the recomputed height of the subtree.
fn check_subtree<'a, T, U>(tree: &'a Tree<T, U>, state: &mut CheckState<'a, T>) -> Result<usize>
where
    T: Ord,
{
    let node = match tree {
        Some(node) => node,
        None => return Ok(0),
    };

    let left_height = check_subtree(&node.left, state)?;

    let position = state.position;
    if let Some(prev) = state.prev {
        if *prev >= node.entry.key {
            return Err(InvariantError::OutOfOrder { position });
        }
    }
    state.prev = Some(&node.entry.key);
    state.position += 1;

    let right_height = check_subtree(&node.right, state)?;

    let actual = cmp::max(left_height, right_height) + 1;
    if node.height != actual {
        return Err(InvariantError::StaleHeight {
            position,
            cached: node.height,
            actual,
        });
    }

    let balance = left_height as i32 - right_height as i32;
    if balance.abs() > 1 {
        return Err(InvariantError::Unbalanced { position, balance });
    }

    Ok(actual)
}

/// Validates ordering, cached heights and balance factors. Returns the number of nodes.
pub fn check<T, U>(tree: &Tree<T, U>) -> Result<usize>
where
    T: Ord,
{
    let mut state = CheckState {
        prev: None,
        position: 0,
    };
    check_subtree(tree, &mut state)?;
    Ok(state.position)
}

#[cfg(test)]
mod tests {
    use super::{check, height, insert, remove, Tree};
    use crate::avl_tree::node::Node;
    use crate::error::InvariantError;

    fn build(keys: &[u32]) -> Tree<u32, u32> {
        let mut tree = None;
        for key in keys {
            insert(&mut tree, Node::new(*key, *key * 10));
        }
        tree
    }

    fn root_key(tree: &Tree<u32, u32>) -> Option<u32> {
        tree.as_ref().map(|node| node.entry.key)
    }

    #[test]
    fn test_insert_right_chain_rotates_left() {
        let tree = build(&[10, 20, 30]);
        let root = tree.as_ref().unwrap();
        assert_eq!(root.entry.key, 20);
        assert_eq!(root_key(&root.left), Some(10));
        assert_eq!(root_key(&root.right), Some(30));
        assert_eq!(height(&tree), 2);
        assert_eq!(check(&tree), Ok(3));
    }

    #[test]
    fn test_insert_zig_zag_double_rotation() {
        let tree = build(&[30, 10, 20]);
        assert_eq!(root_key(&tree), Some(20));
        assert_eq!(height(&tree), 2);
        assert_eq!(check(&tree), Ok(3));
    }

    #[test]
    fn test_insert_existing_key_keeps_structure() {
        let mut tree = build(&[2, 1, 3]);
        assert_eq!(insert(&mut tree, Node::new(1, 100)), Some(10));
        assert_eq!(root_key(&tree), Some(2));
        assert_eq!(height(&tree), 2);
        assert_eq!(tree.as_ref().unwrap().left.as_ref().unwrap().entry.value, 100);
    }

    #[test]
    fn test_remove_two_children_uses_successor() {
        let mut tree = build(&[10, 20, 30]);
        let entry = remove(&mut tree, &20).unwrap();
        assert_eq!((entry.key, entry.value), (20, 200));
        assert_eq!(root_key(&tree), Some(30));
        assert_eq!(height(&tree), 2);
        assert_eq!(check(&tree), Ok(2));
    }

    #[test]
    fn test_remove_rebalances_successor_path() {
        // taking 5 out from under 6 leaves 6 right-heavy before 5 replaces the root
        let mut tree = build(&[4, 2, 6, 1, 3, 5, 7, 8]);
        assert_eq!(check(&tree), Ok(8));
        remove(&mut tree, &4);
        assert_eq!(check(&tree), Ok(7));
        assert_eq!(root_key(&tree), Some(5));
        assert_eq!(root_key(&tree.as_ref().unwrap().right), Some(7));
    }

    #[test]
    fn test_remove_rotates_at_multiple_levels() {
        // a minimal (Fibonacci) tree of height 5, where removing the shallowest leaf cascades
        let mut tree = build(&[8, 5, 11, 3, 7, 10, 12, 2, 4, 6, 9, 1]);
        assert_eq!(height(&tree), 5);
        assert_eq!(check(&tree), Ok(12));
        remove(&mut tree, &12);
        assert_eq!(check(&tree), Ok(11));
        assert_eq!(height(&tree), 4);
    }

    #[test]
    fn test_remove_missing_key() {
        let mut tree = build(&[1, 2, 3]);
        assert!(remove(&mut tree, &4).is_none());
        assert_eq!(root_key(&tree), Some(2));
        assert_eq!(check(&tree), Ok(3));

        let mut empty: Tree<u32, u32> = None;
        assert!(remove(&mut empty, &4).is_none());
        assert!(empty.is_none());
    }

    #[test]
    fn test_check_stale_height() {
        let mut tree = build(&[1, 2, 3]);
        if let Some(ref mut node) = tree {
            node.height = 5;
        }
        assert_eq!(
            check(&tree),
            Err(InvariantError::StaleHeight {
                position: 1,
                cached: 5,
                actual: 2,
            }),
        );
    }

    #[test]
    fn test_check_unbalanced() {
        let mut left = Node::new(2, 0);
        left.left = Some(Box::new(Node::new(1, 0)));
        left.update();
        let mut root = Node::new(3, 0);
        root.left = Some(Box::new(left));
        root.update();
        let tree = Some(Box::new(root));
        assert_eq!(
            check(&tree),
            Err(InvariantError::Unbalanced {
                position: 2,
                balance: 2,
            }),
        );
    }

    #[test]
    fn test_check_out_of_order() {
        let mut root = Node::new(1, 0);
        root.left = Some(Box::new(Node::new(2, 0)));
        root.update();
        let tree = Some(Box::new(root));
        assert_eq!(check(&tree), Err(InvariantError::OutOfOrder { position: 1 }));
    }
}
