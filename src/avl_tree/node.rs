use crate::avl_tree::tree;
use crate::entry::Entry;
use std::cmp;
use std::mem;

/// A struct representing an internal node of an avl tree.
#[derive(Clone)]
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub height: usize,
    pub left: tree::Tree<T, U>,
    pub right: tree::Tree<T, U>,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U) -> Self {
        Node {
            entry: Entry { key, value },
            height: 1,
            left: None,
            right: None,
        }
    }

    /// Recomputes the cached height from the cached heights of the children.
    pub fn update(&mut self) {
        let Node {
            ref mut height,
            ref left,
            ref right,
            ..
        } = self;
        *height = cmp::max(tree::height(left), tree::height(right)) + 1;
    }

    /// Height of the left subtree minus the height of the right subtree.
    pub fn balance(&self) -> i32 {
        (tree::height(&self.left) as i32) - (tree::height(&self.right) as i32)
    }

    // The right child becomes the root of this subtree. The demoted node is updated before the
    // promoted one.
    pub fn rotate_left(&mut self) {
        let mut child = self.right.take().expect("Expected right child node to be `Some`.");
        self.right = child.left.take();
        mem::swap(&mut *child, self);
        child.update();
        self.left = Some(child);
        self.update();
    }

    pub fn rotate_right(&mut self) {
        let mut child = self.left.take().expect("Expected left child node to be `Some`.");
        self.left = child.right.take();
        mem::swap(&mut *child, self);
        child.update();
        self.right = Some(child);
        self.update();
    }

    /// Refreshes the height of this node and restores the balance invariant with at most two
    /// rotations. Both subtrees must already be balanced with correct heights, and their heights
    /// may differ by at most two.
    ///
    /// A heavy child leaning away from the heavy side requires a double rotation. A heavy child
    /// that is perfectly balanced, which only happens after a removal, takes a single rotation.
    pub fn rebalance(&mut self) {
        self.update();
        let balance = self.balance();

        if balance > 1 {
            if let Some(ref mut child) = self.left {
                if child.balance() < 0 {
                    trace!("left-right rotation at height {}", self.height);
                    child.rotate_left();
                }
            }
            trace!("right rotation at height {}", self.height);
            self.rotate_right();
        } else if balance < -1 {
            if let Some(ref mut child) = self.right {
                if child.balance() > 0 {
                    trace!("right-left rotation at height {}", self.height);
                    child.rotate_right();
                }
            }
            trace!("left rotation at height {}", self.height);
            self.rotate_left();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Node;

    fn leaf(key: u32) -> Option<Box<Node<u32, ()>>> {
        Some(Box::new(Node::new(key, ())))
    }

    fn keys(node: &Node<u32, ()>) -> (u32, Option<u32>, Option<u32>) {
        (
            node.entry.key,
            node.left.as_ref().map(|child| child.entry.key),
            node.right.as_ref().map(|child| child.entry.key),
        )
    }

    #[test]
    fn test_update_leaf() {
        let mut node = Node::new(1, ());
        node.update();
        assert_eq!(node.height, 1);
        assert_eq!(node.balance(), 0);
    }

    #[test]
    fn test_rotate_left() {
        // 1 -> 2 -> 3 chain leaning right
        let mut right = Node::new(2, ());
        right.right = leaf(3);
        right.update();
        let mut node = Node::new(1, ());
        node.right = Some(Box::new(right));
        node.update();
        assert_eq!(node.height, 3);
        assert_eq!(node.balance(), -2);

        node.rotate_left();
        assert_eq!(keys(&node), (2, Some(1), Some(3)));
        assert_eq!(node.height, 2);
        assert_eq!(node.left.as_ref().map(|child| child.height), Some(1));
    }

    #[test]
    fn test_rotate_right_moves_inner_subtree() {
        let mut left = Node::new(2, ());
        left.left = leaf(1);
        left.right = leaf(3);
        left.update();
        let mut node = Node::new(4, ());
        node.left = Some(Box::new(left));
        node.right = leaf(5);
        node.update();

        node.rotate_right();
        assert_eq!(keys(&node), (2, Some(1), Some(4)));
        let right = node.right.as_ref().unwrap();
        assert_eq!(keys(right), (4, Some(3), Some(5)));
        assert_eq!(right.height, 2);
        assert_eq!(node.height, 3);
    }

    #[test]
    fn test_rebalance_double_rotation() {
        // 3 with left child 1 whose right child is 2
        let mut left = Node::new(1, ());
        left.right = leaf(2);
        left.update();
        let mut node = Node::new(3, ());
        node.left = Some(Box::new(left));

        node.rebalance();
        assert_eq!(keys(&node), (2, Some(1), Some(3)));
        assert_eq!(node.height, 2);
        assert_eq!(node.balance(), 0);
    }

    #[test]
    fn test_rebalance_balanced_heavy_child() {
        // 4 with left child 2 (children 1 and 3) and no right child, as left by a removal
        let mut left = Node::new(2, ());
        left.left = leaf(1);
        left.right = leaf(3);
        left.update();
        let mut node = Node::new(4, ());
        node.left = Some(Box::new(left));

        node.rebalance();
        assert_eq!(keys(&node), (2, Some(1), Some(4)));
        assert_eq!(node.height, 3);
        assert_eq!(node.balance(), -1);
    }

    #[test]
    fn test_rebalance_noop() {
        let mut node = Node::new(2, ());
        node.left = leaf(1);
        node.rebalance();
        assert_eq!(keys(&node), (2, Some(1), None));
        assert_eq!(node.height, 2);
    }
}
