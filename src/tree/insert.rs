//! Internal insertion implementation

use crate::param::Balancing;
use crate::SearchTree;
use std::cmp::Ordering;
use std::mem;

use super::node::{Node, NodeId, Side};

impl<K: Ord, V, P: Balancing> SearchTree<K, V, P> {
    /// Inserts the key-value pair into the tree, returning the previous value for the key if
    /// there was one
    ///
    /// If the key is already present, its value is replaced in-place: the tree's shape and the
    /// stored key are unchanged. Otherwise a new leaf is added and, for balanced trees, the
    /// insertion fix-up walks up from it.
    ///
    /// ## Examples
    ///
    /// ```
    /// use aspen::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.insert("a", 1), None);
    /// assert_eq!(tree.insert("a", 2), Some(1));
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree[&"a"], 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut current = match self.root {
            Some(r) => r,
            None => {
                let id = self.nodes.push(Node::new(key, value, None));
                debug_println!("insert: new root {id:?}");
                self.root = Some(id);
                self.len = 1;
                return None;
            }
        };

        // Search down for either the existing key or the empty slot where it belongs
        let side = loop {
            let side = match key.cmp(self.nodes.key(current)) {
                Ordering::Equal => {
                    let old = mem::replace(&mut self.nodes.get_mut(current).value, value);
                    return Some(old);
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };

            match self.nodes.child(current, side) {
                Some(c) => current = c,
                None => break side,
            }
        };

        let parent = current;
        let new = self.nodes.push(Node::new(key, value, Some(parent)));
        self.nodes.set_child(parent, side, Some(new));
        self.len += 1;
        debug_println!("insert: new leaf {new:?} on the {side:?} of {parent:?}");

        if P::REBALANCE {
            // If the parent already had a child on the other side, its height is unchanged and
            // the new leaf just evens it out. Otherwise the parent grew, and the growth has to be
            // carried upwards.
            match self.nodes.balance(parent) {
                0 => {
                    self.nodes.set_balance(parent, side.growth());
                    self.insert_fix(parent, new);
                }
                _ => self.nodes.set_balance(parent, 0),
            }
        }

        None
    }
}

impl<K, V, P: Balancing> SearchTree<K, V, P> {
    /// (*Internal*) Restores the AVL property after the subtree rooted at `parent` grew by one
    /// level
    ///
    /// `node` is the child of `parent` on the path the insertion came up through. The balance of
    /// `parent` must already be updated. On each step, the grandparent's balance moves towards
    /// the side that grew:
    ///
    /// * if it became zero, the grandparent's height is unchanged, so we're done;
    /// * if it became `±1`, the grandparent grew too, and we keep going from there;
    /// * if it became `±2`, a single or double rotation brings the subtree back to its height
    ///   from before the insertion, which also means we're done.
    pub(super) fn insert_fix(&mut self, mut parent: NodeId, mut node: NodeId) {
        loop {
            let grand = match self.nodes.parent(parent) {
                Some(g) => g,
                None => return,
            };

            let side = self.nodes.side_of(grand, parent);
            let d = side.growth();
            let grand_balance = self.nodes.update_balance(grand, d);
            debug_println!("insert_fix: {grand:?} balance is now {grand_balance:+}");

            if grand_balance == 0 {
                return;
            } else if grand_balance == d {
                node = parent;
                parent = grand;
                continue;
            }

            // The grandparent is now doubly-heavy on `side`
            if self.nodes.side_of(parent, node) == side {
                // Outer grandchild grew (left-left or right-right): a single rotation suffices
                self.rotate(grand, side.flip());
                self.nodes.set_balance(parent, 0);
                self.nodes.set_balance(grand, 0);
            } else {
                // Inner grandchild grew (left-right or right-left): rotate `node` up twice
                let node_balance = self.nodes.balance(node);
                self.rotate(parent, side);
                self.rotate(grand, side.flip());

                let (parent_balance, grand_balance) = match node_balance {
                    0 => (0, 0),
                    b if b == d => (0, -d),
                    _ => (d, 0),
                };
                self.nodes.set_balance(parent, parent_balance);
                self.nodes.set_balance(grand, grand_balance);
                self.nodes.set_balance(node, 0);
            }

            return;
        }
    }
}
