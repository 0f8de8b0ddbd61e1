//! Internal removal implementation
//!
//! There's a handful of public methods that remove entries ([`remove`], [`remove_entry`],
//! [`pop_first`], [`pop_last`]), but they all go through [`remove_node`]: a node with two children
//! is first swapped with its in-order predecessor, so that the node actually unlinked from the
//! tree has at most one child. For balanced trees, the removal fix-up then walks up from the
//! unlinked node's old parent.
//!
//! [`remove`]: SearchTree::remove
//! [`remove_entry`]: SearchTree::remove_entry
//! [`pop_first`]: SearchTree::pop_first
//! [`pop_last`]: SearchTree::pop_last
//! [`remove_node`]: SearchTree::remove_node

use crate::param::Balancing;
use crate::SearchTree;
use std::borrow::Borrow;

use super::node::{NodeId, Side};

impl<K: Ord, V, P: Balancing> SearchTree<K, V, P> {
    /// Removes the entry for the key from the tree, returning its value if it was present
    ///
    /// Removing a key that isn't in the tree does nothing.
    ///
    /// ## Examples
    ///
    /// ```
    /// use aspen::AvlTree;
    ///
    /// let mut tree: AvlTree<_, _> = [(1, 'a'), (2, 'b')].into_iter().collect();
    /// assert_eq!(tree.remove(&1), Some('a'));
    /// assert_eq!(tree.remove(&1), None);
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes the entry for the key from the tree, returning the stored key and its value if it
    /// was present
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_id(key)?;
        Some(self.remove_node(id))
    }
}

impl<K, V, P: Balancing> SearchTree<K, V, P> {
    /// Removes and returns the entry with the smallest key, if there is one
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let id = self.first_id()?;
        Some(self.remove_node(id))
    }

    /// Removes and returns the entry with the largest key, if there is one
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let id = self.last_id()?;
        Some(self.remove_node(id))
    }

    /// (*Internal*) Removes a node that's known to be in the tree, returning its contents
    fn remove_node(&mut self, target: NodeId) -> (K, V) {
        if self.nodes.left(target).is_some() && self.nodes.right(target).is_some() {
            // The predecessor is the maximum of the left subtree, so it has no right child. Once
            // the two have traded places, `target` can be unlinked directly.
            let pred = match self.nodes.predecessor(target) {
                Some(p) => p,
                None => broken_invariant!("node {target:?} has a left child but no predecessor"),
            };

            debug_println!("remove: swapping {target:?} with predecessor {pred:?}");
            self.node_swap(target, pred);
        }

        let parent = self.nodes.parent(target);
        let side = self.nodes.side_in_parent(target);
        let node = self.detach(target);
        debug_println!("remove: detached {target:?} from {parent:?}");

        if P::REBALANCE {
            if let (Some(p), Some(s)) = (parent, side) {
                self.remove_fix(p, -s.growth());
            }
        }

        (node.key, node.value)
    }

    /// (*Internal*) Restores the AVL property after one of `node`'s subtrees shrank by one level
    ///
    /// `diff` is the change to `node`'s balance: `+1` if the left subtree shrank, `-1` if the right
    /// one did. At each step, the node's new balance decides what happens:
    ///
    /// * `0`: the node's own height shrank, so its parent has to be updated too;
    /// * `±1`: the node's height is unchanged, so we're done;
    /// * `±2`: the node is rotated towards its lighter side. Whether the rotated subtree ends up
    ///   shorter than before depends on the heavy child's balance. If it's unchanged, we're done.
    pub(super) fn remove_fix(&mut self, mut node: NodeId, mut diff: i8) {
        loop {
            // Rotations below change `node`'s parent, so grab where to go next up front
            let next = self.nodes.parent(node).map(|p| {
                let side = self.nodes.side_of(p, node);
                (p, -side.growth())
            });

            let balance = self.nodes.balance(node) + diff;
            debug_println!("remove_fix: {node:?} balance is now {balance:+}");

            match balance {
                0 => self.nodes.set_balance(node, 0),
                -1 | 1 => {
                    self.nodes.set_balance(node, balance);
                    return;
                }
                _ => {
                    let s = balance / 2;
                    let heavy = Side::heavy(balance);
                    let child = match self.nodes.child(node, heavy) {
                        Some(c) => c,
                        None => broken_invariant!("node {node:?} is heavy on its empty {heavy:?}"),
                    };
                    let child_balance = self.nodes.balance(child);

                    if child_balance == 0 {
                        self.rotate(node, heavy.flip());
                        self.nodes.set_balance(node, s);
                        self.nodes.set_balance(child, -s);
                        return;
                    } else if child_balance == s {
                        self.rotate(node, heavy.flip());
                        self.nodes.set_balance(node, 0);
                        self.nodes.set_balance(child, 0);
                    } else {
                        let grandchild = match self.nodes.child(child, heavy.flip()) {
                            Some(g) => g,
                            None => broken_invariant!("node {child:?} has no inner child"),
                        };
                        let grand_balance = self.nodes.balance(grandchild);

                        self.rotate(child, heavy);
                        self.rotate(node, heavy.flip());

                        let (child_balance, node_balance) = match grand_balance {
                            0 => (0, 0),
                            b if b == s => (0, -s),
                            _ => (s, 0),
                        };
                        self.nodes.set_balance(child, child_balance);
                        self.nodes.set_balance(node, node_balance);
                        self.nodes.set_balance(grandchild, 0);
                    }
                }
            }

            match next {
                Some((p, d)) => {
                    node = p;
                    diff = d;
                }
                None => return,
            }
        }
    }
}
