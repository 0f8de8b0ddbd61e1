//! Rotations, and other structural tools used to restore balance after an operation
//!
//! The algorithms that decide *when* to rotate live next to the operations that need them (in
//! `insert` and `remove`); this module only provides the pointer surgery itself. None of the
//! functions here change balance factors, except for [`node_swap`], which moves them along with
//! the nodes.
//!
//! [`node_swap`]: SearchTree::node_swap

use crate::param::Balancing;
use crate::SearchTree;

use super::node::{NodeId, Side};

impl<K, V, P: Balancing> SearchTree<K, V, P> {
    /// Rotates the subtree rooted at `node` to the right, returning the node that took its place
    ///
    /// `node`'s left child (the "pivot") is promoted into `node`'s position -- including as the
    /// root of the whole tree, if `node` was the root -- and `node` becomes the pivot's right
    /// child. The pivot's old right subtree is handed over to be `node`'s new left subtree.
    ///
    /// ```text
    ///        node            pivot
    ///       /    \          /     \
    ///    pivot    c  ==>   a      node
    ///   /    \                   /    \
    ///  a      b                 b      c
    /// ```
    ///
    /// ## Panics
    ///
    /// Panics if `node` has no left child.
    pub(super) fn rotate_right(&mut self, node: NodeId) -> NodeId {
        self.promote_child(node, Side::Left)
    }

    /// Rotates the subtree rooted at `node` to the left, returning the node that took its place
    ///
    /// This is the mirror image of [`rotate_right`](Self::rotate_right): the right child is
    /// promoted.
    ///
    /// ## Panics
    ///
    /// Panics if `node` has no right child.
    pub(super) fn rotate_left(&mut self, node: NodeId) -> NodeId {
        self.promote_child(node, Side::Right)
    }

    /// Rotates in the given direction: [`Side::Right`] is [`rotate_right`], [`Side::Left`] is
    /// [`rotate_left`]
    ///
    /// [`rotate_right`]: Self::rotate_right
    /// [`rotate_left`]: Self::rotate_left
    pub(super) fn rotate(&mut self, node: NodeId, direction: Side) -> NodeId {
        debug_println!("rotate {direction:?} at {node:?}");
        match direction {
            Side::Right => self.rotate_right(node),
            Side::Left => self.rotate_left(node),
        }
    }

    /// (*Internal*) Shared implementation of both rotations, promoting the child on side `from`
    fn promote_child(&mut self, node: NodeId, from: Side) -> NodeId {
        let pivot = match self.nodes.child(node, from) {
            Some(p) => p,
            None => broken_invariant!("cannot rotate {node:?} without a {from:?} child"),
        };

        // 1. The pivot's inner subtree switches sides, becoming a child of `node`
        let inner = self.nodes.child(pivot, from.flip());
        self.nodes.set_child(node, from, inner);
        if let Some(i) = inner {
            self.nodes.set_parent(i, Some(node));
        }

        // 2. The pivot takes `node`'s place under its old parent (or as the root)
        let parent = self.nodes.parent(node);
        self.replace_child(parent, node, Some(pivot));

        // 3. `node` hangs under the pivot
        self.nodes.set_child(pivot, from.flip(), Some(node));
        self.nodes.set_parent(node, Some(pivot));

        pivot
    }

    /// Exchanges the positions of two nodes in the tree, along with their balance factors
    ///
    /// Balance factors describe a *position* in the tree (the shape of the subtrees below it), not
    /// an entry, so they have to stay put while the entries move. This is used by removal to move
    /// a node with two children down into its in-order predecessor's spot, where it has at most
    /// one child.
    pub(super) fn node_swap(&mut self, a: NodeId, b: NodeId) {
        self.swap_positions(a, b);

        if P::REBALANCE && a != b {
            let (na, nb) = self.nodes.get_pair_mut(a, b);
            std::mem::swap(&mut na.balance, &mut nb.balance);
        }
    }
}
