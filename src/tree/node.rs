//! Management of nodes
//!
//! Every node of a [`SearchTree`] lives in the tree's [`RecycleVec`], and refers to its
//! neighbours by [`NodeId`]. This keeps ownership simple: the arena owns all of the nodes, the
//! `left`/`right` links describe the (strictly tree-shaped) structure, and the `parent` link is
//! only ever used to walk back up the tree. Nothing is freed by following a link, so there is no
//! way for a parent pointer to cause a double free.
//!
//! The accessors here are implemented directly on `RecycleVec<Node<K, V>>` (aliased as
//! [`Nodes`]) rather than on the tree, so that the algorithms can hold a borrow of the node store
//! separately from the tree's root and length fields.
//!
//! [`SearchTree`]: super::SearchTree

use crate::recycle::{EntryId, RecycleVec};

#[cfg(test)]
use std::fmt::{self, Debug, Formatter};

/// Identifier of a node within its tree's [`Nodes`]
pub(super) type NodeId = EntryId;

/// The node store for a tree with keys `K` and values `V`
pub(super) type Nodes<K, V> = RecycleVec<Node<K, V>>;

/// A single entry in the tree
#[derive(Clone)]
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) parent: Option<NodeId>,
    pub(super) left: Option<NodeId>,
    pub(super) right: Option<NodeId>,
    /// The height of the right subtree minus the height of the left subtree
    ///
    /// Only maintained for [`Avl`] trees, where it is always within `-1..=1` outside of the fix-up
    /// walks. For unbalanced trees it stays zero.
    ///
    /// [`Avl`]: crate::param::Avl
    pub(super) balance: i8,
}

#[cfg(test)]
impl<K: Debug, V: Debug> Debug for Node<K, V> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} => {:?} [bal {:+}, parent {:?}, left {:?}, right {:?}]",
            self.key, self.value, self.balance, self.parent, self.left, self.right,
        )
    }
}

impl<K, V> Node<K, V> {
    /// Creates a new, unlinked node with a balance of zero
    pub(super) fn new(key: K, value: V, parent: Option<NodeId>) -> Self {
        Node {
            key,
            value,
            parent,
            left: None,
            right: None,
            balance: 0,
        }
    }
}

/// Which child of a node we're talking about
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the other side
    pub(super) fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// The change in a node's balance factor when the subtree on this side grows by one level
    ///
    /// Balance is `height(right) - height(left)`, so growth on the left is `-1` and growth on the
    /// right is `+1`. Shrinking is the negation.
    pub(super) fn growth(self) -> i8 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }

    /// The side that is taller, given a nonzero balance factor
    pub(super) fn heavy(balance: i8) -> Side {
        debug_assert!(balance != 0);
        match balance < 0 {
            true => Side::Left,
            false => Side::Right,
        }
    }
}

impl<K, V> Nodes<K, V> {
    pub(super) fn key(&self, id: NodeId) -> &K {
        &self.get(id).key
    }

    pub(super) fn value(&self, id: NodeId) -> &V {
        &self.get(id).value
    }

    pub(super) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).parent
    }

    pub(super) fn left(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).left
    }

    pub(super) fn right(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).right
    }

    pub(super) fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left(id),
            Side::Right => self.right(id),
        }
    }

    pub(super) fn balance(&self, id: NodeId) -> i8 {
        self.get(id).balance
    }

    pub(super) fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.get_mut(id).parent = parent;
    }

    pub(super) fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        let node = self.get_mut(id);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    pub(super) fn set_balance(&mut self, id: NodeId, balance: i8) {
        self.get_mut(id).balance = balance;
    }

    /// Adds `diff` to the balance of the node, returning the new balance
    pub(super) fn update_balance(&mut self, id: NodeId, diff: i8) -> i8 {
        let node = self.get_mut(id);
        node.balance += diff;
        node.balance
    }

    /// Returns which side of `parent` the node `child` is on
    ///
    /// ## Panics
    ///
    /// Panics if `child` isn't actually a child of `parent`.
    pub(super) fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        let p = self.get(parent);
        if p.left == Some(child) {
            Side::Left
        } else if p.right == Some(child) {
            Side::Right
        } else {
            broken_invariant!("node {child:?} is not a child of {parent:?}")
        }
    }

    /// Returns which side of its parent the node is on, or `None` if it's the root
    pub(super) fn side_in_parent(&self, id: NodeId) -> Option<Side> {
        self.parent(id).map(|p| self.side_of(p, id))
    }

    /// Returns the leftmost node in the subtree rooted at `id`
    pub(super) fn subtree_min(&self, mut id: NodeId) -> NodeId {
        while let Some(l) = self.left(id) {
            id = l;
        }
        id
    }

    /// Returns the rightmost node in the subtree rooted at `id`
    pub(super) fn subtree_max(&self, mut id: NodeId) -> NodeId {
        while let Some(r) = self.right(id) {
            id = r;
        }
        id
    }

    /// Returns the in-order predecessor of the node, if there is one
    ///
    /// If the node has a left subtree, that's the subtree's maximum. Otherwise we climb until we
    /// step up out of a right child; that parent is the predecessor.
    pub(super) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Left)
    }

    /// Returns the in-order successor of the node, if there is one
    pub(super) fn successor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Right)
    }

    /// Shared implementation of [`predecessor`] and [`successor`]: the next node in the direction
    /// of `side`
    ///
    /// [`predecessor`]: Self::predecessor
    /// [`successor`]: Self::successor
    fn neighbour(&self, id: NodeId, side: Side) -> Option<NodeId> {
        if let Some(c) = self.child(id, side) {
            return Some(match side {
                Side::Left => self.subtree_max(c),
                Side::Right => self.subtree_min(c),
            });
        }

        let mut current = id;
        while let Some(p) = self.parent(current) {
            if self.child(p, side.flip()) == Some(current) {
                return Some(p);
            }
            current = p;
        }

        None
    }
}
