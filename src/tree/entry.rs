//! Wrapper module for [`NodeRef`]

use std::fmt::{self, Debug, Formatter};

use super::node::{NodeId, Nodes};

/// A read-only view of a single node in a [`SearchTree`], returned by [`find`], [`root`],
/// [`first`], or [`last`]
///
/// Conceptually, this type is not too different from `(&'t K, &'t V)`, but it also knows where the
/// node is in the tree: it can step to the node's parent and children, or to the neighbouring
/// entries in key order. This makes it possible to inspect the exact shape of the tree, along with
/// each node's balance factor.
///
/// Two `NodeRef`s are equal if they refer to the same node in the same tree.
///
/// [`SearchTree`]: crate::SearchTree
/// [`find`]: crate::SearchTree::find
/// [`root`]: crate::SearchTree::root
/// [`first`]: crate::SearchTree::first
/// [`last`]: crate::SearchTree::last
pub struct NodeRef<'t, K, V> {
    nodes: &'t Nodes<K, V>,
    id: NodeId,
}

impl<'t, K, V> Clone for NodeRef<'t, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'t, K, V> Copy for NodeRef<'t, K, V> {}

impl<'t, K, V> NodeRef<'t, K, V> {
    pub(super) fn new(nodes: &'t Nodes<K, V>, id: NodeId) -> Self {
        NodeRef { nodes, id }
    }

    fn step(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| NodeRef::new(self.nodes, id))
    }

    /// Returns a reference to the key stored in this node
    pub fn key(&self) -> &'t K {
        self.nodes.key(self.id)
    }

    /// Returns a reference to the value stored in this node
    pub fn value(&self) -> &'t V {
        self.nodes.value(self.id)
    }

    /// Returns the node's balance factor: the height of its right subtree minus the height of its
    /// left subtree
    ///
    /// For [`AvlTree`](crate::AvlTree)s this is always `-1`, `0`, or `1`. Unbalanced trees don't
    /// track it, so it's always zero there.
    pub fn balance(&self) -> i8 {
        self.nodes.balance(self.id)
    }

    pub fn parent(&self) -> Option<Self> {
        self.step(self.nodes.parent(self.id))
    }

    pub fn left(&self) -> Option<Self> {
        self.step(self.nodes.left(self.id))
    }

    pub fn right(&self) -> Option<Self> {
        self.step(self.nodes.right(self.id))
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        self.nodes.left(self.id).is_none() && self.nodes.right(self.id).is_none()
    }

    /// Returns the node with the next-smallest key, if there is one
    pub fn predecessor(&self) -> Option<Self> {
        self.step(self.nodes.predecessor(self.id))
    }

    /// Returns the node with the next-largest key, if there is one
    pub fn successor(&self) -> Option<Self> {
        self.step(self.nodes.successor(self.id))
    }
}

impl<'t, K: Debug, V: Debug> Debug for NodeRef<'t, K, V> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .field("balance", &self.balance())
            .finish()
    }
}

impl<'t, K, V> PartialEq for NodeRef<'t, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.nodes, other.nodes)
    }
}

impl<'t, K, V> Eq for NodeRef<'t, K, V> {}
