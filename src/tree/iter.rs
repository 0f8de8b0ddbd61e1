//! Wrapper module for [`SearchTree`](crate::SearchTree) iterator types -- [`Iter`], [`IntoIter`],
//! and the key- or value-only [`Keys`] and [`Values`]

use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;
use std::vec;

use super::node::{NodeId, Nodes};

/// An iterator over the entries of a [`SearchTree`], in ascending key order
///
/// This iterator is double-ended: the front steps from the minimum to each in-order successor, and
/// the back from the maximum to each predecessor. The two ends never cross.
///
/// This type is produced by the [`iter`] method on [`SearchTree`], or by iterating over a
/// `&SearchTree`.
///
/// [`SearchTree`]: crate::SearchTree
/// [`iter`]: crate::SearchTree::iter
pub struct Iter<'t, K, V> {
    nodes: &'t Nodes<K, V>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'t, K, V> Iter<'t, K, V> {
    pub(super) fn new(
        nodes: &'t Nodes<K, V>,
        front: Option<NodeId>,
        back: Option<NodeId>,
        remaining: usize,
    ) -> Self {
        Iter {
            nodes,
            front,
            back,
            remaining,
        }
    }

    /// Converts the iterator into one over the ids of the nodes it would have visited
    pub(super) fn ids(mut self) -> impl 't + Iterator<Item = NodeId> {
        std::iter::from_fn(move || self.next_id())
    }

    fn next_id(&mut self) -> Option<NodeId> {
        if self.remaining == 0 {
            return None;
        }

        let id = self.front?;
        self.remaining -= 1;
        self.front = match self.remaining {
            0 => None,
            _ => self.nodes.successor(id),
        };
        Some(id)
    }

    fn next_back_id(&mut self) -> Option<NodeId> {
        if self.remaining == 0 {
            return None;
        }

        let id = self.back?;
        self.remaining -= 1;
        self.back = match self.remaining {
            0 => None,
            _ => self.nodes.predecessor(id),
        };
        Some(id)
    }

    fn entry(&self, id: NodeId) -> (&'t K, &'t V) {
        let node = self.nodes.get(id);
        (&node.key, &node.value)
    }
}

impl<'t, K, V> Clone for Iter<'t, K, V> {
    fn clone(&self) -> Self {
        Iter::new(self.nodes, self.front, self.back, self.remaining)
    }
}

impl<'t, K: Debug, V: Debug> Debug for Iter<'t, K, V> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'t, K, V> Iterator for Iter<'t, K, V> {
    type Item = (&'t K, &'t V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next_id()?;
        Some(self.entry(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'t, K, V> DoubleEndedIterator for Iter<'t, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.next_back_id()?;
        Some(self.entry(id))
    }
}

impl<'t, K, V> ExactSizeIterator for Iter<'t, K, V> {}
impl<'t, K, V> FusedIterator for Iter<'t, K, V> {}

/// An iterator over the keys of a [`SearchTree`](crate::SearchTree), in ascending order
///
/// This type is produced by the [`keys`](crate::SearchTree::keys) method.
#[derive(Clone)]
pub struct Keys<'t, K, V> {
    pub(super) inner: Iter<'t, K, V>,
}

impl<'t, K, V> Iterator for Keys<'t, K, V> {
    type Item = &'t K;

    fn next(&mut self) -> Option<&'t K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'t, K, V> DoubleEndedIterator for Keys<'t, K, V> {
    fn next_back(&mut self) -> Option<&'t K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<'t, K, V> ExactSizeIterator for Keys<'t, K, V> {}
impl<'t, K, V> FusedIterator for Keys<'t, K, V> {}

/// An iterator over the values of a [`SearchTree`](crate::SearchTree), in ascending order of their
/// keys
///
/// This type is produced by the [`values`](crate::SearchTree::values) method.
#[derive(Clone)]
pub struct Values<'t, K, V> {
    pub(super) inner: Iter<'t, K, V>,
}

impl<'t, K, V> Iterator for Values<'t, K, V> {
    type Item = &'t V;

    fn next(&mut self) -> Option<&'t V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'t, K, V> DoubleEndedIterator for Values<'t, K, V> {
    fn next_back(&mut self) -> Option<&'t V> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<'t, K, V> ExactSizeIterator for Values<'t, K, V> {}
impl<'t, K, V> FusedIterator for Values<'t, K, V> {}

/// An owning iterator over the entries of a [`SearchTree`](crate::SearchTree), in ascending key
/// order
///
/// The order is fixed when the iterator is created, and each node is released as it's yielded.
/// Any entries left when the iterator is dropped are dropped with it.
pub struct IntoIter<K, V> {
    nodes: Nodes<K, V>,
    order: vec::IntoIter<NodeId>,
}

impl<K, V> IntoIter<K, V> {
    pub(super) fn new(nodes: Nodes<K, V>, order: Vec<NodeId>) -> Self {
        IntoIter {
            nodes,
            order: order.into_iter(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let node = self.nodes.recycle(self.order.next()?);
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        let node = self.nodes.recycle(self.order.next_back()?);
        Some((node.key, node.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}
