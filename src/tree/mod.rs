//! Wrapper module containing the tree itself
//!
//! The pieces are split up roughly by algorithm:
//!
//! * this module: the [`SearchTree`] type, lookups, and the structural operations shared by every
//!   parameterization (swapping two nodes' positions, detaching a node, whole-tree queries)
//! * [`fix`]: rotations and the balance-aware node swap
//! * [`insert`]: insertion and the AVL insertion fix-up walk
//! * [`remove`]: removal and the AVL removal fix-up walk
//! * [`iter`] and [`entry`]: read-only views into the tree

use crate::error::{Error, Result};
use crate::param::{self, Balancing};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

mod entry;
mod fix;
mod insert;
mod iter;
mod node;
mod remove;
#[cfg(test)]
mod tests;

pub use entry::NodeRef;
pub use iter::{IntoIter, Iter, Keys, Values};

use node::{NodeId, Nodes, Side};

/// An ordered map, stored as a binary search tree
///
/// Each entry of the map is a node in the tree. All keys in a node's left subtree are less than
/// its key, and all keys in its right subtree are greater. Keys are unique: inserting a key that's
/// already present replaces its value in-place.
///
/// The parameter `P` decides whether the tree keeps itself balanced. With [`param::Avl`] (the
/// default) every node tracks the height difference between its two subtrees, and insertion and
/// removal finish with a walk back up towards the root that repairs any node whose subtrees
/// differ in height by two -- using one rotation or two. The walk stops as soon as a subtree's
/// height is the same as before the operation, so the amortized work is constant, and the tree's
/// height stays within about `1.44 * log2(n)`.
///
/// With [`param::Unbalanced`], the tree is a plain binary search tree, and no work is done to
/// limit its height.
///
/// ## Examples
///
/// ```
/// use aspen::{AvlTree, Error};
///
/// let mut tree = AvlTree::new();
/// for k in [5, 3, 8, 1, 4] {
///     tree.insert(k, k * 10);
/// }
///
/// assert_eq!(tree.len(), 5);
/// assert_eq!(tree.get(&4), Some(&40));
/// assert_eq!(tree.remove(&3), Some(30));
/// assert_eq!(tree.at(&3), Err(Error::KeyNotFound));
///
/// let in_order: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
/// assert_eq!(in_order, [1, 4, 5, 8]);
/// ```
pub struct SearchTree<K, V, P = param::Avl> {
    nodes: Nodes<K, V>,
    root: Option<NodeId>,
    len: usize,
    marker: PhantomData<P>,
}

impl<K, V, P: Balancing> SearchTree<K, V, P> {
    /// Creates a new, empty `SearchTree`
    ///
    /// Does not allocate until the first insertion.
    pub const fn new() -> Self {
        SearchTree {
            nodes: Nodes::new(),
            root: None,
            len: 0,
            marker: PhantomData,
        }
    }

    /// Returns the number of entries in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no entries
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every entry from the tree
    ///
    /// Nodes are released children-first, each exactly once. The tree can be reused afterwards.
    pub fn clear(&mut self) {
        for id in self.post_order() {
            drop(self.nodes.recycle(id));
        }

        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns a reference to the root node, if the tree isn't empty
    ///
    /// Together with [`NodeRef::left`] and [`NodeRef::right`], this allows inspecting the shape
    /// of the tree.
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.root.map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Returns the node with the smallest key, if there is one
    pub fn first(&self) -> Option<NodeRef<'_, K, V>> {
        self.first_id().map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Returns the node with the largest key, if there is one
    pub fn last(&self) -> Option<NodeRef<'_, K, V>> {
        self.last_id().map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Returns an iterator over the entries of the tree, in ascending key order
    ///
    /// The iterator steps from each node to its in-order successor, starting at the minimum; it
    /// is also double-ended, stepping from the maximum to each predecessor.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.nodes, self.first_id(), self.last_id(), self.len)
    }

    /// Returns an iterator over the keys of the tree, in ascending order
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the tree, in ascending order of their keys
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns the height of the tree: the number of nodes on the longest path from the root to a
    /// leaf
    ///
    /// An empty tree has a height of zero. This is computed by visiting every node, so it's O(n).
    pub fn height(&self) -> usize {
        match self.root {
            None => 0,
            Some(r) => self.subtree_heights()[r.idx()],
        }
    }

    /// Returns true if, at every node, the heights of the two subtrees differ by at most one
    ///
    /// This is checked from the shape of the tree alone, without consulting the stored balance
    /// factors, so it's meaningful for unbalanced trees too. Always true for [`param::Avl`].
    pub fn is_balanced(&self) -> bool {
        let heights = self.subtree_heights();
        let height_of = |id: Option<NodeId>| id.map(|c| heights[c.idx()]).unwrap_or(0);

        self.post_order().into_iter().all(|id| {
            let l = height_of(self.nodes.left(id));
            let r = height_of(self.nodes.right(id));
            l.abs_diff(r) <= 1
        })
    }

    /// Returns true if every leaf of the tree is at the same depth
    ///
    /// This doesn't require the tree to be full -- a node may have just one child -- only that no
    /// path from the root to a leaf is longer than another. An empty tree trivially satisfies
    /// this.
    pub fn has_uniform_leaf_depth(&self) -> bool {
        let mut leaf_depth = None;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((id, depth)) = stack.pop() {
            let (left, right) = (self.nodes.left(id), self.nodes.right(id));
            if left.is_none() && right.is_none() {
                match leaf_depth {
                    None => leaf_depth = Some(depth),
                    Some(d) if d != depth => return false,
                    Some(_) => (),
                }
            }

            stack.extend(left.map(|c| (c, depth + 1)));
            stack.extend(right.map(|c| (c, depth + 1)));
        }

        true
    }

    /// (*Internal*) Returns every node in the tree in post-order -- i.e. each node after both of
    /// its children
    ///
    /// Uses an explicit stack, because unbalanced trees can be as deep as they are large.
    fn post_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();

        // Visiting in (node, right, left) order and reversing gives (left, right, node)
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes.left(id));
            stack.extend(self.nodes.right(id));
        }

        out.reverse();
        out
    }

    /// (*Internal*) Returns the height of the subtree rooted at each node, indexed by
    /// [`NodeId::idx`]
    ///
    /// Slots that don't hold a live node have a height of zero.
    fn subtree_heights(&self) -> Vec<usize> {
        let mut heights = vec![0; self.nodes.slots()];
        for id in self.post_order() {
            let l = self.nodes.left(id).map(|c| heights[c.idx()]).unwrap_or(0);
            let r = self.nodes.right(id).map(|c| heights[c.idx()]).unwrap_or(0);
            heights[id.idx()] = 1 + l.max(r);
        }
        heights
    }

    fn first_id(&self) -> Option<NodeId> {
        self.root.map(|r| self.nodes.subtree_min(r))
    }

    fn last_id(&self) -> Option<NodeId> {
        self.root.map(|r| self.nodes.subtree_max(r))
    }

    /// (*Internal*) Makes `new` take the place of `old` as a child of `parent`, or as the root if
    /// `parent` is `None`
    ///
    /// `new`'s parent link is updated to match. `old`'s own links are left untouched.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let side = self.nodes.side_of(p, old);
                self.nodes.set_child(p, side, new);
            }
        }

        if let Some(n) = new {
            self.nodes.set_parent(n, parent);
        }
    }

    /// (*Internal*) Exchanges the positions of two nodes in the tree, leaving every other node's
    /// place unchanged
    ///
    /// Afterwards, `a` has the parent and children that `b` had and vice versa. This correctly
    /// handles the case where one node is the parent of the other. Balance factors are *not*
    /// touched; see [`node_swap`] for the balance-aware version.
    ///
    /// [`node_swap`]: Self::node_swap
    fn swap_positions(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }

        let (a_parent, a_left, a_right) = self.links(a);
        let (b_parent, b_left, b_right) = self.links(b);
        let a_side = self.nodes.side_in_parent(a);
        let b_side = self.nodes.side_in_parent(b);

        // If `a` and `b` are adjacent, the copied links would point a node at itself; those have
        // to point at the other node instead.
        let fix = |link: Option<NodeId>| match link {
            Some(n) if n == a => Some(b),
            Some(n) if n == b => Some(a),
            other => other,
        };

        {
            let (na, nb) = self.nodes.get_pair_mut(a, b);
            (na.parent, na.left, na.right) = (fix(b_parent), fix(b_left), fix(b_right));
            (nb.parent, nb.left, nb.right) = (fix(a_parent), fix(a_left), fix(a_right));
        }

        // Now point the neighbours back at the right nodes. Links between `a` and `b` are already
        // correct from above.
        for (this, other, parent, side) in [(a, b, b_parent, b_side), (b, a, a_parent, a_side)] {
            for child in [self.nodes.left(this), self.nodes.right(this)].into_iter().flatten() {
                if child != other {
                    self.nodes.set_parent(child, Some(this));
                }
            }

            match (fix(parent), side) {
                (None, _) => self.root = Some(this),
                (Some(p), Some(s)) if p != other => self.nodes.set_child(p, s, Some(this)),
                _ => (),
            }
        }
    }

    fn links(&self, id: NodeId) -> (Option<NodeId>, Option<NodeId>, Option<NodeId>) {
        (self.nodes.parent(id), self.nodes.left(id), self.nodes.right(id))
    }

    /// (*Internal*) Unlinks a node with at most one child from the tree, putting its child (if
    /// any) in its place, and releases it
    ///
    /// The length of the tree is updated.
    ///
    /// ## Panics
    ///
    /// Panics if the node has two children.
    fn detach(&mut self, id: NodeId) -> node::Node<K, V> {
        let child = match (self.nodes.left(id), self.nodes.right(id)) {
            (Some(_), Some(_)) => broken_invariant!("cannot detach {id:?}, which has two children"),
            (l, r) => l.or(r),
        };

        let parent = self.nodes.parent(id);
        self.replace_child(parent, id, child);
        self.len -= 1;
        self.nodes.recycle(id)
    }
}

impl<K: Ord, V, P: Balancing> SearchTree<K, V, P> {
    /// Finds the node with the given key, if it's in the tree
    ///
    /// The returned [`NodeRef`] can be used to step to the neighbouring entries, or to inspect the
    /// node's place in the tree.
    pub fn find<Q>(&self, key: &Q) -> Option<NodeRef<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key).map(|id| NodeRef::new(&self.nodes, id))
    }

    /// Returns a reference to the value for the key, if it's in the tree
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key).map(|id| self.nodes.value(id))
    }

    /// Returns a mutable reference to the value for the key, if it's in the tree
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find_id(key)?;
        Some(&mut self.nodes.get_mut(id).value)
    }

    /// Returns true if the tree contains an entry for the key
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_id(key).is_some()
    }

    /// Returns a reference to the value for the key, or [`Error::KeyNotFound`] if there isn't one
    ///
    /// This is the fallible counterpart to indexing with `tree[&key]`, which panics instead.
    pub fn at<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value for the key, or [`Error::KeyNotFound`] if there
    /// isn't one
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// (*Internal*) Standard binary search down from the root
    fn find_id<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(id) = current {
            current = match key.cmp(self.nodes.key(id).borrow()) {
                Ordering::Equal => return Some(id),
                Ordering::Less => self.nodes.left(id),
                Ordering::Greater => self.nodes.right(id),
            };
        }
        None
    }
}

impl<K, V, P: Balancing> Default for SearchTree<K, V, P> {
    fn default() -> Self {
        SearchTree::new()
    }
}

/// Cloning copies the node store wholesale, so the clone has exactly the same shape
impl<K: Clone, V: Clone, P> Clone for SearchTree<K, V, P> {
    fn clone(&self) -> Self {
        SearchTree {
            nodes: self.nodes.clone(),
            root: self.root,
            len: self.len,
            marker: PhantomData,
        }
    }
}

impl<K: Debug, V: Debug, P: Balancing> Debug for SearchTree<K, V, P> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Trees are equal if they contain the same entries, regardless of shape
impl<K: PartialEq, V: PartialEq, P: Balancing> PartialEq for SearchTree<K, V, P> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, P: Balancing> Eq for SearchTree<K, V, P> {}

impl<K, Q, V, P> Index<&Q> for SearchTree<K, V, P>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
    P: Balancing,
{
    type Output = V;

    /// Returns a reference to the value for the key
    ///
    /// ## Panics
    ///
    /// Panics if the key is not present in the tree. Use [`SearchTree::at`] for a fallible
    /// version.
    #[track_caller]
    fn index(&self, key: &Q) -> &V {
        match self.at(key) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<K, Q, V, P> IndexMut<&Q> for SearchTree<K, V, P>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
    P: Balancing,
{
    #[track_caller]
    fn index_mut(&mut self, key: &Q) -> &mut V {
        match self.at_mut(key) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<K: Ord, V, P: Balancing> FromIterator<(K, V)> for SearchTree<K, V, P> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = SearchTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V, P: Balancing> Extend<(K, V)> for SearchTree<K, V, P> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'t, K, V, P: Balancing> IntoIterator for &'t SearchTree<K, V, P> {
    type Item = (&'t K, &'t V);
    type IntoIter = Iter<'t, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, P: Balancing> IntoIterator for SearchTree<K, V, P> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Consumes the tree, producing its entries in ascending key order
    fn into_iter(self) -> Self::IntoIter {
        let order: Vec<NodeId> = self.iter().ids().collect();
        IntoIter::new(self.nodes, order)
    }
}

#[cfg(any(test, feature = "fuzz"))]
macro_rules! valid_assert {
    ($id:ident: $cond:expr) => {
        if !$cond {
            panic!(
                concat!("assertion failed: `", stringify!($cond), "` at node {:?}"),
                $id
            );
        }
    };
}

#[cfg(any(test, feature = "fuzz"))]
macro_rules! valid_assert_eq {
    ($id:ident: $lhs:expr, $rhs:expr) => {
        let left = $lhs;
        let right = $rhs;
        if left != right {
            panic!(
                concat!(
                    "assertion failed: `",
                    stringify!($lhs == $rhs),
                    "` at node {:?}:\n",
                    " left: {:?}\n",
                    "right: {:?}",
                ),
                $id, left, right,
            );
        }
    };
}

#[cfg(any(test, feature = "fuzz"))]
impl<K: Ord, V, P: Balancing> SearchTree<K, V, P> {
    /// (*Test-only*) Validates the tree, panicking if any structural invariant is broken
    ///
    /// This checks that parent and child links agree, that keys are in strictly increasing order,
    /// that the number of reachable nodes matches [`len`](Self::len), and -- for balanced trees --
    /// that every stored balance factor is exactly the height difference of the node's subtrees
    /// and within `-1..=1`.
    ///
    /// This method basically exists for tests so that we can quickly narrow down exactly when a
    /// failure is introduced in a particular test case.
    pub fn validate(&self) {
        if let Some(root) = self.root {
            valid_assert_eq!(root: self.nodes.parent(root), None);
        }

        let heights = self.subtree_heights();
        let height_of = |id: Option<NodeId>| id.map(|c| heights[c.idx()]).unwrap_or(0) as isize;

        let post_order = self.post_order();
        valid_assert_eq!(post_order: post_order.len(), self.len);

        for id in post_order {
            for side in [Side::Left, Side::Right] {
                if let Some(c) = self.nodes.child(id, side) {
                    valid_assert_eq!(id: self.nodes.parent(c), Some(id));
                    let ord = self.nodes.key(c).cmp(self.nodes.key(id));
                    match side {
                        Side::Left => valid_assert!(id: ord == Ordering::Less),
                        Side::Right => valid_assert!(id: ord == Ordering::Greater),
                    }
                }
            }

            let balance = self.nodes.balance(id);
            if P::REBALANCE {
                let diff = height_of(self.nodes.right(id)) - height_of(self.nodes.left(id));
                valid_assert_eq!(id: balance as isize, diff);
                valid_assert!(id: (-1..=1).contains(&balance));
            } else {
                valid_assert_eq!(id: balance, 0);
            }
        }

        let keys: Vec<&K> = self.keys().collect();
        let count = keys.len();
        valid_assert_eq!(count: count, self.len);
        for position in 1..keys.len() {
            valid_assert!(position: keys[position - 1] < keys[position]);
        }
    }
}
