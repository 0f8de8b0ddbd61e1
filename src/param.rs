//! Parameterization for [`SearchTree`]
//!
//! There are only two parameterization options for a [`SearchTree`]: rebalancing as an AVL tree,
//! or no rebalancing at all. Both share the same node layout and the same structural code
//! (searching, predecessor/successor stepping, swapping and detaching nodes); the parameter only
//! decides whether the fix-up walks run after each insertion and removal.
//!
//! This module exports the types [`Avl`] and [`Unbalanced`], which can be used as
//! parameterization for the [`SearchTree`], like:
//!
//! ```
//! use aspen::param::Unbalanced;
//! use aspen::SearchTree;
//!
//! type MyTree<K, V> = SearchTree<K, V, Unbalanced>;
//! ```
//!
//! The default configuration is [`Avl`]. Both configuration types implement [`Balancing`] -- the
//! trait can't be implemented outside of this crate, but it's there to help with errors and
//! documentation.
//!
//! [`SearchTree`]: crate::SearchTree

use std::marker::PhantomData;

/// Marker type to keep the [`SearchTree`](crate::SearchTree) height-balanced (*default*)
///
/// Each node's balance factor is kept exact, and insertions and removals are followed by the AVL
/// fix-up walk. The height of the tree never exceeds roughly `1.44 * log2(n + 2)`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Avl(PhantomData<()>);

/// Marker type for a plain, unbalanced [`SearchTree`](crate::SearchTree)
///
/// Balance factors are left at zero and never consulted. The height of the tree depends entirely
/// on the order in which keys are inserted; sorted input degrades it into a linked list.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Unbalanced(PhantomData<()>);

/// Trait that [`SearchTree`] parameterizations are required to implement
///
/// This trait is made public to help with error messages and for your curiosity. It cannot be
/// implemented outside of this crate.
///
/// [`SearchTree`]: crate::SearchTree
pub trait Balancing: sealed::YouCantImplementThis {
    /// Marker for whether `Self` is `Avl` -- i.e. whether balance factors are maintained and the
    /// fix-up walks run
    const REBALANCE: bool;
}

impl Balancing for Avl {
    const REBALANCE: bool = true;
}

impl Balancing for Unbalanced {
    const REBALANCE: bool = false;
}

pub(crate) mod sealed {
    /// It's a supertrait you (the user of this crate) can't implement
    pub trait YouCantImplementThis {}

    impl YouCantImplementThis for super::Avl {}
    impl YouCantImplementThis for super::Unbalanced {}
}
