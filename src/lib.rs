//! # Aspen -- an ordered map on a height-balanced binary tree
//!
//! This crate primarily exports a single type -- [`SearchTree`] -- which is a binary search tree
//! storing key-value pairs in key order. By default the tree is an AVL tree: every insertion and
//! removal is followed by an upward "fix-up" walk that restores the balance of each subtree with
//! at most a couple of rotations, so that lookups, insertions and removals are all O(log n).
//!
//! ### Notable features
//!
//! * Nodes live in a single slot arena; parent links are plain indices into that arena, so the
//!   ownership of nodes is strictly tree-shaped and tearing the tree down can never double-free.
//! * The balancing strategy is a type parameter. [`param::Avl`] is the default;
//!   [`param::Unbalanced`] gives a plain binary search tree that shares all of the structural
//!   code (see the [`BsTree`] alias).
//! * Iteration is done by stepping from node to in-order successor (or predecessor, from the
//!   back), so iterators are lazy and allocation-free.
//! * [`NodeRef`]s expose the shape of the tree (children, parent, balance factor) for read-only
//!   inspection.
//!
//! ```
//! use aspen::AvlTree;
//!
//! let mut tree: AvlTree<u32, &str> = AvlTree::new();
//! tree.insert(10, "ten");
//! tree.insert(20, "twenty");
//! tree.insert(30, "thirty");
//!
//! // Inserting in ascending order triggered a rotation:
//! assert_eq!(tree.root().map(|n| *n.key()), Some(20));
//! assert_eq!(tree.at(&30), Ok(&"thirty"));
//! assert!(tree.at(&40).is_err());
//!
//! let keys: Vec<_> = tree.keys().copied().collect();
//! assert_eq!(keys, [10, 20, 30]);
//! ```
//!
//! ### Feature flags
//!
//! * `serde` -- implements `Serialize` and `Deserialize` for [`SearchTree`], as a map
//! * `fuzz` -- implements `Arbitrary` for [`SearchTree`] and exposes the [`mock`] module and
//!   `SearchTree::validate`, for use by the fuzzing harness
//!
//! ### Naming
//!
//! Quaking aspens grow as huge clonal colonies, every trunk sprouting from one shared root
//! system. Every node here sprouts from one shared arena.

#![forbid(unsafe_code)]

#[macro_use]
mod macros;

pub mod error;
pub mod param;

#[cfg(feature = "fuzz")]
mod arbitrary;
#[cfg(any(test, feature = "fuzz"))]
pub mod mock;
mod recycle;
#[cfg(feature = "serde")]
mod serde;
mod tree;

pub use error::{Error, Result};
pub use tree::{IntoIter, Iter, Keys, NodeRef, SearchTree, Values};

/// An AVL tree: a [`SearchTree`] that rebalances after every insertion and removal
pub type AvlTree<K, V> = SearchTree<K, V, param::Avl>;

/// A plain, unbalanced binary search tree
///
/// Operations are O(height) and the height is only bounded by the number of entries. This type
/// mostly exists as a baseline against which the balanced variant can be compared.
pub type BsTree<K, V> = SearchTree<K, V, param::Unbalanced>;
