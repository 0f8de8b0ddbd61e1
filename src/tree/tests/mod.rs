//! Various collections of unit tests
//!
//! The bulk of the "we're confident this works" comes from fuzzing and the property tests, but
//! each failure from fuzzing is used as a new unit test, so there's a few of them here as well.

use crate::param::Balancing;
use crate::{NodeRef, SearchTree};
use std::fmt::Debug;

/// Regressions, written in the format the fuzzing harness prints its failing inputs in
mod basic;
/// Randomized equivalence tests against `BTreeMap`, plus exhaustive insertion and removal orders
mod prop;
/// Direct tests of the structural helpers: rotations, node swaps, and in-order stepping
mod structure;

/// Renders the shape of the tree as `key{balance:+}`, with each node's children in brackets
///
/// Missing children are written as `_`; leaves have no brackets. For example, `20+1[10+0, 30-1[25+0,
/// _]]` is a root of 20 with a leaf on its left and a single left child under 30.
fn shape<K: Debug, V, P: Balancing>(tree: &SearchTree<K, V, P>) -> String {
    fn render<K: Debug, V>(node: Option<NodeRef<K, V>>) -> String {
        let n = match node {
            None => return "_".to_owned(),
            Some(n) => n,
        };

        let label = format!("{:?}{:+}", n.key(), n.balance());
        match n.is_leaf() {
            true => label,
            false => format!("{label}[{}, {}]", render(n.left()), render(n.right())),
        }
    }

    match tree.root() {
        None => String::new(),
        root => render(root),
    }
}
