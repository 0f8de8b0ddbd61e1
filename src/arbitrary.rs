//! `Arbitrary` support for [`SearchTree`]s, used by the fuzzing harness
//!
//! A tree is built by inserting arbitrary entries one at a time, so every generated tree is one
//! that could have been reached through the public API.

use ::arbitrary::{Arbitrary, Result, Unstructured};

use crate::param::Balancing;
use crate::SearchTree;

impl<'a, K, V, P> Arbitrary<'a> for SearchTree<K, V, P>
where
    K: Arbitrary<'a> + Ord,
    V: Arbitrary<'a>,
    P: Balancing,
{
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        u.arbitrary_iter::<(K, V)>()?.collect()
    }

    fn arbitrary_take_rest(u: Unstructured<'a>) -> Result<Self> {
        u.arbitrary_take_rest_iter::<(K, V)>()?.collect()
    }
}
