use crate::mock::Mock;
use crate::param::{Avl, Balancing, Unbalanced};
use crate::SearchTree;

use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(u16, u32),
    Remove(u16),
    Get(u16),
    PopFirst,
    PopLast,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // A small key space, so that removals and overwrites actually find their keys
    let key = 0u16..512;
    let op = prop_oneof![
        50 => (key.clone(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        30 => key.clone().prop_map(Op::Remove),
        16 => key.clone().prop_map(Op::Get),
        2 => Just(Op::PopFirst),
        2 => Just(Op::PopLast),
    ];
    prop::collection::vec(op, 0..=1000)
}

fn run_equivalence<P: Balancing>(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut t: SearchTree<u16, u32, P> = SearchTree::new();
    let mut m: BTreeMap<u16, u32> = BTreeMap::new();

    for op in ops {
        match op {
            Op::Insert(key, value) => {
                prop_assert_eq!(t.insert(key, value), m.insert(key, value));
            }
            Op::Remove(key) => {
                prop_assert_eq!(t.remove(&key), m.remove(&key));
            }
            Op::Get(key) => {
                prop_assert_eq!(t.get(&key), m.get(&key));
                prop_assert_eq!(t.at(&key).ok(), m.get(&key));
            }
            Op::PopFirst => {
                prop_assert_eq!(t.pop_first(), m.pop_first());
            }
            Op::PopLast => {
                prop_assert_eq!(t.pop_last(), m.pop_last());
            }
        }

        prop_assert_eq!(t.len(), m.len());
    }

    t.validate();
    let got: Vec<(u16, u32)> = t.iter().map(|(k, v)| (*k, *v)).collect();
    let expected: Vec<(u16, u32)> = m.iter().map(|(k, v)| (*k, *v)).collect();
    prop_assert_eq!(&got, &expected);

    let got_rev: Vec<u16> = t.keys().rev().copied().collect();
    let expected_rev: Vec<u16> = m.keys().rev().copied().collect();
    prop_assert_eq!(got_rev, expected_rev);

    let owned: Vec<(u16, u32)> = t.into_iter().collect();
    prop_assert_eq!(owned, expected);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_avl(ops in ops_strategy()) {
        run_equivalence::<Avl>(ops)?;
    }

    #[test]
    fn prop_equivalence_unbalanced(ops in ops_strategy()) {
        run_equivalence::<Unbalanced>(ops)?;
    }

    #[test]
    fn prop_height_bound(keys in prop::collection::vec(any::<i32>(), 0..=2000)) {
        let tree: SearchTree<i32, ()> = keys.iter().map(|&k| (k, ())).collect();
        tree.validate();

        let n = tree.len() as f64;
        prop_assert!(tree.height() as f64 <= 1.45 * (n + 2.0).log2());
        prop_assert!(tree.is_balanced());
    }

    #[test]
    fn prop_matches_mock(keys in prop::collection::vec(0u8..64, 0..=300)) {
        let mut t: SearchTree<u8, usize> = SearchTree::new();
        let mut mock = Mock::new();

        for (i, k) in keys.into_iter().enumerate() {
            // every third key is removed instead of inserted
            if i % 3 == 2 {
                prop_assert_eq!(t.remove(&k), mock.remove(&k));
            } else {
                prop_assert_eq!(t.insert(k, i), mock.insert(k, i));
            }
        }

        t.validate();
        prop_assert!(t.iter().eq(mock.iter()));
        prop_assert_eq!(t.first().map(|n| n.key()), mock.first().map(|(k, _)| k));
        prop_assert_eq!(t.last().map(|n| n.key()), mock.last().map(|(k, _)| k));
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<u8> = (1..=7).collect();

    for_each_permutation(&keys, |perm| {
        let mut t: SearchTree<u8, usize> = SearchTree::new();
        for (i, k) in perm.into_iter().enumerate() {
            assert_eq!(t.insert(k, i), None);
            t.validate();
        }

        assert!(t.keys().copied().eq(1..=7));
        assert!(t.height() <= 4);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys: Vec<u8> = (1..=7).collect();

    // Insert in a fixed order, then remove in all permutations.
    let base: SearchTree<u8, u8> = keys.iter().map(|&k| (k, k * 2)).collect();

    for_each_permutation(&keys, |perm| {
        let mut t = base.clone();
        for k in perm {
            assert_eq!(t.remove(&k), Some(k * 2));
            t.validate();
        }
        assert!(t.is_empty());
        assert!(t.root().is_none());
    });
}
