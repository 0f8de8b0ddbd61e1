use crate::{AvlTree, BsTree};

#[test]
fn remove_predecessor_parent_then_reinsert() {
    let mut tree_0 = AvlTree::new();
    assert_eq!(tree_0.insert(8, 'a'), None);
    assert_eq!(tree_0.insert(4, 'b'), None);
    assert_eq!(tree_0.insert(12, 'c'), None);
    assert_eq!(tree_0.insert(2, 'd'), None);
    assert_eq!(tree_0.insert(6, 'e'), None);
    assert_eq!(tree_0.insert(5, 'f'), None);
    assert_eq!(tree_0.remove(&4), Some('b'));
    assert_eq!(tree_0.remove(&8), Some('a'));
    assert_eq!(tree_0.insert(4, 'g'), None);
    {
        let mut iter = tree_0.iter();
        assert_eq!(iter.next(), Some((&2, &'d')));
        assert_eq!(iter.next_back(), Some((&12, &'c')));
        assert_eq!(iter.next(), Some((&4, &'g')));
        assert_eq!(iter.next(), Some((&5, &'f')));
        assert_eq!(iter.next_back(), Some((&6, &'e')));
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }
    tree_0.validate();
}

#[test]
fn pop_until_empty_then_iter() {
    let mut tree_0 = AvlTree::new();
    assert_eq!(tree_0.insert(1, 10_u16), None);
    assert_eq!(tree_0.insert(0, 11), None);
    assert_eq!(tree_0.pop_last(), Some((1, 10)));
    assert_eq!(tree_0.pop_first(), Some((0, 11)));
    assert_eq!(tree_0.pop_first(), None);
    {
        let mut iter = tree_0.iter();
        assert!(iter.next_back().is_none());
        assert!(iter.next().is_none());
    }
    assert_eq!(tree_0.insert(0, 12), None);
    assert_eq!(tree_0[&0], 12);
}

#[test]
fn clone_then_diverge() {
    let mut tree_0 = AvlTree::new();
    for k in [3_u8, 1, 4, 1, 5, 9, 2, 6] {
        tree_0.insert(k, ());
    }
    let mut tree_1 = tree_0.clone();
    assert_eq!(tree_1.remove(&4), Some(()));
    assert_eq!(tree_0.remove(&9), Some(()));
    assert_eq!(tree_1.insert(7, ()), None);
    drop(tree_0);
    assert_eq!(tree_1.get(&4), None);
    assert_eq!(tree_1.get(&9), Some(&()));
    tree_1.clear();
    assert_eq!(tree_1.insert(9, ()), None);
    tree_1.validate();
}

#[test]
fn unbalanced_remove_root_chain() {
    let mut tree_0 = BsTree::new();
    assert_eq!(tree_0.insert(5_u8, 0_u8), None);
    assert_eq!(tree_0.insert(1, 1), None);
    assert_eq!(tree_0.insert(3, 2), None);
    assert_eq!(tree_0.insert(2, 3), None);
    assert_eq!(tree_0.insert(4, 4), None);
    assert_eq!(tree_0.remove(&5), Some(0));
    assert_eq!(tree_0.remove(&4), Some(4));
    assert_eq!(tree_0.remove(&1), Some(1));
    assert!(std::panic::catch_unwind(|| {
        let _ = &tree_0[&1];
    })
    .is_err());
    assert_eq!(tree_0.pop_last(), Some((3, 2)));
    tree_0.validate();
}
