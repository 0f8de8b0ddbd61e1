use super::shape;
use crate::tree::NodeId;
use crate::BsTree;

fn bst_from(keys: &[i32]) -> BsTree<i32, ()> {
    keys.iter().map(|&k| (k, ())).collect()
}

fn id(tree: &BsTree<i32, ()>, key: i32) -> NodeId {
    match tree.find_id(&key) {
        Some(id) => id,
        None => panic!("key {key} not in tree"),
    }
}

#[test]
fn rotate_right_then_left_round_trips() {
    let mut tree = bst_from(&[20, 10, 30, 5, 15]);
    let before = shape(&tree);

    let top = tree.rotate_right(id(&tree, 20));
    assert_eq!(top, id(&tree, 10));
    assert_eq!(shape(&tree), "10+0[5+0, 20+0[15+0, 30+0]]");
    tree.validate();

    let top = tree.rotate_left(id(&tree, 10));
    assert_eq!(top, id(&tree, 20));
    assert_eq!(shape(&tree), before);
    tree.validate();
}

#[test]
fn rotate_below_root() {
    let mut tree = bst_from(&[20, 10, 30, 5, 15]);

    tree.rotate_left(id(&tree, 10));
    assert_eq!(shape(&tree), "20+0[15+0[10+0[5+0, _], _], 30+0]");
    tree.validate();
}

#[test]
#[should_panic(expected = "internal error")]
fn rotate_without_pivot_panics() {
    let mut tree = bst_from(&[20, 10]);
    tree.rotate_left(id(&tree, 20));
}

#[test]
fn swap_adjacent_positions() {
    let mut tree = bst_from(&[20, 10, 30, 5]);
    let (a, b) = (id(&tree, 20), id(&tree, 10));

    tree.swap_positions(a, b);
    // Keys are now out of order, so only the links are checked
    assert_eq!(shape(&tree), "10+0[20+0[5+0, _], 30+0]");
    assert_eq!(tree.nodes.parent(id(&tree, 30)), Some(b));
    assert_eq!(tree.nodes.parent(a), Some(b));
    assert_eq!(tree.nodes.parent(b), None);

    tree.swap_positions(b, a);
    assert_eq!(shape(&tree), "20+0[10+0[5+0, _], 30+0]");
    tree.validate();
}

#[test]
fn swap_distant_positions() {
    let mut tree = bst_from(&[20, 10, 30, 5, 15, 25]);
    let (a, b) = (id(&tree, 10), id(&tree, 25));

    tree.swap_positions(a, b);
    assert_eq!(shape(&tree), "20+0[25+0[5+0, 15+0], 30+0[10+0, _]]");
    assert_eq!(tree.nodes.parent(id(&tree, 5)), Some(b));

    tree.swap_positions(a, b);
    tree.validate();
}

#[test]
fn balance_factors_stay_with_positions() {
    let mut tree = crate::AvlTree::new();
    for k in [20, 10, 30, 25] {
        tree.insert(k, ());
    }

    // 30 leans left, 25 is a leaf
    let (a, b) = (tree.find_id(&30), tree.find_id(&25));
    let (a, b) = (a.unwrap(), b.unwrap());
    tree.node_swap(a, b);

    assert_eq!(tree.nodes.balance(b), -1);
    assert_eq!(tree.nodes.balance(a), 0);
    tree.node_swap(a, b);
    tree.validate();
}

#[test]
fn in_order_neighbours() {
    let tree = bst_from(&[50, 20, 80, 10, 30, 25, 35, 90]);

    let mut forward = Vec::new();
    let mut node = tree.first();
    while let Some(n) = node {
        forward.push(*n.key());
        node = n.successor();
    }
    assert_eq!(forward, [10, 20, 25, 30, 35, 50, 80, 90]);

    let mut backward = Vec::new();
    let mut node = tree.last();
    while let Some(n) = node {
        backward.push(*n.key());
        node = n.predecessor();
    }
    forward.reverse();
    assert_eq!(backward, forward);

    // climbing out of a right subtree
    let n = tree.find(&35).unwrap();
    assert_eq!(n.successor().map(|s| *s.key()), Some(50));
    let n = tree.find(&80).unwrap();
    assert_eq!(n.predecessor().map(|s| *s.key()), Some(50));
}

#[test]
fn detach_promotes_only_child() {
    let mut tree = bst_from(&[20, 10, 5]);
    let node = tree.detach(id(&tree, 10));
    assert_eq!(node.key, 10);
    assert_eq!(tree.len(), 2);
    assert_eq!(shape(&tree), "20+0[5+0, _]");
    tree.validate();
}
