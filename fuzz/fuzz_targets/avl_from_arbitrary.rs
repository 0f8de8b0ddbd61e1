#![no_main]
use aspen::AvlTree;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|tree: AvlTree<i16, u8>| {
    tree.validate();

    let mut prev = None;
    for (k, _) in &tree {
        assert!(prev < Some(k));
        prev = Some(k);
    }
});
