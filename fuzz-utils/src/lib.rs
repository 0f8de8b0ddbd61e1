use arbitrary::{Arbitrary, Unstructured};
use aspen::mock::Mock;
use aspen::param::Balancing;
use aspen::SearchTree;
use std::fmt::{self, Debug, Display, Formatter};
use std::panic::{self, RefUnwindSafe, UnwindSafe};

fn expect_might_panic<R, F: UnwindSafe + FnOnce() -> R>(f: F) -> Result<R, ()> {
    // set a custom hook that does nothing, so we don't print panic information every time the mock
    // implementation panics
    panic::set_hook(Box::new(|_| {}));

    let result = panic::catch_unwind(f).map_err(|_| ());

    // remove our custom hook
    let _ = panic::take_hook();

    result
}

/// A single operation on one of the trees, along with the result the mock produced for it
#[derive(Clone)]
pub enum Command<K, V> {
    Insert {
        id: TreeId,
        key: K,
        value: V,
        old: Option<V>,
    },
    Remove {
        id: TreeId,
        key: K,
        old: Option<V>,
    },
    Get {
        id: TreeId,
        key: K,
        value: Option<V>,
    },
    /// Indexing with `tree[&key]`, which panics if the key isn't present
    Index {
        id: TreeId,
        key: K,
        value: Result<V, ()>,
    },
    PopFirst {
        id: TreeId,
        entry: Option<(K, V)>,
    },
    PopLast {
        id: TreeId,
        entry: Option<(K, V)>,
    },
    Iter {
        id: TreeId,
        access: Vec<(IterDirection, Option<(K, V)>)>,
    },
    Clear {
        id: TreeId,
    },
    CloneTree {
        src_id: TreeId,
        new_id: TreeId,
    },
    DropTree {
        id: TreeId,
    },
}

const VARIANTS: u8 = 10;

#[derive(Debug, Copy, Clone, Arbitrary)]
pub struct TreeId(usize);

impl Display for TreeId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Copy, Clone, Arbitrary)]
pub enum IterDirection {
    Forward,
    Backward,
}

/// Sequence of [`Command`]s
pub struct CommandSequence<K, V> {
    pub cmds: Vec<Command<K, V>>,
}

impl<K: Debug, V: Debug> Debug for CommandSequence<K, V> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let init_id = TreeId(0);
        f.write_str("#[test]\n")?;
        f.write_str("fn test_case() {\n")?;
        writeln!(f, "    let mut tree_{init_id} = AvlTree::new();")?;
        for c in &self.cmds {
            c.fmt(f)?;
        }
        f.write_str("}")
    }
}

impl<K: Debug, V: Debug> Debug for Command<K, V> {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Insert { id, key, value, old } => {
                writeln!(f, "    assert_eq!(tree_{id}.insert({key:?}, {value:?}), {old:?});")
            }
            Self::Remove { id, key, old } => {
                writeln!(f, "    assert_eq!(tree_{id}.remove(&{key:?}), {old:?});")
            }
            Self::Get { id, key, value: Some(v) } => {
                writeln!(f, "    assert_eq!(tree_{id}.get(&{key:?}), Some(&{v:?}));")
            }
            Self::Get { id, key, value: None } => {
                writeln!(f, "    assert_eq!(tree_{id}.get(&{key:?}), None);")
            }
            Self::Index { id, key, value: Ok(v) } => {
                writeln!(f, "    assert_eq!(tree_{id}[&{key:?}], {v:?});")
            }
            Self::Index { id, key, value: Err(()) } => {
                f.write_str("    assert!(std::panic::catch_unwind(|| {\n")?;
                writeln!(f, "        let _ = &tree_{id}[&{key:?}];")?;
                f.write_str("    }).is_err());\n")
            }
            Self::PopFirst { id, entry } => {
                writeln!(f, "    assert_eq!(tree_{id}.pop_first(), {entry:?});")
            }
            Self::PopLast { id, entry } => {
                writeln!(f, "    assert_eq!(tree_{id}.pop_last(), {entry:?});")
            }
            Self::Iter { id, access } => {
                f.write_str("    {\n")?;

                let maybe_mut = match access.is_empty() {
                    true => "_", // add an underscore to mark `iter` as unused
                    false => "mut ",
                };

                writeln!(f, "        let {maybe_mut}iter = tree_{id}.iter();")?;
                for (dir, entry) in access {
                    let method = match dir {
                        IterDirection::Forward => "next",
                        IterDirection::Backward => "next_back",
                    };

                    match entry {
                        None => writeln!(f, "        assert!(iter.{method}().is_none());")?,
                        Some((k, v)) => writeln!(
                            f,
                            "        assert_eq!(iter.{method}(), Some((&{k:?}, &{v:?})));"
                        )?,
                    }
                }

                f.write_str("    }\n")
            }
            Self::Clear { id } => writeln!(f, "    tree_{id}.clear();"),
            Self::CloneTree { src_id, new_id } => {
                writeln!(f, "    let mut tree_{new_id} = tree_{src_id}.clone();")
            }
            Self::DropTree { id } => writeln!(f, "    drop(tree_{id});"),
        }
    }
}

impl<'d, K, V> Arbitrary<'d> for CommandSequence<K, V>
where
    K: Arbitrary<'d> + Ord + Clone,
    V: Arbitrary<'d> + Clone,
{
    fn arbitrary(u: &mut Unstructured<'d>) -> arbitrary::Result<Self> {
        let mut cmds = Vec::new();

        let mut mocks = vec![Some(Mock::new())];
        let mut num_trees = 1;

        while !u.is_empty() && num_trees != 0 {
            let id = TreeId(choose_sparse_index(u, num_trees, &mocks)?);
            let variant = u.int_in_range(0..=VARIANTS - 1)?;
            cmds.push(Command::arbitrary(u, variant, id, &mut num_trees, &mut mocks)?);
        }

        Ok(CommandSequence { cmds })
    }
}

fn choose_sparse_index<T>(
    u: &mut Unstructured,
    count: usize,
    vals: &[Option<T>],
) -> arbitrary::Result<usize> {
    let mut idx = u.choose_index(count)?;
    let mut i = 0;
    while i <= idx {
        if vals[i].is_none() {
            idx += 1;
        }
        i += 1;
    }
    Ok(idx)
}

impl<K: Ord + Clone, V: Clone> Command<K, V> {
    /// Creates a new command and executes it on the provided mock trees
    fn arbitrary<'d>(
        u: &mut Unstructured<'d>,
        variant: u8,
        id: TreeId,
        count: &mut usize,
        mocks: &mut Vec<Option<Mock<K, V>>>,
    ) -> arbitrary::Result<Self>
    where
        K: Arbitrary<'d>,
        V: Arbitrary<'d>,
    {
        let mock = match mocks[id.0].as_mut() {
            Some(m) => m,
            None => unreachable!("chose dropped tree {id}"),
        };

        match variant {
            0 => {
                let key: K = u.arbitrary()?;
                let value: V = u.arbitrary()?;
                let old = mock.insert(key.clone(), value.clone());
                Ok(Self::Insert { id, key, value, old })
            }
            1 => {
                let key = arbitrary_key(u, mock)?;
                let old = mock.remove(&key);
                Ok(Self::Remove { id, key, old })
            }
            2 => {
                let key = arbitrary_key(u, mock)?;
                let value = mock.get(&key).cloned();
                Ok(Self::Get { id, key, value })
            }
            3 => {
                let key = arbitrary_key(u, mock)?;
                let value = mock.at(&key).cloned().map_err(|_| ());
                Ok(Self::Index { id, key, value })
            }
            4 => Ok(Self::PopFirst {
                id,
                entry: mock.pop_first(),
            }),
            5 => Ok(Self::PopLast {
                id,
                entry: mock.pop_last(),
            }),
            6 => {
                let access_directions: Vec<IterDirection> = u.arbitrary()?;
                let mut iter = mock.iter();
                let access = access_directions
                    .into_iter()
                    .map(|dir| {
                        let entry = match dir {
                            IterDirection::Forward => iter.next(),
                            IterDirection::Backward => iter.next_back(),
                        };
                        (dir, entry.map(|(k, v)| (k.clone(), v.clone())))
                    })
                    .collect();

                Ok(Self::Iter { id, access })
            }
            7 => {
                mock.clear();
                Ok(Self::Clear { id })
            }
            8 => {
                let new_id = TreeId(mocks.len());
                mocks.push(mocks[id.0].clone());
                *count += 1;
                Ok(Self::CloneTree { src_id: id, new_id })
            }
            9 => {
                mocks[id.0] = None;
                *count -= 1;
                Ok(Self::DropTree { id })
            }
            _ => unreachable!("bad Command variant {variant}"),
        }
    }
}

/// Picks a key for a lookup or removal: usually one that's present, if there are any
fn arbitrary_key<'d, K, V>(u: &mut Unstructured<'d>, mock: &Mock<K, V>) -> arbitrary::Result<K>
where
    K: Arbitrary<'d> + Ord + Clone,
{
    if mock.is_empty() || u.ratio(1, 4)? {
        return u.arbitrary();
    }

    let idx = u.choose_index(mock.len())?;
    match mock.keys().nth(idx) {
        Some(k) => Ok(k.clone()),
        None => unreachable!(),
    }
}

/// Ongoing state for executing commands on [`SearchTree`]s, checking against the results from
/// the mock implementation
pub struct RunnerState<K, V, P> {
    trees: Vec<Option<SearchTree<K, V, P>>>,
}

impl<K, V, P> RunnerState<K, V, P>
where
    K: UnwindSafe + RefUnwindSafe + Ord + Clone + Debug,
    V: UnwindSafe + RefUnwindSafe + Clone + Debug + PartialEq,
    P: Balancing + UnwindSafe + RefUnwindSafe,
{
    /// Creates a new, blank `RunnerState` to run a series of commands
    pub fn init() -> Self {
        RunnerState {
            trees: vec![Some(SearchTree::new())],
        }
    }

    /// Runs the command, panicking if the tree's result doesn't match the mock's
    #[rustfmt::skip]
    pub fn run_cmd(&mut self, cmd: &Command<K, V>) {
        match cmd {
            Command::Insert { id, key, value, old } => {
                let tree = self.tree_mut(*id);
                assert_eq!(&tree.insert(key.clone(), value.clone()), old);
                tree.validate();
            }
            Command::Remove { id, key, old } => {
                let tree = self.tree_mut(*id);
                assert_eq!(&tree.remove(key), old);
                tree.validate();
            }
            Command::Get { id, key, value } => {
                assert_eq!(self.tree(*id).get(key), value.as_ref());
            }
            Command::Index { id, key, value: Ok(v) } => {
                assert_eq!(&self.tree(*id)[key], v);
            }
            Command::Index { id, key, value: Err(()) } => {
                let tree = self.tree(*id);
                let panicked = expect_might_panic(|| {
                    let _ = &tree[key];
                })
                .is_err();

                assert!(panicked);
            }
            Command::PopFirst { id, entry } => {
                let tree = self.tree_mut(*id);
                assert_eq!(&tree.pop_first(), entry);
                tree.validate();
            }
            Command::PopLast { id, entry } => {
                let tree = self.tree_mut(*id);
                assert_eq!(&tree.pop_last(), entry);
                tree.validate();
            }
            Command::Iter { id, access } => {
                let mut iter = self.tree(*id).iter();
                for (dir, entry) in access {
                    let item = match dir {
                        IterDirection::Forward => iter.next(),
                        IterDirection::Backward => iter.next_back(),
                    };

                    assert_eq!(item, entry.as_ref().map(|(k, v)| (k, v)));
                }
            }
            Command::Clear { id } => {
                let tree = self.tree_mut(*id);
                tree.clear();
                tree.validate();
            }
            Command::CloneTree { src_id, .. } => {
                let new_tree = self.tree(*src_id).clone();
                new_tree.validate();
                self.trees.push(Some(new_tree));
            }
            Command::DropTree { id } => drop(self.trees[id.0].take()),
        }
    }

    fn tree(&self, id: TreeId) -> &SearchTree<K, V, P> {
        match self.trees[id.0].as_ref() {
            Some(t) => t,
            None => panic!("use of dropped tree {id}"),
        }
    }

    fn tree_mut(&mut self, id: TreeId) -> &mut SearchTree<K, V, P> {
        match self.trees[id.0].as_mut() {
            Some(t) => t,
            None => panic!("use of dropped tree {id}"),
        }
    }
}
