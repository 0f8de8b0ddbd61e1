//! Mock implementation with essentially the same API as [`SearchTree`], but backed by a vector
//!
//! [`SearchTree`]: crate::SearchTree

use crate::error::{Error, Result};
use std::mem;

/// A mock, inefficient implementation of the [`SearchTree`](crate::SearchTree) interface
///
/// Entries are kept in a vector sorted by key, so every operation is a binary search followed by
/// (at worst) shifting the tail of the vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mock<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Mock<K, V> {
    fn default() -> Self {
        Mock { entries: Vec::new() }
    }
}

impl<K: Ord, V> Mock<K, V> {
    pub fn new() -> Self {
        Mock { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            Ok(i) => Some(mem::replace(&mut self.entries[i].1, value)),
            Err(i) => {
                self.entries.insert(i, (key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let i = self.search(key).ok()?;
        Some(self.entries.remove(i).1)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let i = self.search(key).ok()?;
        Some(&self.entries[i].1)
    }

    pub fn at(&self, key: &K) -> Result<&V> {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_ok()
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.entries.first().map(|(k, v)| (k, v))
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.entries.last().map(|(k, v)| (k, v))
    }

    pub fn pop_first(&mut self) -> Option<(K, V)> {
        match self.entries.is_empty() {
            true => None,
            false => Some(self.entries.remove(0)),
        }
    }

    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> impl '_ + DoubleEndedIterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn iter(&self) -> impl '_ + DoubleEndedIterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    fn search(&self, key: &K) -> std::result::Result<usize, usize> {
        self.entries.binary_search_by(|(k, _)| k.cmp(key))
    }
}

#[cfg(test)]
mod tests {
    use super::Mock;
    use crate::Error;

    #[test]
    fn keeps_entries_sorted() {
        let mut mock = Mock::new();
        for k in [5, 1, 4, 2, 3] {
            assert_eq!(mock.insert(k, k * 2), None);
        }

        assert_eq!(mock.insert(4, 0), Some(8));
        assert_eq!(mock.remove(&1), Some(2));
        assert_eq!(mock.remove(&1), None);
        assert_eq!(mock.at(&1), Err(Error::KeyNotFound));

        let entries: Vec<_> = mock.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, [(2, 4), (3, 6), (4, 0), (5, 10)]);
        assert_eq!(mock.pop_first(), Some((2, 4)));
        assert_eq!(mock.pop_last(), Some((5, 10)));
        assert_eq!(mock.len(), 2);
    }
}
