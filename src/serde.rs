//! `serde` support for [`SearchTree`]s
//!
//! Trees are serialized as maps, in ascending key order. Deserializing inserts each entry in turn,
//! so the result is shaped by the tree's own balancing rather than by whatever tree was
//! serialized; duplicate keys keep the last value.

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};

use std::fmt;
use std::marker::PhantomData;

use crate::param::Balancing;
use crate::SearchTree;

impl<K, V, P> Serialize for SearchTree<K, V, P>
where
    K: Serialize,
    V: Serialize,
    P: Balancing,
{
    fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de, K, V, P> Deserialize<'de> for SearchTree<K, V, P>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
    P: Balancing,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SearchTreeVisitor { marker: PhantomData })
    }
}

struct SearchTreeVisitor<K, V, P> {
    marker: PhantomData<SearchTree<K, V, P>>,
}

impl<'de, K, V, P> Visitor<'de> for SearchTreeVisitor<K, V, P>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
    P: Balancing,
{
    type Value = SearchTree<K, V, P>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of keys to values")
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut this = SearchTree::new();
        while let Some((key, value)) = map.next_entry()? {
            this.insert(key, value);
        }

        Ok(this)
    }
}
