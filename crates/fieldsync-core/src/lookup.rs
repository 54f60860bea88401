//! Map lookups that fall back to a default value.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Extension trait for "value or default" lookups on maps.
pub trait LookupExt<Q: ?Sized, V> {
    /// Returns a clone of the value stored under `key`, or `default`.
    fn get_or(&self, key: &Q, default: V) -> V;

    /// Returns a clone of the value stored under `key`, or `V::default()`.
    fn get_or_default(&self, key: &Q) -> V
    where
        V: Default,
    {
        self.get_or(key, V::default())
    }
}

impl<K, V, Q, S> LookupExt<Q, V> for HashMap<K, V, S>
where
    K: Borrow<Q> + Hash + Eq,
    Q: Hash + Eq + ?Sized,
    V: Clone,
    S: BuildHasher,
{
    fn get_or(&self, key: &Q, default: V) -> V {
        self.get(key).cloned().unwrap_or(default)
    }
}

impl<K, V, Q> LookupExt<Q, V> for BTreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
    V: Clone,
{
    fn get_or(&self, key: &Q, default: V) -> V {
        self.get(key).cloned().unwrap_or(default)
    }
}
