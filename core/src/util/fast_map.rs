//! Fx-hashed collections backing capture contexts, module tables and the
//! Set/Map value variants.

use std::hash::Hash;

pub type FastHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

pub type FastHashSet<K> = rustc_hash::FxHashSet<K>;

#[inline]
pub fn fast_hash_map_with_capacity<K, V>(capacity: usize) -> FastHashMap<K, V> {
    rustc_hash::FxHashMap::with_capacity_and_hasher(capacity, Default::default())
}

/// Collects into a set sized from the iterator's lower bound.
pub fn collect_set<T, I>(items: I) -> FastHashSet<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let items = items.into_iter();
    let mut set = rustc_hash::FxHashSet::with_capacity_and_hasher(items.size_hint().0, Default::default());
    set.extend(items);
    set
}

/// Collects key/value pairs; later keys overwrite earlier ones.
pub fn collect_map<K, V, I>(entries: I) -> FastHashMap<K, V>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, V)>,
{
    let entries = entries.into_iter();
    let mut map = fast_hash_map_with_capacity(entries.size_hint().0);
    map.extend(entries);
    map
}
