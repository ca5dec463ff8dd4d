use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;

use crate::error::Result;

/// Distinct targets a call site remembers before it stops caching.
pub const CALL_SITE_CACHE_LIMIT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Uninitialized,
    Monomorphic,
    Polymorphic,
    Megamorphic,
}

/// Bounded per-site memo from a guard key to a resolved target.
///
/// Entries are write-once, so readers never lock. Once a key misses with every
/// entry occupied the site goes megamorphic: the entries are ignored from then
/// on and each call resolves from scratch. The transition is one-way.
pub struct InlineCache<K, V> {
    entries: [OnceCell<(K, V)>; CALL_SITE_CACHE_LIMIT],
    megamorphic: AtomicBool,
}

impl<K, V> Default for InlineCache<K, V> {
    fn default() -> Self {
        Self {
            entries: std::array::from_fn(|_| OnceCell::new()),
            megamorphic: AtomicBool::new(false),
        }
    }
}

impl<K: PartialEq, V: Clone> InlineCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_megamorphic(&self) -> bool {
        self.megamorphic.load(Ordering::Acquire)
    }

    pub fn state(&self) -> CacheState {
        if self.is_megamorphic() {
            return CacheState::Megamorphic;
        }
        match self.entries.iter().filter(|entry| entry.get().is_some()).count() {
            0 => CacheState::Uninitialized,
            1 => CacheState::Monomorphic,
            _ => CacheState::Polymorphic,
        }
    }

    /// Cached value for `key`, resolving and remembering it on a miss.
    /// Failed resolutions are never cached.
    pub fn get_or_resolve<F>(&self, key: K, resolve: F) -> Result<V>
    where
        F: FnOnce(&K) -> Result<V>,
    {
        if self.is_megamorphic() {
            return resolve(&key);
        }
        for entry in &self.entries {
            match entry.get() {
                Some((cached, value)) if *cached == key => return Ok(value.clone()),
                Some(_) => continue,
                None => {
                    let value = resolve(&key)?;
                    // a racing resolver may have claimed this entry; its
                    // result stays and ours is used just this once
                    let _ = entry.set((key, value.clone()));
                    return Ok(value);
                }
            }
        }
        if !self.megamorphic.swap(true, Ordering::AcqRel) {
            tracing::debug!(target: "ksr::dispatch", limit = CALL_SITE_CACHE_LIMIT, "call site went megamorphic");
        }
        resolve(&key)
    }
}

impl<K, V> fmt::Debug for InlineCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let filled = self.entries.iter().filter(|entry| entry.get().is_some()).count();
        f.debug_struct("InlineCache")
            .field("entries", &filled)
            .field("megamorphic", &self.megamorphic.load(Ordering::Relaxed))
            .finish()
    }
}
