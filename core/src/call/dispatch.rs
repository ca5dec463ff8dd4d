use std::fmt;

use crate::error::Result;
use crate::val::Value;

use super::{CacheState, CallTarget, Callable, EntryId, InlineCache};

/// Direct/indirect dispatch for a site whose callee is a runtime value.
///
/// While the site is mono- or polymorphic the cached target for the callee's
/// entry identity is invoked directly. Captures always come from the callable
/// at hand, never from the cache, so two closures over the same function body
/// share an entry yet still see their own snapshots.
#[derive(Default)]
pub struct DispatchCache {
    cache: InlineCache<EntryId, CallTarget>,
}

impl DispatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CacheState {
        self.cache.state()
    }

    pub fn dispatch(&self, callable: &Callable, arguments: Vec<Value>) -> Result<Value> {
        if self.cache.is_megamorphic() {
            return callable.invoke(arguments);
        }
        let target = self
            .cache
            .get_or_resolve(callable.entry_id(), |_| Ok(callable.target().clone()))?;
        target.invoke(callable.captures(), arguments)
    }
}

impl fmt::Debug for DispatchCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DispatchCache({:?})", self.state())
    }
}
