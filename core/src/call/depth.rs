use std::cell::Cell;

use crate::config::RuntimeOptions;
use crate::error::{EvalError, Result};

thread_local! {
    static CALL_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Counts one interpreted activation on the current thread for as long as it
/// is alive.
pub(super) struct CallDepthGuard;

impl CallDepthGuard {
    pub(super) fn enter() -> Result<Self> {
        let limit = RuntimeOptions::current().max_call_depth;
        CALL_DEPTH.with(|depth| {
            let current = depth.get();
            if current >= limit {
                tracing::debug!(target: "ksr::dispatch", depth = current, limit, "call depth limit reached");
                return Err(EvalError::CallDepthExceeded { limit });
            }
            depth.set(current + 1);
            Ok(CallDepthGuard)
        })
    }
}

impl Drop for CallDepthGuard {
    fn drop(&mut self) {
        CALL_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

#[cfg(test)]
pub(super) fn current_depth() -> usize {
    CALL_DEPTH.with(Cell::get)
}
