use std::sync::Arc;

use thiserror::Error;

use crate::op::{BinOp, Repr};
use crate::val::ValueKind;

/// Every failure the core can raise. All of them are local and synchronous:
/// evaluation aborts at the first error and hands it to the embedding host.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("type mismatch in {context}: expected {expected}, found {found}")]
    TypeMismatch {
        context: &'static str,
        expected: &'static str,
        found: ValueKind,
    },

    #[error("unsupported operand types for '{op}': {left} and {right}")]
    UnsupportedOperandType { op: BinOp, left: ValueKind, right: ValueKind },

    #[error("read of unset slot {slot}")]
    UnsetSlotAccess { slot: usize },

    #[error("slot {slot} is out of range for a frame with {len} slots")]
    SlotOutOfRange { slot: usize, len: usize },

    #[error("argument {index} is out of range ({len} supplied)")]
    ArgumentOutOfRange { index: usize, len: usize },

    #[error("capture '{name}' not found in closure context")]
    CaptureNotFound { name: Arc<str> },

    #[error("call target '{target}' not found: {reason}")]
    CallTargetNotFound { target: String, reason: String },

    #[error("'{callee}' expects {expected} argument(s), got {found}")]
    ArityMismatch {
        callee: Arc<str>,
        expected: usize,
        found: usize,
    },

    #[error("division by zero ({repr})")]
    DivisionByZero { repr: Repr },

    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    #[error("native '{name}' failed: {message}")]
    Native { name: String, message: String },

    #[error("maximum call depth of {limit} exceeded")]
    CallDepthExceeded { limit: usize },
}

impl EvalError {
    pub(crate) fn type_mismatch(context: &'static str, expected: &'static str, found: ValueKind) -> Self {
        EvalError::TypeMismatch {
            context,
            expected,
            found,
        }
    }

    pub(crate) fn not_found(target: impl Into<String>, reason: impl Into<String>) -> Self {
        EvalError::CallTargetNotFound {
            target: target.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = EvalError> = std::result::Result<T, E>;
