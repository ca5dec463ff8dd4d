//! Activation records.
//!
//! A frame owns a fixed number of local slots plus the call's arguments and,
//! for closures, the capture context. Each slot remembers the primitive kind
//! it was first written with and falls back to a boxed object slot the first
//! time a write disagrees with that kind. The fallback is permanent.

use std::sync::Arc;

use crate::call::CaptureContext;
use crate::error::{EvalError, Result};
use crate::val::Value;

#[cfg(test)]
mod frame_test;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Unset,
    Byte,
    Int,
    Long,
    Float,
    Double,
    Bool,
    Object,
}

// Short has no primitive slot of its own; it lives boxed so reads hand back
// the same representation that was written.
#[derive(Debug, Clone)]
enum Slot {
    Unset,
    Byte(i8),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Object(Value),
}

impl Slot {
    fn primitive(value: &Value) -> Option<Slot> {
        Some(match value {
            Value::Byte(v) => Slot::Byte(*v),
            Value::Int(v) => Slot::Int(*v),
            Value::Long(v) => Slot::Long(*v),
            Value::Float(v) => Slot::Float(*v),
            Value::Double(v) => Slot::Double(*v),
            Value::Bool(v) => Slot::Bool(*v),
            _ => return None,
        })
    }

    fn kind(&self) -> SlotKind {
        match self {
            Slot::Unset => SlotKind::Unset,
            Slot::Byte(_) => SlotKind::Byte,
            Slot::Int(_) => SlotKind::Int,
            Slot::Long(_) => SlotKind::Long,
            Slot::Float(_) => SlotKind::Float,
            Slot::Double(_) => SlotKind::Double,
            Slot::Bool(_) => SlotKind::Bool,
            Slot::Object(_) => SlotKind::Object,
        }
    }
}

#[derive(Debug)]
pub struct Frame {
    slots: Vec<Slot>,
    arguments: Vec<Value>,
    context: Option<Arc<CaptureContext>>,
}

impl Frame {
    pub fn new(slot_count: usize, arguments: Vec<Value>, context: Option<Arc<CaptureContext>>) -> Self {
        Self {
            slots: vec![Slot::Unset; slot_count],
            arguments,
            context,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, slot: usize) -> Result<&Slot> {
        self.slots.get(slot).ok_or(EvalError::SlotOutOfRange {
            slot,
            len: self.slots.len(),
        })
    }

    pub fn slot_kind(&self, slot: usize) -> Result<SlotKind> {
        Ok(self.slot(slot)?.kind())
    }

    pub fn read(&self, slot: usize) -> Result<Value> {
        Ok(match self.slot(slot)? {
            Slot::Unset => return Err(EvalError::UnsetSlotAccess { slot }),
            Slot::Byte(v) => Value::Byte(*v),
            Slot::Int(v) => Value::Int(*v),
            Slot::Long(v) => Value::Long(*v),
            Slot::Float(v) => Value::Float(*v),
            Slot::Double(v) => Value::Double(*v),
            Slot::Bool(v) => Value::Bool(*v),
            Slot::Object(v) => v.clone(),
        })
    }

    pub fn write(&mut self, slot: usize, value: Value) -> Result<()> {
        let len = self.slots.len();
        let current = self
            .slots
            .get_mut(slot)
            .ok_or(EvalError::SlotOutOfRange { slot, len })?;
        let kind = current.kind();
        *current = match Slot::primitive(&value) {
            Some(primitive) if kind == SlotKind::Unset || kind == primitive.kind() => primitive,
            _ => {
                if !matches!(kind, SlotKind::Unset | SlotKind::Object) {
                    tracing::trace!(target: "ksr::frame", slot, from = ?kind, to = %value.kind(), "slot generalized to object");
                }
                Slot::Object(value)
            }
        };
        Ok(())
    }

    pub fn argument(&self, index: usize) -> Result<&Value> {
        self.arguments.get(index).ok_or(EvalError::ArgumentOutOfRange {
            index,
            len: self.arguments.len(),
        })
    }

    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    pub fn context(&self) -> Option<&Arc<CaptureContext>> {
        self.context.as_ref()
    }

    /// Looks a name up in the capture context this activation was invoked with.
    pub fn capture(&self, name: &str) -> Result<Value> {
        self.context
            .as_deref()
            .and_then(|context| context.get(name))
            .cloned()
            .ok_or_else(|| EvalError::CaptureNotFound { name: Arc::from(name) })
    }
}
