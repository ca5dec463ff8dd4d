use std::hash::{Hash, Hasher};
use std::mem::discriminant;

use super::Value;

/// Structural equality. Floats compare by bit pattern so that values can key
/// hash tables; this is the relation behind `Equals`/`NotEquals`, distinct
/// from the numeric `Eq` comparison operator.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a.same_as(b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        discriminant(self).hash(state);
        match self {
            Value::Bool(b) => b.hash(state),
            Value::Char(c) => c.hash(state),
            Value::Text(s) => s.hash(state),
            Value::Byte(v) => v.hash(state),
            Value::Short(v) => v.hash(state),
            Value::Int(v) => v.hash(state),
            Value::Long(v) => v.hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::Double(v) => v.to_bits().hash(state),
            Value::BigInt(v) => v.hash(state),
            Value::Decimal(v) => v.hash(state),
            Value::List(items) | Value::Tuple(items) => items.hash(state),
            // iteration order is unspecified, so only the size participates
            Value::Set(items) => items.len().hash(state),
            Value::Map(entries) => entries.len().hash(state),
            Value::Callable(c) => c.entry_id().hash(state),
        }
    }
}
