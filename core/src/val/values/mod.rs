use std::sync::Arc;

use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::call::Callable;
use crate::op::Repr;
use crate::util::fast_map::{FastHashMap, FastHashSet, collect_map, collect_set};

mod convert;
mod display;
mod eq;

/// A runtime value.
///
/// Numbers keep their exact representation; nothing here widens or narrows
/// implicitly. Aggregates are immutable and shared through `Arc`, so cloning
/// a value never copies element storage.
#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    Char(char),
    Text(Arc<str>),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    BigInt(Arc<BigInt>),
    Decimal(Decimal),
    List(Arc<[Value]>),
    Set(Arc<FastHashSet<Value>>),
    Map(Arc<FastHashMap<Value, Value>>),
    Tuple(Arc<[Value]>),
    Callable(Callable),
}

/// Dynamic type tag of a [`Value`]. Module-call overloads are keyed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
    Bool,
    Char,
    Text,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    BigInt,
    Decimal,
    List,
    Set,
    Map,
    Tuple,
    Callable,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Bool => "Bool",
            ValueKind::Char => "Char",
            ValueKind::Text => "Text",
            ValueKind::Byte => "Byte",
            ValueKind::Short => "Short",
            ValueKind::Int => "Int",
            ValueKind::Long => "Long",
            ValueKind::Float => "Float",
            ValueKind::Double => "Double",
            ValueKind::BigInt => "BigInt",
            ValueKind::Decimal => "Decimal",
            ValueKind::List => "List",
            ValueKind::Set => "Set",
            ValueKind::Map => "Map",
            ValueKind::Tuple => "Tuple",
            ValueKind::Callable => "Callable",
        }
    }

    /// Numeric tower member for this kind, if it has one.
    pub fn repr(self) -> Option<Repr> {
        Some(match self {
            ValueKind::Byte => Repr::Byte,
            ValueKind::Short => Repr::Short,
            ValueKind::Int => Repr::Int,
            ValueKind::Long => Repr::Long,
            ValueKind::Float => Repr::Float,
            ValueKind::Double => Repr::Double,
            ValueKind::BigInt => Repr::BigInt,
            ValueKind::Decimal => Repr::Decimal,
            _ => return None,
        })
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Char(_) => ValueKind::Char,
            Value::Text(_) => ValueKind::Text,
            Value::Byte(_) => ValueKind::Byte,
            Value::Short(_) => ValueKind::Short,
            Value::Int(_) => ValueKind::Int,
            Value::Long(_) => ValueKind::Long,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::List(_) => ValueKind::List,
            Value::Set(_) => ValueKind::Set,
            Value::Map(_) => ValueKind::Map,
            Value::Tuple(_) => ValueKind::Tuple,
            Value::Callable(_) => ValueKind::Callable,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    #[inline]
    pub fn repr(&self) -> Option<Repr> {
        self.kind().repr()
    }

    pub fn is_numeric(&self) -> bool {
        self.repr().is_some()
    }

    pub fn text(text: impl Into<Arc<str>>) -> Value {
        Value::Text(text.into())
    }

    pub fn big_int(value: impl Into<BigInt>) -> Value {
        Value::BigInt(Arc::new(value.into()))
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Value {
        Value::List(items.into_iter().collect())
    }

    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Tuple(items.into_iter().collect())
    }

    /// Builds a set; duplicates collapse under structural equality.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Set(Arc::new(collect_set(items)))
    }

    /// Builds a map; a repeated key keeps its last value.
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Value {
        Value::Map(Arc::new(collect_map(entries)))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(c) => Some(c),
            _ => None,
        }
    }

    /// Elements of a List or Tuple.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }
}
