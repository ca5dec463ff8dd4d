use std::fmt;
use std::sync::Arc;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::Value;

fn write_joined<'a, I>(f: &mut fmt::Formatter<'_>, open: &str, items: I, close: &str) -> fmt::Result
where
    I: IntoIterator<Item = &'a Value>,
{
    f.write_str(open)?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.fmt_nested(f)?;
    }
    f.write_str(close)
}

impl Value {
    /// Text form used by `ToText` and string concatenation in natives.
    pub fn to_text(&self) -> Arc<str> {
        match self {
            Value::Text(s) => Arc::clone(s),
            Value::Int(i) => Arc::from(itoa::Buffer::new().format(*i)),
            Value::Long(i) => Arc::from(itoa::Buffer::new().format(*i)),
            Value::Double(d) => Arc::from(ryu::Buffer::new().format(*d)),
            other => Arc::from(other.to_string()),
        }
    }

    // Text inside aggregates is quoted so `["a, b"]` and `["a", "b"]` differ.
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{:?}", s.as_ref()),
            Value::Char(c) => write!(f, "{c:?}"),
            other => fmt::Display::fmt(other, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Text(s) => f.write_str(s),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => f.write_str(itoa::Buffer::new().format(*v)),
            Value::Long(v) => f.write_str(itoa::Buffer::new().format(*v)),
            Value::Float(v) => f.write_str(ryu::Buffer::new().format(*v)),
            Value::Double(v) => f.write_str(ryu::Buffer::new().format(*v)),
            Value::BigInt(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::List(items) => write_joined(f, "[", items.iter(), "]"),
            Value::Tuple(items) => write_joined(f, "(", items.iter(), ")"),
            Value::Set(items) => write_joined(f, "#{", items.iter(), "}"),
            Value::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    k.fmt_nested(f)?;
                    f.write_str(": ")?;
                    v.fmt_nested(f)?;
                }
                f.write_str("}")
            }
            Value::Callable(c) => write!(f, "<fn {}>", c.name()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Char(c) => serializer.serialize_char(*c),
            Value::Text(s) => serializer.serialize_str(s),
            Value::Byte(v) => serializer.serialize_i8(*v),
            Value::Short(v) => serializer.serialize_i16(*v),
            Value::Int(v) => serializer.serialize_i32(*v),
            Value::Long(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f32(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            // arbitrary precision survives only as text
            Value::BigInt(v) => serializer.collect_str(v),
            Value::Decimal(v) => serializer.collect_str(v),
            Value::List(items) | Value::Tuple(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries.iter() {
                    map.serialize_entry(k.to_text().as_ref(), v)?;
                }
                map.end()
            }
            Value::Callable(c) => serializer.collect_str(&format_args!("<fn {}>", c.name())),
        }
    }
}
