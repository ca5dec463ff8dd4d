use anyhow::Result;
use ksr_core::{NativeModule, NativeRegistry, Value};
use num_bigint::BigInt;
use std::collections::HashMap;

use crate::{NativeFn, expect_arity, expect_text, unit};

pub struct JsonModule {
    functions: HashMap<&'static str, NativeFn>,
}

impl Default for JsonModule {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonModule {
    pub fn new() -> Self {
        let mut functions: HashMap<&'static str, NativeFn> = HashMap::new();
        functions.insert("encode", encode);
        functions.insert("pretty", pretty);
        functions.insert("parse", parse);
        Self { functions }
    }
}

impl NativeModule for JsonModule {
    fn name(&self) -> &str {
        "json"
    }

    fn register(&self, natives: &mut NativeRegistry) -> Result<()> {
        let functions: Vec<_> = self.functions.iter().map(|(name, f)| (*name, *f)).collect();
        crate::register_all(self.name(), &functions, natives);
        Ok(())
    }
}

fn encode(args: &[Value]) -> Result<Value> {
    expect_arity("json.encode", args, 1)?;
    Ok(Value::text(serde_json::to_string(&args[0])?))
}

fn pretty(args: &[Value]) -> Result<Value> {
    expect_arity("json.pretty", args, 1)?;
    Ok(Value::text(serde_json::to_string_pretty(&args[0])?))
}

fn parse(args: &[Value]) -> Result<Value> {
    expect_arity("json.parse", args, 1)?;
    let source = expect_text("json.parse", &args[0])?;
    let parsed: serde_json::Value = serde_json::from_str(source)?;
    Ok(from_json(parsed))
}

/// JSON null has no value counterpart and maps to the empty tuple.
/// Integers that overflow `i64` become big integers.
fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => unit(),
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Long(i)
            } else if let Some(u) = n.as_u64() {
                Value::big_int(BigInt::from(u))
            } else {
                Value::Double(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::text(s),
        serde_json::Value::Array(items) => Value::list(items.into_iter().map(from_json)),
        serde_json::Value::Object(fields) => {
            Value::map(fields.into_iter().map(|(k, v)| (Value::text(k), from_json(v))))
        }
    }
}
