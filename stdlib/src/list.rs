use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use ksr_core::{NativeModule, NativeRegistry, Value};

use crate::{NativeFn, expect_arity, expect_index};

pub struct ListModule {
    functions: HashMap<&'static str, NativeFn>,
}

impl Default for ListModule {
    fn default() -> Self {
        Self::new()
    }
}

impl ListModule {
    pub fn new() -> Self {
        let mut functions: HashMap<&'static str, NativeFn> = HashMap::new();
        functions.insert("size", size);
        functions.insert("get", get);
        functions.insert("append", append);
        functions.insert("concat", concat);
        functions.insert("contains", contains);
        functions.insert("reverse", reverse);
        Self { functions }
    }
}

impl NativeModule for ListModule {
    fn name(&self) -> &str {
        "list"
    }

    fn description(&self) -> &str {
        "Persistent list operations; inputs are never modified"
    }

    fn register(&self, natives: &mut NativeRegistry) -> Result<()> {
        let functions: Vec<_> = self.functions.iter().map(|(name, f)| (*name, *f)).collect();
        crate::register_all(self.name(), &functions, natives);
        Ok(())
    }
}

fn items<'a>(name: &str, value: &'a Value) -> Result<&'a Arc<[Value]>> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(anyhow::anyhow!("{name}() expects a List, got {}", other.type_name())),
    }
}

/// Element count of any aggregate.
fn size(args: &[Value]) -> Result<Value> {
    expect_arity("size", args, 1)?;
    let len = match &args[0] {
        Value::List(items) | Value::Tuple(items) => items.len(),
        Value::Set(items) => items.len(),
        Value::Map(entries) => entries.len(),
        Value::Text(text) => text.chars().count(),
        other => return Err(anyhow::anyhow!("size() expects a collection, got {}", other.type_name())),
    };
    Ok(Value::Long(len as i64))
}

/// Indexes a List or Tuple; negative indices count from the end.
fn get(args: &[Value]) -> Result<Value> {
    expect_arity("get", args, 2)?;
    let items = args[0]
        .as_slice()
        .ok_or_else(|| anyhow::anyhow!("get() expects a List or Tuple, got {}", args[0].type_name()))?;
    let index = expect_index("get", &args[1])?;
    let len = items.len() as i64;
    let resolved = if index < 0 { index + len } else { index };
    if !(0..len).contains(&resolved) {
        return Err(anyhow::anyhow!("get() index {index} out of bounds for length {len}"));
    }
    Ok(items[resolved as usize].clone())
}

fn append(args: &[Value]) -> Result<Value> {
    expect_arity("append", args, 2)?;
    let items = items("append", &args[0])?;
    Ok(Value::list(items.iter().cloned().chain(std::iter::once(args[1].clone()))))
}

fn concat(args: &[Value]) -> Result<Value> {
    expect_arity("concat", args, 2)?;
    let left = items("concat", &args[0])?;
    let right = items("concat", &args[1])?;
    Ok(Value::list(left.iter().chain(right.iter()).cloned()))
}

/// Membership under structural equality.
fn contains(args: &[Value]) -> Result<Value> {
    expect_arity("contains", args, 2)?;
    let found = match &args[0] {
        Value::List(items) | Value::Tuple(items) => items.contains(&args[1]),
        Value::Set(items) => items.contains(&args[1]),
        Value::Map(entries) => entries.contains_key(&args[1]),
        other => return Err(anyhow::anyhow!("contains() expects a collection, got {}", other.type_name())),
    };
    Ok(Value::Bool(found))
}

fn reverse(args: &[Value]) -> Result<Value> {
    expect_arity("reverse", args, 1)?;
    Ok(Value::list(items("reverse", &args[0])?.iter().rev().cloned()))
}
