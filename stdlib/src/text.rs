use anyhow::Result;
use ksr_core::{NativeModule, NativeRegistry, Value};
use std::collections::HashMap;

use crate::{NativeFn, expect_arity, expect_index, expect_text};

pub struct TextModule {
    functions: HashMap<&'static str, NativeFn>,
}

impl Default for TextModule {
    fn default() -> Self {
        Self::new()
    }
}

impl TextModule {
    pub fn new() -> Self {
        let mut functions: HashMap<&'static str, NativeFn> = HashMap::new();
        functions.insert("length", length);
        functions.insert("upper", upper);
        functions.insert("lower", lower);
        functions.insert("trim", trim);
        functions.insert("contains", contains);
        functions.insert("split", split);
        functions.insert("concat", concat);
        functions.insert("repeat", repeat);
        Self { functions }
    }
}

impl NativeModule for TextModule {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Text inspection and building"
    }

    fn register(&self, natives: &mut NativeRegistry) -> Result<()> {
        let functions: Vec<_> = self.functions.iter().map(|(name, f)| (*name, *f)).collect();
        crate::register_all(self.name(), &functions, natives);
        Ok(())
    }
}

/// Length in characters, not bytes.
fn length(args: &[Value]) -> Result<Value> {
    expect_arity("length", args, 1)?;
    let text = expect_text("length", &args[0])?;
    Ok(Value::Long(text.chars().count() as i64))
}

fn upper(args: &[Value]) -> Result<Value> {
    expect_arity("upper", args, 1)?;
    Ok(Value::text(expect_text("upper", &args[0])?.to_uppercase()))
}

fn lower(args: &[Value]) -> Result<Value> {
    expect_arity("lower", args, 1)?;
    Ok(Value::text(expect_text("lower", &args[0])?.to_lowercase()))
}

fn trim(args: &[Value]) -> Result<Value> {
    expect_arity("trim", args, 1)?;
    Ok(Value::text(expect_text("trim", &args[0])?.trim()))
}

fn contains(args: &[Value]) -> Result<Value> {
    expect_arity("contains", args, 2)?;
    let haystack = expect_text("contains", &args[0])?;
    Ok(Value::Bool(match &args[1] {
        Value::Char(c) => haystack.contains(*c),
        needle => haystack.contains(expect_text("contains", needle)?),
    }))
}

fn split(args: &[Value]) -> Result<Value> {
    expect_arity("split", args, 2)?;
    let text = expect_text("split", &args[0])?;
    let separator = expect_text("split", &args[1])?;
    if separator.is_empty() {
        return Err(anyhow::anyhow!("split() separator must not be empty"));
    }
    Ok(Value::list(text.split(separator).map(Value::text)))
}

/// Joins the text form of every argument.
fn concat(args: &[Value]) -> Result<Value> {
    let mut out = String::new();
    for arg in args {
        out.push_str(&arg.to_text());
    }
    Ok(Value::text(out))
}

fn repeat(args: &[Value]) -> Result<Value> {
    expect_arity("repeat", args, 2)?;
    let text = expect_text("repeat", &args[0])?;
    let count = usize::try_from(expect_index("repeat", &args[1])?)
        .map_err(|_| anyhow::anyhow!("repeat() count must be non-negative"))?;
    Ok(Value::text(text.repeat(count)))
}
