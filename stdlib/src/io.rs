use anyhow::Result;
use ksr_core::{NativeModule, NativeRegistry, Value};
use std::collections::HashMap;
use std::io::Write;

use crate::{NativeFn, unit};

pub struct IoModule {
    functions: HashMap<&'static str, NativeFn>,
}

impl Default for IoModule {
    fn default() -> Self {
        Self::new()
    }
}

impl IoModule {
    pub fn new() -> Self {
        let mut functions: HashMap<&'static str, NativeFn> = HashMap::new();
        functions.insert("print", print);
        functions.insert("println", println);
        functions.insert("eprintln", eprintln);
        Self { functions }
    }
}

impl NativeModule for IoModule {
    fn name(&self) -> &str {
        "io"
    }

    fn description(&self) -> &str {
        "Standard output and error streams"
    }

    fn register(&self, natives: &mut NativeRegistry) -> Result<()> {
        let functions: Vec<_> = self.functions.iter().map(|(name, f)| (*name, *f)).collect();
        crate::register_all(self.name(), &functions, natives);
        Ok(())
    }
}

/// Text forms of `args` separated by single spaces.
fn render(args: &[Value]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&arg.to_text());
    }
    out
}

fn print(args: &[Value]) -> Result<Value> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(render(args).as_bytes())?;
    stdout.flush()?;
    Ok(unit())
}

fn println(args: &[Value]) -> Result<Value> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", render(args))?;
    Ok(unit())
}

fn eprintln(args: &[Value]) -> Result<Value> {
    let mut stderr = std::io::stderr().lock();
    writeln!(stderr, "{}", render(args))?;
    Ok(unit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::call;

    #[test]
    fn render_joins_with_spaces() {
        assert_eq!(render(&[Value::text("a"), Value::Long(1), Value::Bool(true)]), "a 1 true");
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn println_returns_unit() {
        assert_eq!(call("io", "println", vec![Value::text("hello")]).unwrap(), unit());
    }
}
