pub mod io;
pub mod json;
pub mod list;
pub mod math;
pub mod text;

#[cfg(test)]
mod json_test;
#[cfg(test)]
mod text_test;

use anyhow::Result;
use ksr_core::{NativeRegistry, Value};

/// Signature shared by every stdlib native.
pub type NativeFn = fn(&[Value]) -> Result<Value>;

/// Register all stdlib modules with the given native registry. Each function
/// lands under `"<module>.<function>"`, which is also the id module calls
/// fall back to.
pub fn register_stdlib(natives: &mut NativeRegistry) -> Result<()> {
    natives.register_module(&io::IoModule::new())?;
    natives.register_module(&json::JsonModule::new())?;
    natives.register_module(&list::ListModule::new())?;
    natives.register_module(&math::MathModule::new())?;
    natives.register_module(&text::TextModule::new())?;
    tracing::debug!(target: "ksr::stdlib", natives = natives.len(), "stdlib registered");
    Ok(())
}

/// Registry preloaded with the stdlib.
pub fn stdlib_natives() -> Result<NativeRegistry> {
    let mut natives = NativeRegistry::new();
    register_stdlib(&mut natives)?;
    Ok(natives)
}

pub(crate) fn register_all(module: &str, functions: &[(&str, NativeFn)], natives: &mut NativeRegistry) {
    for (name, function) in functions {
        natives.register(format!("{module}.{name}"), *function);
    }
}

/// Value a native returns when it has nothing to say.
pub(crate) fn unit() -> Value {
    Value::tuple(Vec::new())
}

pub(crate) fn expect_arity(name: &str, args: &[Value], expected: usize) -> Result<()> {
    if args.len() != expected {
        let plural = if expected == 1 { "" } else { "s" };
        return Err(anyhow::anyhow!("{name}() takes exactly {expected} argument{plural}"));
    }
    Ok(())
}

pub(crate) fn expect_text<'a>(name: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_text()
        .ok_or_else(|| anyhow::anyhow!("{name}() expects Text, got {}", value.type_name()))
}

/// Reads a fixed-width integral argument as an index or count.
pub(crate) fn expect_index(name: &str, value: &Value) -> Result<i64> {
    match value {
        Value::Byte(v) => Ok(i64::from(*v)),
        Value::Short(v) => Ok(i64::from(*v)),
        Value::Int(v) => Ok(i64::from(*v)),
        Value::Long(v) => Ok(*v),
        other => Err(anyhow::anyhow!("{name}() expects an integer, got {}", other.type_name())),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use ksr_core::{Callable, EvalError, ModuleRegistry, Node, Value};

    /// Runs `<module>.<function>(args...)` through a module call site.
    pub(crate) fn call(module: &str, function: &str, args: Vec<Value>) -> Result<Value, EvalError> {
        let natives = crate::stdlib_natives().expect("stdlib registration");
        let registry = ModuleRegistry::new(natives);
        let arguments = (0..args.len()).map(Node::arg).collect();
        let site = Node::module_call(registry.handle(), module, function, arguments);
        Callable::entry_point(site, 0).call(&args)
    }
}
