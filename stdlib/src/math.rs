use anyhow::Result;
use ksr_core::{BinOp, NativeModule, NativeRegistry, Value};
use rust_decimal::{Decimal, MathematicalOps};
use std::collections::HashMap;

use crate::{NativeFn, expect_arity};

pub struct MathModule {
    functions: HashMap<&'static str, NativeFn>,
}

impl Default for MathModule {
    fn default() -> Self {
        Self::new()
    }
}

impl MathModule {
    pub fn new() -> Self {
        let mut functions: HashMap<&'static str, NativeFn> = HashMap::new();
        functions.insert("abs", Self::abs);
        functions.insert("sqrt", Self::sqrt);
        functions.insert("floor", Self::floor);
        functions.insert("ceil", Self::ceil);
        functions.insert("min", Self::min);
        functions.insert("max", Self::max);
        functions.insert("pow", Self::pow);
        functions.insert("pi", Self::pi);
        functions.insert("e", Self::e);
        Self { functions }
    }

    /// Absolute value in the argument's own representation. Fixed-width
    /// minimums wrap to themselves.
    fn abs(args: &[Value]) -> Result<Value> {
        expect_arity("abs", args, 1)?;
        Ok(match &args[0] {
            Value::Byte(v) => Value::Byte(v.wrapping_abs()),
            Value::Short(v) => Value::Short(v.wrapping_abs()),
            Value::Int(v) => Value::Int(v.wrapping_abs()),
            Value::Long(v) => Value::Long(v.wrapping_abs()),
            Value::Float(v) => Value::Float(v.abs()),
            Value::Double(v) => Value::Double(v.abs()),
            Value::BigInt(v) => Value::big_int(num_traits::Signed::abs(v.as_ref())),
            Value::Decimal(v) => Value::Decimal(v.abs()),
            other => return Err(anyhow::anyhow!("abs() expects a number, got {}", other.type_name())),
        })
    }

    /// Square root. Integral input yields a Double.
    fn sqrt(args: &[Value]) -> Result<Value> {
        expect_arity("sqrt", args, 1)?;
        Ok(match &args[0] {
            Value::Float(v) => Value::Float(v.sqrt()),
            Value::Double(v) => Value::Double(v.sqrt()),
            Value::Decimal(v) => Value::Decimal(
                v.sqrt()
                    .ok_or_else(|| anyhow::anyhow!("sqrt() of negative decimal {v}"))?,
            ),
            other => match ksr_core::op::cast(other, ksr_core::Repr::Double) {
                Ok(Value::Double(d)) => Value::Double(d.sqrt()),
                _ => return Err(anyhow::anyhow!("sqrt() expects a number, got {}", other.type_name())),
            },
        })
    }

    fn floor(args: &[Value]) -> Result<Value> {
        expect_arity("floor", args, 1)?;
        Self::round_with("floor", &args[0], f64::floor, Decimal::floor)
    }

    fn ceil(args: &[Value]) -> Result<Value> {
        expect_arity("ceil", args, 1)?;
        Self::round_with("ceil", &args[0], f64::ceil, Decimal::ceil)
    }

    fn round_with(name: &str, value: &Value, real: fn(f64) -> f64, dec: fn(&Decimal) -> Decimal) -> Result<Value> {
        Ok(match value {
            Value::Float(v) => Value::Float(real(f64::from(*v)) as f32),
            Value::Double(v) => Value::Double(real(*v)),
            Value::Decimal(v) => Value::Decimal(dec(v)),
            integral if integral.repr().is_some_and(|r| r.is_integral()) => integral.clone(),
            other => return Err(anyhow::anyhow!("{name}() expects a number, got {}", other.type_name())),
        })
    }

    fn pick(name: &str, args: &[Value], keep_left: BinOp) -> Result<Value> {
        expect_arity(name, args, 2)?;
        match keep_left.eval_vals(&args[0], &args[1]) {
            Ok(Value::Bool(true)) => Ok(args[0].clone()),
            Ok(_) => Ok(args[1].clone()),
            Err(err) => Err(anyhow::anyhow!("{name}(): {err}")),
        }
    }

    fn min(args: &[Value]) -> Result<Value> {
        Self::pick("min", args, BinOp::Le)
    }

    fn max(args: &[Value]) -> Result<Value> {
        Self::pick("max", args, BinOp::Ge)
    }

    fn pow(args: &[Value]) -> Result<Value> {
        expect_arity("pow", args, 2)?;
        BinOp::Pow
            .eval_vals(&args[0], &args[1])
            .map_err(|err| anyhow::anyhow!("pow(): {err}"))
    }

    fn pi(args: &[Value]) -> Result<Value> {
        expect_arity("pi", args, 0)?;
        Ok(Value::Double(std::f64::consts::PI))
    }

    fn e(args: &[Value]) -> Result<Value> {
        expect_arity("e", args, 0)?;
        Ok(Value::Double(std::f64::consts::E))
    }
}

impl NativeModule for MathModule {
    fn name(&self) -> &str {
        "math"
    }

    fn description(&self) -> &str {
        "Numeric helpers that preserve the argument's representation"
    }

    fn register(&self, natives: &mut NativeRegistry) -> Result<()> {
        let functions: Vec<_> = self.functions.iter().map(|(name, f)| (*name, *f)).collect();
        crate::register_all(self.name(), &functions, natives);
        Ok(())
    }
}
