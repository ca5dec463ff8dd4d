use num_traits::Zero;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

use crate::error::{EvalError, Result};
use crate::val::Value;

use super::Repr;
use super::repr::{Operands, decimal_trunc, low_i32};

fn decimal_overflow(op: &str) -> EvalError {
    EvalError::Arithmetic(format!("decimal {op} overflow"))
}

#[inline]
fn divisor<T: Zero>(value: T, repr: Repr) -> Result<T> {
    if value.is_zero() {
        Err(EvalError::DivisionByZero { repr })
    } else {
        Ok(value)
    }
}

macro_rules! wrapping_kernel {
    ($name:ident, $wrapping:ident, $op:tt, $checked:ident) => {
        pub(super) fn $name(operands: Operands<'_>) -> Result<Value> {
            Ok(match operands {
                Operands::Byte(l, r) => Value::Byte(l.$wrapping(r)),
                Operands::Short(l, r) => Value::Short(l.$wrapping(r)),
                Operands::Int(l, r) => Value::Int(l.$wrapping(r)),
                Operands::Long(l, r) => Value::Long(l.$wrapping(r)),
                Operands::Float(l, r) => Value::Float(l $op r),
                Operands::Double(l, r) => Value::Double(l $op r),
                Operands::BigInt(l, r) => Value::big_int(l $op r),
                Operands::Decimal(l, r) => {
                    Value::Decimal(l.$checked(r).ok_or_else(|| decimal_overflow(stringify!($name)))?)
                }
            })
        }
    };
}

wrapping_kernel!(add, wrapping_add, +, checked_add);
wrapping_kernel!(sub, wrapping_sub, -, checked_sub);
wrapping_kernel!(mul, wrapping_mul, *, checked_mul);

/// Integral division truncates toward zero. Decimal quotients keep the
/// dividend's scale, rounding a tie toward zero.
pub(super) fn div(operands: Operands<'_>) -> Result<Value> {
    Ok(match operands {
        Operands::Byte(l, r) => Value::Byte(l.wrapping_div(divisor(r, Repr::Byte)?)),
        Operands::Short(l, r) => Value::Short(l.wrapping_div(divisor(r, Repr::Short)?)),
        Operands::Int(l, r) => Value::Int(l.wrapping_div(divisor(r, Repr::Int)?)),
        Operands::Long(l, r) => Value::Long(l.wrapping_div(divisor(r, Repr::Long)?)),
        Operands::Float(l, r) => Value::Float(l / r),
        Operands::Double(l, r) => Value::Double(l / r),
        Operands::BigInt(l, r) => {
            if r.is_zero() {
                return Err(EvalError::DivisionByZero { repr: Repr::BigInt });
            }
            Value::big_int(l / r)
        }
        Operands::Decimal(l, r) => Value::Decimal(decimal_div(l, divisor(r, Repr::Decimal)?)?),
    })
}

/// Half-down at the dividend's scale, decided from the exact remainder so the
/// 28-digit rounding inside `checked_div` never turns a near-tie into a tie.
fn decimal_div(l: Decimal, r: Decimal) -> Result<Decimal> {
    let scale = l.scale();
    let mut quotient = l
        .checked_div(r)
        .ok_or_else(|| decimal_overflow("div"))?
        .round_dp_with_strategy(scale, RoundingStrategy::ToZero);
    // A product that does not fit means the rounded quotient overshot the exact
    // one by less than a unit, so it already is the nearest grid point.
    if let Some(rem) = quotient.checked_mul(r).and_then(|product| l.checked_sub(product)) {
        let above_half = rem
            .checked_mul(Decimal::TWO)
            .is_none_or(|twice| twice.abs() > r.abs());
        if above_half {
            let unit = Decimal::new(1, scale);
            let step = if rem.is_sign_negative() != r.is_sign_negative() { -unit } else { unit };
            quotient = quotient.checked_add(step).ok_or_else(|| decimal_overflow("div"))?;
        }
    }
    quotient.rescale(scale);
    Ok(quotient)
}

/// Remainder takes the sign of the dividend.
pub(super) fn rem(operands: Operands<'_>) -> Result<Value> {
    Ok(match operands {
        Operands::Byte(l, r) => Value::Byte(l.wrapping_rem(divisor(r, Repr::Byte)?)),
        Operands::Short(l, r) => Value::Short(l.wrapping_rem(divisor(r, Repr::Short)?)),
        Operands::Int(l, r) => Value::Int(l.wrapping_rem(divisor(r, Repr::Int)?)),
        Operands::Long(l, r) => Value::Long(l.wrapping_rem(divisor(r, Repr::Long)?)),
        Operands::Float(l, r) => Value::Float(l % r),
        Operands::Double(l, r) => Value::Double(l % r),
        Operands::BigInt(l, r) => {
            if r.is_zero() {
                return Err(EvalError::DivisionByZero { repr: Repr::BigInt });
            }
            Value::big_int(l % r)
        }
        Operands::Decimal(l, r) => Value::Decimal(
            l.checked_rem(divisor(r, Repr::Decimal)?)
                .ok_or_else(|| decimal_overflow("rem"))?,
        ),
    })
}

fn non_negative_exponent(exponent: i32) -> Result<u32> {
    u32::try_from(exponent).map_err(|_| EvalError::Arithmetic(format!("negative exponent {exponent}")))
}

/// Fixed-width powers go through `f64` and convert back with saturation, then
/// narrow. Big integers and decimals raise to the low 32 bits of the exponent.
pub(super) fn pow(operands: Operands<'_>) -> Result<Value> {
    Ok(match operands {
        Operands::Byte(l, r) => Value::Byte(f64::from(l).powf(f64::from(r)) as i32 as i8),
        Operands::Short(l, r) => Value::Short(f64::from(l).powf(f64::from(r)) as i32 as i16),
        Operands::Int(l, r) => Value::Int(f64::from(l).powf(f64::from(r)) as i32),
        Operands::Long(l, r) => Value::Long((l as f64).powf(r as f64) as i64),
        Operands::Float(l, r) => Value::Float(f64::from(l).powf(f64::from(r)) as f32),
        Operands::Double(l, r) => Value::Double(l.powf(r)),
        Operands::BigInt(l, r) => Value::big_int(l.pow(non_negative_exponent(low_i32(r))?)),
        Operands::Decimal(l, r) => {
            let exponent = non_negative_exponent(decimal_trunc(r) as i32)?;
            Value::Decimal(
                l.checked_powi(i64::from(exponent))
                    .ok_or_else(|| decimal_overflow("pow"))?,
            )
        }
    })
}
