use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::error::{EvalError, Result};
use crate::val::Value;

use super::Repr;
use super::repr::{decimal_trunc, low_i64};

/// Numeric source of a cast, widened to the lossless carrier for its family.
enum Source<'a> {
    Fixed(i64),
    Real(f64),
    Big(&'a BigInt),
    Dec(Decimal),
}

impl<'a> Source<'a> {
    fn of(value: &'a Value) -> Result<Self> {
        Ok(match value {
            Value::Byte(v) => Source::Fixed(i64::from(*v)),
            Value::Short(v) => Source::Fixed(i64::from(*v)),
            Value::Int(v) => Source::Fixed(i64::from(*v)),
            Value::Long(v) => Source::Fixed(*v),
            Value::Float(v) => Source::Real(f64::from(*v)),
            Value::Double(v) => Source::Real(*v),
            Value::BigInt(v) => Source::Big(v),
            Value::Decimal(v) => Source::Dec(*v),
            other => return Err(EvalError::type_mismatch("numeric cast", "number", other.kind())),
        })
    }

    /// Two's-complement bits for narrowing integral targets. Reals saturate
    /// at the 64-bit range first.
    fn bits64(&self) -> i64 {
        match self {
            Source::Fixed(v) => *v,
            Source::Real(v) => *v as i64,
            Source::Big(v) => low_i64(v),
            Source::Dec(v) => decimal_trunc(*v) as i64,
        }
    }

    /// Bits for 32-bit-and-narrower targets. Reals saturate at the 32-bit
    /// range before narrowing further.
    fn bits32(&self) -> i32 {
        match self {
            Source::Real(v) => *v as i32,
            other => other.bits64() as i32,
        }
    }

    fn real(&self) -> f64 {
        match self {
            Source::Fixed(v) => *v as f64,
            Source::Real(v) => *v,
            Source::Big(v) => v.to_f64().unwrap_or(f64::NAN),
            Source::Dec(v) => v.to_f64().unwrap_or(f64::NAN),
        }
    }
}

/// Converts a numeric value to `target`. Narrowing integral casts keep the
/// low-order bits; real-to-integral casts truncate toward zero and saturate.
pub fn cast(value: &Value, target: Repr) -> Result<Value> {
    let source = Source::of(value)?;
    Ok(match target {
        Repr::Byte => Value::Byte(source.bits32() as i8),
        Repr::Short => Value::Short(source.bits32() as i16),
        Repr::Int => Value::Int(source.bits32()),
        Repr::Long => Value::Long(source.bits64()),
        Repr::Float => Value::Float(match source {
            Source::Fixed(v) => v as f32,
            Source::Big(v) => v.to_f32().unwrap_or(f32::NAN),
            Source::Dec(v) => v.to_f32().unwrap_or(f32::NAN),
            Source::Real(v) => v as f32,
        }),
        Repr::Double => Value::Double(source.real()),
        Repr::BigInt => match source {
            Source::Big(_) => value.clone(),
            Source::Dec(v) => Value::big_int(decimal_trunc(v)),
            other => Value::big_int(other.bits64()),
        },
        Repr::Decimal => Value::Decimal(match source {
            Source::Fixed(v) => Decimal::from(v),
            Source::Real(v) => Decimal::from_f64(v)
                .ok_or_else(|| EvalError::Arithmetic(format!("{v} has no decimal representation")))?,
            Source::Big(v) => v
                .to_i128()
                .and_then(Decimal::from_i128)
                .ok_or_else(|| EvalError::Arithmetic(format!("{v} exceeds the decimal range")))?,
            Source::Dec(v) => v,
        }),
    })
}
