use std::fmt;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{EvalError, Result};
use crate::val::{Value, ValueKind};

use super::{BinOp, err_op};

/// Members of the numeric tower, narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Repr {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    BigInt,
    Decimal,
}

impl Repr {
    pub const ALL: [Repr; 8] = [
        Repr::Byte,
        Repr::Short,
        Repr::Int,
        Repr::Long,
        Repr::Float,
        Repr::Double,
        Repr::BigInt,
        Repr::Decimal,
    ];

    pub fn kind(self) -> ValueKind {
        match self {
            Repr::Byte => ValueKind::Byte,
            Repr::Short => ValueKind::Short,
            Repr::Int => ValueKind::Int,
            Repr::Long => ValueKind::Long,
            Repr::Float => ValueKind::Float,
            Repr::Double => ValueKind::Double,
            Repr::BigInt => ValueKind::BigInt,
            Repr::Decimal => ValueKind::Decimal,
        }
    }

    pub fn is_integral(self) -> bool {
        matches!(self, Repr::Byte | Repr::Short | Repr::Int | Repr::Long | Repr::BigInt)
    }

    pub(crate) fn index(self) -> u8 {
        self as u8
    }

    pub(crate) fn from_index(index: u8) -> Option<Repr> {
        Repr::ALL.get(usize::from(index)).copied()
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind().name())
    }
}

/// Two operands of the same representation, unwrapped.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Operands<'a> {
    Byte(i8, i8),
    Short(i16, i16),
    Int(i32, i32),
    Long(i64, i64),
    Float(f32, f32),
    Double(f64, f64),
    BigInt(&'a BigInt, &'a BigInt),
    Decimal(Decimal, Decimal),
}

impl<'a> Operands<'a> {
    /// Pairs two values for `op`. A non-numeric side is a type mismatch; two
    /// numbers of different representations have no pairing at all.
    pub(crate) fn classify(op: BinOp, left: &'a Value, right: &'a Value) -> Result<Self> {
        Ok(match (left, right) {
            (Value::Byte(l), Value::Byte(r)) => Operands::Byte(*l, *r),
            (Value::Short(l), Value::Short(r)) => Operands::Short(*l, *r),
            (Value::Int(l), Value::Int(r)) => Operands::Int(*l, *r),
            (Value::Long(l), Value::Long(r)) => Operands::Long(*l, *r),
            (Value::Float(l), Value::Float(r)) => Operands::Float(*l, *r),
            (Value::Double(l), Value::Double(r)) => Operands::Double(*l, *r),
            (Value::BigInt(l), Value::BigInt(r)) => Operands::BigInt(l, r),
            (Value::Decimal(l), Value::Decimal(r)) => Operands::Decimal(*l, *r),
            _ if !left.is_numeric() => {
                return Err(EvalError::type_mismatch("binary operation", "number", left.kind()));
            }
            _ if !right.is_numeric() => {
                return Err(EvalError::type_mismatch("binary operation", "number", right.kind()));
            }
            _ => return Err(err_op(op, left, right)),
        })
    }

    pub(crate) fn repr(&self) -> Repr {
        match self {
            Operands::Byte(..) => Repr::Byte,
            Operands::Short(..) => Repr::Short,
            Operands::Int(..) => Repr::Int,
            Operands::Long(..) => Repr::Long,
            Operands::Float(..) => Repr::Float,
            Operands::Double(..) => Repr::Double,
            Operands::BigInt(..) => Repr::BigInt,
            Operands::Decimal(..) => Repr::Decimal,
        }
    }
}

/// Low 64 bits of a big integer in two's complement, the way a fixed-width
/// narrowing would see them.
pub(crate) fn low_i64(value: &BigInt) -> i64 {
    let mask = BigInt::from(u64::MAX);
    (value & &mask).to_u64().unwrap_or_default() as i64
}

/// Low 32 bits of a big integer; used for shift counts and exponents.
pub(crate) fn low_i32(value: &BigInt) -> i32 {
    low_i64(value) as i32
}

/// Integer part of a decimal, truncated toward zero.
pub(crate) fn decimal_trunc(value: Decimal) -> i128 {
    value.trunc().to_i128().unwrap_or_default()
}
