use num_bigint::BigInt;

use crate::error::{EvalError, Result};
use crate::val::Value;

use super::repr::{Operands, low_i32};
use super::{BinOp, Repr};

fn unsupported(op: BinOp, repr: Repr) -> EvalError {
    EvalError::UnsupportedOperandType {
        op,
        left: repr.kind(),
        right: repr.kind(),
    }
}

macro_rules! logic_kernel {
    ($name:ident, $op:tt, $binop:expr) => {
        pub(super) fn $name(operands: Operands<'_>) -> Result<Value> {
            Ok(match operands {
                Operands::Byte(l, r) => Value::Byte(l $op r),
                Operands::Short(l, r) => Value::Short(l $op r),
                Operands::Int(l, r) => Value::Int(l $op r),
                Operands::Long(l, r) => Value::Long(l $op r),
                Operands::BigInt(l, r) => Value::big_int(l $op r),
                other => return Err(unsupported($binop, other.repr())),
            })
        }
    };
}

logic_kernel!(and, &, BinOp::BitAnd);
logic_kernel!(or, |, BinOp::BitOr);
logic_kernel!(xor, ^, BinOp::BitXor);

/// Shifts a big integer left by `count`; a negative count shifts right.
fn shift_big(value: &BigInt, count: i32) -> BigInt {
    let distance = count.unsigned_abs() as usize;
    if count >= 0 { value << distance } else { value >> distance }
}

// Byte and Short shift as 32-bit values and narrow afterwards; the count is
// masked to the width being shifted.
pub(super) fn shl(operands: Operands<'_>) -> Result<Value> {
    Ok(match operands {
        Operands::Byte(l, r) => Value::Byte(i32::from(l).wrapping_shl(r as u32) as i8),
        Operands::Short(l, r) => Value::Short(i32::from(l).wrapping_shl(r as u32) as i16),
        Operands::Int(l, r) => Value::Int(l.wrapping_shl(r as u32)),
        Operands::Long(l, r) => Value::Long(l.wrapping_shl(r as u32)),
        Operands::BigInt(l, r) => Value::big_int(shift_big(l, low_i32(r))),
        other => return Err(unsupported(BinOp::Shl, other.repr())),
    })
}

/// Arithmetic (sign-propagating) right shift.
pub(super) fn shr(operands: Operands<'_>) -> Result<Value> {
    Ok(match operands {
        Operands::Byte(l, r) => Value::Byte(i32::from(l).wrapping_shr(r as u32) as i8),
        Operands::Short(l, r) => Value::Short(i32::from(l).wrapping_shr(r as u32) as i16),
        Operands::Int(l, r) => Value::Int(l.wrapping_shr(r as u32)),
        Operands::Long(l, r) => Value::Long(l.wrapping_shr(r as u32)),
        Operands::BigInt(l, r) => Value::big_int(shift_big(l, low_i32(r).wrapping_neg())),
        other => return Err(unsupported(BinOp::Shr, other.repr())),
    })
}
