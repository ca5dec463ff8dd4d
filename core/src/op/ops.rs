use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};
use crate::val::Value;

use super::{Operands, arithmetic, bitwise, relational};

/// Strategy for one operator: total over every pairing, failing with
/// `UnsupportedOperandType` where the representation has no meaning for it.
pub(crate) type Kernel = fn(Operands<'_>) -> Result<Value>;

pub(crate) fn err_op(op: BinOp, l: &Value, r: &Value) -> EvalError {
    EvalError::UnsupportedOperandType {
        op,
        left: l.kind(),
        right: r.kind(),
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    /// Structural equality over any two values.
    Equals,
    NotEquals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpFamily {
    Arithmetic,
    Bitwise,
    Relational,
    Structural,
}

impl BinOp {
    pub fn family(self) -> OpFamily {
        match self {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow => OpFamily::Arithmetic,
            BinOp::BitAnd | BinOp::BitOr | BinOp::BitXor | BinOp::Shl | BinOp::Shr => OpFamily::Bitwise,
            BinOp::Eq | BinOp::Ne | BinOp::Gt | BinOp::Lt | BinOp::Ge | BinOp::Le => OpFamily::Relational,
            BinOp::Equals | BinOp::NotEquals => OpFamily::Structural,
        }
    }

    pub fn is_arith(self) -> bool {
        self.family() == OpFamily::Arithmetic
    }

    pub fn is_cmp(self) -> bool {
        matches!(self.family(), OpFamily::Relational | OpFamily::Structural)
    }

    /// Kernel for numeric operators; `None` for the structural pair, which
    /// accepts any values.
    pub(crate) fn kernel(self) -> Option<Kernel> {
        let kernel: Kernel = match self {
            BinOp::Add => arithmetic::add,
            BinOp::Sub => arithmetic::sub,
            BinOp::Mul => arithmetic::mul,
            BinOp::Div => arithmetic::div,
            BinOp::Mod => arithmetic::rem,
            BinOp::Pow => arithmetic::pow,
            BinOp::BitAnd => bitwise::and,
            BinOp::BitOr => bitwise::or,
            BinOp::BitXor => bitwise::xor,
            BinOp::Shl => bitwise::shl,
            BinOp::Shr => bitwise::shr,
            BinOp::Eq => relational::eq,
            BinOp::Ne => relational::ne,
            BinOp::Gt => relational::gt,
            BinOp::Lt => relational::lt,
            BinOp::Ge => relational::ge,
            BinOp::Le => relational::le,
            BinOp::Equals | BinOp::NotEquals => return None,
        };
        Some(kernel)
    }

    /// Applies the operator to two already-evaluated values, without any
    /// per-site specialization.
    pub fn eval_vals(self, l: &Value, r: &Value) -> Result<Value> {
        match self.kernel() {
            Some(kernel) => kernel(Operands::classify(self, l, r)?),
            None => Ok(Value::Bool((l == r) == (self == BinOp::Equals))),
        }
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinOp::Add => write!(f, "+"),
            BinOp::Sub => write!(f, "-"),
            BinOp::Mul => write!(f, "*"),
            BinOp::Div => write!(f, "/"),
            BinOp::Mod => write!(f, "%"),
            BinOp::Pow => write!(f, "**"),
            BinOp::BitAnd => write!(f, "&"),
            BinOp::BitOr => write!(f, "|"),
            BinOp::BitXor => write!(f, "^"),
            BinOp::Shl => write!(f, "<<"),
            BinOp::Shr => write!(f, ">>"),
            BinOp::Eq => write!(f, "=="),
            BinOp::Ne => write!(f, "!="),
            BinOp::Gt => write!(f, ">"),
            BinOp::Lt => write!(f, "<"),
            BinOp::Ge => write!(f, ">="),
            BinOp::Le => write!(f, "<="),
            BinOp::Equals => write!(f, "==="),
            BinOp::NotEquals => write!(f, "!=="),
        }
    }
}
