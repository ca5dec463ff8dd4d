use crate::error::Result;
use crate::val::Value;

use super::repr::Operands;

// NaN compares unequal to everything here, itself included; structural
// `Equals` is the bitwise relation.
macro_rules! relational_kernel {
    ($($name:ident => $op:tt),* $(,)?) => {
        $(
            pub(super) fn $name(operands: Operands<'_>) -> Result<Value> {
                Ok(Value::Bool(match operands {
                    Operands::Byte(l, r) => l $op r,
                    Operands::Short(l, r) => l $op r,
                    Operands::Int(l, r) => l $op r,
                    Operands::Long(l, r) => l $op r,
                    Operands::Float(l, r) => l $op r,
                    Operands::Double(l, r) => l $op r,
                    Operands::BigInt(l, r) => l $op r,
                    Operands::Decimal(l, r) => l $op r,
                }))
            }
        )*
    };
}

relational_kernel! {
    eq => ==,
    ne => !=,
    gt => >,
    lt => <,
    ge => >=,
    le => <=,
}
