//! Binary operators over the numeric tower.
//!
//! Each operator owns a kernel: a plain function that matches on the paired
//! representation of its operands. Nodes pick the kernel once at construction
//! and reuse it for every evaluation.

mod arithmetic;
mod bitwise;
mod cast;
mod ops;
mod relational;
mod repr;

#[cfg(test)]
mod cast_test;
#[cfg(test)]
mod op_test;

pub use cast::cast;
pub(crate) use ops::{Kernel, err_op};
pub use ops::{BinOp, OpFamily};
pub(crate) use repr::Operands;
pub use repr::Repr;
