use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::Result;
use crate::frame::Frame;
use crate::op::{BinOp, Kernel, Operands, Repr};
use crate::val::Value;

use super::Node;

const UNINITIALIZED: u8 = u8::MAX;
const GENERIC: u8 = u8::MAX - 1;

/// Operand profile of a binary site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specialization {
    Uninitialized,
    /// Every evaluation so far saw operands of this representation.
    Specialized(Repr),
    /// Mixed representations were observed. Terminal.
    Generic,
}

/// Binary operator site.
///
/// The kernel is fixed when the node is built; each evaluation only pairs the
/// operands and jumps into it. The site also profiles which representation
/// flows through it, moving Uninitialized -> Specialized -> Generic and never
/// back. The profile never changes results.
pub struct BinaryNode {
    op: BinOp,
    kernel: Option<Kernel>,
    left: Box<Node>,
    right: Box<Node>,
    state: AtomicU8,
}

impl BinaryNode {
    pub fn new(op: BinOp, left: Node, right: Node) -> Self {
        Self {
            op,
            kernel: op.kernel(),
            left: Box::new(left),
            right: Box::new(right),
            state: AtomicU8::new(UNINITIALIZED),
        }
    }

    pub fn op(&self) -> BinOp {
        self.op
    }

    pub fn specialization(&self) -> Specialization {
        match self.state.load(Ordering::Acquire) {
            UNINITIALIZED => Specialization::Uninitialized,
            GENERIC => Specialization::Generic,
            index => Repr::from_index(index).map_or(Specialization::Generic, Specialization::Specialized),
        }
    }

    pub(super) fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        let left = self.left.evaluate(frame)?;
        let right = self.right.evaluate(frame)?;
        let Some(kernel) = self.kernel else {
            return Ok(Value::Bool((left == right) == (self.op == BinOp::Equals)));
        };
        let operands = Operands::classify(self.op, &left, &right)?;
        self.observe(operands.repr());
        kernel(operands)
    }

    #[inline]
    fn observe(&self, repr: Repr) {
        let tag = repr.index();
        match self
            .state
            .compare_exchange(UNINITIALIZED, tag, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                tracing::trace!(target: "ksr::specialize", op = %self.op, repr = %repr, "binary site specialized");
            }
            Err(current) if current == tag || current == GENERIC => {}
            Err(current) => {
                self.state.store(GENERIC, Ordering::Release);
                tracing::debug!(
                    target: "ksr::specialize",
                    op = %self.op,
                    was = ?Repr::from_index(current),
                    seen = %repr,
                    "binary site went generic"
                );
            }
        }
    }
}

impl fmt::Debug for BinaryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binary")
            .field("op", &self.op)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("state", &self.specialization())
            .finish()
    }
}
