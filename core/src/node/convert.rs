use crate::error::Result;
use crate::frame::Frame;
use crate::op::{Repr, cast};
use crate::val::Value;

use super::Node;

#[derive(Debug)]
pub struct CastNode {
    target: Repr,
    value: Box<Node>,
}

impl CastNode {
    pub fn new(target: Repr, value: Node) -> Self {
        Self {
            target,
            value: Box::new(value),
        }
    }

    pub fn target(&self) -> Repr {
        self.target
    }

    pub(super) fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        cast(&self.value.evaluate(frame)?, self.target)
    }
}
