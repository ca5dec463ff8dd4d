use crate::error::Result;
use crate::frame::Frame;
use crate::val::Value;

use super::Node;

#[derive(Debug)]
pub struct IfNode {
    condition: Box<Node>,
    then_branch: Box<Node>,
    else_branch: Box<Node>,
}

impl IfNode {
    pub fn new(condition: Node, then_branch: Node, else_branch: Node) -> Self {
        Self {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    /// Only the taken branch is evaluated.
    pub(super) fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        if self.condition.evaluate_bool(frame, "if condition")? {
            self.then_branch.evaluate(frame)
        } else {
            self.else_branch.evaluate(frame)
        }
    }
}

/// Runs bindings in order for their effects, then yields the body.
#[derive(Debug)]
pub struct LetNode {
    bindings: Vec<Node>,
    body: Box<Node>,
}

impl LetNode {
    pub fn new(bindings: Vec<Node>, body: Node) -> Self {
        Self {
            bindings,
            body: Box::new(body),
        }
    }

    pub(super) fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        for binding in &self.bindings {
            binding.evaluate(frame)?;
        }
        self.body.evaluate(frame)
    }
}
