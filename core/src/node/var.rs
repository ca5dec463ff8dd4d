use std::sync::Arc;

use crate::error::Result;
use crate::frame::Frame;
use crate::val::Value;

use super::Node;

/// Reads a local slot, or a captured name when built with one.
#[derive(Debug)]
pub struct VarAccessNode {
    slot: usize,
    capture: Option<Arc<str>>,
}

impl VarAccessNode {
    pub fn slot(slot: usize) -> Self {
        Self { slot, capture: None }
    }

    pub fn capture(name: impl Into<Arc<str>>) -> Self {
        Self {
            slot: 0,
            capture: Some(name.into()),
        }
    }

    pub fn capture_name(&self) -> Option<&str> {
        self.capture.as_deref()
    }

    pub(super) fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        match &self.capture {
            Some(name) => frame.capture(name),
            None => frame.read(self.slot),
        }
    }
}

/// Writes a slot and yields the written value.
#[derive(Debug)]
pub struct SetVarNode {
    slot: usize,
    value: Box<Node>,
}

impl SetVarNode {
    pub fn new(slot: usize, value: Node) -> Self {
        Self {
            slot,
            value: Box::new(value),
        }
    }

    pub(super) fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        let value = self.value.evaluate(frame)?;
        frame.write(self.slot, value.clone())?;
        Ok(value)
    }
}
