use std::sync::Arc;

use crate::call::{Callable, CaptureContext, Function};
use crate::error::Result;
use crate::frame::Frame;
use crate::val::Value;

use super::Node;

/// One captured name and the expression producing its value.
#[derive(Debug)]
pub struct Capture {
    name: Arc<str>,
    value: Node,
}

impl Capture {
    pub fn new(name: impl Into<Arc<str>>, value: Node) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Creates a callable from a function. With captures, each evaluation
/// snapshots their current values into a fresh context, so closures created
/// in a loop never observe each other's bindings.
#[derive(Debug)]
pub struct LambdaNode {
    function: Arc<Function>,
    captures: Vec<Capture>,
}

impl LambdaNode {
    pub fn new(function: Arc<Function>, captures: Vec<Capture>) -> Self {
        Self { function, captures }
    }

    pub(super) fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        if self.captures.is_empty() {
            return Ok(Value::Callable(Callable::function(Arc::clone(&self.function))));
        }
        let mut pairs = Vec::with_capacity(self.captures.len());
        for capture in &self.captures {
            pairs.push((Arc::clone(&capture.name), capture.value.evaluate(frame)?));
        }
        let context = Arc::new(CaptureContext::from_pairs(pairs));
        Ok(Value::Callable(Callable::closure(Arc::clone(&self.function), context)))
    }
}
