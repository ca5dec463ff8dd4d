use crate::error::Result;
use crate::frame::Frame;
use crate::val::Value;

use super::{Node, evaluate_all};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    List,
    Set,
    Tuple,
}

#[derive(Debug)]
pub struct CollectionNode {
    kind: CollectionKind,
    items: Vec<Node>,
}

impl CollectionNode {
    pub fn new(kind: CollectionKind, items: Vec<Node>) -> Self {
        Self { kind, items }
    }

    pub(super) fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        let items = evaluate_all(&self.items, frame)?;
        Ok(match self.kind {
            CollectionKind::List => Value::list(items),
            CollectionKind::Set => Value::set(items),
            CollectionKind::Tuple => Value::tuple(items),
        })
    }
}

/// Map literal; each key is evaluated before its value.
#[derive(Debug)]
pub struct MapNode {
    entries: Vec<(Node, Node)>,
}

impl MapNode {
    pub fn new(entries: Vec<(Node, Node)>) -> Self {
        Self { entries }
    }

    pub(super) fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        let mut entries = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            let key = key.evaluate(frame)?;
            entries.push((key, value.evaluate(frame)?));
        }
        Ok(Value::map(entries))
    }
}
