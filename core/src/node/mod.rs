//! Executable tree nodes.
//!
//! A [`Node`] evaluates directly against a [`Frame`]. Nodes are immutable
//! apart from their per-site caches, which are lock-free and monotonic, so a
//! function body can be shared by every thread that calls it.

use std::fmt;
use std::sync::Arc;

use crate::call::{CacheState, Function, NativeRegistry};
use crate::error::{EvalError, Result};
use crate::frame::Frame;
use crate::module::LoaderRef;
use crate::op::{BinOp, Repr};
use crate::val::Value;

mod binary;
mod call;
mod collection;
mod control;
mod convert;
mod lambda;
mod var;


pub use binary::{BinaryNode, Specialization};
pub use call::{CallNode, LambdaCallNode, ModuleCallNode, NativeCallNode};
pub use collection::{CollectionKind, CollectionNode, MapNode};
pub use control::{IfNode, LetNode};
pub use convert::CastNode;
pub use lambda::{Capture, LambdaNode};
pub use var::{SetVarNode, VarAccessNode};

pub enum Node {
    Literal(Value),
    /// Positional argument of the enclosing call.
    Arg(usize),
    Var(VarAccessNode),
    SetVar(SetVarNode),
    Let(LetNode),
    If(IfNode),
    Binary(BinaryNode),
    Cast(CastNode),
    ToText(Box<Node>),
    Collection(CollectionNode),
    Map(MapNode),
    Lambda(LambdaNode),
    Call(CallNode),
    ModuleCall(ModuleCallNode),
    NativeCall(NativeCallNode),
    LambdaCall(LambdaCallNode),
}

impl Node {
    pub fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        match self {
            Node::Literal(value) => Ok(value.clone()),
            Node::Arg(index) => frame.argument(*index).cloned(),
            Node::Var(node) => node.evaluate(frame),
            Node::SetVar(node) => node.evaluate(frame),
            Node::Let(node) => node.evaluate(frame),
            Node::If(node) => node.evaluate(frame),
            Node::Binary(node) => node.evaluate(frame),
            Node::Cast(node) => node.evaluate(frame),
            Node::ToText(expr) => Ok(Value::Text(expr.evaluate(frame)?.to_text())),
            Node::Collection(node) => node.evaluate(frame),
            Node::Map(node) => node.evaluate(frame),
            Node::Lambda(node) => node.evaluate(frame),
            Node::Call(node) => node.evaluate(frame),
            Node::ModuleCall(node) => node.evaluate(frame),
            Node::NativeCall(node) => node.evaluate(frame),
            Node::LambdaCall(node) => node.evaluate(frame),
        }
    }

    /// Evaluates and requires a Bool.
    pub fn evaluate_bool(&self, frame: &mut Frame, context: &'static str) -> Result<bool> {
        match self.evaluate(frame)? {
            Value::Bool(b) => Ok(b),
            other => Err(EvalError::type_mismatch(context, "Bool", other.kind())),
        }
    }

    /// Inline cache state of a call node; `None` for anything else.
    pub fn cache_state(&self) -> Option<CacheState> {
        match self {
            Node::Call(node) => Some(node.cache_state()),
            Node::ModuleCall(node) => Some(node.cache_state()),
            Node::LambdaCall(node) => Some(node.cache_state()),
            _ => None,
        }
    }

    /// Operand specialization of a binary node; `None` for anything else.
    pub fn specialization(&self) -> Option<Specialization> {
        match self {
            Node::Binary(node) => Some(node.specialization()),
            _ => None,
        }
    }
}

// Constructors
impl Node {
    pub fn literal(value: impl Into<Value>) -> Node {
        Node::Literal(value.into())
    }

    pub fn arg(index: usize) -> Node {
        Node::Arg(index)
    }

    pub fn var(slot: usize) -> Node {
        Node::Var(VarAccessNode::slot(slot))
    }

    /// Reads `name` from the closure's capture context instead of a slot.
    pub fn captured(name: impl Into<Arc<str>>) -> Node {
        Node::Var(VarAccessNode::capture(name))
    }

    pub fn set_var(slot: usize, value: Node) -> Node {
        Node::SetVar(SetVarNode::new(slot, value))
    }

    pub fn let_in(bindings: Vec<Node>, body: Node) -> Node {
        Node::Let(LetNode::new(bindings, body))
    }

    pub fn if_else(condition: Node, then_branch: Node, else_branch: Node) -> Node {
        Node::If(IfNode::new(condition, then_branch, else_branch))
    }

    pub fn binary(op: BinOp, left: Node, right: Node) -> Node {
        Node::Binary(BinaryNode::new(op, left, right))
    }

    pub fn cast(target: Repr, value: Node) -> Node {
        Node::Cast(CastNode::new(target, value))
    }

    pub fn to_text(value: Node) -> Node {
        Node::ToText(Box::new(value))
    }

    pub fn list(items: Vec<Node>) -> Node {
        Node::Collection(CollectionNode::new(CollectionKind::List, items))
    }

    pub fn set(items: Vec<Node>) -> Node {
        Node::Collection(CollectionNode::new(CollectionKind::Set, items))
    }

    pub fn tuple(items: Vec<Node>) -> Node {
        Node::Collection(CollectionNode::new(CollectionKind::Tuple, items))
    }

    pub fn map(entries: Vec<(Node, Node)>) -> Node {
        Node::Map(MapNode::new(entries))
    }

    pub fn lambda(function: Arc<Function>, captures: Vec<Capture>) -> Node {
        Node::Lambda(LambdaNode::new(function, captures))
    }

    pub fn call(
        loader: LoaderRef,
        module: impl Into<Arc<str>>,
        function: impl Into<Arc<str>>,
        arguments: Vec<Node>,
    ) -> Node {
        Node::Call(CallNode::new(loader, module, function, arguments))
    }

    pub fn module_call(
        loader: LoaderRef,
        module: impl Into<Arc<str>>,
        function: impl Into<Arc<str>>,
        arguments: Vec<Node>,
    ) -> Node {
        Node::ModuleCall(ModuleCallNode::new(loader, module, function, arguments))
    }

    pub fn native_call(natives: Arc<NativeRegistry>, id: impl Into<Arc<str>>, arguments: Vec<Node>) -> Node {
        Node::NativeCall(NativeCallNode::new(natives, id, arguments))
    }

    pub fn lambda_call(callee: Node, arguments: Vec<Node>) -> Node {
        Node::LambdaCall(LambdaCallNode::new(callee, arguments))
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(value) => write!(f, "Literal({value:?})"),
            Node::Arg(index) => write!(f, "Arg({index})"),
            Node::Var(node) => fmt::Debug::fmt(node, f),
            Node::SetVar(node) => fmt::Debug::fmt(node, f),
            Node::Let(node) => fmt::Debug::fmt(node, f),
            Node::If(node) => fmt::Debug::fmt(node, f),
            Node::Binary(node) => fmt::Debug::fmt(node, f),
            Node::Cast(node) => fmt::Debug::fmt(node, f),
            Node::ToText(expr) => f.debug_tuple("ToText").field(expr).finish(),
            Node::Collection(node) => fmt::Debug::fmt(node, f),
            Node::Map(node) => fmt::Debug::fmt(node, f),
            Node::Lambda(node) => fmt::Debug::fmt(node, f),
            Node::Call(node) => fmt::Debug::fmt(node, f),
            Node::ModuleCall(node) => fmt::Debug::fmt(node, f),
            Node::NativeCall(node) => fmt::Debug::fmt(node, f),
            Node::LambdaCall(node) => fmt::Debug::fmt(node, f),
        }
    }
}

/// Evaluates call arguments left to right.
pub(crate) fn evaluate_all(nodes: &[Node], frame: &mut Frame) -> Result<Vec<Value>> {
    let mut values = Vec::with_capacity(nodes.len());
    for node in nodes {
        values.push(node.evaluate(frame)?);
    }
    Ok(values)
}
