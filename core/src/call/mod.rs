//! Functions, callables and the call-site machinery.

use std::fmt;
use std::sync::Arc;

use crate::error::{EvalError, Result};
use crate::frame::Frame;
use crate::node::Node;
use crate::util::fast_map::{FastHashMap, collect_map};
use crate::val::Value;

mod cache;
mod depth;
mod dispatch;
mod native;


pub use cache::{CALL_SITE_CACHE_LIMIT, CacheState, InlineCache};
pub use dispatch::DispatchCache;
pub use native::{NativeFactory, NativeFunction, NativeHandle, NativeModule, NativeRegistry};

use depth::CallDepthGuard;

/// Compiled unit of executable code: a body plus the frame shape it needs.
#[derive(Debug)]
pub struct Function {
    name: Arc<str>,
    /// `None` for entry points, which accept whatever the host passes.
    arity: Option<usize>,
    slots: usize,
    body: Node,
}

impl Function {
    pub fn new(name: impl Into<Arc<str>>, arity: usize, slots: usize, body: Node) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            arity: Some(arity),
            slots,
            body,
        })
    }

    /// Wraps a root node as a host entry point with `slots` locals.
    pub fn entry(body: Node, slots: usize) -> Arc<Self> {
        Arc::new(Self {
            name: Arc::from("<entry>"),
            arity: None,
            slots,
            body,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub(crate) fn invoke(&self, context: Option<&Arc<CaptureContext>>, arguments: Vec<Value>) -> Result<Value> {
        if let Some(expected) = self.arity.filter(|expected| *expected != arguments.len()) {
            return Err(EvalError::ArityMismatch {
                callee: Arc::clone(&self.name),
                expected,
                found: arguments.len(),
            });
        }
        let _depth = CallDepthGuard::enter()?;
        let mut frame = Frame::new(self.slots, arguments, context.cloned());
        self.body.evaluate(&mut frame)
    }
}

/// Immutable name-to-value snapshot taken when a closure is created.
#[derive(Debug, Default)]
pub struct CaptureContext {
    values: FastHashMap<Arc<str>, Value>,
}

impl CaptureContext {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Arc<str>, Value)>) -> Self {
        Self {
            values: collect_map(pairs),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_ref(), v))
    }
}

/// Identity of an entry point. Two callables share it exactly when they run
/// the same code; captures do not participate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

/// What a callable ultimately runs.
#[derive(Clone)]
pub enum CallTarget {
    Function(Arc<Function>),
    Native(NativeHandle),
}

impl CallTarget {
    pub fn entry_id(&self) -> EntryId {
        match self {
            CallTarget::Function(f) => EntryId(Arc::as_ptr(f) as usize),
            CallTarget::Native(handle) => handle.entry_id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CallTarget::Function(f) => f.name(),
            CallTarget::Native(handle) => handle.id(),
        }
    }

    pub(crate) fn invoke(&self, context: Option<&Arc<CaptureContext>>, arguments: Vec<Value>) -> Result<Value> {
        match self {
            CallTarget::Function(f) => f.invoke(context, arguments),
            CallTarget::Native(handle) => handle.execute(&arguments),
        }
    }
}

impl fmt::Debug for CallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallTarget::Function(func) => write!(f, "Function({})", func.name()),
            CallTarget::Native(handle) => write!(f, "Native({})", handle.id()),
        }
    }
}

/// First-class callable value: an entry point plus, for closures, the
/// capture context it was created with.
#[derive(Clone)]
pub struct Callable {
    target: CallTarget,
    captures: Option<Arc<CaptureContext>>,
}

impl Callable {
    pub fn function(function: Arc<Function>) -> Self {
        Self {
            target: CallTarget::Function(function),
            captures: None,
        }
    }

    pub fn closure(function: Arc<Function>, captures: Arc<CaptureContext>) -> Self {
        Self {
            target: CallTarget::Function(function),
            captures: Some(captures),
        }
    }

    pub fn native(handle: NativeHandle) -> Self {
        Self {
            target: CallTarget::Native(handle),
            captures: None,
        }
    }

    /// Host entry point for a root node with `slots` locals.
    pub fn entry_point(root: Node, slots: usize) -> Self {
        Self::function(Function::entry(root, slots))
    }

    pub fn target(&self) -> &CallTarget {
        &self.target
    }

    pub fn captures(&self) -> Option<&Arc<CaptureContext>> {
        self.captures.as_ref()
    }

    pub fn entry_id(&self) -> EntryId {
        self.target.entry_id()
    }

    pub fn name(&self) -> &str {
        self.target.name()
    }

    /// Same entry point and the very same capture snapshot.
    pub fn same_as(&self, other: &Callable) -> bool {
        self.entry_id() == other.entry_id()
            && match (&self.captures, &other.captures) {
                (None, None) => true,
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                _ => false,
            }
    }

    pub fn invoke(&self, arguments: Vec<Value>) -> Result<Value> {
        self.target.invoke(self.captures.as_ref(), arguments)
    }

    pub fn call(&self, arguments: &[Value]) -> Result<Value> {
        self.invoke(arguments.to_vec())
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("target", &self.target)
            .field("captures", &self.captures.as_ref().map(|c| c.len()))
            .finish()
    }
}

impl From<CallTarget> for Callable {
    fn from(target: CallTarget) -> Self {
        Self { target, captures: None }
    }
}
