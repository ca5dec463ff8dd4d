//! Execution core for KSR.
//!
//! Programs arrive here as an already-built tree of [`node::Node`]s. Each node
//! evaluates directly against a [`frame::Frame`]; there is no bytecode pass.
//! Binary operations route through a representation switch in [`op`], closures
//! snapshot their captures at creation time, and every call site memoizes its
//! resolved targets in a bounded polymorphic cache (see [`call::InlineCache`]).

pub mod call;
pub mod config;
pub mod error;
pub mod frame;
pub mod module;
pub mod node;
pub mod op;
pub mod util;
pub mod val;

pub use call::{Callable, CallTarget, CaptureContext, Function, NativeFunction, NativeModule, NativeRegistry};
pub use config::RuntimeOptions;
pub use error::{EvalError, Result};
pub use frame::{Frame, SlotKind};
pub use module::{LoaderRef, Module, ModuleLoader, ModuleRegistry};
pub use node::Node;
pub use op::{BinOp, Repr};
pub use val::{Value, ValueKind};
