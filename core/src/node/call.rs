use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::call::{CacheState, Callable, DispatchCache, InlineCache, NativeHandle, NativeRegistry};
use crate::error::{EvalError, Result};
use crate::frame::Frame;
use crate::module::{LoaderRef, ModuleLoader};
use crate::val::{Value, ValueKind};

use super::{Node, evaluate_all};

fn upgrade(loader: &LoaderRef, target: &str) -> Result<Arc<dyn ModuleLoader>> {
    loader
        .upgrade()
        .ok_or_else(|| EvalError::not_found(target, "module loader has been dropped"))
}

/// Call to a statically named module function. The target is resolved once,
/// on first execution, and dispatched through a direct-call cache.
pub struct CallNode {
    loader: LoaderRef,
    module: Arc<str>,
    function: Arc<str>,
    arguments: Vec<Node>,
    target: OnceCell<Callable>,
    dispatch: DispatchCache,
}

impl CallNode {
    pub fn new(
        loader: LoaderRef,
        module: impl Into<Arc<str>>,
        function: impl Into<Arc<str>>,
        arguments: Vec<Node>,
    ) -> Self {
        Self {
            loader,
            module: module.into(),
            function: function.into(),
            arguments,
            target: OnceCell::new(),
            dispatch: DispatchCache::new(),
        }
    }

    pub fn cache_state(&self) -> CacheState {
        self.dispatch.state()
    }

    fn resolve(&self) -> Result<Callable> {
        let qualified = format!("{}.{}", self.module, self.function);
        let loader = upgrade(&self.loader, &qualified)?;
        let module = loader
            .load(&self.module)
            .ok_or_else(|| EvalError::not_found(&qualified, format!("module '{}' is not loaded", self.module)))?;
        let callable = module
            .resolve(&self.function, None)
            .ok_or_else(|| EvalError::not_found(&qualified, "module has no such function"))?;
        tracing::debug!(target: "ksr::dispatch", callee = %qualified, "call target resolved");
        Ok(callable)
    }

    pub(super) fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        let arguments = evaluate_all(&self.arguments, frame)?;
        let callable = self.target.get_or_try_init(|| self.resolve())?;
        self.dispatch.dispatch(callable, arguments)
    }
}

impl fmt::Debug for CallNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("target", &format_args!("{}.{}", self.module, self.function))
            .field("arguments", &self.arguments)
            .field("dispatch", &self.dispatch)
            .finish()
    }
}

/// Module call that selects an overload by the first argument's kind.
///
/// Resolved targets are cached per kind. When the module has nothing that
/// fits, the native registered as `"<module>.<function>"` is used instead.
pub struct ModuleCallNode {
    loader: LoaderRef,
    module: Arc<str>,
    function: Arc<str>,
    arguments: Vec<Node>,
    cache: InlineCache<Option<ValueKind>, Callable>,
}

impl ModuleCallNode {
    pub fn new(
        loader: LoaderRef,
        module: impl Into<Arc<str>>,
        function: impl Into<Arc<str>>,
        arguments: Vec<Node>,
    ) -> Self {
        Self {
            loader,
            module: module.into(),
            function: function.into(),
            arguments,
            cache: InlineCache::new(),
        }
    }

    pub fn cache_state(&self) -> CacheState {
        self.cache.state()
    }

    fn resolve(&self, first: Option<ValueKind>) -> Result<Callable> {
        let qualified = format!("{}.{}", self.module, self.function);
        let loader = upgrade(&self.loader, &qualified)?;
        if let Some(callable) = loader
            .load(&self.module)
            .and_then(|module| module.resolve(&self.function, first))
        {
            tracing::debug!(target: "ksr::dispatch", callee = %qualified, first = ?first, "module call resolved");
            return Ok(callable);
        }
        match loader.natives().resolve(&qualified) {
            Ok(handle) => {
                tracing::debug!(target: "ksr::dispatch", callee = %qualified, "module call fell back to native");
                Ok(Callable::native(handle))
            }
            Err(EvalError::CallTargetNotFound { reason, .. }) => Err(EvalError::not_found(
                qualified,
                format!("no matching module function; native fallback failed: {reason}"),
            )),
            Err(err) => Err(err),
        }
    }

    pub(super) fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        let arguments = evaluate_all(&self.arguments, frame)?;
        let first = arguments.first().map(Value::kind);
        let callable = self.cache.get_or_resolve(first, |first| self.resolve(*first))?;
        callable.invoke(arguments)
    }
}

impl fmt::Debug for ModuleCallNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleCall")
            .field("target", &format_args!("{}.{}", self.module, self.function))
            .field("arguments", &self.arguments)
            .field("cache", &self.cache)
            .finish()
    }
}

/// Call to a host native by id.
///
/// Arguments are evaluated before the id is resolved. Resolution happens
/// once; a failure is remembered and reported by every later execution of
/// this site, without touching other sites.
pub struct NativeCallNode {
    natives: Arc<NativeRegistry>,
    id: Arc<str>,
    arguments: Vec<Node>,
    resolved: OnceCell<Result<NativeHandle>>,
}

impl NativeCallNode {
    pub fn new(natives: Arc<NativeRegistry>, id: impl Into<Arc<str>>, arguments: Vec<Node>) -> Self {
        Self {
            natives,
            id: id.into(),
            arguments,
            resolved: OnceCell::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub(super) fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        let arguments = evaluate_all(&self.arguments, frame)?;
        let handle = self
            .resolved
            .get_or_init(|| self.natives.resolve(&self.id))
            .as_ref()
            .map_err(Clone::clone)?;
        handle.execute(&arguments)
    }
}

impl fmt::Debug for NativeCallNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeCall")
            .field("id", &self.id)
            .field("arguments", &self.arguments)
            .finish()
    }
}

/// Call through a callee expression. Arguments are evaluated first, then the
/// callee.
pub struct LambdaCallNode {
    callee: Box<Node>,
    arguments: Vec<Node>,
    dispatch: DispatchCache,
}

impl LambdaCallNode {
    pub fn new(callee: Node, arguments: Vec<Node>) -> Self {
        Self {
            callee: Box::new(callee),
            arguments,
            dispatch: DispatchCache::new(),
        }
    }

    pub fn cache_state(&self) -> CacheState {
        self.dispatch.state()
    }

    pub(super) fn evaluate(&self, frame: &mut Frame) -> Result<Value> {
        let arguments = evaluate_all(&self.arguments, frame)?;
        match self.callee.evaluate(frame)? {
            Value::Callable(callable) => self.dispatch.dispatch(&callable, arguments),
            other => Err(EvalError::type_mismatch("lambda call", "Callable", other.kind())),
        }
    }
}

impl fmt::Debug for LambdaCallNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LambdaCall")
            .field("callee", &self.callee)
            .field("arguments", &self.arguments)
            .field("dispatch", &self.dispatch)
            .finish()
    }
}
