use std::fmt;
use std::sync::Arc;

use crate::error::{EvalError, Result};
use crate::util::fast_map::FastHashMap;
use crate::val::Value;

use super::EntryId;

/// Host-provided code callable from scripts.
///
/// Natives report failures through `anyhow`; the core wraps them into
/// [`EvalError::Native`] with the native's id attached.
pub trait NativeFunction: Send + Sync {
    fn execute(&self, args: &[Value]) -> anyhow::Result<Value>;
}

impl<F> NativeFunction for F
where
    F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync,
{
    fn execute(&self, args: &[Value]) -> anyhow::Result<Value> {
        self(args)
    }
}

/// Builds a fresh native instance each time an id is resolved.
pub type NativeFactory = Box<dyn Fn() -> anyhow::Result<Arc<dyn NativeFunction>> + Send + Sync>;

/// A resolved native, tagged with the id it was resolved under.
#[derive(Clone)]
pub struct NativeHandle {
    id: Arc<str>,
    function: Arc<dyn NativeFunction>,
}

impl NativeHandle {
    pub fn new(id: impl Into<Arc<str>>, function: Arc<dyn NativeFunction>) -> Self {
        Self { id: id.into(), function }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn entry_id(&self) -> EntryId {
        EntryId(Arc::as_ptr(&self.function).cast::<()>() as usize)
    }

    pub fn execute(&self, args: &[Value]) -> Result<Value> {
        self.function.execute(args).map_err(|err| {
            tracing::debug!(target: "ksr::native", id = %self.id, error = %err, "native call failed");
            EvalError::Native {
                name: self.id.to_string(),
                message: format!("{err:#}"),
            }
        })
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeHandle({})", self.id)
    }
}

/// A group of natives registered together, e.g. one stdlib area.
pub trait NativeModule: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn register(&self, natives: &mut NativeRegistry) -> anyhow::Result<()>;
}

/// Id-to-factory table consulted by native calls and by module calls that
/// miss their module. Filled at startup, read-only afterwards.
#[derive(Default)]
pub struct NativeRegistry {
    factories: FastHashMap<Arc<str>, NativeFactory>,
}

impl NativeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_factory(&mut self, id: impl Into<Arc<str>>, factory: NativeFactory) {
        let id = id.into();
        if self.factories.insert(Arc::clone(&id), factory).is_some() {
            tracing::debug!(target: "ksr::native", id = %id, "native replaced");
        }
    }

    /// Registers a shared instance; every resolution of `id` hands out the
    /// same function.
    pub fn register<F>(&mut self, id: impl Into<Arc<str>>, function: F)
    where
        F: NativeFunction + 'static,
    {
        let shared: Arc<dyn NativeFunction> = Arc::new(function);
        self.register_factory(id, Box::new(move || Ok(Arc::clone(&shared))));
    }

    pub fn register_module(&mut self, module: &dyn NativeModule) -> anyhow::Result<()> {
        let before = self.factories.len();
        module.register(self)?;
        tracing::debug!(
            target: "ksr::native",
            module = module.name(),
            added = self.factories.len().saturating_sub(before),
            "native module registered"
        );
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Sorted ids, for diagnostics.
    pub fn ids(&self) -> Vec<Arc<str>> {
        let mut ids: Vec<_> = self.factories.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn resolve(&self, id: &str) -> Result<NativeHandle> {
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| EvalError::not_found(id, "no native registered under this id"))?;
        let function = factory().map_err(|err| EvalError::not_found(id, format!("{err:#}")))?;
        tracing::trace!(target: "ksr::native", id, "native resolved");
        Ok(NativeHandle::new(id, function))
    }
}

impl fmt::Debug for NativeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeRegistry").field("ids", &self.ids()).finish()
    }
}
