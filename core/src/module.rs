use std::fmt;
use std::sync::{Arc, Weak};

use dashmap::DashMap;

use crate::call::{CallTarget, Callable, Function, NativeHandle, NativeRegistry};
use crate::util::fast_map::FastHashMap;
use crate::val::ValueKind;

/// Non-owning handle from call nodes back to whatever loads their modules.
///
/// Functions inside a module hold call nodes that point back at the loader,
/// so the handle is weak to keep the module graph acyclic.
pub type LoaderRef = Weak<dyn ModuleLoader>;

/// Source of modules and natives for call resolution.
pub trait ModuleLoader: Send + Sync {
    /// Look a module up by name.
    fn load(&self, name: &str) -> Option<Arc<Module>>;

    /// Natives consulted when a module call finds nothing in its module.
    fn natives(&self) -> &NativeRegistry;
}

/// Downgrades any concrete loader into a [`LoaderRef`].
pub fn loader_ref<L: ModuleLoader + 'static>(loader: &Arc<L>) -> LoaderRef {
    let weak: Weak<L> = Arc::downgrade(loader);
    weak
}

#[derive(Clone)]
struct Overload {
    /// `None` accepts any first argument.
    first_argument: Option<ValueKind>,
    target: CallTarget,
}

/// A named group of functions. A function name may carry several overloads
/// keyed by the dynamic kind of the first argument; those are what module
/// calls select between.
#[derive(Clone)]
pub struct Module {
    name: Arc<str>,
    functions: FastHashMap<Arc<str>, Vec<Overload>>,
}

impl Module {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            functions: FastHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds a function under its own name, accepting any first argument.
    pub fn with_function(self, function: Arc<Function>) -> Self {
        let name: Arc<str> = Arc::from(function.name());
        self.with_target(name, None, CallTarget::Function(function))
    }

    /// Adds a function that is only selected when the first argument has `kind`.
    pub fn with_overload(self, kind: ValueKind, function: Arc<Function>) -> Self {
        let name: Arc<str> = Arc::from(function.name());
        self.with_target(name, Some(kind), CallTarget::Function(function))
    }

    pub fn with_native(self, name: impl Into<Arc<str>>, handle: NativeHandle) -> Self {
        self.with_target(name, None, CallTarget::Native(handle))
    }

    pub fn with_target(
        mut self,
        name: impl Into<Arc<str>>,
        first_argument: Option<ValueKind>,
        target: CallTarget,
    ) -> Self {
        let overloads = self.functions.entry(name.into()).or_default();
        overloads.retain(|existing| existing.first_argument != first_argument);
        overloads.push(Overload { first_argument, target });
        self
    }

    /// Sorted function names.
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(|name| name.as_ref()).collect();
        names.sort_unstable();
        names
    }

    /// Picks an overload. With a first-argument kind, an exact overload wins
    /// over a generic one. Without a kind, the generic overload is preferred
    /// and the earliest registered overload is the fallback.
    pub fn resolve(&self, name: &str, first_argument: Option<ValueKind>) -> Option<Callable> {
        let overloads = self.functions.get(name)?;
        let generic = overloads.iter().find(|o| o.first_argument.is_none());
        let chosen = match first_argument {
            Some(kind) => overloads
                .iter()
                .find(|o| o.first_argument == Some(kind))
                .or(generic),
            None => generic.or_else(|| overloads.first()),
        }?;
        Some(Callable::from(chosen.target.clone()))
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field("functions", &self.function_names())
            .finish()
    }
}

/// Concurrent name-to-module table plus the shared native registry.
///
/// Modules may be registered after nodes that refer to them were built;
/// resolution happens at each call site's first execution.
pub struct ModuleRegistry {
    modules: DashMap<String, Arc<Module>>,
    natives: Arc<NativeRegistry>,
}

impl ModuleRegistry {
    pub fn new(natives: NativeRegistry) -> Arc<Self> {
        Self::with_shared_natives(Arc::new(natives))
    }

    pub fn with_shared_natives(natives: Arc<NativeRegistry>) -> Arc<Self> {
        Arc::new(Self {
            modules: DashMap::new(),
            natives,
        })
    }

    /// Register a module, returning the one it replaced.
    pub fn register_module(&self, module: Module) -> Option<Arc<Module>> {
        let name = module.name().to_string();
        tracing::debug!(target: "ksr::dispatch", module = %name, functions = module.functions.len(), "module registered");
        self.modules.insert(name, Arc::new(module))
    }

    /// Get a module by name
    pub fn get_module(&self, name: &str) -> Option<Arc<Module>> {
        self.modules.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Get all registered module names, sorted
    pub fn get_module_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    pub fn native_registry(&self) -> &Arc<NativeRegistry> {
        &self.natives
    }

    pub fn handle(self: &Arc<Self>) -> LoaderRef {
        loader_ref(self)
    }
}

impl ModuleLoader for ModuleRegistry {
    fn load(&self, name: &str) -> Option<Arc<Module>> {
        self.get_module(name)
    }

    fn natives(&self) -> &NativeRegistry {
        &self.natives
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self {
            modules: DashMap::new(),
            natives: Arc::new(NativeRegistry::new()),
        }
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.get_module_names())
            .field("natives", &self.natives.len())
            .finish()
    }
}
