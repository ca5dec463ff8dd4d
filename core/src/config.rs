use once_cell::sync::OnceCell;

/// Depth used when neither the host nor `KSR_MAX_CALL_DEPTH` says otherwise.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

const MAX_CALL_DEPTH_ENV: &str = "KSR_MAX_CALL_DEPTH";

static OPTIONS: OnceCell<RuntimeOptions> = OnceCell::new();

/// Process-wide knobs for the execution core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    /// Nested interpreted activations allowed per thread before a call fails
    /// with `CallDepthExceeded`.
    pub max_call_depth: usize,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl RuntimeOptions {
    /// Defaults overridden by environment variables. Unparsable or zero values
    /// are ignored.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Some(depth) = std::env::var(MAX_CALL_DEPTH_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|depth| *depth > 0)
        {
            options.max_call_depth = depth;
        }
        options
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth.max(1);
        self
    }

    /// Installs these options for the whole process. The first install wins;
    /// a later attempt hands the rejected options back.
    pub fn install(self) -> Result<(), RuntimeOptions> {
        OPTIONS.set(self)
    }

    /// Options in effect, falling back to [`RuntimeOptions::from_env`] when the
    /// host never installed any.
    pub fn current() -> &'static RuntimeOptions {
        OPTIONS.get_or_init(RuntimeOptions::from_env)
    }
}
