//! Error types for the composition engine.

/// Result type for lint-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while composing a configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A lookup ran while a registration was still executing. Ordering and
    /// dependency declarations must be resolved lazily through accessors,
    /// never during construction.
    #[error("cannot resolve {name} while a registration is in progress")]
    SetupOrder { name: String },

    /// Lookup of a component kind that was never registered.
    #[error("component not registered: {name}")]
    UnregisteredComponent { name: String },

    /// Lookup of a package-manager kind that was never registered.
    #[error("package manager not registered: {name}")]
    UnregisteredPackageManager { name: String },

    /// The ordering constraints admit no linearization. No partial order is
    /// produced.
    #[error("cyclic ordering constraints between components: {}", participants.join(", "))]
    CyclicDependency { participants: Vec<String> },

    /// Detection matched no registered manager and none was designated as
    /// the default.
    #[error("no package manager detected for this project")]
    NoPackageManager,

    /// A component's enable-time settings failed a declared constraint.
    /// Raised before any shared state changes.
    #[error("invalid settings for {component}: {message}")]
    Validation {
        component: &'static str,
        message: String,
    },

    /// Project discovery or manifest error
    #[error(transparent)]
    Project(#[from] lint_project::Error),

    /// Package-manager error
    #[error(transparent)]
    Pm(#[from] lint_pm::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
