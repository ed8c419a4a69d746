//! Error handling types
//!
//! A single error enum covers the whole stack. Variants fall into four
//! categories (see [`ErrorCategory`]): configuration errors that are fatal to
//! startup, contract violations that a correct program never produces,
//! recoverable conditions the caller may retry, and runtime failures reported
//! by module implementations.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bluecore
#[derive(Error, Debug)]
pub enum Error {
    /// The same module type was registered twice
    #[error("Module already registered: {module}")]
    DuplicateModule {
        /// Name of the module type
        module: String,
    },

    /// The dependency graph contains a cycle
    #[error("Cyclic module dependency: {}", .cycle.join(" -> "))]
    CyclicDependency {
        /// Modules forming the cycle, first module repeated at the end
        cycle: Vec<String>,
    },

    /// A module declared a dependency that no factory provides
    #[error("Module {module} depends on {dependency}, which is not registered")]
    MissingDependency {
        /// Declaring module
        module: String,
        /// Declared dependency without a factory
        dependency: String,
    },

    /// A declared dependency was requested before it reached `Started`
    #[error("Module {module} requested {dependency} before it was started")]
    DependencyNotStarted {
        /// Requesting module
        module: String,
        /// Requested dependency
        dependency: String,
    },

    /// A module requested a dependency it never declared
    #[error("Module {module} did not declare a dependency on {dependency}")]
    UndeclaredDependency {
        /// Requesting module
        module: String,
        /// Requested dependency
        dependency: String,
    },

    /// A module was looked up outside of its started window
    #[error("Module not started: {module}")]
    ModuleNotStarted {
        /// Name of the module type
        module: String,
    },

    /// A lifecycle operation was invoked in the wrong state
    #[error("Invalid lifecycle transition: {message}")]
    Lifecycle {
        /// Description of the rejected transition
        message: String,
    },

    /// A facade service was requested before start or after stop
    #[error("Service not started: {service}")]
    ServiceNotStarted {
        /// Name of the facade or service
        service: String,
    },

    /// A service with the same name is already hosted
    #[error("Service already registered: {service}")]
    DuplicateService {
        /// Service name
        service: String,
    },

    /// No hosted service with that name
    #[error("Unknown service: {service}")]
    UnknownService {
        /// Service name
        service: String,
    },

    /// The service does not implement the method
    #[error("Unknown method {method} on service {service}")]
    UnknownMethod {
        /// Service name
        service: String,
        /// Method name
        method: String,
    },

    /// Work was posted to a handler whose worker has exited
    #[error("Handler not running: {handler}")]
    HandlerStopped {
        /// Handler name
        handler: String,
    },

    /// A module's `start` failed; already started modules were unwound
    #[error("Failed to start module {module}: {source}")]
    StartFailed {
        /// Module whose start failed
        module: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
        /// Stop failures of the modules unwound after the failed start
        unwind: Vec<StopFailure>,
    },

    /// One or more modules reported an error while stopping
    #[error("Shutdown completed with {} failed module(s): {}", .failures.len(), StopFailure::summary(.failures))]
    ShutdownFailed {
        /// Every stop failure, in stop order
        failures: Vec<StopFailure>,
    },

    /// Failure reported by a module implementation
    #[error("Module {module} failed: {message}")]
    Module {
        /// Reporting module
        module: String,
        /// Description of the failure
        message: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

/// A single module's failure during shutdown
#[derive(Debug)]
pub struct StopFailure {
    /// Module whose stop failed
    pub module: String,
    /// Error returned by the module
    pub error: Error,
}

impl StopFailure {
    fn summary(failures: &[StopFailure]) -> String {
        failures
            .iter()
            .map(|f| format!("{} ({})", f.module, f.error))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    /// Raised while assembling the module graph; startup must not proceed
    Configuration,
    /// Unreachable in a correct program; treat as an assertion failure
    ContractViolation,
    /// The caller may retry once the lifecycle state allows it
    Recoverable,
    /// Failure reported while running module code
    Runtime,
}

impl Error {
    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateModule { .. }
            | Self::CyclicDependency { .. }
            | Self::MissingDependency { .. }
            | Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::DependencyNotStarted { .. }
            | Self::UndeclaredDependency { .. }
            | Self::Lifecycle { .. } => ErrorCategory::ContractViolation,
            Self::ModuleNotStarted { .. }
            | Self::ServiceNotStarted { .. }
            | Self::DuplicateService { .. }
            | Self::UnknownService { .. }
            | Self::UnknownMethod { .. }
            | Self::HandlerStopped { .. }
            | Self::InvalidArgument { .. } => ErrorCategory::Recoverable,
            Self::StartFailed { .. }
            | Self::ShutdownFailed { .. }
            | Self::Module { .. }
            | Self::Json { .. }
            | Self::Io { .. }
            | Self::Internal { .. } => ErrorCategory::Runtime,
        }
    }

    /// Whether the process should refuse to continue startup
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Configuration | ErrorCategory::ContractViolation
        )
    }
}

// Module lifecycle error creation methods
impl Error {
    /// Create a lifecycle transition error
    pub fn lifecycle<S: Into<String>>(message: S) -> Self {
        Self::Lifecycle {
            message: message.into(),
        }
    }

    /// Create a module failure error
    pub fn module<M: Into<String>, S: Into<String>>(module: M, message: S) -> Self {
        Self::Module {
            module: module.into(),
            message: message.into(),
        }
    }

    /// Create a service-not-started error
    pub fn service_not_started<S: Into<String>>(service: S) -> Self {
        Self::ServiceNotStarted {
            service: service.into(),
        }
    }

    /// Create a handler-stopped error
    pub fn handler_stopped<S: Into<String>>(handler: S) -> Self {
        Self::HandlerStopped {
            handler: handler.into(),
        }
    }
}

// Basic error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
