//! # bluecore
//!
//! Module composition and lifecycle core for a layered protocol stack.
//!
//! Subsystems are modules that declare their dependencies; a
//! [`ModuleRegistry`](infrastructure::module::ModuleRegistry) starts them in
//! dependency order, gives each its own handler thread, and stops them in
//! reverse. Facades expose subsystems to test harnesses through a shared
//! remote-procedure server.
//!
//! ## Example
//!
//! ```ignore
//! use bluecore::bootstrap::build_registry;
//! use bluecore::infrastructure::config::AppConfig;
//! use bluecore::server::RpcServerModule;
//!
//! let mut registry = build_registry(&AppConfig::default())?;
//! registry.start_all().await?;
//! let server = registry.get::<RpcServerModule>()?;
//! let reply = server
//!     .dispatch("bluetooth.security.SecurityModuleFacade", "GetStatus", serde_json::json!({}))
//!     .await?;
//! drop(server);
//! registry.stop_all().await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - errors, module identity, service ports
//! - `infrastructure` - module framework, handlers, config, logging
//! - `server` - remote-procedure server module and facade hosting
//! - `providers` - subsystem modules and the security facade

pub mod bootstrap;
pub mod commands;

/// Domain layer - errors, module identity and ports
pub mod domain {
    pub use bluecore_domain::*;
}

/// Infrastructure layer - module framework, config and logging
pub mod infrastructure {
    pub use bluecore_infrastructure::*;
}

/// Server layer - remote-procedure server and facades
pub mod server {
    pub use bluecore_server::*;
}

/// Providers layer - subsystem modules
pub mod providers {
    pub use bluecore_providers::*;
}
