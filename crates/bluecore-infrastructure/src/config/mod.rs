//! Configuration
//!
//! Layered with figment: defaults, then `bluecore.toml`, then `BLUECORE_*`
//! environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::{AppConfig, FacadeConfig, LoggingConfig, RegistryConfig};
