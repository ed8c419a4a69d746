//! Main application configuration

use super::{FacadeConfig, LoggingConfig, RegistryConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Module registry configuration
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Which facades the composition root registers
    #[serde(default)]
    pub facades: FacadeConfig,
}
