//! Module registry configuration types

use crate::constants::DEFAULT_HANDLER_THREAD_PREFIX;
use serde::{Deserialize, Serialize};

/// Module registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Handler threads are named `<prefix>-<module>`
    pub handler_thread_prefix: String,

    /// Warn when a stopped module is still referenced elsewhere
    pub warn_on_leaked_references: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            handler_thread_prefix: DEFAULT_HANDLER_THREAD_PREFIX.to_string(),
            warn_on_leaked_references: true,
        }
    }
}
