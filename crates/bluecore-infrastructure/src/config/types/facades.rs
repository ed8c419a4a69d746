//! Facade selection

use serde::{Deserialize, Serialize};

/// Facades hosted on the remote-procedure server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FacadeConfig {
    /// Host the security module facade
    pub security: bool,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self { security: true }
    }
}
