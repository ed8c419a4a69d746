//! Subsystem status reported through facades

use serde::{Deserialize, Serialize};

/// Read-only view of a subsystem module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubsystemStatus {
    /// Subsystem name (e.g. `hci`, `l2cap-le`)
    pub name: String,
    /// Whether the module is between `start` and `stop`
    pub running: bool,
    /// Handler the subsystem schedules its work on, if running
    pub handler: Option<String>,
    /// Number of tasks the subsystem has executed on its handler
    pub tasks_run: u64,
}
