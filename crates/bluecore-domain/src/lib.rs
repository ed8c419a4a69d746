//! # bluecore domain
//!
//! Types shared by every layer of the module stack.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error enum, result alias and error taxonomy |
//! | [`value_objects`] | Module identity, lifecycle state, status snapshots |
//! | [`ports`] | Remote-procedure service and host contracts |

pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, ErrorCategory, Result, StopFailure};
pub use value_objects::{ModuleKey, ModuleState, ModuleStatus, SubsystemStatus};
