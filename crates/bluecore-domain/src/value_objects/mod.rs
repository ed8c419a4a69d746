//! Domain Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`ModuleKey`] | Type-derived identity of a module |
//! | [`ModuleState`] | Lifecycle state of a registered module |
//! | [`ModuleStatus`] | Serializable registry snapshot entry |
//! | [`SubsystemStatus`] | Read-only subsystem view returned by facades |

/// Module identity and lifecycle state
pub mod module;
/// Subsystem status reported through facades
pub mod subsystem;

pub use module::{ModuleKey, ModuleState, ModuleStatus, short_type_name};
pub use subsystem::SubsystemStatus;
