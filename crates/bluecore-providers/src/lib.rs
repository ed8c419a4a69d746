//! # bluecore providers
//!
//! Subsystem modules and the facades that expose them.
//!
//! The subsystems carry no protocol logic. They exist to give the module
//! graph its real shape and to report their lifecycle through
//! [`SubsystemStatus`](bluecore_domain::value_objects::SubsystemStatus).
//!
//! | Module | Depends on |
//! |--------|------------|
//! | [`HciLayer`] | - |
//! | [`L2capLeModule`] | `HciLayer` |
//! | [`L2capClassicModule`] | `HciLayer` |
//! | [`SecurityModule`] | `L2capLeModule`, `L2capClassicModule`, `HciLayer` |
//! | [`SecurityModuleFacadeModule`] | server, `SecurityModule` and everything it drives |

pub mod hci;
pub mod l2cap;
pub mod security;
mod subsystem;

pub use hci::HciLayer;
pub use l2cap::{L2capClassicModule, L2capLeModule};
pub use security::facade::{
    SECURITY_FACADE_SERVICE, SecurityFacade, SecurityModuleFacadeModule,
    SecurityModuleFacadeService, SecurityStatus,
};
pub use security::SecurityModule;
