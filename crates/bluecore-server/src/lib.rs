//! # bluecore server
//!
//! Hosting of test-facing facade services.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RpcServerModule`] | Process-wide service table, itself a module |
//! | [`FacadeModule`] | Module that builds a [`Facade`]'s service and hosts it |
//!
//! ```text
//! RpcServerModule ◄── FacadeModule<F> ──► F::list_dependencies()
//!        ▲                  │
//!        └──── register ────┘  (on start, service built from started deps)
//! ```

pub mod facade;
pub mod rpc;

pub use facade::{Facade, FacadeModule};
pub use rpc::RpcServerModule;
