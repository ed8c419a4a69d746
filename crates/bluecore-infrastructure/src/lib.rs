//! # Infrastructure Layer
//!
//! The module framework and the technical concerns around it.
//!
//! ### Module Framework
//! | Module | Description |
//! |--------|-------------|
//! | [`module`] | Module contract, factories, registry and start-order resolution |
//! | [`handler`] | Per-module single-threaded execution contexts |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-layered TOML and environment configuration |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability & Errors
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context helpers for foreign errors |

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod handler;
pub mod logging;
pub mod module;

pub use error_ext::ErrorContext;
pub use handler::{Handler, HandlerThread};
pub use module::{Module, ModuleContext, ModuleFactory, ModuleList, ModuleRegistry};
