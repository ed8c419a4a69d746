//! Domain Port Interfaces
//!
//! Boundary contracts between the module core and the collaborators it
//! hosts. The remote-procedure server and the facade services plugged into it
//! meet only through these traits.

/// Remote-procedure service ports
pub mod rpc;

pub use rpc::{RpcService, ServiceHost};
