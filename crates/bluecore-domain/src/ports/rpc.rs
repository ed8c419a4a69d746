//! Remote-procedure service ports
//!
//! The stack never looks at the wire schema of a facade. A service is an
//! opaque object addressed by name; each call carries a method name and a
//! JSON payload and yields a JSON reply.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A service object that can be hosted on the remote-procedure server
///
/// # Example
///
/// ```no_run
/// use bluecore_domain::error::{Error, Result};
/// use bluecore_domain::ports::RpcService;
/// use serde_json::{json, Value};
///
/// struct EchoService;
///
/// #[async_trait::async_trait]
/// impl RpcService for EchoService {
///     fn name(&self) -> &str {
///         "test.Echo"
///     }
///
///     fn methods(&self) -> &[&'static str] {
///         &["Echo"]
///     }
///
///     async fn call(&self, method: &str, request: Value) -> Result<Value> {
///         match method {
///             "Echo" => Ok(json!({ "echo": request })),
///             _ => Err(Error::UnknownMethod {
///                 service: self.name().to_string(),
///                 method: method.to_string(),
///             }),
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait RpcService: Send + Sync + 'static {
    /// Fully qualified service name, unique per server
    fn name(&self) -> &str;

    /// Methods this service answers
    fn methods(&self) -> &[&'static str];

    /// Handle one call
    async fn call(&self, method: &str, request: Value) -> Result<Value>;
}

/// Capability to host services on a shared server
///
/// Facades depend on the server only through this registration surface.
pub trait ServiceHost: Send + Sync {
    /// Start routing calls to `service`
    fn register(&self, service: Arc<dyn RpcService>) -> Result<()>;

    /// Stop routing calls to the named service and hand it back
    fn deregister(&self, name: &str) -> Result<Arc<dyn RpcService>>;
}
