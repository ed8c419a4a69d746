//! Module Composition and Lifecycle
//!
//! A module is a unit with a declared set of dependencies, a `start`/`stop`
//! lifecycle and a dedicated [`Handler`](crate::handler::Handler). The
//! [`ModuleRegistry`] collects factories, orders them so that every module
//! starts after its dependencies, and tears them down in reverse.
//!
//! ## Architecture
//!
//! ```text
//! ModuleFactory ──register──► ModuleRegistry
//!   (ctor + list_dependencies)     │
//!                                  ├─ resolver::start_order()   (topological sort)
//!                                  ├─ instantiate + HandlerThread per module
//!                                  ├─ Module::start(&ModuleContext)
//!                                  │     └─ ctx.dependency::<T>()  (declared + started only)
//!                                  └─ stop_all(): reverse order, stop → drain handler → release
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut registry = ModuleRegistry::new();
//! registry.register(ModuleFactory::of::<HciLayer>())?;
//! registry.register(ModuleFactory::of::<L2capLeModule>())?;
//! registry.start_all().await?;
//! let l2cap = registry.get::<L2capLeModule>()?;
//! registry.stop_all().await?;
//! ```

mod context;
mod factory;
mod list;
mod registry;
pub mod resolver;

pub use context::ModuleContext;
pub use factory::ModuleFactory;
pub use list::ModuleList;
pub use registry::ModuleRegistry;

use async_trait::async_trait;
use bluecore_domain::error::Result;
use downcast_rs::{DowncastSync, impl_downcast};

/// Contract implemented by every module
///
/// Instances are shared as `Arc<Self>`, so lifecycle methods take `&self`;
/// modules keep their mutable state behind interior mutability.
///
/// # Example
///
/// ```ignore
/// #[derive(Default)]
/// struct L2capLeModule { hci: ArcSwapOption<HciLayer> }
///
/// #[async_trait]
/// impl Module for L2capLeModule {
///     fn list_dependencies(list: &mut ModuleList) {
///         list.add::<HciLayer>();
///     }
///
///     async fn start(&self, ctx: &ModuleContext<'_>) -> Result<()> {
///         self.hci.store(Some(ctx.dependency::<HciLayer>()?));
///         Ok(())
///     }
///
///     async fn stop(&self) -> Result<()> {
///         self.hci.store(None);
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Module: DowncastSync {
    /// Declare the module types this module needs
    ///
    /// Called once per registration, before any instance exists.
    fn list_dependencies(_list: &mut ModuleList)
    where
        Self: Sized,
    {
    }

    /// Acquire dependencies and resources
    ///
    /// Every declared dependency is already `Started` when this runs.
    async fn start(&self, ctx: &ModuleContext<'_>) -> Result<()>;

    /// Release what `start` acquired, in reverse order
    ///
    /// Called at most once per successful `start`. Dependencies are still
    /// `Started` while this runs.
    async fn stop(&self) -> Result<()>;
}

impl_downcast!(sync Module);
