//! Facade modules
//!
//! A facade exposes a subsystem to external test harnesses. The
//! [`FacadeModule`] wrapper owns the plumbing every facade shares: it depends
//! on the [`RpcServerModule`], builds the facade's service once its
//! dependencies are started, hosts it, and takes it down again on stop.

use crate::rpc::RpcServerModule;
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use bluecore_domain::error::{Error, Result};
use bluecore_domain::ports::{RpcService, ServiceHost};
use bluecore_domain::value_objects::short_type_name;
use bluecore_infrastructure::module::{Module, ModuleContext, ModuleList};
use std::sync::Arc;
use tracing::{debug, info};

/// Subsystem-specific half of a facade module
pub trait Facade: Send + Sync + 'static {
    /// Service hosted while the facade is started
    type Service: RpcService;

    /// Modules the service drives; the server is added by [`FacadeModule`]
    fn list_dependencies(_list: &mut ModuleList) {}

    /// Build the service from started dependencies and the facade's handler
    fn create_service(&self, ctx: &ModuleContext<'_>) -> Result<Self::Service>;
}

/// Module hosting the service of facade `F`
pub struct FacadeModule<F: Facade> {
    facade: F,
    server: ArcSwapOption<RpcServerModule>,
    service: ArcSwapOption<F::Service>,
}

impl<F: Facade> FacadeModule<F> {
    pub fn new(facade: F) -> Self {
        Self {
            facade,
            server: ArcSwapOption::empty(),
            service: ArcSwapOption::empty(),
        }
    }

    pub fn facade(&self) -> &F {
        &self.facade
    }

    /// The hosted service, between `start` and `stop`
    pub fn service(&self) -> Result<Arc<F::Service>> {
        self.service
            .load_full()
            .ok_or_else(|| Error::service_not_started(short_type_name(std::any::type_name::<F>())))
    }
}

impl<F: Facade + Default> Default for FacadeModule<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

#[async_trait]
impl<F: Facade> Module for FacadeModule<F> {
    fn list_dependencies(list: &mut ModuleList) {
        list.add::<RpcServerModule>();
        F::list_dependencies(list);
    }

    async fn start(&self, ctx: &ModuleContext<'_>) -> Result<()> {
        let server = ctx.dependency::<RpcServerModule>()?;
        let service = Arc::new(self.facade.create_service(ctx)?);
        server.register(Arc::clone(&service) as Arc<dyn RpcService>)?;
        info!(module = %ctx.module(), service = service.name(), "Facade started");

        self.service.store(Some(service));
        self.server.store(Some(server));
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        let service = self.service.swap(None);
        let server = self.server.swap(None);
        let (Some(service), Some(server)) = (service, server) else {
            debug!("Facade already stopped");
            return Ok(());
        };

        let deregistered = server.deregister(service.name()).map(drop);
        // The service must not outlive the dependencies it holds
        drop(service);
        deregistered
    }
}
