//! Remote-procedure server module
//!
//! In-process service table. Calls are addressed by service name and method
//! name and carry JSON payloads; the transport in front of it is not part of
//! this crate.

use async_trait::async_trait;
use bluecore_domain::error::{Error, Result};
use bluecore_domain::ports::{RpcService, ServiceHost};
use bluecore_infrastructure::module::{Module, ModuleContext};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Server that facades register their services on
#[derive(Default)]
pub struct RpcServerModule {
    serving: AtomicBool,
    services: DashMap<String, Arc<dyn RpcService>>,
}

impl RpcServerModule {
    /// Whether the server is between `start` and `stop`
    pub fn is_serving(&self) -> bool {
        self.serving.load(Ordering::Acquire)
    }

    /// Route one call to a hosted service
    pub async fn dispatch(&self, service: &str, method: &str, request: Value) -> Result<Value> {
        if !self.is_serving() {
            return Err(Error::ModuleNotStarted {
                module: "RpcServerModule".to_string(),
            });
        }
        // Clone out of the map so no shard lock is held across the call
        let target = self
            .services
            .get(service)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| Error::UnknownService {
                service: service.to_string(),
            })?;

        debug!(service, method, "Dispatching call");
        target.call(method, request).await
    }

    /// Names of the hosted services, sorted
    pub fn services(&self) -> Vec<String> {
        let mut names: Vec<String> = self.services.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Methods answered by a hosted service
    pub fn methods(&self, service: &str) -> Result<Vec<String>> {
        self.services
            .get(service)
            .map(|entry| entry.methods().iter().map(|m| (*m).to_string()).collect())
            .ok_or_else(|| Error::UnknownService {
                service: service.to_string(),
            })
    }
}

impl ServiceHost for RpcServerModule {
    fn register(&self, service: Arc<dyn RpcService>) -> Result<()> {
        if !self.is_serving() {
            return Err(Error::lifecycle(format!(
                "cannot register {} on a server that is not started",
                service.name()
            )));
        }
        match self.services.entry(service.name().to_string()) {
            Entry::Occupied(entry) => Err(Error::DuplicateService {
                service: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                info!(service = %entry.key(), methods = ?service.methods(), "Service registered");
                entry.insert(service);
                Ok(())
            }
        }
    }

    fn deregister(&self, name: &str) -> Result<Arc<dyn RpcService>> {
        let (_, service) = self
            .services
            .remove(name)
            .ok_or_else(|| Error::UnknownService {
                service: name.to_string(),
            })?;
        info!(service = name, "Service deregistered");
        Ok(service)
    }
}

#[async_trait]
impl Module for RpcServerModule {
    async fn start(&self, _ctx: &ModuleContext<'_>) -> Result<()> {
        self.serving.store(true, Ordering::Release);
        info!("Remote-procedure server serving");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.serving.store(false, Ordering::Release);
        let leftover = self.services();
        if !leftover.is_empty() {
            warn!(services = ?leftover, "Dropping services still registered at stop");
            self.services.clear();
        }
        info!("Remote-procedure server stopped");
        Ok(())
    }
}
