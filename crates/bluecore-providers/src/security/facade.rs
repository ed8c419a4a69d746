//! Security module facade
//!
//! Test harnesses reach the security stack through the
//! `bluetooth.security.SecurityModuleFacade` service. Calls run on the
//! facade's handler.

use crate::hci::HciLayer;
use crate::l2cap::{L2capClassicModule, L2capLeModule};
use crate::security::SecurityModule;
use async_trait::async_trait;
use bluecore_domain::error::{Error, Result};
use bluecore_domain::ports::RpcService;
use bluecore_domain::value_objects::SubsystemStatus;
use bluecore_infrastructure::handler::Handler;
use bluecore_infrastructure::module::{ModuleContext, ModuleList};
use bluecore_server::{Facade, FacadeModule};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Service name on the remote-procedure server
pub const SECURITY_FACADE_SERVICE: &str = "bluetooth.security.SecurityModuleFacade";

const METHOD_GET_STATUS: &str = "GetStatus";

/// Reply of `GetStatus`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityStatus {
    pub security: SubsystemStatus,
    pub l2cap_le: SubsystemStatus,
    pub l2cap_classic: SubsystemStatus,
    pub hci: SubsystemStatus,
    /// Handler the facade runs its calls on
    pub facade_handler: String,
}

#[derive(Clone)]
struct Subsystems {
    security: Arc<SecurityModule>,
    l2cap_le: Arc<L2capLeModule>,
    l2cap_classic: Arc<L2capClassicModule>,
    hci: Arc<HciLayer>,
}

impl Subsystems {
    fn snapshot(&self, facade_handler: String) -> SecurityStatus {
        SecurityStatus {
            security: self.security.status(),
            l2cap_le: self.l2cap_le.status(),
            l2cap_classic: self.l2cap_classic.status(),
            hci: self.hci.status(),
            facade_handler,
        }
    }
}

/// Facade service over the security stack
pub struct SecurityModuleFacadeService {
    subsystems: Subsystems,
    handler: Handler,
}

impl SecurityModuleFacadeService {
    /// Status of every module the facade drives, read on the facade handler
    pub async fn get_status(&self) -> Result<SecurityStatus> {
        let subsystems = self.subsystems.clone();
        let facade_handler = self.handler.name().to_string();
        self.handler
            .call(move || subsystems.snapshot(facade_handler))
            .await
    }
}

#[async_trait]
impl RpcService for SecurityModuleFacadeService {
    fn name(&self) -> &str {
        SECURITY_FACADE_SERVICE
    }

    fn methods(&self) -> &[&'static str] {
        &[METHOD_GET_STATUS]
    }

    async fn call(&self, method: &str, _request: Value) -> Result<Value> {
        debug!(method, "Security facade call");
        match method {
            METHOD_GET_STATUS => Ok(serde_json::to_value(self.get_status().await?)?),
            _ => Err(Error::UnknownMethod {
                service: SECURITY_FACADE_SERVICE.to_string(),
                method: method.to_string(),
            }),
        }
    }
}

/// Security half of [`SecurityModuleFacadeModule`]
#[derive(Debug, Default)]
pub struct SecurityFacade;

impl Facade for SecurityFacade {
    type Service = SecurityModuleFacadeService;

    fn list_dependencies(list: &mut ModuleList) {
        list.add::<SecurityModule>()
            .add::<L2capLeModule>()
            .add::<L2capClassicModule>()
            .add::<HciLayer>();
    }

    fn create_service(&self, ctx: &ModuleContext<'_>) -> Result<SecurityModuleFacadeService> {
        // TODO: register a listener with SecurityModule once it emits pairing events
        Ok(SecurityModuleFacadeService {
            subsystems: Subsystems {
                security: ctx.dependency::<SecurityModule>()?,
                l2cap_le: ctx.dependency::<L2capLeModule>()?,
                l2cap_classic: ctx.dependency::<L2capClassicModule>()?,
                hci: ctx.dependency::<HciLayer>()?,
            },
            handler: ctx.handler(),
        })
    }
}

/// Module hosting the security facade service
pub type SecurityModuleFacadeModule = FacadeModule<SecurityFacade>;
