//! Security manager stand-in and its facade

pub mod facade;

use crate::hci::HciLayer;
use crate::l2cap::{L2capClassicModule, L2capLeModule};
use crate::subsystem::SubsystemCore;
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use bluecore_domain::error::Result;
use bluecore_domain::value_objects::SubsystemStatus;
use bluecore_infrastructure::module::{Module, ModuleContext, ModuleList};

/// Security manager; drives both L2CAP transports and the HCI layer
pub struct SecurityModule {
    core: SubsystemCore,
    l2cap_le: ArcSwapOption<L2capLeModule>,
    l2cap_classic: ArcSwapOption<L2capClassicModule>,
    hci: ArcSwapOption<HciLayer>,
}

impl SecurityModule {
    pub fn status(&self) -> SubsystemStatus {
        self.core.status()
    }

    /// Whether every dependency handle is held
    pub fn is_wired(&self) -> bool {
        self.l2cap_le.load().is_some()
            && self.l2cap_classic.load().is_some()
            && self.hci.load().is_some()
    }

    /// Run `task` on the module's handler
    pub async fn execute<F, R>(&self, task: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        self.core.execute(task).await
    }
}

impl Default for SecurityModule {
    fn default() -> Self {
        Self {
            core: SubsystemCore::new("security"),
            l2cap_le: ArcSwapOption::empty(),
            l2cap_classic: ArcSwapOption::empty(),
            hci: ArcSwapOption::empty(),
        }
    }
}

#[async_trait]
impl Module for SecurityModule {
    fn list_dependencies(list: &mut ModuleList) {
        list.add::<L2capLeModule>()
            .add::<L2capClassicModule>()
            .add::<HciLayer>();
    }

    async fn start(&self, ctx: &ModuleContext<'_>) -> Result<()> {
        let l2cap_le = ctx.dependency::<L2capLeModule>()?;
        let l2cap_classic = ctx.dependency::<L2capClassicModule>()?;
        let hci = ctx.dependency::<HciLayer>()?;

        self.l2cap_le.store(Some(l2cap_le));
        self.l2cap_classic.store(Some(l2cap_classic));
        self.hci.store(Some(hci));
        self.core.attach(ctx);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.core.detach();
        self.hci.store(None);
        self.l2cap_classic.store(None);
        self.l2cap_le.store(None);
        Ok(())
    }
}
