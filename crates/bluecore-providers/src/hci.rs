//! Host controller interface stand-in

use crate::subsystem::SubsystemCore;
use async_trait::async_trait;
use bluecore_domain::error::Result;
use bluecore_domain::value_objects::SubsystemStatus;
use bluecore_infrastructure::module::{Module, ModuleContext};

/// Bottom of the stack; depends on nothing
pub struct HciLayer {
    core: SubsystemCore,
}

impl HciLayer {
    pub fn status(&self) -> SubsystemStatus {
        self.core.status()
    }

    /// Run `task` on the layer's handler
    pub async fn execute<F, R>(&self, task: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        self.core.execute(task).await
    }
}

impl Default for HciLayer {
    fn default() -> Self {
        Self {
            core: SubsystemCore::new("hci"),
        }
    }
}

#[async_trait]
impl Module for HciLayer {
    async fn start(&self, ctx: &ModuleContext<'_>) -> Result<()> {
        self.core.attach(ctx);
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.core.detach();
        Ok(())
    }
}
