use arc_swap::ArcSwapOption;
use bluecore_domain::error::{Error, Result};
use bluecore_domain::value_objects::SubsystemStatus;
use bluecore_infrastructure::handler::Handler;
use bluecore_infrastructure::module::ModuleContext;
use std::sync::Arc;
use tracing::debug;

/// Handler slot shared by the subsystem modules
///
/// A subsystem counts as running while its handler is attached.
pub(crate) struct SubsystemCore {
    name: &'static str,
    handler: ArcSwapOption<Handler>,
}

impl SubsystemCore {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            handler: ArcSwapOption::empty(),
        }
    }

    pub(crate) fn attach(&self, ctx: &ModuleContext<'_>) {
        let handler = ctx.handler();
        debug!(subsystem = self.name, handler = handler.name(), "Subsystem attached");
        self.handler.store(Some(Arc::new(handler)));
    }

    pub(crate) fn detach(&self) {
        if self.handler.swap(None).is_some() {
            debug!(subsystem = self.name, "Subsystem detached");
        }
    }

    pub(crate) fn status(&self) -> SubsystemStatus {
        let handler = self.handler.load_full();
        SubsystemStatus {
            name: self.name.to_string(),
            running: handler.is_some(),
            handler: handler.as_ref().map(|h| h.name().to_string()),
            tasks_run: handler.as_ref().map_or(0, |h| h.executed_tasks()),
        }
    }

    pub(crate) async fn execute<F, R>(&self, task: F) -> Result<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let handler = self.handler.load_full().ok_or_else(|| Error::ModuleNotStarted {
            module: self.name.to_string(),
        })?;
        handler.call(task).await
    }
}
