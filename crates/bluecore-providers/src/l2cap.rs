//! L2CAP stand-ins for the LE and classic transports

use crate::hci::HciLayer;
use crate::subsystem::SubsystemCore;
use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use bluecore_domain::error::Result;
use bluecore_domain::value_objects::SubsystemStatus;
use bluecore_infrastructure::module::{Module, ModuleContext, ModuleList};

macro_rules! l2cap_module {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        pub struct $name {
            core: SubsystemCore,
            hci: ArcSwapOption<HciLayer>,
        }

        impl $name {
            pub fn status(&self) -> SubsystemStatus {
                self.core.status()
            }

            /// Whether the HCI layer handle is held
            pub fn has_hci(&self) -> bool {
                self.hci.load().is_some()
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

        impl Default for $name {
            fn default() -> Self {
                Self {
                    core: SubsystemCore::new($label),
                    hci: ArcSwapOption::empty(),
                }
            }
        }

        #[async_trait]
        impl Module for $name {
            fn list_dependencies(list: &mut ModuleList) {
                list.add::<HciLayer>();
            }

            async fn start(&self, ctx: &ModuleContext<'_>) -> Result<()> {
                self.hci.store(Some(ctx.dependency::<HciLayer>()?));
                self.core.attach(ctx);
                Ok(())
            }

            async fn stop(&self) -> Result<()> {
                self.core.detach();
                self.hci.store(None);
                Ok(())
            }
        }
    };
}

l2cap_module!(
    /// L2CAP over LE transports
    L2capLeModule,
    "l2cap-le"
);

l2cap_module!(
    /// L2CAP over BR/EDR transports
    L2capClassicModule,
    "l2cap-classic"
);
