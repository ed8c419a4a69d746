use super::{Module, ModuleList};
use crate::handler::Handler;
use bluecore_domain::error::{Error, Result};
use bluecore_domain::value_objects::ModuleKey;
use std::collections::HashMap;
use std::sync::Arc;

/// View of the registry handed to a module while it starts
///
/// Dependency access is gated twice: the type must be in the module's
/// declared list, and it must already be `Started`.
pub struct ModuleContext<'a> {
    module: ModuleKey,
    declared: &'a ModuleList,
    running: &'a HashMap<ModuleKey, Arc<dyn Module>>,
    handler: &'a Handler,
}

impl<'a> ModuleContext<'a> {
    /// Context over an explicit set of running modules
    ///
    /// The registry builds one per `start`; building one by hand starts a
    /// module outside a registry.
    pub fn new(
        module: ModuleKey,
        declared: &'a ModuleList,
        running: &'a HashMap<ModuleKey, Arc<dyn Module>>,
        handler: &'a Handler,
    ) -> Self {
        Self {
            module,
            declared,
            running,
            handler,
        }
    }

    /// Running instance of declared dependency `T`
    pub fn dependency<T: Module>(&self) -> Result<Arc<T>> {
        let key = ModuleKey::of::<T>();
        if !self.declared.contains(&key) {
            return Err(Error::UndeclaredDependency {
                module: self.module.name(),
                dependency: key.name(),
            });
        }
        let instance = self
            .running
            .get(&key)
            .ok_or_else(|| Error::DependencyNotStarted {
                module: self.module.name(),
                dependency: key.name(),
            })?;
        Arc::clone(instance)
            .downcast_arc::<T>()
            .map_err(|_| Error::internal(format!("Module {key} is registered under another type")))
    }

    /// The starting module's own handler
    pub fn handler(&self) -> Handler {
        self.handler.clone()
    }

    /// Key of the starting module
    pub fn module(&self) -> ModuleKey {
        self.module
    }

    /// Dependencies the starting module declared
    pub fn declared(&self) -> &ModuleList {
        self.declared
    }
}
