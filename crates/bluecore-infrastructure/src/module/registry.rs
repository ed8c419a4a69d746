use super::{Module, ModuleContext, ModuleFactory, ModuleList, resolver};
use crate::config::RegistryConfig;
use crate::handler::{Handler, HandlerThread};
use bluecore_domain::error::{Error, Result, StopFailure};
use bluecore_domain::value_objects::{ModuleKey, ModuleState, ModuleStatus};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

struct Entry {
    factory: ModuleFactory,
    dependencies: ModuleList,
    state: ModuleState,
    /// An injected instance was handed out and cannot be started again
    consumed: bool,
}

/// Owner of every module instance and handler
///
/// Modules are started in dependency order by [`start_all`](Self::start_all)
/// and stopped in exactly the reverse order by [`stop_all`](Self::stop_all).
/// Both take `&mut self`, so only one lifecycle sequence runs at a time.
pub struct ModuleRegistry {
    config: RegistryConfig,
    entries: Vec<Entry>,
    running: HashMap<ModuleKey, Arc<dyn Module>>,
    handlers: HashMap<ModuleKey, HandlerThread>,
    started: Vec<ModuleKey>,
}

impl ModuleRegistry {
    /// Create an empty registry with default settings
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            running: HashMap::new(),
            handlers: HashMap::new(),
            started: Vec::new(),
        }
    }

    /// Record a factory and its declared dependencies
    pub fn register(&mut self, factory: ModuleFactory) -> Result<()> {
        let key = factory.key();
        if self.is_running() {
            return Err(Error::lifecycle(format!(
                "cannot register {key} while modules are running"
            )));
        }
        if self.position(&key).is_some() {
            return Err(Error::DuplicateModule { module: key.name() });
        }

        let dependencies = factory.dependencies();
        debug!(
            module = %key,
            dependencies = ?dependencies.names(),
            "Registering module"
        );
        self.entries.push(Entry {
            factory,
            dependencies,
            state: ModuleState::Declared,
            consumed: false,
        });
        Ok(())
    }

    /// Register a pre-built instance in place of a factory
    pub fn register_instance<T: Module>(&mut self, instance: Arc<T>) -> Result<()> {
        self.register(ModuleFactory::from_instance(instance))
    }

    /// Instantiate and start every registered module in dependency order
    ///
    /// The order is computed before anything starts, so configuration errors
    /// leave every module `Declared`. If a module fails to start, the modules
    /// already started are stopped in reverse order and the failure is
    /// returned as [`Error::StartFailed`], together with any stop failures of
    /// the unwind.
    ///
    /// An instance injected with [`register_instance`](Self::register_instance)
    /// can only be started once; `Stopped` is terminal for it.
    pub async fn start_all(&mut self) -> Result<()> {
        if self.is_running() {
            return Err(Error::lifecycle("start_all called while modules are running"));
        }
        if let Some(entry) = self.entries.iter().find(|e| e.consumed) {
            return Err(Error::lifecycle(format!(
                "injected instance of {} was already started and cannot be restarted",
                entry.factory.key()
            )));
        }

        let order = self.resolve_order().inspect_err(|e| {
            error!(error = %e, "Cannot resolve module start order");
        })?;

        for entry in &mut self.entries {
            entry.state = ModuleState::Declared;
        }

        info!(
            modules = order.len(),
            order = ?order.iter().map(ModuleKey::name).collect::<Vec<_>>(),
            "Starting modules"
        );
        for key in order {
            if let Err(error) = self.start_module(key).await {
                error!(module = %key, error = %error, "Module failed to start, unwinding");
                let unwind = self.stop_started().await;
                return Err(Error::StartFailed {
                    module: key.name(),
                    source: Box::new(error),
                    unwind,
                });
            }
        }
        info!("All modules started");
        Ok(())
    }

    /// Stop every started module in reverse start order
    ///
    /// Every module is stopped even if an earlier `stop` fails; the failures
    /// are collected into [`Error::ShutdownFailed`]. Calling this on a
    /// registry with nothing running is a no-op.
    pub async fn stop_all(&mut self) -> Result<()> {
        if !self.is_running() {
            debug!("stop_all: no modules running");
            return Ok(());
        }

        info!(modules = self.started.len(), "Stopping modules");
        let failures = self.stop_started().await;
        if failures.is_empty() {
            info!("All modules stopped");
            Ok(())
        } else {
            Err(Error::ShutdownFailed { failures })
        }
    }

    /// Order `start_all` would use, without starting anything
    pub fn resolve_order(&self) -> Result<Vec<ModuleKey>> {
        let graph: Vec<(ModuleKey, ModuleList)> = self
            .entries
            .iter()
            .map(|e| (e.factory.key(), e.dependencies.clone()))
            .collect();
        resolver::start_order(&graph)
    }

    /// Running instance of module `T`
    pub fn get<T: Module>(&self) -> Result<Arc<T>> {
        let key = ModuleKey::of::<T>();
        let instance = self
            .running
            .get(&key)
            .ok_or_else(|| Error::ModuleNotStarted { module: key.name() })?;
        Arc::clone(instance)
            .downcast_arc::<T>()
            .map_err(|_| Error::internal(format!("Module {key} is registered under another type")))
    }

    /// Handler of started module `T`
    pub fn handler<T: Module>(&self) -> Result<Handler> {
        let key = ModuleKey::of::<T>();
        self.handlers
            .get(&key)
            .map(HandlerThread::handler)
            .ok_or_else(|| Error::ModuleNotStarted { module: key.name() })
    }

    /// Whether module `T` is `Started`
    pub fn is_started<T: Module>(&self) -> bool {
        self.state::<T>().is_some_and(ModuleState::is_started)
    }

    /// Lifecycle state of module `T`, if registered
    pub fn state<T: Module>(&self) -> Option<ModuleState> {
        self.position(&ModuleKey::of::<T>())
            .map(|idx| self.entries[idx].state)
    }

    /// Keys of the started modules, in start order
    pub fn start_order(&self) -> &[ModuleKey] {
        &self.started
    }

    /// Snapshot of every registered module, in registration order
    pub fn status(&self) -> Vec<ModuleStatus> {
        self.entries
            .iter()
            .map(|e| ModuleStatus {
                name: e.factory.key().name(),
                state: e.state,
                dependencies: e.dependencies.names(),
            })
            .collect()
    }

    /// Whether any module is started
    pub fn is_running(&self) -> bool {
        !self.started.is_empty()
    }

    /// Number of registered modules
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no module is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    async fn start_module(&mut self, key: ModuleKey) -> Result<()> {
        let idx = self
            .position(&key)
            .ok_or_else(|| Error::internal(format!("Module {key} vanished from the registry")))?;
        let instance = self.entries[idx].factory.instantiate();
        if self.entries[idx].factory.is_shared_instance() {
            self.entries[idx].consumed = true;
        }
        let dependencies = self.entries[idx].dependencies.clone();
        let thread = HandlerThread::spawn(format!(
            "{}-{}",
            self.config.handler_thread_prefix,
            key.name()
        ))?;
        let handler = thread.handler();

        self.set_state(idx, ModuleState::Starting);
        debug!(module = %key, handler = %handler.name(), "Starting module");
        let result = {
            let ctx = ModuleContext::new(key, &dependencies, &self.running, &handler);
            instance.start(&ctx).await
        };

        match result {
            Ok(()) => {
                self.running.insert(key, instance);
                self.handlers.insert(key, thread);
                self.started.push(key);
                self.set_state(idx, ModuleState::Started);
                info!(module = %key, "Module started");
                Ok(())
            }
            Err(error) => {
                // A module whose start failed is not stopped, only released
                self.set_state(idx, ModuleState::Stopped);
                if let Err(join) = thread.shutdown().await {
                    warn!(module = %key, error = %join, "Handler of failed module did not shut down");
                }
                Err(error)
            }
        }
    }

    async fn stop_started(&mut self) -> Vec<StopFailure> {
        let mut failures = Vec::new();
        while let Some(key) = self.started.pop() {
            let Some(idx) = self.position(&key) else {
                continue;
            };
            self.set_state(idx, ModuleState::Stopping);
            debug!(module = %key, "Stopping module");

            let instance = self.running.get(&key).cloned();
            if let Some(instance) = &instance {
                if let Err(error) = instance.stop().await {
                    warn!(module = %key, error = %error, "Module failed to stop cleanly");
                    failures.push(StopFailure {
                        module: key.name(),
                        error,
                    });
                }
            }

            if let Some(thread) = self.handlers.remove(&key) {
                if let Err(error) = thread.shutdown().await {
                    warn!(module = %key, error = %error, "Handler did not shut down cleanly");
                    failures.push(StopFailure {
                        module: key.name(),
                        error,
                    });
                }
            }

            self.running.remove(&key);
            self.set_state(idx, ModuleState::Stopped);
            if let Some(instance) = instance {
                self.release(idx, key, instance);
            }
            info!(module = %key, "Module stopped");
        }
        failures
    }

    fn release(&self, idx: usize, key: ModuleKey, instance: Arc<dyn Module>) {
        let references = Arc::strong_count(&instance) - 1;
        let expected = usize::from(self.entries[idx].factory.is_shared_instance());
        if self.config.warn_on_leaked_references && references > expected {
            warn!(
                module = %key,
                references = references - expected,
                "Module handles outlived its stop"
            );
        }
    }

    fn set_state(&mut self, idx: usize, next: ModuleState) {
        let entry = &mut self.entries[idx];
        trace!(
            module = %entry.factory.key(),
            from = %entry.state,
            to = %next,
            "Module state transition"
        );
        debug_assert!(
            entry.state.can_transition_to(next),
            "illegal transition {} -> {}",
            entry.state,
            next
        );
        entry.state = next;
    }

    fn position(&self, key: &ModuleKey) -> Option<usize> {
        self.entries.iter().position(|e| e.factory.key() == *key)
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ModuleRegistry {
    fn drop(&mut self) {
        if self.is_running() {
            warn!(
                modules = self.started.len(),
                "Module registry dropped while modules are running; stop_all was not called"
            );
        }
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("registered", &self.entries.len())
            .field(
                "started",
                &self.started.iter().map(ModuleKey::name).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
