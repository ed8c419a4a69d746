//! Composition root
//!
//! The only place that knows the concrete module set. Everything below it
//! sees modules through the registry.

use bluecore_domain::error::Result;
use bluecore_infrastructure::config::{AppConfig, ConfigLoader};
use bluecore_infrastructure::module::{ModuleFactory, ModuleRegistry};
use bluecore_providers::{
    HciLayer, L2capClassicModule, L2capLeModule, SecurityModule, SecurityModuleFacadeModule,
};
use bluecore_server::RpcServerModule;
use std::path::Path;
use tracing::info;

/// Load configuration from an optional explicit path
pub fn load_config(config_path: Option<&Path>) -> Result<AppConfig> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}

/// Register the full module stack
///
/// Registration order does not matter; the registry resolves the start
/// order from the declared dependencies.
pub fn build_registry(config: &AppConfig) -> Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::with_config(config.registry.clone());

    registry.register(ModuleFactory::of::<RpcServerModule>())?;
    registry.register(ModuleFactory::of::<HciLayer>())?;
    registry.register(ModuleFactory::of::<L2capLeModule>())?;
    registry.register(ModuleFactory::of::<L2capClassicModule>())?;
    registry.register(ModuleFactory::of::<SecurityModule>())?;
    if config.facades.security {
        registry.register(ModuleFactory::of::<SecurityModuleFacadeModule>())?;
    }

    info!(modules = registry.len(), "Module stack registered");
    Ok(registry)
}
