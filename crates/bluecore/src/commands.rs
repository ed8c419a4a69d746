//! Commands behind the `bluecore` binary

use crate::bootstrap::build_registry;
use anyhow::{Context, Result};
use bluecore_domain::value_objects::ModuleKey;
use bluecore_infrastructure::config::AppConfig;
use bluecore_server::RpcServerModule;
use serde_json::{Value, json};
use tracing::info;

/// Start the stack and keep it up until Ctrl-C
pub async fn run(config: &AppConfig) -> Result<()> {
    let mut registry = build_registry(config)?;
    registry
        .start_all()
        .await
        .context("Failed to start module stack")?;
    if let Ok(server) = registry.get::<RpcServerModule>() {
        info!(services = ?server.services(), "Module stack running");
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown requested");

    registry
        .stop_all()
        .await
        .context("Module stack did not stop cleanly")
}

/// Registered modules and the order they would start in
pub fn plan(config: &AppConfig) -> Result<Value> {
    let registry = build_registry(config)?;
    let order: Vec<String> = registry
        .resolve_order()
        .context("Module graph is invalid")?
        .iter()
        .map(ModuleKey::name)
        .collect();
    Ok(json!({
        "start_order": order,
        "modules": registry.status(),
    }))
}

/// Start the stack, make one facade call, and stop again
///
/// The stack is stopped even when the call fails.
pub async fn call(config: &AppConfig, service: &str, method: &str, request: Value) -> Result<Value> {
    let mut registry = build_registry(config)?;
    registry
        .start_all()
        .await
        .context("Failed to start module stack")?;

    let reply = match registry.get::<RpcServerModule>() {
        Ok(server) => server.dispatch(service, method, request).await,
        Err(e) => Err(e),
    };

    registry
        .stop_all()
        .await
        .context("Module stack did not stop cleanly")?;
    reply.with_context(|| format!("Call {service}/{method} failed"))
}
