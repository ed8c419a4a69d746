//! Remote-procedure server tests

use async_trait::async_trait;
use bluecore_domain::error::{Error, Result};
use bluecore_domain::ports::{RpcService, ServiceHost};
use bluecore_infrastructure::module::{ModuleFactory, ModuleRegistry};
use bluecore_server::RpcServerModule;
use serde_json::{Value, json};
use std::sync::Arc;

struct EchoService {
    name: &'static str,
}

#[async_trait]
impl RpcService for EchoService {
    fn name(&self) -> &str {
        self.name
    }

    fn methods(&self) -> &[&'static str] {
        &["Echo"]
    }

    async fn call(&self, method: &str, request: Value) -> Result<Value> {
        match method {
            "Echo" => Ok(json!({ "echo": request })),
            _ => Err(Error::UnknownMethod {
                service: self.name.to_string(),
                method: method.to_string(),
            }),
        }
    }
}

async fn started_server() -> (ModuleRegistry, Arc<RpcServerModule>) {
    let mut registry = ModuleRegistry::new();
    registry
        .register(ModuleFactory::of::<RpcServerModule>())
        .unwrap();
    registry.start_all().await.unwrap();
    let server = registry.get::<RpcServerModule>().unwrap();
    (registry, server)
}

#[tokio::test]
async fn test_dispatch_reaches_registered_service() {
    let (mut registry, server) = started_server().await;
    server
        .register(Arc::new(EchoService { name: "test.Echo" }))
        .unwrap();

    let reply = server
        .dispatch("test.Echo", "Echo", json!({ "n": 1 }))
        .await
        .unwrap();
    assert_eq!(reply, json!({ "echo": { "n": 1 } }));
    assert_eq!(server.methods("test.Echo").unwrap(), vec!["Echo"]);

    assert!(matches!(
        server.dispatch("test.Echo", "Shout", Value::Null).await,
        Err(Error::UnknownMethod { .. })
    ));
    assert!(matches!(
        server.dispatch("test.Missing", "Echo", Value::Null).await,
        Err(Error::UnknownService { .. })
    ));

    server.deregister("test.Echo").unwrap();
    drop(server);
    registry.stop_all().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_service_names_are_rejected() {
    let (mut registry, server) = started_server().await;
    server
        .register(Arc::new(EchoService { name: "test.Echo" }))
        .unwrap();

    match server.register(Arc::new(EchoService { name: "test.Echo" })) {
        Err(Error::DuplicateService { service }) => assert_eq!(service, "test.Echo"),
        other => panic!("expected duplicate service, got {other:?}"),
    }

    server.deregister("test.Echo").unwrap();
    drop(server);
    registry.stop_all().await.unwrap();
}

#[tokio::test]
async fn test_services_are_listed_sorted() {
    let (mut registry, server) = started_server().await;
    server.register(Arc::new(EchoService { name: "b.Two" })).unwrap();
    server.register(Arc::new(EchoService { name: "a.One" })).unwrap();

    assert_eq!(server.services(), vec!["a.One", "b.Two"]);

    drop(server);
    // Leftover services are dropped by the server's stop
    registry.stop_all().await.unwrap();
}

#[test]
fn test_server_refuses_work_before_start() {
    let server = RpcServerModule::default();
    assert!(!server.is_serving());

    let err = server
        .register(Arc::new(EchoService { name: "test.Echo" }))
        .unwrap_err();
    assert!(matches!(err, Error::Lifecycle { .. }));
    assert!(matches!(
        server.deregister("test.Echo"),
        Err(Error::UnknownService { .. })
    ));
}

#[tokio::test]
async fn test_dispatch_after_stop_fails() {
    let (mut registry, server) = started_server().await;
    server
        .register(Arc::new(EchoService { name: "test.Echo" }))
        .unwrap();
    registry.stop_all().await.unwrap();

    assert!(!server.is_serving());
    assert!(server.services().is_empty());
    assert!(matches!(
        server.dispatch("test.Echo", "Echo", Value::Null).await,
        Err(Error::ModuleNotStarted { .. })
    ));
}
