//! Security facade hosted on the remote-procedure server

use bluecore_domain::error::Error;
use bluecore_domain::ports::RpcService;
use bluecore_infrastructure::module::{ModuleFactory, ModuleRegistry};
use bluecore_providers::{
    HciLayer, L2capClassicModule, L2capLeModule, SECURITY_FACADE_SERVICE, SecurityModule,
    SecurityModuleFacadeModule, SecurityStatus,
};
use bluecore_server::RpcServerModule;
use serde_json::{Value, json};
use std::sync::Arc;

fn facade_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register(ModuleFactory::of::<SecurityModuleFacadeModule>()).unwrap();
    registry.register(ModuleFactory::of::<RpcServerModule>()).unwrap();
    registry.register(ModuleFactory::of::<HciLayer>()).unwrap();
    registry.register(ModuleFactory::of::<L2capLeModule>()).unwrap();
    registry.register(ModuleFactory::of::<L2capClassicModule>()).unwrap();
    registry.register(ModuleFactory::of::<SecurityModule>()).unwrap();
    registry
}

#[tokio::test]
async fn test_facade_starts_after_everything_it_drives() {
    let mut registry = facade_registry();
    registry.start_all().await.unwrap();

    let order: Vec<String> = registry.start_order().iter().map(|k| k.name()).collect();
    assert_eq!(
        order,
        vec![
            "RpcServerModule",
            "HciLayer",
            "L2capLeModule",
            "L2capClassicModule",
            "SecurityModule",
            "FacadeModule<SecurityFacade>",
        ]
    );

    registry.stop_all().await.unwrap();
}

#[tokio::test]
async fn test_get_status_through_the_server() {
    let mut registry = facade_registry();
    registry.start_all().await.unwrap();

    let server = registry.get::<RpcServerModule>().unwrap();
    assert_eq!(server.services(), vec![SECURITY_FACADE_SERVICE]);
    assert_eq!(server.methods(SECURITY_FACADE_SERVICE).unwrap(), vec!["GetStatus"]);

    let reply = server
        .dispatch(SECURITY_FACADE_SERVICE, "GetStatus", json!({}))
        .await
        .unwrap();
    let status: SecurityStatus = serde_json::from_value(reply).unwrap();
    assert!(status.security.running);
    assert!(status.l2cap_le.running);
    assert!(status.l2cap_classic.running);
    assert!(status.hci.running);
    assert_eq!(status.facade_handler, "bluecore-FacadeModule<SecurityFacade>");

    assert!(matches!(
        server
            .dispatch(SECURITY_FACADE_SERVICE, "Pair", Value::Null)
            .await,
        Err(Error::UnknownMethod { .. })
    ));

    drop(server);
    registry.stop_all().await.unwrap();
}

#[tokio::test]
async fn test_calls_run_on_the_facade_handler() {
    let mut registry = facade_registry();
    registry.start_all().await.unwrap();

    let facade = registry.get::<SecurityModuleFacadeModule>().unwrap();
    let handler = registry.handler::<SecurityModuleFacadeModule>().unwrap();
    let before = handler.executed_tasks();

    let service = facade.service().unwrap();
    service.get_status().await.unwrap();
    service.call("GetStatus", Value::Null).await.unwrap();
    assert_eq!(handler.executed_tasks(), before + 2);

    drop(service);
    drop(facade);
    registry.stop_all().await.unwrap();
}

#[tokio::test]
async fn test_stop_releases_the_service_before_its_dependencies() {
    let mut registry = facade_registry();
    registry.start_all().await.unwrap();

    let facade = registry.get::<SecurityModuleFacadeModule>().unwrap();
    let security = registry.get::<SecurityModule>().unwrap();
    // Registry, the facade service and this handle
    assert_eq!(Arc::strong_count(&security), 3);

    let server = registry.get::<RpcServerModule>().unwrap();
    registry.stop_all().await.unwrap();

    assert!(matches!(
        facade.service(),
        Err(Error::ServiceNotStarted { .. })
    ));
    assert!(server.services().is_empty());
    assert_eq!(Arc::strong_count(&security), 1);
}
