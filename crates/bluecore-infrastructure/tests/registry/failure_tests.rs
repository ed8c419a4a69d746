//! Unwinding after start failures and aggregation of stop failures

use crate::test_utils::{A, B, F, Probe};
use bluecore_domain::error::{Error, ErrorCategory};
use bluecore_domain::value_objects::ModuleState;
use bluecore_infrastructure::module::ModuleRegistry;

fn registry_with_abf(probe: &Probe) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register(A::factory(probe)).unwrap();
    registry.register(B::factory(probe)).unwrap();
    registry.register(F::factory(probe)).unwrap();
    registry
}

#[tokio::test]
async fn test_failing_start_unwinds_started_modules_in_reverse() {
    let probe = Probe::new();
    probe.fail_start("F");
    let mut registry = registry_with_abf(&probe);

    let err = registry.start_all().await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Runtime);
    match &err {
        Error::StartFailed {
            module,
            source,
            unwind,
        } => {
            assert_eq!(module, "F");
            assert!(matches!(**source, Error::Module { .. }));
            assert!(unwind.is_empty());
        }
        other => panic!("expected start failure, got {other:?}"),
    }

    // The module that failed is never stopped
    assert_eq!(
        probe.events(),
        vec!["start A", "start B", "fail F", "stop B", "stop A"]
    );
    assert_eq!(registry.state::<A>(), Some(ModuleState::Stopped));
    assert_eq!(registry.state::<B>(), Some(ModuleState::Stopped));
    assert_eq!(registry.state::<F>(), Some(ModuleState::Stopped));
    assert!(!registry.is_running());
}

#[tokio::test]
async fn test_modules_after_the_failure_stay_declared() {
    let probe = Probe::new();
    probe.fail_start("B");
    let mut registry = registry_with_abf(&probe);

    assert!(registry.start_all().await.is_err());
    assert_eq!(probe.events(), vec!["start A", "fail B", "stop A"]);
    assert_eq!(registry.state::<F>(), Some(ModuleState::Declared));
}

#[tokio::test]
async fn test_registry_can_start_again_after_a_failed_start() {
    let probe = Probe::new();
    probe.fail_start_once("F");
    let mut registry = registry_with_abf(&probe);
    assert!(registry.start_all().await.is_err());
    assert_eq!(registry.state::<F>(), Some(ModuleState::Stopped));

    registry.start_all().await.unwrap();
    assert_eq!(registry.state::<A>(), Some(ModuleState::Started));
    assert_eq!(registry.state::<B>(), Some(ModuleState::Started));
    assert_eq!(registry.state::<F>(), Some(ModuleState::Started));
    assert_eq!(
        probe.events(),
        vec![
            "start A", "start B", "fail F", "stop B", "stop A", "start A", "start B", "start F"
        ]
    );

    registry.stop_all().await.unwrap();
}

#[tokio::test]
async fn test_unwind_stop_failures_are_reported_with_the_start_failure() {
    let probe = Probe::new();
    probe.fail_start("F").fail_stop("A");
    let mut registry = registry_with_abf(&probe);

    let err = registry.start_all().await.unwrap_err();
    let Error::StartFailed { module, unwind, .. } = &err else {
        panic!("expected start failure, got {err:?}");
    };
    assert_eq!(module, "F");
    let failed: Vec<_> = unwind.iter().map(|f| f.module.as_str()).collect();
    assert_eq!(failed, vec!["A"]);

    // B is still stopped although A's stop fails after it
    assert_eq!(
        probe.events(),
        vec!["start A", "start B", "fail F", "stop B", "stop A"]
    );
    assert_eq!(registry.state::<A>(), Some(ModuleState::Stopped));
    assert!(!registry.is_running());
}

#[tokio::test]
async fn test_stop_failures_are_aggregated_without_skipping_modules() {
    let probe = Probe::new();
    probe.fail_stop("F").fail_stop("A");
    let mut registry = registry_with_abf(&probe);
    registry.start_all().await.unwrap();

    let err = registry.stop_all().await.unwrap_err();
    let Error::ShutdownFailed { failures } = &err else {
        panic!("expected shutdown failure, got {err:?}");
    };
    let failed: Vec<_> = failures.iter().map(|f| f.module.as_str()).collect();
    assert_eq!(failed, vec!["F", "A"]);
    assert!(err.to_string().contains("2 failed module(s)"));

    assert_eq!(
        probe.events(),
        vec!["start A", "start B", "start F", "stop F", "stop B", "stop A"]
    );
    assert_eq!(registry.state::<A>(), Some(ModuleState::Stopped));
    assert_eq!(registry.state::<F>(), Some(ModuleState::Stopped));
    assert!(!registry.is_running());

    // Nothing left to stop
    registry.stop_all().await.unwrap();
}
