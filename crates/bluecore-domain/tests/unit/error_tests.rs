//! Unit tests for domain error types

use bluecore_domain::error::{Error, ErrorCategory, StopFailure};

#[test]
fn test_cyclic_dependency_display_lists_cycle() {
    let error = Error::CyclicDependency {
        cycle: vec!["C".to_string(), "D".to_string(), "C".to_string()],
    };
    assert_eq!(error.to_string(), "Cyclic module dependency: C -> D -> C");
}

#[test]
fn test_configuration_errors_are_fatal() {
    let duplicate = Error::DuplicateModule {
        module: "HciLayer".to_string(),
    };
    assert_eq!(duplicate.category(), ErrorCategory::Configuration);
    assert!(duplicate.is_fatal());

    let missing = Error::MissingDependency {
        module: "SecurityModule".to_string(),
        dependency: "HciLayer".to_string(),
    };
    assert_eq!(missing.category(), ErrorCategory::Configuration);
}

#[test]
fn test_contract_violations_are_fatal() {
    let undeclared = Error::UndeclaredDependency {
        module: "B".to_string(),
        dependency: "A".to_string(),
    };
    assert_eq!(undeclared.category(), ErrorCategory::ContractViolation);
    assert!(undeclared.is_fatal());

    let not_started = Error::DependencyNotStarted {
        module: "B".to_string(),
        dependency: "A".to_string(),
    };
    assert!(not_started.is_fatal());
}

#[test]
fn test_service_not_started_is_recoverable() {
    let error = Error::service_not_started("FacadeModule<SecurityFacade>");
    assert_eq!(error.category(), ErrorCategory::Recoverable);
    assert!(!error.is_fatal());
    assert!(error.to_string().contains("SecurityFacade"));
}

#[test]
fn test_start_failed_keeps_source() {
    let error = Error::StartFailed {
        module: "Broken".to_string(),
        source: Box::new(Error::module("Broken", "socket unavailable")),
        unwind: Vec::new(),
    };
    let source = std::error::Error::source(&error).expect("source should be set");
    assert!(source.to_string().contains("socket unavailable"));
    assert_eq!(error.category(), ErrorCategory::Runtime);
}

#[test]
fn test_shutdown_failed_summarizes_every_failure() {
    let error = Error::ShutdownFailed {
        failures: vec![
            StopFailure {
                module: "B".to_string(),
                error: Error::module("B", "flush failed"),
            },
            StopFailure {
                module: "A".to_string(),
                error: Error::internal("lost"),
            },
        ],
    };
    let display = error.to_string();
    assert!(display.contains("2 failed module(s)"));
    assert!(display.contains("B (Module B failed: flush failed)"));
    assert!(display.contains("A (Internal error: lost)"));
}

#[test]
fn test_json_error_conversion() {
    let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: Error = parse_error.into();
    assert!(matches!(error, Error::Json { .. }));
}
