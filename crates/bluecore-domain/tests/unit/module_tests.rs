//! Unit tests for module identity and lifecycle state

use bluecore_domain::value_objects::{ModuleKey, ModuleState, ModuleStatus, short_type_name};
use std::collections::HashSet;

struct Alpha;
struct Beta;
struct Wrapper<T>(T);

#[test]
fn test_module_key_identity_is_per_type() {
    assert_eq!(ModuleKey::of::<Alpha>(), ModuleKey::of::<Alpha>());
    assert_ne!(ModuleKey::of::<Alpha>(), ModuleKey::of::<Beta>());
    assert!(ModuleKey::of::<Alpha>().is::<Alpha>());
    assert!(!ModuleKey::of::<Alpha>().is::<Beta>());

    let keys: HashSet<_> = [ModuleKey::of::<Alpha>(), ModuleKey::of::<Alpha>()]
        .into_iter()
        .collect();
    assert_eq!(keys.len(), 1);
}

#[test]
fn test_module_key_short_names() {
    assert_eq!(ModuleKey::of::<Alpha>().name(), "Alpha");
    assert_eq!(ModuleKey::of::<Wrapper<Beta>>().name(), "Wrapper<Beta>");
    assert_eq!(format!("{}", ModuleKey::of::<Beta>()), "Beta");
}

#[test]
fn test_short_type_name_handles_nested_generics() {
    assert_eq!(
        short_type_name("a::b::Outer<c::Inner, d::e::Other<f::Leaf>>"),
        "Outer<Inner, Other<Leaf>>"
    );
    assert_eq!(short_type_name("Plain"), "Plain");
}

#[test]
fn test_module_state_default_is_declared() {
    assert_eq!(ModuleState::default(), ModuleState::Declared);
}

#[test]
fn test_module_state_transitions() {
    assert!(ModuleState::Declared.can_transition_to(ModuleState::Starting));
    assert!(ModuleState::Starting.can_transition_to(ModuleState::Started));
    assert!(ModuleState::Starting.can_transition_to(ModuleState::Stopped));
    assert!(ModuleState::Started.can_transition_to(ModuleState::Stopping));
    assert!(ModuleState::Stopping.can_transition_to(ModuleState::Stopped));

    assert!(!ModuleState::Stopped.can_transition_to(ModuleState::Started));
    assert!(!ModuleState::Declared.can_transition_to(ModuleState::Started));
    assert!(!ModuleState::Started.can_transition_to(ModuleState::Stopped));
}

#[test]
fn test_module_status_serialization() {
    let status = ModuleStatus {
        name: "L2capLeModule".to_string(),
        state: ModuleState::Started,
        dependencies: vec!["HciLayer".to_string()],
    };
    let json = serde_json::to_string(&status).expect("serialization failed");
    assert!(json.contains("\"Started\""));

    let back: ModuleStatus = serde_json::from_str(&json).expect("deserialization failed");
    assert_eq!(back, status);
}
