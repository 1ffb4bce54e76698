//! Tests for the marker attributes and the derive

use std::borrow::Cow;
use std::sync::Arc;
use svcreg::domain::constants::STUB_INVOCATION_RESULT;
use svcreg::domain::LifecycleState;
use svcreg::{
    Contract, ContractContainer, ContractContainerExt, ContractIdentity, Error, Injectable,
    ProxyContainer, Receiver, ScanRoots, contract, enable_contracts,
};

#[contract]
pub trait HelloService: Send + Sync {
    fn hello(&self, name: &str) -> String;
    fn label(&self) -> &'static str;
    fn maybe(&self, key: u32, fallback: Option<String>) -> Option<String>;
    fn fallible(&self) -> Result<Cow<'static, str>, std::io::Error>;
    fn ping(&self);
}

#[contract]
pub trait Clock: Send + Sync {
    fn now(&self) -> String;
}

#[derive(Injectable)]
pub struct ClientImpl {
    #[inject]
    greeter: Arc<dyn HelloService>,
    label: String,
}

#[derive(Injectable)]
pub struct Dashboard(#[inject] Arc<dyn HelloService>, #[inject] Arc<dyn Clock>, u32);

#[derive(Injectable)]
pub struct Nothing;

#[enable_contracts(roots = ["com.example.app", ""])]
pub struct App;

#[enable_contracts]
pub struct Bare;

fn container_with_hello() -> ProxyContainer {
    let container = ProxyContainer::new();
    svcreg::register_contract::<dyn HelloService>(&container).unwrap();
    container
}

#[test]
fn test_contract_identity_follows_module_path() {
    let identity = <dyn HelloService as Contract>::identity();

    assert_eq!(identity.as_str(), "unit::macros::HelloService");
    assert_eq!(identity.simple_name(), "HelloService");
    assert_eq!(identity.registration_name(), "helloService");
}

#[test]
fn test_contract_surface_lists_methods() {
    let surface = <dyn HelloService as Contract>::surface();

    let names: Vec<&str> = surface.method_names().collect();
    assert_eq!(names, vec!["hello", "label", "maybe", "fallible", "ping"]);

    let hello = surface.method("hello").unwrap();
    assert_eq!(hello.receiver, Receiver::Ref);
    assert_eq!(hello.params, vec!["&str".to_string()]);
    assert_eq!(hello.returns.as_deref(), Some("String"));

    let maybe = surface.method("maybe").unwrap();
    assert_eq!(
        maybe.params,
        vec!["u32".to_string(), "Option<String>".to_string()]
    );

    assert_eq!(surface.method("ping").unwrap().returns, None);
    assert!(surface.methods.iter().all(|m| !m.has_default));
}

#[test]
fn test_every_method_returns_the_sentinel() {
    let container = container_with_hello();
    let hello = container.resolve_contract::<dyn HelloService>().unwrap();

    assert_eq!(hello.hello("Alice"), STUB_INVOCATION_RESULT);
    assert_eq!(hello.hello(""), STUB_INVOCATION_RESULT);
    assert_eq!(hello.label(), STUB_INVOCATION_RESULT);
    assert_eq!(
        hello.maybe(7, None).as_deref(),
        Some(STUB_INVOCATION_RESULT)
    );
    assert_eq!(hello.fallible().unwrap(), STUB_INVOCATION_RESULT);
    hello.ping();
}

#[test]
fn test_register_contract_is_idempotent() {
    let container = ProxyContainer::new();

    let first = svcreg::register_contract::<dyn HelloService>(&container).unwrap();
    let second = svcreg::register_contract::<dyn HelloService>(&container).unwrap();

    assert_eq!((first.registered, first.skipped), (1, 0));
    assert_eq!((second.registered, second.skipped), (0, 1));
    assert_eq!(container.len(), 1);
}

#[test]
fn test_resolved_contract_is_a_singleton() {
    let container = container_with_hello();
    let identity = <dyn HelloService as Contract>::identity();

    assert_eq!(container.state(&identity), Some(LifecycleState::Registered));
    let first = container.resolve(&identity).unwrap();
    let second = container.resolve(&identity).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(container.state(&identity), Some(LifecycleState::Cached));
}

#[test]
fn test_lifecycle_runs_from_discovered_to_cached() {
    let identity = <dyn HelloService as Contract>::identity();
    let mut registry = svcreg::ContractRegistry::new();
    registry.register(
        <dyn HelloService as Contract>::surface(),
        svcreg::RegistrationOrigin::ContractMarker,
    );
    let container = ProxyContainer::new();

    let state = || svcreg::lifecycle_state(&registry, &container, &identity);
    assert_eq!(state(), Some(LifecycleState::Discovered));

    svcreg::publish_registry(&registry, &container).unwrap();
    assert_eq!(state(), Some(LifecycleState::Registered));

    container.resolve(&identity).unwrap();
    assert_eq!(state(), Some(LifecycleState::Cached));
}

#[test]
fn test_derive_injects_contract_fields() {
    let container = container_with_hello();

    let client = ClientImpl::inject(&container).unwrap();

    assert_eq!(client.greeter.hello("Alice"), STUB_INVOCATION_RESULT);
    assert!(client.label.is_empty());
}

#[test]
fn test_derive_injects_tuple_fields() {
    let container = container_with_hello();
    svcreg::register_contract::<dyn Clock>(&container).unwrap();

    let dashboard = Dashboard::inject(&container).unwrap();

    assert_eq!(dashboard.0.hello("Bob"), STUB_INVOCATION_RESULT);
    assert_eq!(dashboard.1.now(), STUB_INVOCATION_RESULT);
    assert_eq!(dashboard.2, 0);
}

#[test]
fn test_derive_on_unit_struct_needs_nothing() {
    let container = ProxyContainer::new();
    assert!(Nothing::inject(&container).is_ok());
}

#[test]
fn test_injecting_unregistered_contract_fails() {
    let container = ProxyContainer::new();

    let Err(err) = ClientImpl::inject(&container) else {
        panic!("Expected NotRegistered");
    };
    match err {
        Error::NotRegistered { contract } => {
            assert_eq!(contract, "unit::macros::HelloService");
        }
        other => panic!("Expected NotRegistered, got {other:?}"),
    }
}

#[test]
fn test_proxy_invoke_by_name() {
    let container = container_with_hello();
    let proxy = container
        .resolve(&ContractIdentity::new("unit.macros.HelloService"))
        .unwrap();

    let result = proxy
        .invoke("hello", &[serde_json::json!("Alice")])
        .unwrap();
    assert_eq!(result, STUB_INVOCATION_RESULT);

    assert!(matches!(
        proxy.invoke("goodbye", &[]),
        Err(Error::UnknownMethod { .. })
    ));
}

#[test]
fn test_enable_contracts_explicit_roots() {
    assert_eq!(App::scan_roots(), ScanRoots::new(["com::example::app"]));
}

#[test]
fn test_enable_contracts_infers_own_module() {
    assert_eq!(Bare::scan_roots(), ScanRoots::new(["unit::macros"]));
}
