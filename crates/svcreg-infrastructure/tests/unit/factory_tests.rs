//! Tests for the stub proxy factory

use crate::test_utils::{factory, greeter_surface};
use svcreg_domain::constants::STUB_INVOCATION_RESULT;
use svcreg_domain::{
    ContractIdentity, ContractSurface, Error, MethodSignature, ProxyFactory, Receiver,
};
use svcreg_infrastructure::StubProxyFactory;

#[test]
fn test_proxy_answers_stub_result_for_every_method() {
    let factory = factory();
    let proxy = factory
        .create_proxy(&ContractIdentity::new("com::example::app::Greeter"))
        .unwrap();

    assert_eq!(proxy.dispatch("greet"), STUB_INVOCATION_RESULT);
    assert_eq!(
        proxy
            .invoke("greet", &[serde_json::json!("Alice")])
            .unwrap(),
        STUB_INVOCATION_RESULT
    );
    assert_eq!(
        proxy.invoke("greet", &[serde_json::json!(null)]).unwrap(),
        STUB_INVOCATION_RESULT
    );
}

#[test]
fn test_unknown_method_is_rejected() {
    let proxy = factory()
        .create_proxy(&ContractIdentity::new("com::example::app::Greeter"))
        .unwrap();

    match proxy.invoke("farewell", &[]) {
        Err(Error::UnknownMethod { contract, method }) => {
            assert_eq!(contract, "com::example::app::Greeter");
            assert_eq!(method, "farewell");
        }
        other => panic!("Expected UnknownMethod, got {other:?}"),
    }
}

#[test]
fn test_unknown_contract_is_invalid_shape() {
    let result = factory().create_proxy(&ContractIdentity::new("com::example::app::Missing"));
    assert!(matches!(result, Err(Error::InvalidContractShape { .. })));
}

#[test]
fn test_surface_with_default_body_is_invalid_shape() {
    let surface = ContractSurface::new(
        ContractIdentity::new("app::Chatty"),
        vec![MethodSignature::new("hello", Receiver::Ref).with_default_body()],
    );
    let factory = StubProxyFactory::new().with_surface(surface);

    let result = factory.create_proxy(&ContractIdentity::new("app::Chatty"));
    assert!(matches!(result, Err(Error::InvalidContractShape { .. })));
    assert_eq!(factory.constructed(), 0);
}

#[test]
fn test_constructions_are_counted() {
    let factory = StubProxyFactory::new().with_surface(greeter_surface());
    let greeter = ContractIdentity::new("com::example::app::Greeter");

    assert!(factory.knows(&greeter));
    factory.create_proxy(&greeter).unwrap();
    factory.create_proxy(&greeter).unwrap();
    assert_eq!(factory.constructed(), 2);
}
