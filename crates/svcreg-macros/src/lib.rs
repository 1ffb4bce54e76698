//! Marker attributes for svcreg
//!
//! Generated code refers to the `svcreg` facade crate, so these macros are
//! meant to be used through its re-exports:
//! * `#[contract]` - makes a trait resolvable as a stub proxy
//! * `#[enable_contracts]` - marks the entry point and its scan roots
//! * `#[derive(Injectable)]` - fills `#[inject]` fields from a container

use proc_macro::TokenStream;

mod contract;
mod enable;
mod injectable;

/// Marks a trait as a contract.
///
/// The trait is kept unchanged. Generated alongside it:
/// * `impl Trait for svcreg::ContractProxy`, every method answering the
///   stub result converted through `StubResult`
/// * `impl svcreg::Contract for dyn Trait`, carrying the identity
///   (`module_path!()::Trait`) and method surface
///
/// Every method must take `&self`, have no body and no type parameters.
///
/// ```ignore
/// #[contract]
/// pub trait HelloService: Send + Sync {
///     fn hello(&self, name: &str) -> String;
/// }
/// ```
#[proc_macro_attribute]
pub fn contract(attr: TokenStream, item: TokenStream) -> TokenStream {
    contract::contract(attr, item)
}

/// Marks the entry point whose namespace scanning starts from.
///
/// Adds `fn scan_roots() -> svcreg::ScanRoots` to the type: the given
/// roots, or the type's own module when none (or only blank ones) are given.
///
/// ```ignore
/// #[enable_contracts(roots = ["my_app::services"])]
/// pub struct App;
/// ```
#[proc_macro_attribute]
pub fn enable_contracts(attr: TokenStream, item: TokenStream) -> TokenStream {
    enable::enable_contracts(attr, item)
}

/// Derives `svcreg::Injectable`.
///
/// Fields marked `#[inject]` must be `Arc<dyn Contract>` and are resolved
/// from the container by type; every other field uses `Default`.
///
/// ```ignore
/// #[derive(Injectable)]
/// pub struct ClientImpl {
///     #[inject]
///     greeter: Arc<dyn HelloService>,
///     calls: usize,
/// }
/// ```
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    injectable::derive_injectable(input)
}
