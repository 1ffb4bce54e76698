//! Stub proxy handle
//!
//! A [`ContractProxy`] pairs the method table of one contract with a single
//! shared handler. Every method answers the same fixed result for any
//! arguments; nothing is stored between calls.

use crate::constants::STUB_INVOCATION_RESULT;
use crate::error::{Error, Result};
use crate::value_objects::{ContractIdentity, ContractSurface};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Handler shared by every method of a proxy
pub type DispatchHandler = fn(contract: &ContractIdentity, method: &str) -> &'static str;

/// The fixed dispatch behavior: ignore everything, answer the sentinel
pub fn stub_handler(_contract: &ContractIdentity, _method: &str) -> &'static str {
    STUB_INVOCATION_RESULT
}

/// Stand-in object implementing a contract's method surface
#[derive(Clone)]
pub struct ContractProxy {
    surface: Arc<ContractSurface>,
    handler: DispatchHandler,
}

impl ContractProxy {
    pub fn new(surface: Arc<ContractSurface>, handler: DispatchHandler) -> Self {
        Self { surface, handler }
    }

    /// Proxy answering the stub result
    pub fn stub(surface: Arc<ContractSurface>) -> Self {
        Self::new(surface, stub_handler)
    }

    pub fn contract(&self) -> &ContractIdentity {
        &self.surface.contract
    }

    pub fn surface(&self) -> &ContractSurface {
        &self.surface
    }

    /// Route a call through the shared handler
    ///
    /// Used by generated trait impls, where the compiler already guarantees
    /// `method` belongs to the surface.
    pub fn dispatch(&self, method: &str) -> &'static str {
        (self.handler)(self.contract(), method)
    }

    /// Dynamic call by method name; arguments never influence the result
    pub fn invoke(&self, method: &str, _args: &[serde_json::Value]) -> Result<&'static str> {
        if !self.surface.has_method(method) {
            return Err(Error::unknown_method(self.contract().as_str(), method));
        }
        Ok(self.dispatch(method))
    }
}

impl fmt::Debug for ContractProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractProxy")
            .field("contract", self.contract())
            .field("methods", &self.surface.methods.len())
            .finish()
    }
}

/// Compile-time view of a contract trait
///
/// Implemented for `dyn Trait` by the `#[contract]` attribute so typed
/// code can obtain `Arc<dyn Trait>` from a container.
pub trait Contract: 'static {
    /// Qualified identity of the trait
    fn identity() -> ContractIdentity;

    /// Method surface of the trait
    fn surface() -> ContractSurface;

    /// View a proxy as the trait object
    fn from_proxy(proxy: Arc<ContractProxy>) -> Arc<Self>;
}

/// Return types a stub method can produce from the sentinel
pub trait StubResult: Sized {
    fn from_sentinel(sentinel: &'static str) -> Self;
}

impl StubResult for String {
    fn from_sentinel(sentinel: &'static str) -> Self {
        sentinel.to_string()
    }
}

impl StubResult for &'static str {
    fn from_sentinel(sentinel: &'static str) -> Self {
        sentinel
    }
}

impl StubResult for Cow<'static, str> {
    fn from_sentinel(sentinel: &'static str) -> Self {
        Cow::Borrowed(sentinel)
    }
}

impl StubResult for () {
    fn from_sentinel(_sentinel: &'static str) -> Self {}
}

impl<T: StubResult> StubResult for Option<T> {
    fn from_sentinel(sentinel: &'static str) -> Self {
        Some(T::from_sentinel(sentinel))
    }
}

impl<T: StubResult, E> StubResult for std::result::Result<T, E> {
    fn from_sentinel(sentinel: &'static str) -> Self {
        Ok(T::from_sentinel(sentinel))
    }
}
