//! Proxy factory port

use crate::error::Result;
use crate::proxy::ContractProxy;
use crate::value_objects::ContractIdentity;

/// Builds the proxy standing in for a contract
pub trait ProxyFactory: Send + Sync {
    /// Fails with `Error::InvalidContractShape` unless `contract` is a
    /// known pure interface
    fn create_proxy(&self, contract: &ContractIdentity) -> Result<ContractProxy>;
}
