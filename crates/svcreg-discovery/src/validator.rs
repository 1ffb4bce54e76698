//! Marker placement validation
//!
//! Every rule is checked when the type is discovered. A violation aborts
//! the scan pass; nothing is deferred to call time.

use crate::catalog::TypeResolver;
use svcreg_domain::{ContractSurface, Error, FieldDescriptor, Result, TypeDescriptor};

/// An injection-marked field whose declared type passed validation
#[derive(Debug, Clone)]
pub struct InjectionPoint {
    pub field: FieldDescriptor,
    /// Surface of the field's declared interface
    pub surface: ContractSurface,
}

/// Outcome of validating one type
#[derive(Debug, Clone)]
pub struct ValidatedType {
    pub descriptor: TypeDescriptor,
    /// `Some` if the type carries the contract marker
    pub contract: Option<ContractSurface>,
    pub injection_points: Vec<InjectionPoint>,
}

impl ValidatedType {
    pub fn is_contract(&self) -> bool {
        self.contract.is_some()
    }
}

/// Checks where contract and inject markers may appear
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkerValidator;

impl MarkerValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate one descriptor
    ///
    /// # Errors
    ///
    /// - `InvalidContractShape` if a contract-marked type is not a pure interface
    /// - `InvalidInjectionTarget` if an inject-marked field is static, or its
    ///   declared type does not resolve to a pure interface
    pub fn validate(
        &self,
        descriptor: TypeDescriptor,
        resolver: &dyn TypeResolver,
    ) -> Result<ValidatedType> {
        let contract = if descriptor.contract_marked {
            Some(ContractSurface::from_descriptor(&descriptor)?)
        } else {
            None
        };

        let mut injection_points = Vec::new();
        for field in descriptor.injection_fields() {
            let surface = Self::validate_injection(field, resolver)?;
            injection_points.push(InjectionPoint {
                field: field.clone(),
                surface,
            });
        }

        Ok(ValidatedType {
            descriptor,
            contract,
            injection_points,
        })
    }

    fn validate_injection(
        field: &FieldDescriptor,
        resolver: &dyn TypeResolver,
    ) -> Result<ContractSurface> {
        let reject = |reason: String| {
            Error::invalid_injection_target(field.owner.as_str(), &field.name, reason)
        };

        if field.is_static {
            return Err(reject(
                "is static, inject needs an instance field".to_string(),
            ));
        }

        let declared = &field.declared_type;
        let Some(target) = resolver.resolve(declared)? else {
            return Err(reject(format!(
                "declares `{}`, which does not resolve to a known trait",
                declared.written
            )));
        };

        if !target.is_pure_interface() {
            return Err(reject(format!(
                "declares `{}`, but {} is {} and not a pure interface",
                declared.written,
                target.identity,
                target.kind.with_article()
            )));
        }

        ContractSurface::from_descriptor(target)
    }
}
