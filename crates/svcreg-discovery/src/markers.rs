//! Marker attribute names

use serde::{Deserialize, Serialize};
use svcreg_domain::constants::{CONTRACT_MARKER, ENABLE_MARKER, INJECT_MARKER};
use syn::Attribute;

/// Names of the three marker attributes
///
/// An attribute matches a marker by the last segment of its path, so
/// `#[contract]` and `#[svcreg::contract]` are the same marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSet {
    /// Placed on a trait: "this is a registrable contract"
    pub contract: String,
    /// Placed on a field: "resolve this through the registry"
    pub inject: String,
    /// Placed on the entry point: "scan from here"
    pub enable: String,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            contract: CONTRACT_MARKER.to_string(),
            inject: INJECT_MARKER.to_string(),
            enable: ENABLE_MARKER.to_string(),
        }
    }
}

impl MarkerSet {
    pub fn is_contract(&self, attrs: &[Attribute]) -> bool {
        find(attrs, &self.contract).is_some()
    }

    pub fn is_inject(&self, attrs: &[Attribute]) -> bool {
        find(attrs, &self.inject).is_some()
    }

    pub fn enabling<'a>(&self, attrs: &'a [Attribute]) -> Option<&'a Attribute> {
        find(attrs, &self.enable)
    }
}

fn find<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs
        .iter()
        .find(|attr| attr.path().segments.last().is_some_and(|s| s.ident == name))
}
