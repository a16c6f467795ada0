//! Provider block schema
//!
//! Declares the three optional attributes of the provider block. The token is
//! sensitive: hosts must never echo it in plans or diagnostics, and it has no
//! default value to leak.

use serde::Serialize;
use std::collections::BTreeMap;

use leaseweb_provider_config::{
    HOST_ATTRIBUTE, HOST_ENV, SCHEME_ATTRIBUTE, SCHEME_ENV, TOKEN_ATTRIBUTE, TOKEN_ENV,
};

use crate::client::{DEFAULT_HOST, DEFAULT_SCHEME};

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
}

/// Declaration of a single attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub optional: bool,
    pub sensitive: bool,
    pub description: String,
}

impl Attribute {
    fn optional_string(description: String) -> Self {
        Self {
            attribute_type: AttributeType::String,
            optional: true,
            sensitive: false,
            description,
        }
    }

    fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Declarative attribute map of the provider block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSchema {
    pub attributes: BTreeMap<&'static str, Attribute>,
}

impl ProviderSchema {
    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Names of the attributes flagged sensitive
    pub fn sensitive_attributes(&self) -> Vec<&'static str> {
        self.attributes
            .iter()
            .filter(|(_, attribute)| attribute.sensitive)
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Build the provider block schema
pub fn provider_schema() -> ProviderSchema {
    let mut attributes = BTreeMap::new();
    attributes.insert(
        HOST_ATTRIBUTE,
        Attribute::optional_string(format!(
            "Host for Leaseweb API, defaults to \"{DEFAULT_HOST}\". May also be provided via \
             {HOST_ENV} environment variable if present."
        )),
    );
    attributes.insert(
        SCHEME_ATTRIBUTE,
        Attribute::optional_string(format!(
            "Scheme for Leaseweb API, defaults to \"{DEFAULT_SCHEME}\". May also be provided via \
             {SCHEME_ENV} environment variable if present."
        )),
    );
    attributes.insert(
        TOKEN_ATTRIBUTE,
        Attribute::optional_string(format!(
            "The API token to use. By default it takes the value from the {TOKEN_ENV} \
             environment variable if present."
        ))
        .sensitive(),
    );
    ProviderSchema { attributes }
}
