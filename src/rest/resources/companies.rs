//! Legal entities of the company.

use serde::{Deserialize, Serialize};

use crate::rest::{ResourceDescriptor, RestResource};

/// A legal entity (employer of record) of the company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalEntity {
    /// Unique identifier.
    pub id: u64,
    /// Company the record belongs to.
    pub company_id: u64,
    /// Country code.
    pub country: String,
    /// Registered legal name.
    pub legal_name: String,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Tax identification number.
    pub tin: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Postal code, sent as a string.
    pub postal_code: Option<String>,
    /// First address line.
    pub address_line_1: Option<String>,
    /// Second address line.
    pub address_line_2: Option<String>,
}

/// Filters for listing legal entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LegalEntityFilters {
    /// Only these ids.
    pub ids: Vec<u64>,
}

impl RestResource for LegalEntity {
    type Id = u64;
    type Filters = LegalEntityFilters;

    const DESCRIPTOR: ResourceDescriptor =
        ResourceDescriptor::new("LegalEntity", "companies/legal_entities", &["ids"]);
}
