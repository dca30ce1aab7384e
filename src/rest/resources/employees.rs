//! Employees of the company.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::rest::{ResourceDescriptor, RestResource};

/// An employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier.
    pub id: u64,
    /// Login identity shared across companies.
    pub access_id: u64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Given and family name.
    pub full_name: String,
    /// Name the employee prefers to be called.
    pub preferred_name: Option<String>,
    /// Name at birth.
    pub birth_name: Option<String>,
    /// Gender as entered in Factorial.
    pub gender: Option<String>,
    /// National identity document number.
    pub identifier: Option<String>,
    /// Kind of identity document, e.g. `dni` or `passport`.
    pub identifier_type: Option<String>,
    /// Work email.
    pub email: Option<String>,
    /// Email used to sign in.
    pub login_email: Option<String>,
    /// Date of birth.
    pub birthday_on: Option<NaiveDate>,
    /// Nationality country code.
    pub nationality: Option<String>,
    /// First address line.
    pub address_line_1: Option<String>,
    /// Second address line.
    pub address_line_2: Option<String>,
    /// Sent as a string by the API.
    pub postal_code: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Country code.
    pub country: Option<String>,
    /// Company the record belongs to.
    pub company_id: u64,
    /// Employing legal entity.
    pub legal_entity_id: Option<u64>,
    /// Office the employee works at.
    pub location_id: Option<u64>,
    /// Direct manager.
    pub manager_id: Option<u64>,
    /// Employee who approves time off.
    pub timeoff_manager_id: Option<u64>,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Company-internal employee number.
    pub company_identifier: Option<String>,
    /// Private email.
    pub personal_email: Option<String>,
    /// Preferred pronouns.
    pub pronouns: Option<String>,
    /// Whether a termination is scheduled.
    #[serde(default)]
    pub is_terminating: bool,
    /// Last working day, once terminated.
    pub terminated_on: Option<NaiveDate>,
    /// Reason given for the termination.
    pub termination_reason: Option<String>,
    /// Whether the employee is currently active.
    pub active: Option<bool>,
    /// When the record was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the record was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for listing employees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeFilters {
    /// Only these employees.
    pub ids: Vec<u64>,
    /// Only these login identities.
    pub access_ids: Vec<u64>,
    /// Only employees with these work emails.
    pub emails: Vec<String>,
    /// Match anywhere in the full name.
    pub full_text_name: Option<String>,
    /// Only employees of these legal entities.
    pub legal_entity_ids: Vec<u64>,
    /// Exclude terminated employees.
    pub only_active: Option<bool>,
    /// Only members of these teams.
    pub team_ids: Vec<u64>,
    /// Only employees at these locations.
    pub location_ids: Vec<u64>,
    /// Only employees who manage someone.
    pub only_managers: Option<bool>,
    /// Match the start of the name.
    pub name_starts_with: Option<String>,
}

impl RestResource for Employee {
    type Id = u64;
    type Filters = EmployeeFilters;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(
        "Employee",
        "employees/employees",
        &[
            "ids",
            "access_ids",
            "emails",
            "full_text_name",
            "legal_entity_ids",
            "only_active",
            "team_ids",
            "location_ids",
            "only_managers",
            "name_starts_with",
        ],
    );
}
