//! Payroll supplements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rest::{ResourceDescriptor, RestResource};

/// What a supplement amount is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplementUnit {
    /// An amount of money.
    Money,
    /// A count of units.
    Units,
    /// An amount of time.
    Time,
}

/// A one-off payroll supplement for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplement {
    /// Unique identifier.
    pub id: u64,
    /// Employee the record belongs to.
    pub employee_id: u64,
    /// Company the record belongs to.
    pub company_id: u64,
    /// Compensation the supplement belongs to.
    pub contracts_compensation_id: Option<u64>,
    /// Payroll concept the supplement is booked under.
    pub contracts_taxonomy_id: Option<u64>,
    /// Amount in hundredths of the unit.
    pub amount_in_cents: Option<i64>,
    /// Unit of the amount.
    pub unit: SupplementUnit,
    /// Payroll date the supplement applies to.
    pub effective_on: Option<NaiveDate>,
    /// Free-text description.
    pub description: Option<String>,
}

/// Filters for listing supplements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SupplementFilters {
    /// Only these supplements.
    pub ids: Vec<u64>,
    /// Only supplements of these employees.
    pub employee_ids: Vec<u64>,
    /// Only supplements effective on or after this date.
    pub start_date: Option<NaiveDate>,
    /// Only supplements effective on or before this date.
    pub end_date: Option<NaiveDate>,
}

impl RestResource for Supplement {
    type Id = u64;
    type Filters = SupplementFilters;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(
        "Supplement",
        "payroll/supplements",
        &["ids", "employee_ids", "start_date", "end_date"],
    );
}
