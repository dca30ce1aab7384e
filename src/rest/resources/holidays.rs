//! Company holidays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rest::{ResourceDescriptor, RestResource};

/// Which half of the day is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfDay {
    /// The morning is off.
    BeginningOfDay,
    /// The afternoon is off.
    EndOfDay,
}

/// A holiday observed at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyHoliday {
    /// Unique identifier.
    pub id: u64,
    /// Location observing the holiday.
    pub location_id: u64,
    /// Holiday title.
    pub summary: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Day of the holiday.
    pub date: NaiveDate,
    /// Set when only part of the day is off.
    pub half_day: Option<HalfDay>,
}

/// Filters for listing company holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyHolidayFilters {
    /// Only these ids.
    pub ids: Vec<u64>,
    /// Only holidays of these locations.
    pub location_ids: Vec<u64>,
    /// Only holidays on or after this date.
    pub start_on: Option<NaiveDate>,
    /// Only holidays on or before this date.
    pub end_on: Option<NaiveDate>,
}

impl RestResource for CompanyHoliday {
    type Id = u64;
    type Filters = CompanyHolidayFilters;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(
        "CompanyHoliday",
        "holidays/company_holidays",
        &["ids", "location_ids", "start_on", "end_on"],
    );
}
