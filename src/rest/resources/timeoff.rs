//! Time off: leaves, leave types and allowances.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::holidays::HalfDay;
use crate::rest::{ResourceDescriptor, RestResource, WritableResource};

/// A leave taken or requested by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leave {
    /// Unique identifier.
    pub id: u64,
    /// Company the record belongs to.
    pub company_id: u64,
    /// Employee the record belongs to.
    pub employee_id: u64,
    /// First day of the leave.
    pub start_on: NaiveDate,
    /// Last day of the leave, inclusive.
    pub finish_on: Option<NaiveDate>,
    /// Set when only half of the day is affected.
    pub half_day: Option<HalfDay>,
    /// Free-text description.
    pub description: Option<String>,
    /// Reason given by the employee.
    pub reason: Option<String>,
    /// Kind of leave.
    pub leave_type_id: Option<u64>,
    /// Name of the leave type.
    pub leave_type_name: Option<String>,
    /// `None` while pending approval.
    pub approved: Option<bool>,
    /// Full name of the employee.
    pub employee_full_name: Option<String>,
    /// Start time for hourly leaves, `HH:MM`.
    pub start_time: Option<String>,
    /// Hours of an hourly leave, in hundredths.
    pub hours_amount_in_cents: Option<i64>,
    /// When the record was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the record was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for listing leaves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeaveFilters {
    /// Only these leaves.
    pub ids: Vec<u64>,
    /// Only leaves of these employees.
    pub employee_ids: Vec<u64>,
    /// Only leaves of these types.
    pub leave_type_ids: Vec<u64>,
    /// Only leaves ending on or after this date.
    pub from: Option<NaiveDate>,
    /// Only leaves starting on or before this date.
    pub to: Option<NaiveDate>,
    /// Embed the leave type name.
    pub include_leave_type: Option<bool>,
    /// Embed the computed duration.
    pub include_duration: Option<bool>,
}

/// Body for requesting or editing a leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveInput {
    /// Employee taking the leave.
    pub employee_id: u64,
    /// Kind of leave.
    pub leave_type_id: u64,
    /// First day of the leave.
    pub start_on: NaiveDate,
    /// Last day of the leave, inclusive.
    pub finish_on: NaiveDate,
    /// Set when only half of the day is affected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_day: Option<HalfDay>,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RestResource for Leave {
    type Id = u64;
    type Filters = LeaveFilters;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(
        "Leave",
        "timeoff/leaves",
        &[
            "ids",
            "employee_ids",
            "leave_type_ids",
            "from",
            "to",
            "include_leave_type",
            "include_duration",
        ],
    )
    .writable();
}

impl WritableResource for Leave {
    type Input = LeaveInput;
}

/// A kind of leave (vacation, sick leave, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveType {
    /// Unique identifier.
    pub id: u64,
    /// Leave type name.
    pub name: String,
    /// Name in the account's language.
    pub translated_name: Option<String>,
    /// Stable identifier, e.g. `holiday`.
    pub identifier: String,
    /// Calendar color.
    pub color: String,
    /// Whether the type can be requested.
    pub active: Option<bool>,
    /// Whether requests need approval.
    pub approval_required: Option<bool>,
    /// Whether the type consumes an allowance.
    pub accrues: Option<bool>,
    /// Whether a document can be attached.
    #[serde(default)]
    pub attachment: bool,
    /// Whether colleagues can see the leave.
    #[serde(default)]
    pub visibility: bool,
    /// Whether the days count as worked.
    #[serde(default)]
    pub workable: bool,
    /// Whether the leave is paid.
    pub payable: Option<bool>,
    /// Company the record belongs to.
    pub company_id: u64,
    /// Allowances the type draws from.
    #[serde(default)]
    pub allowance_ids: Vec<u64>,
    /// Whether half days can be requested.
    pub half_days_units_enabled: Option<bool>,
    /// Maximum duration of one request, in hundredths of a day.
    pub max_days_in_cents: Option<i64>,
    /// Minimum duration of one request, in hundredths of a day.
    pub min_days_in_cents: Option<i64>,
    /// Free-text description.
    pub description: Option<String>,
}

/// Filters for listing leave types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeaveTypeFilters {
    /// Only these leave types.
    pub ids: Vec<u64>,
}

impl RestResource for LeaveType {
    type Id = u64;
    type Filters = LeaveTypeFilters;

    const DESCRIPTOR: ResourceDescriptor =
        ResourceDescriptor::new("LeaveType", "timeoff/leave_types", &["ids"]);
}

/// Unit an allowance is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceType {
    /// Counted in days.
    Days,
    /// Counted in hours.
    Hours,
}

/// A time-off allowance granted by a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowance {
    /// Unique identifier.
    pub id: u64,
    /// Allowance name.
    pub name: Option<String>,
    /// Unit the allowance is counted in.
    pub allowance_type: AllowanceType,
    /// How units are granted, e.g. `all_days`.
    pub available_days: String,
    /// Time-off policy granting the allowance.
    pub policy_id: Option<u64>,
    /// Days carried into the next cycle.
    pub carry_over_days: Option<i64>,
    /// Start of the allowance cycle.
    pub cycle_start: Option<String>,
    /// Length of the cycle in months.
    pub cycle_length: Option<i64>,
    /// Yearly maximum, in hundredths of a unit.
    pub maximum_amount_in_cents: Option<i64>,
    /// Whether holidays inside a leave are consumed.
    #[serde(default)]
    pub count_holiday_as_workable: bool,
    /// Leave types drawing from the allowance.
    #[serde(default)]
    pub leave_type_ids: Vec<u64>,
}

/// Filters for listing allowances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllowanceFilters {
    /// Only these allowances.
    pub ids: Vec<u64>,
    /// Only allowances of these policies.
    pub policy_ids: Vec<u64>,
}

impl RestResource for Allowance {
    type Id = u64;
    type Filters = AllowanceFilters;

    const DESCRIPTOR: ResourceDescriptor =
        ResourceDescriptor::new("Allowance", "timeoff/allowances", &["ids", "policy_ids"]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_leave_deserializes() {
        let leave: Leave = serde_json::from_value(json!({
            "id": 9,
            "company_id": 1,
            "employee_id": 2,
            "start_on": "2025-08-01",
            "finish_on": "2025-08-15",
            "half_day": null,
            "leave_type_id": 4,
            "approved": true,
            "updated_at": "2025-07-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(leave.finish_on, NaiveDate::from_ymd_opt(2025, 8, 15));
        assert_eq!(leave.approved, Some(true));
        assert!(leave.half_day.is_none());
    }

    #[test]
    fn test_leave_input_serializes_dates() {
        let input = LeaveInput {
            employee_id: 2,
            leave_type_id: 4,
            start_on: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            finish_on: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            half_day: Some(HalfDay::BeginningOfDay),
            description: None,
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "employee_id": 2,
                "leave_type_id": 4,
                "start_on": "2025-08-01",
                "finish_on": "2025-08-01",
                "half_day": "beginning_of_day"
            })
        );
    }

    #[test]
    fn test_allowance_type_parses() {
        let allowance: Allowance = serde_json::from_value(json!({
            "id": 1,
            "allowance_type": "hours",
            "available_days": "all_days"
        }))
        .unwrap();
        assert_eq!(allowance.allowance_type, AllowanceType::Hours);
        assert!(allowance.leave_type_ids.is_empty());
    }
}
