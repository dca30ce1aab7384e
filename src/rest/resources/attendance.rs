//! Attendance: clocked shifts and worked time.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::holidays::HalfDay;
use crate::rest::{ResourceDescriptor, RestResource, WritableResource};

/// Where a shift was worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    /// At the office.
    Office,
    /// Travelling for work.
    BusinessTrip,
    /// Remotely.
    WorkFromHome,
}

/// A clock-in/clock-out record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier.
    pub id: u64,
    /// Employee the record belongs to.
    pub employee_id: u64,
    /// Company the record belongs to.
    pub company_id: u64,
    /// Day the shift was worked.
    pub date: NaiveDate,
    /// Day the shift counts towards, for overnight shifts.
    pub reference_date: Option<NaiveDate>,
    /// Clock-in time.
    pub clock_in: Option<NaiveTime>,
    /// Clock-out time.
    pub clock_out: Option<NaiveTime>,
    /// How the clock-in was recorded.
    pub in_source: Option<String>,
    /// How the clock-out was recorded.
    pub out_source: Option<String>,
    /// Free-text notes.
    pub observations: Option<String>,
    /// Where the shift was worked.
    pub location_type: Option<LocationType>,
    /// Set when only half of the day is affected.
    pub half_day: Option<HalfDay>,
    /// Latitude at clock-in.
    pub in_location_latitude: Option<f64>,
    /// Longitude at clock-in.
    pub in_location_longitude: Option<f64>,
    /// Latitude at clock-out.
    pub out_location_latitude: Option<f64>,
    /// Longitude at clock-out.
    pub out_location_longitude: Option<f64>,
    /// Whether the time counts as worked.
    pub workable: Option<bool>,
    /// Location where the shift was worked.
    pub workplace_id: Option<u64>,
    /// Length of the shift in minutes.
    #[serde(default)]
    pub minutes: i64,
    /// When the record was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the record was last updated, as sent by the API.
    pub updated_at: Option<String>,
}

/// Filters for listing shifts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShiftFilters {
    /// Only these ids.
    pub ids: Vec<u64>,
    /// Only records of these employees.
    pub employee_ids: Vec<u64>,
    /// Only records on or after this date.
    pub start_on: Option<NaiveDate>,
    /// Only records on or before this date.
    pub end_on: Option<NaiveDate>,
    /// Only workable, or only non-workable, shifts.
    pub workable: Option<bool>,
    /// Only the latest shift of each employee.
    pub latest_shift: Option<bool>,
    /// Only the last workable shift of each employee.
    pub last_working_shift: Option<bool>,
}

/// Body for creating or editing a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftInput {
    /// Employee who worked the shift.
    pub employee_id: u64,
    /// Day the shift was worked.
    pub date: NaiveDate,
    /// Clock-in time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_in: Option<NaiveTime>,
    /// Clock-out time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_out: Option<NaiveTime>,
    /// Free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    /// Where the shift was worked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
}

impl RestResource for Shift {
    type Id = u64;
    type Filters = ShiftFilters;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(
        "Shift",
        "attendance/shifts",
        &[
            "ids",
            "employee_ids",
            "start_on",
            "end_on",
            "workable",
            "latest_shift",
            "last_working_shift",
        ],
    )
    .writable();
}

impl WritableResource for Shift {
    type Input = ShiftInput;
}

/// Kind of day a worked-time record covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// A Saturday.
    Saturday,
    /// A Sunday.
    Sunday,
    /// A public holiday.
    BankHoliday,
    /// A regular working day.
    Workday,
}

/// Worked time of one employee on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkedTime {
    /// Composite identifier, e.g. `"12_2025-01-31"`.
    pub id: String,
    /// Employee the record belongs to.
    pub employee_id: u64,
    /// Company the record belongs to.
    pub company_id: u64,
    /// Day the record covers.
    pub date: NaiveDate,
    /// Minutes clocked in.
    pub tracked_minutes: i64,
    /// Tracked minutes after overtime multipliers.
    pub multiplied_minutes: i64,
    /// Minutes awaiting approval.
    pub pending_minutes: i64,
    /// Minutes that count towards the schedule.
    pub minutes: i64,
    /// Unit the day is planned in.
    pub time_unit: Option<String>,
    /// Kind of day.
    pub day_type: DayType,
    /// Raw time blocks of the day.
    #[serde(default)]
    pub worked_time_blocks: Vec<serde_json::Value>,
}

/// Filters for listing worked time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkedTimeFilters {
    /// Embed the category of each time range.
    pub include_time_range_category: Option<bool>,
    /// Include employees without attendance tracking.
    pub include_non_attendable_employees: Option<bool>,
    /// First day to include.
    pub start_on: Option<NaiveDate>,
    /// Last day to include.
    pub end_on: Option<NaiveDate>,
    /// Only these employees.
    pub employee_ids: Vec<u64>,
}

impl RestResource for WorkedTime {
    type Id = String;
    type Filters = WorkedTimeFilters;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(
        "WorkedTime",
        "attendance/worked_times",
        &[
            "include_time_range_category",
            "include_non_attendable_employees",
            "start_on",
            "end_on",
            "employee_ids",
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shift_parses_clock_times() {
        let shift: Shift = serde_json::from_value(json!({
            "id": 1,
            "employee_id": 2,
            "company_id": 3,
            "date": "2025-03-03",
            "clock_in": "09:00:00",
            "clock_out": "17:30:00",
            "location_type": "work_from_home",
            "minutes": 510
        }))
        .unwrap();
        assert_eq!(shift.clock_in, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(shift.location_type, Some(LocationType::WorkFromHome));
        assert_eq!(shift.minutes, 510);
    }

    #[test]
    fn test_worked_time_has_string_id() {
        let worked: WorkedTime = serde_json::from_value(json!({
            "id": "2_2025-03-03",
            "employee_id": 2,
            "company_id": 3,
            "date": "2025-03-03",
            "tracked_minutes": 480,
            "multiplied_minutes": 480,
            "pending_minutes": 0,
            "minutes": 480,
            "time_unit": "minute",
            "day_type": "bank_holiday"
        }))
        .unwrap();
        assert_eq!(worked.id, "2_2025-03-03");
        assert_eq!(worked.day_type, DayType::BankHoliday);
    }
}
