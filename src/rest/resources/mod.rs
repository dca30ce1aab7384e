//! Typed Factorial resources.
//!
//! Each submodule mirrors one area of the API. Models keep the fields most
//! callers need; unknown fields in responses are ignored.
//!
//! ```rust,ignore
//! use factorialhr::rest::resources::{Team, TeamFilters};
//! use factorialhr::rest::RestResource;
//!
//! let teams = Team::all(&client, &TeamFilters::default()).await?;
//! ```

pub mod api_public;
pub mod attendance;
pub mod companies;
pub mod employees;
pub mod holidays;
pub mod locations;
pub mod payroll;
pub mod teams;
pub mod timeoff;
pub mod trainings;

pub use api_public::{Credentials, WebhookSubscription, WebhookSubscriptionInput};
pub use attendance::{DayType, LocationType, Shift, ShiftFilters, ShiftInput, WorkedTime, WorkedTimeFilters};
pub use companies::{LegalEntity, LegalEntityFilters};
pub use employees::{Employee, EmployeeFilters};
pub use holidays::{CompanyHoliday, CompanyHolidayFilters, HalfDay};
pub use locations::{Location, LocationFilters, WorkArea, WorkAreaFilters};
pub use payroll::{Supplement, SupplementFilters, SupplementUnit};
pub use teams::{Membership, MembershipFilters, MembershipInput, Team, TeamFilters, TeamInput};
pub use timeoff::{
    Allowance, AllowanceFilters, AllowanceType, Leave, LeaveFilters, LeaveInput, LeaveType,
    LeaveTypeFilters,
};
pub use trainings::{Training, TrainingCategory, TrainingFilters, TrainingStatus};
