//! Lookup table of every typed resource.
//!
//! The table lets callers reach a resource by name without its model type,
//! e.g. from a command line:
//!
//! ```rust,ignore
//! let rows = client.all_raw("teams/memberships", vec![("lead".into(), "true".into())]).await?;
//! ```

use serde_json::Value;

use crate::clients::RestClient;
use crate::rest::resources::{
    Allowance, CompanyHoliday, Credentials, Employee, LegalEntity, Leave, LeaveType, Location,
    Membership, Shift, Supplement, Team, Training, TrainingCategory, WebhookSubscription,
    WorkArea, WorkedTime,
};
use crate::rest::{ResourceDescriptor, ResourceError, RestResource};

/// Every resource with a typed model.
pub static RESOURCES: &[ResourceDescriptor] = &[
    Credentials::DESCRIPTOR,
    WebhookSubscription::DESCRIPTOR,
    Shift::DESCRIPTOR,
    WorkedTime::DESCRIPTOR,
    LegalEntity::DESCRIPTOR,
    Employee::DESCRIPTOR,
    CompanyHoliday::DESCRIPTOR,
    Location::DESCRIPTOR,
    WorkArea::DESCRIPTOR,
    Supplement::DESCRIPTOR,
    Team::DESCRIPTOR,
    Membership::DESCRIPTOR,
    Allowance::DESCRIPTOR,
    Leave::DESCRIPTOR,
    LeaveType::DESCRIPTOR,
    Training::DESCRIPTOR,
    TrainingCategory::DESCRIPTOR,
];

/// Finds a resource by path (`"teams/teams"`) or model name (`"Team"`).
///
/// Model names match case-insensitively.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static ResourceDescriptor> {
    let name = name.trim().trim_matches('/');
    RESOURCES
        .iter()
        .find(|d| d.path == name || d.name.eq_ignore_ascii_case(name))
}

impl RestClient {
    /// Fetches every page of a resource by name, without decoding items.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidFilters`] for an unknown resource or
    /// a query key the resource does not accept, and
    /// [`ResourceError::Api`] if a request fails.
    pub async fn all_raw(
        &self,
        name: &str,
        query: Vec<(String, String)>,
    ) -> Result<Vec<Value>, ResourceError> {
        let descriptor = lookup(name).ok_or_else(|| ResourceError::InvalidFilters {
            resource: "unknown",
            reason: format!("no resource named `{name}`"),
        })?;
        if let Some((key, _)) = query.iter().find(|(key, _)| !descriptor.accepts(key)) {
            return Err(ResourceError::InvalidFilters {
                resource: descriptor.name,
                reason: format!("unsupported filter `{key}`"),
            });
        }
        Ok(self.all(descriptor.path, query).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lookup_by_path_and_name() {
        assert_eq!(lookup("teams/memberships").unwrap().name, "Membership");
        assert_eq!(lookup("/employees/employees/").unwrap().name, "Employee");
        assert_eq!(lookup("leavetype").unwrap().path, "timeoff/leave_types");
        assert!(lookup("teams/unknown").is_none());
    }

    #[test]
    fn test_registry_paths_and_names_are_unique() {
        let paths: HashSet<_> = RESOURCES.iter().map(|d| d.path).collect();
        let names: HashSet<_> = RESOURCES.iter().map(|d| d.name).collect();
        assert_eq!(paths.len(), RESOURCES.len());
        assert_eq!(names.len(), RESOURCES.len());
    }

    #[test]
    fn test_writable_resources() {
        let writable: Vec<_> = RESOURCES.iter().filter(|d| d.writable).map(|d| d.name).collect();
        assert_eq!(
            writable,
            vec!["WebhookSubscription", "Shift", "Team", "Membership", "Leave"]
        );
    }
}
