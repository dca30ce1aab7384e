//! Teams and team memberships.

use serde::{Deserialize, Serialize};

use crate::rest::{ResourceDescriptor, RestResource, WritableResource};

/// A team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier.
    pub id: u64,
    /// Team name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Avatar image URL.
    pub avatar: Option<String>,
    /// Members of the team.
    pub employee_ids: Option<Vec<u64>>,
    /// Members who lead the team.
    pub lead_ids: Option<Vec<u64>>,
    /// Company the record belongs to.
    pub company_id: u64,
}

/// Filters for listing teams.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamFilters {
    /// Only these ids.
    pub ids: Vec<u64>,
}

/// Body for creating or updating a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamInput {
    /// Team name.
    pub name: String,
    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RestResource for Team {
    type Id = u64;
    type Filters = TeamFilters;

    const DESCRIPTOR: ResourceDescriptor =
        ResourceDescriptor::new("Team", "teams/teams", &["ids"]).writable();
}

impl WritableResource for Team {
    type Input = TeamInput;
}

/// Membership of one employee in one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Unique identifier.
    pub id: u64,
    /// Company the membership belongs to.
    pub company_id: Option<u64>,
    /// The member.
    pub employee_id: u64,
    /// Team the membership belongs to.
    pub team_id: u64,
    /// Whether the employee leads the team.
    #[serde(default)]
    pub lead: bool,
}

/// Filters for listing memberships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MembershipFilters {
    /// Only these ids.
    pub ids: Vec<u64>,
    /// Only leads, or only non-leads.
    pub lead: Option<bool>,
    /// Only memberships of these teams.
    pub team_ids: Vec<u64>,
    /// Only memberships of these employees.
    pub employee_ids: Vec<u64>,
}

/// Body for creating or updating a membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipInput {
    /// The member.
    pub employee_id: u64,
    /// Team the membership belongs to.
    pub team_id: u64,
    /// Whether the member leads the team.
    pub lead: bool,
}

impl RestResource for Membership {
    type Id = u64;
    type Filters = MembershipFilters;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(
        "Membership",
        "teams/memberships",
        &["ids", "lead", "team_ids", "employee_ids"],
    )
    .writable();
}

impl WritableResource for Membership {
    type Input = MembershipInput;
}
