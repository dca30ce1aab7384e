//! Trainings and training categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rest::{ResourceDescriptor, RestResource};

/// Publication state of a training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    /// Not yet published.
    Draft,
    /// Open for enrolment.
    Active,
    /// Removed.
    Deleted,
}

/// A training course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Training {
    /// Unique identifier.
    pub id: u64,
    /// Company the record belongs to.
    pub company_id: u64,
    /// Employee who created the training.
    pub author_id: u64,
    /// Course name.
    pub name: String,
    /// Internal course code.
    pub code: Option<String>,
    /// Course description.
    #[serde(default)]
    pub description: String,
    /// Provider running the course.
    pub external_provider: Option<String>,
    /// Whether an outside provider runs it.
    #[serde(default)]
    pub external: bool,
    /// Whether the cost is subsidized.
    #[serde(default)]
    pub subsidized: bool,
    /// Cost per attendee in cents.
    pub cost: Option<i64>,
    /// Total cost in cents.
    pub total_cost: Option<i64>,
    /// Categories the training belongs to.
    pub category_ids: Option<Vec<u64>>,
    /// Publication state.
    pub status: Option<TrainingStatus>,
    /// When the record was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the record was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for listing trainings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrainingFilters {
    /// Only these trainings.
    pub ids: Vec<u64>,
    /// Only trainings in these categories.
    pub category_ids: Vec<u64>,
    /// Only trainings in this state.
    pub status: Option<TrainingStatus>,
}

impl RestResource for Training {
    type Id = u64;
    type Filters = TrainingFilters;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor::new(
        "Training",
        "trainings/trainings",
        &["ids", "category_ids", "status"],
    );
}

/// A category grouping trainings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingCategory {
    /// Unique identifier.
    pub id: u64,
    /// Category name.
    pub name: String,
    /// Company the record belongs to.
    pub company_id: u64,
    /// When the record was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the record was last updated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl RestResource for TrainingCategory {
    type Id = u64;
    type Filters = ();

    const DESCRIPTOR: ResourceDescriptor =
        ResourceDescriptor::new("TrainingCategory", "trainings/categories", &[]);
}
