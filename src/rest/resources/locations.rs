//! Company locations and their work areas.

use serde::{Deserialize, Serialize};

use crate::rest::{ResourceDescriptor, RestResource};

/// An office or other place of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier.
    pub id: u64,
    /// Company the record belongs to.
    pub company_id: u64,
    /// Location name.
    pub name: String,
    /// IANA time zone, e.g. `Europe/Madrid`.
    pub timezone: Option<String>,
    /// Country code.
    pub country: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// City.
    pub city: Option<String>,
    /// First address line.
    pub address_line_1: Option<String>,
    /// Second address line.
    pub address_line_2: Option<String>,
    /// Postal code, sent as a string.
    pub postal_code: Option<String>,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Whether this is the company headquarters.
    #[serde(default)]
    pub main: bool,
    /// Latitude for clock-in geofencing.
    pub latitude: Option<f64>,
    /// Longitude for clock-in geofencing.
    pub longitude: Option<f64>,
    /// Geofence radius in meters.
    pub radius: Option<f64>,
    /// French establishments only.
    pub siret: Option<String>,
}

/// Filters for listing locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationFilters {
    /// Only these ids.
    pub ids: Vec<u64>,
}

impl RestResource for Location {
    type Id = u64;
    type Filters = LocationFilters;

    const DESCRIPTOR: ResourceDescriptor =
        ResourceDescriptor::new("Location", "locations/locations", &["ids"]);
}

/// An area inside a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkArea {
    /// Unique identifier.
    pub id: u64,
    /// Location the area is part of.
    pub location_id: u64,
    /// Area name.
    pub name: String,
    /// When the area was archived, if it was.
    pub archived_at: Option<String>,
}

/// Filters for listing work areas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkAreaFilters {
    /// Only these ids.
    pub ids: Vec<u64>,
    /// Only areas of these locations.
    pub location_ids: Vec<u64>,
}

impl RestResource for WorkArea {
    type Id = u64;
    type Filters = WorkAreaFilters;

    const DESCRIPTOR: ResourceDescriptor =
        ResourceDescriptor::new("WorkArea", "locations/work_areas", &["ids", "location_ids"]);
}
