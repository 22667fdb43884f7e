use serde::{Deserialize, Serialize};

/// Reserved id of the stop a route leaves from.
pub const START_LOCATION_ID: &str = "start";

/// A named coordinate on a delivery plan.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Location {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

impl Location {
    pub fn new(id: impl Into<String>, lat: f64, lng: f64, address: impl Into<String>) -> Self {
        Location {
            id: id.into(),
            lat,
            lng,
            address: address.into(),
        }
    }

    /// The stop a route leaves from.
    pub fn start(lat: f64, lng: f64, address: impl Into<String>) -> Self {
        Self::new(START_LOCATION_ID, lat, lng, address)
    }

    /// Longitude goes in `x`, latitude in `y`.
    pub fn point(&self) -> geo_types::Point {
        geo_types::Point::new(self.lng, self.lat)
    }
}

impl From<&Location> for geo_types::Point {
    fn from(location: &Location) -> Self {
        location.point()
    }
}
