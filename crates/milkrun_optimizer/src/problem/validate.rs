use thiserror::Error;

use crate::problem::location::Location;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("at least one destination is required")]
    EmptyDestinations,

    #[error("invalid coordinates for {id}: ({lat}, {lng})")]
    InvalidCoordinates { id: String, lat: f64, lng: f64 },
}

/// Checks a plan before any travel estimates are fetched.
pub fn validate_plan(start: &Location, destinations: &[Location]) -> Result<(), ValidationError> {
    if destinations.is_empty() {
        return Err(ValidationError::EmptyDestinations);
    }

    for location in std::iter::once(start).chain(destinations) {
        if !is_valid_coordinate(location.lat, location.lng) {
            return Err(ValidationError::InvalidCoordinates {
                id: location.id.clone(),
                lat: location.lat,
                lng: location.lng,
            });
        }
    }

    Ok(())
}

fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng)
}
