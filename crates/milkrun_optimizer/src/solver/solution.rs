use milkrun_matrix_providers::travel_matrices::TravelMatrices;
use serde::Serialize;

use crate::problem::location::Location;

/// Total driving distance in meters along `route`, leg by leg.
pub fn route_distance(matrices: &TravelMatrices, route: &[usize]) -> f64 {
    route
        .windows(2)
        .map(|leg| matrices.distance(leg[0], leg[1]))
        .sum()
}

/// Total driving duration in seconds along `route`, leg by leg.
pub fn route_duration(matrices: &TravelMatrices, route: &[usize]) -> f64 {
    route
        .windows(2)
        .map(|leg| matrices.duration(leg[0], leg[1]))
        .sum()
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizedRoute {
    /// Stops in visiting order, starting with the start location.
    pub stops: Vec<Location>,

    /// Total driving distance in meters, equal to the sum of `distances`.
    pub total_distance: f64,

    /// Total driving duration in seconds, equal to the sum of `durations`.
    pub total_duration: f64,

    /// Distance in meters of each leg, `distances[i]` being the leg from
    /// `stops[i]` to `stops[i + 1]`.
    pub distances: Vec<f64>,

    /// Duration in seconds of each leg, indexed like `distances`.
    pub durations: Vec<f64>,
}

/// Resolves a visiting order back into locations and per-leg costs.
pub fn assemble(
    locations: &[Location],
    route: &[usize],
    matrices: &TravelMatrices,
) -> OptimizedRoute {
    let stops = route.iter().map(|&index| locations[index].clone()).collect();

    let distances = route
        .windows(2)
        .map(|leg| matrices.distance(leg[0], leg[1]))
        .collect();

    let durations = route
        .windows(2)
        .map(|leg| matrices.duration(leg[0], leg[1]))
        .collect();

    OptimizedRoute {
        stops,
        total_distance: route_distance(matrices, route),
        total_duration: route_duration(matrices, route),
        distances,
        durations,
    }
}
