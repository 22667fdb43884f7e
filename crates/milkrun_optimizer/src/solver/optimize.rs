use milkrun_matrix_providers::{
    distance_oracle::DistanceOracle, matrix_builder::build_travel_matrices,
};
use tracing::debug;

use crate::{
    problem::{
        location::Location,
        validate::{ValidationError, validate_plan},
    },
    solver::{
        construction::nearest_neighbor::nearest_neighbor,
        ls::two_opt::{TWO_OPT_MAX_DESTINATIONS, two_opt_improve},
        solution::{OptimizedRoute, assemble},
    },
};

/// **Single-vehicle route optimization**
///
/// Builds travel matrices for the start and destinations, orders the stops
/// with nearest-neighbor construction and, for small plans, refines the
/// order with 2-opt.
///
/// The returned route always begins at the start location and visits every
/// destination exactly once. Oracle failures never fail the optimization;
/// the affected legs are estimated as the crow flies.
pub async fn optimize(
    oracle: &dyn DistanceOracle,
    start: &Location,
    destinations: &[Location],
) -> Result<OptimizedRoute, ValidationError> {
    validate_plan(start, destinations)?;

    let locations: Vec<Location> = std::iter::once(start.clone())
        .chain(destinations.iter().cloned())
        .collect();
    let points: Vec<geo_types::Point> = locations.iter().map(Location::point).collect();

    let matrices = build_travel_matrices(oracle, &points).await;

    let mut route = nearest_neighbor(&matrices);

    if destinations.len() <= TWO_OPT_MAX_DESTINATIONS {
        debug!("refining {} stops with 2-opt", route.len());
        route = two_opt_improve(&matrices, &route);
    } else {
        debug!(
            "skipping 2-opt for {} destinations (limit is {})",
            destinations.len(),
            TWO_OPT_MAX_DESTINATIONS
        );
    }

    Ok(assemble(&locations, &route, &matrices))
}
