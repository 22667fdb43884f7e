use tracing::{debug, warn};

use crate::{
    as_the_crow_flies::{FALLBACK_SPEED_KMH, crow_flies_estimate},
    distance_oracle::DistanceOracle,
    travel_matrices::TravelMatrices,
};

/// Builds complete distance and duration matrices for `points`.
///
/// Pairs are fetched row by row over the upper triangle, in batches no larger
/// than the oracle allows, and every estimate is written in both directions.
/// A failed batch is replaced by straight-line estimates instead of failing
/// the build, so the returned matrices are always complete.
pub async fn build_travel_matrices(
    oracle: &dyn DistanceOracle,
    points: &[geo_types::Point],
) -> TravelMatrices {
    let n = points.len();
    let mut matrices = TravelMatrices::zeroed(n);

    // a zero-sized batch would never make progress
    let batch_size = oracle.max_batch_size().max(1);

    for (i, &origin) in points.iter().enumerate() {
        let mut j = i + 1;
        while j < n {
            let end = j.saturating_add(batch_size).min(n);
            let batch = &points[j..end];

            match oracle.query(origin, batch).await {
                Ok(estimates) if estimates.len() == batch.len() => {
                    for (offset, estimate) in estimates.iter().enumerate() {
                        matrices.set_symmetric(
                            i,
                            j + offset,
                            estimate.distance_m,
                            estimate.duration_s,
                        );
                    }
                }
                Ok(estimates) => {
                    warn!(
                        "distance query returned {} estimates for {} destinations, using straight-line estimates",
                        estimates.len(),
                        batch.len()
                    );
                    estimate_as_the_crow_flies(&mut matrices, i, j, origin, batch);
                }
                Err(error) => {
                    warn!(
                        "distance query failed, using straight-line estimates: {}",
                        error
                    );
                    estimate_as_the_crow_flies(&mut matrices, i, j, origin, batch);
                }
            }

            j = end;
        }
    }

    debug!("built travel matrices for {} stops", n);

    matrices
}

fn estimate_as_the_crow_flies(
    matrices: &mut TravelMatrices,
    from: usize,
    first_to: usize,
    origin: geo_types::Point,
    batch: &[geo_types::Point],
) {
    for (offset, destination) in batch.iter().enumerate() {
        let estimate = crow_flies_estimate(origin, *destination, FALLBACK_SPEED_KMH);
        matrices.set_symmetric(
            from,
            first_to + offset,
            estimate.distance_m,
            estimate.duration_s,
        );
    }
}
