use milkrun_matrix_providers::travel_matrices::TravelMatrices;

use crate::solver::solution::route_distance;

/// Neighborhood scanning stops after this many full passes without reaching
/// a pass that finds nothing to improve.
pub const MAX_PASSES: usize = 100;

/// Largest number of destinations for which 2-opt refinement is attempted;
/// beyond it the construction order is kept as is.
pub const TWO_OPT_MAX_DESTINATIONS: usize = 8;

/// **Intra-route 2-opt**
///
/// Reverses the segment between two positions (inclusive) whenever doing so
/// shortens the total distance. This eliminates crossing edges.
///
/// An improving reversal is adopted immediately and the scan continues
/// against the updated route; the start stop never moves.
pub fn two_opt_improve(matrices: &TravelMatrices, route: &[usize]) -> Vec<usize> {
    let mut best = route.to_vec();

    if best.len() < 4 {
        return best; // need at least 4 stops to perform 2-opt
    }

    let mut improved = true;
    let mut passes = 0;

    while improved && passes < MAX_PASSES {
        improved = false;
        passes += 1;

        for i in 1..best.len() - 2 {
            for j in (i + 1)..best.len() {
                let mut candidate = best.clone();
                candidate[i..=j].reverse();

                if route_distance(matrices, &candidate) < route_distance(matrices, &best) {
                    best = candidate;
                    improved = true;
                }
            }
        }
    }

    best
}
