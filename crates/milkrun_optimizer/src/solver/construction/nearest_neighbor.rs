use milkrun_matrix_providers::travel_matrices::TravelMatrices;

/// Orders all stops greedily by driving distance, starting from stop `0`.
///
/// Returns indexes into the matrices. The start stop is always first, and a
/// tie between unvisited stops goes to the lowest index.
pub fn nearest_neighbor(matrices: &TravelMatrices) -> Vec<usize> {
    let n = matrices.num_stops();
    let mut visited = vec![false; n];
    let mut route = Vec::with_capacity(n);

    let mut current = 0;
    route.push(current);
    visited[current] = true;

    for _ in 1..n {
        let mut nearest = None;
        let mut min_distance = f64::INFINITY;

        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }

            let distance = matrices.distance(current, candidate);
            if distance < min_distance {
                min_distance = distance;
                nearest = Some(candidate);
            }
        }

        if let Some(next) = nearest {
            route.push(next);
            visited[next] = true;
            current = next;
        }
    }

    route
}
