use serde::{Deserialize, Serialize};

/// TravelMatrices holds driving distances (meters) and durations (seconds)
/// between every pair of stops.
///
/// Both matrices are stored as flat vectors. To find the index for a pair of
/// stops, use the formula: `index = from * num_stops + to`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TravelMatrices {
    distances: Vec<f64>,
    durations: Vec<f64>,
    num_stops: usize,
}

fn is_flat_matrix_symmetric(matrix: &[f64], num_stops: usize) -> bool {
    for i in 0..num_stops {
        for j in 0..num_stops {
            if matrix[i * num_stops + j] != matrix[j * num_stops + i] {
                return false;
            }
        }
    }
    true
}

impl TravelMatrices {
    pub fn zeroed(num_stops: usize) -> Self {
        TravelMatrices {
            distances: vec![0.0; num_stops * num_stops],
            durations: vec![0.0; num_stops * num_stops],
            num_stops,
        }
    }

    #[inline(always)]
    fn index(&self, from: usize, to: usize) -> usize {
        from * self.num_stops + to
    }

    /// Driving distance in meters from one stop to another.
    #[inline(always)]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[self.index(from, to)]
    }

    /// Driving duration in seconds from one stop to another.
    #[inline(always)]
    pub fn duration(&self, from: usize, to: usize) -> f64 {
        self.durations[self.index(from, to)]
    }

    /// Records one estimate in both directions.
    pub fn set_symmetric(&mut self, from: usize, to: usize, distance: f64, duration: f64) {
        let forward = self.index(from, to);
        let backward = self.index(to, from);
        self.distances[forward] = distance;
        self.distances[backward] = distance;
        self.durations[forward] = duration;
        self.durations[backward] = duration;
    }

    pub fn num_stops(&self) -> usize {
        self.num_stops
    }

    pub fn is_symmetric(&self) -> bool {
        is_flat_matrix_symmetric(&self.distances, self.num_stops)
            && is_flat_matrix_symmetric(&self.durations, self.num_stops)
    }
}
