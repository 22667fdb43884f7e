use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::bail;
use async_trait::async_trait;
use geo_types::Point;
use milkrun_matrix_providers::{
    as_the_crow_flies::crow_flies_estimate,
    distance_oracle::{DistanceOracle, TravelEstimate},
};

use crate::problem::location::Location;

/// Tianfu Square, the starting point of the Chengdu fixtures.
pub fn chengdu_start() -> Location {
    Location::start(30.6586, 104.0647, "Start Location")
}

/// Deterministic spread of destinations around central Chengdu.
pub fn spread_destinations(count: usize) -> Vec<Location> {
    (0..count)
        .map(|index| {
            let lat = 30.60 + 0.013 * index as f64;
            let lng = 104.00 + 0.017 * ((index * 3) % 7) as f64;
            Location::new(format!("d{index}"), lat, lng, format!("Destination d{index}"))
        })
        .collect()
}

/// Refuses every query, as if the road network were unreachable.
pub struct FailingOracle;

#[async_trait]
impl DistanceOracle for FailingOracle {
    fn max_batch_size(&self) -> usize {
        10
    }

    async fn query(
        &self,
        _origin: Point,
        _destinations: &[Point],
    ) -> anyhow::Result<Vec<TravelEstimate>> {
        bail!("the distance service is unreachable")
    }
}

/// Answers from a fixed symmetric distance table keyed by the position of
/// each point in the location list it was built from. Durations are a tenth
/// of the distance. Unlisted pairs get `default_distance`.
pub struct ScriptedOracle {
    points: Vec<Point>,
    distances: Vec<f64>,
}

impl ScriptedOracle {
    pub fn new(
        locations: &[Location],
        default_distance: f64,
        pairs: &[(usize, usize, f64)],
    ) -> Self {
        let points: Vec<Point> = locations.iter().map(Location::point).collect();
        let n = points.len();

        let mut distances = vec![default_distance; n * n];
        for index in 0..n {
            distances[index * n + index] = 0.0;
        }
        for &(from, to, distance) in pairs {
            distances[from * n + to] = distance;
            distances[to * n + from] = distance;
        }

        ScriptedOracle { points, distances }
    }

    fn index_of(&self, point: Point) -> usize {
        self.points
            .iter()
            .position(|&candidate| candidate == point)
            .unwrap()
    }
}

#[async_trait]
impl DistanceOracle for ScriptedOracle {
    fn max_batch_size(&self) -> usize {
        10
    }

    async fn query(
        &self,
        origin: Point,
        destinations: &[Point],
    ) -> anyhow::Result<Vec<TravelEstimate>> {
        let from = self.index_of(origin);

        Ok(destinations
            .iter()
            .map(|&destination| {
                let distance = self.distances[from * self.points.len() + self.index_of(destination)];
                TravelEstimate {
                    distance_m: distance,
                    duration_s: distance / 10.0,
                }
            })
            .collect())
    }
}

/// Answers with straight-line estimates at its own speed, except for the
/// single call it is told to fail.
pub struct IntermittentOracle {
    speed_kmh: f64,
    failing_call: usize,
    calls: AtomicUsize,
}

impl IntermittentOracle {
    pub fn new(speed_kmh: f64, failing_call: usize) -> Self {
        IntermittentOracle {
            speed_kmh,
            failing_call,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DistanceOracle for IntermittentOracle {
    fn max_batch_size(&self) -> usize {
        10
    }

    async fn query(
        &self,
        origin: Point,
        destinations: &[Point],
    ) -> anyhow::Result<Vec<TravelEstimate>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == self.failing_call {
            bail!("simulated outage on call {call}");
        }

        Ok(destinations
            .iter()
            .map(|&destination| crow_flies_estimate(origin, destination, self.speed_kmh))
            .collect())
    }
}
