use async_trait::async_trait;
use geo::{Distance, Haversine};

use crate::distance_oracle::{DistanceOracle, TravelEstimate};

/// Average driving speed assumed for straight-line duration estimates.
pub const FALLBACK_SPEED_KMH: f64 = 30.0;

/// Straight-line estimate between two points: haversine distance, and a
/// duration at a constant average speed rounded to whole seconds.
pub fn crow_flies_estimate(
    from: geo_types::Point,
    to: geo_types::Point,
    speed_kmh: f64,
) -> TravelEstimate {
    let haversine = Haversine;
    let distance_m = haversine.distance(from, to);
    let duration_s = (distance_m / 1000.0 / speed_kmh * 3600.0).round();

    TravelEstimate {
        distance_m,
        duration_s,
    }
}

/// Oracle that never leaves the process. Used directly when no provider is
/// configured, and as the estimate of last resort when one fails.
#[derive(Debug, Clone, Copy)]
pub struct AsTheCrowFlies {
    pub speed_kmh: f64,
}

impl Default for AsTheCrowFlies {
    fn default() -> Self {
        AsTheCrowFlies {
            speed_kmh: FALLBACK_SPEED_KMH,
        }
    }
}

#[async_trait]
impl DistanceOracle for AsTheCrowFlies {
    fn max_batch_size(&self) -> usize {
        usize::MAX
    }

    async fn query(
        &self,
        origin: geo_types::Point,
        destinations: &[geo_types::Point],
    ) -> anyhow::Result<Vec<TravelEstimate>> {
        Ok(destinations
            .iter()
            .map(|destination| crow_flies_estimate(origin, *destination, self.speed_kmh))
            .collect())
    }
}
