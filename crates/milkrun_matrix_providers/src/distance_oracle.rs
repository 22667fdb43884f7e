use async_trait::async_trait;

/// One origin-to-destination driving estimate returned by a provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelEstimate {
    /// Driving distance in meters.
    pub distance_m: f64,
    /// Driving duration in seconds.
    pub duration_s: f64,
}

/// A provider answering one-origin-to-many-destinations distance queries.
///
/// Providers may cap how many destinations a single query can carry; callers
/// split larger requests into batches of at most
/// [`max_batch_size`](DistanceOracle::max_batch_size) destinations.
#[async_trait]
pub trait DistanceOracle: Send + Sync {
    fn max_batch_size(&self) -> usize;

    /// One estimate per destination, in destination order.
    async fn query(
        &self,
        origin: geo_types::Point,
        destinations: &[geo_types::Point],
    ) -> anyhow::Result<Vec<TravelEstimate>>;
}
