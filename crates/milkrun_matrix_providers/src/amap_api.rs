use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use thiserror::Error;
use tracing::debug;

use crate::distance_oracle::{DistanceOracle, TravelEstimate};

pub const AMAP_DISTANCE_API_URL: &str = "https://restapi.amap.com/v3/distance";

/// Largest number of destinations the distance endpoint accepts per request.
pub const AMAP_MAX_BATCH: usize = 10;

const AMAP_API_KEY_ENV_VAR: &str = "AMAP_API_KEY";

/// Result type `1` asks for driving distance.
const DRIVING: u8 = 1;

#[derive(Debug, Error)]
pub enum AmapError {
    #[error("AMAP_API_KEY is not configured")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    #[error("API error: status {status} - {info}")]
    Api { status: String, info: String },

    #[error("too many destinations in one query: {got} (max {max})")]
    TooManyDestinations { got: usize, max: usize },

    #[error("expected {expected} results, got {got}")]
    MismatchedResults { expected: usize, got: usize },
}

#[derive(Debug, Clone, Serialize)]
struct DistanceRequest<'a> {
    key: &'a str,

    /// Single `lng,lat` pair the distances are measured from.
    origins: String,

    /// Batch of `lng,lat` pairs separated by `|`.
    destination: String,

    #[serde(rename = "type")]
    mode: u8,
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct DistanceResult {
    /// Driving distance in meters, returned as a numeric string.
    #[serde_as(as = "DisplayFromStr")]
    distance: f64,

    /// Driving duration in seconds, returned as a numeric string.
    #[serde_as(as = "DisplayFromStr")]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct DistanceResponse {
    status: String,

    #[serde(default)]
    info: String,

    #[serde(default)]
    results: Vec<DistanceResult>,
}

impl DistanceResponse {
    fn into_estimates(self, expected: usize) -> Result<Vec<TravelEstimate>, AmapError> {
        if self.status != "1" {
            return Err(AmapError::Api {
                status: self.status,
                info: self.info,
            });
        }

        if self.results.len() != expected {
            return Err(AmapError::MismatchedResults {
                expected,
                got: self.results.len(),
            });
        }

        Ok(self
            .results
            .into_iter()
            .map(|result| TravelEstimate {
                distance_m: result.distance,
                duration_s: result.duration,
            })
            .collect())
    }
}

fn format_point(point: &geo_types::Point) -> String {
    format!("{},{}", point.x(), point.y())
}

pub struct AmapDistanceClient {
    api_key: String,
    client: reqwest::Client,
}

impl AmapDistanceClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Reads the API key from `AMAP_API_KEY`. An absent or empty key fails
    /// here, before any query is attempted.
    pub fn from_env() -> Result<Self, AmapError> {
        match std::env::var(AMAP_API_KEY_ENV_VAR) {
            Ok(api_key) if !api_key.is_empty() => Ok(Self::new(api_key)),
            _ => Err(AmapError::MissingApiKey),
        }
    }

    pub async fn fetch_estimates(
        &self,
        origin: geo_types::Point,
        destinations: &[geo_types::Point],
    ) -> Result<Vec<TravelEstimate>, AmapError> {
        if destinations.len() > AMAP_MAX_BATCH {
            return Err(AmapError::TooManyDestinations {
                got: destinations.len(),
                max: AMAP_MAX_BATCH,
            });
        }

        let request = DistanceRequest {
            key: &self.api_key,
            origins: format_point(&origin),
            destination: destinations
                .iter()
                .map(format_point)
                .collect::<Vec<_>>()
                .join("|"),
            mode: DRIVING,
        };

        debug!("AmapApi: fetching {} estimates", destinations.len());

        let response = self
            .client
            .get(AMAP_DISTANCE_API_URL)
            .query(&request)
            .send()
            .await?;

        let body = self.handle_response(response).await?;

        body.into_estimates(destinations.len())
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<DistanceResponse, AmapError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(AmapError::Http { status, message })
        }
    }
}

#[async_trait::async_trait]
impl DistanceOracle for AmapDistanceClient {
    fn max_batch_size(&self) -> usize {
        AMAP_MAX_BATCH
    }

    async fn query(
        &self,
        origin: geo_types::Point,
        destinations: &[geo_types::Point],
    ) -> anyhow::Result<Vec<TravelEstimate>> {
        Ok(self.fetch_estimates(origin, destinations).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_numeric_strings() {
        let body: DistanceResponse = serde_json::from_str(
            r#"{"status":"1","info":"OK","results":[{"distance":"1000","duration":"360"},{"distance":"2500","duration":"900"}]}"#,
        )
        .unwrap();

        let estimates = body.into_estimates(2).unwrap();

        assert_eq!(estimates[0].distance_m, 1000.0);
        assert_eq!(estimates[0].duration_s, 360.0);
        assert_eq!(estimates[1].distance_m, 2500.0);
        assert_eq!(estimates[1].duration_s, 900.0);
    }

    #[test]
    fn test_non_ok_status_is_an_api_error() {
        let body: DistanceResponse =
            serde_json::from_str(r#"{"status":"0","info":"INVALID_USER_KEY","infocode":"10001"}"#)
                .unwrap();

        let err = body.into_estimates(1).unwrap_err();

        assert!(matches!(
            err,
            AmapError::Api { ref status, ref info } if status == "0" && info == "INVALID_USER_KEY"
        ));
    }

    #[test]
    fn test_short_result_list_is_an_error() {
        let body: DistanceResponse = serde_json::from_str(
            r#"{"status":"1","info":"OK","results":[{"distance":"1000","duration":"360"}]}"#,
        )
        .unwrap();

        let err = body.into_estimates(3).unwrap_err();

        assert!(matches!(
            err,
            AmapError::MismatchedResults {
                expected: 3,
                got: 1
            }
        ));
    }

    #[test]
    fn test_request_puts_longitude_first() {
        // AMap expects `lng,lat`; Point stores longitude in x.
        let chengdu = geo_types::Point::new(104.0647, 30.6586);
        assert_eq!(format_point(&chengdu), "104.0647,30.6586");
    }

    #[test]
    fn test_request_query_parameters() {
        let request = DistanceRequest {
            key: "secret",
            origins: "104.0647,30.6586".to_string(),
            destination: "104.0633,30.6398|104.0431,30.6722".to_string(),
            mode: DRIVING,
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["key"], "secret");
        assert_eq!(value["origins"], "104.0647,30.6586");
        assert_eq!(value["destination"], "104.0633,30.6398|104.0431,30.6722");
        assert_eq!(value["type"], 1);
    }

    #[tokio::test]
    async fn test_fetch_rejects_oversized_batches() {
        // fails before anything goes on the wire
        let client = AmapDistanceClient::new("secret");
        let points = vec![geo_types::Point::new(104.0, 30.0); AMAP_MAX_BATCH + 1];

        let err = client
            .fetch_estimates(geo_types::Point::new(104.1, 30.1), &points)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AmapError::TooManyDestinations { got: 11, max: 10 }
        ));
    }
}
