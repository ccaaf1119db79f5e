/// TomTom Search API geocoder
///
/// Calls `GET {base_url}/search/2/geocode/{address}.json` with the address
/// URL-encoded into the path. A response with `summary.numResults == 0` maps
/// to `GeocodeError::NoResults`; the first result's `position` supplies the
/// coordinates.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{Coordinates, GeocodeError, Geocoder};

/// Default TomTom API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.tomtom.com";

/// Geocoder backed by the TomTom Search API
#[derive(Debug, Clone)]
pub struct TomTomGeocoder {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    summary: Summary,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct Summary {
    #[serde(rename = "numResults")]
    num_results: u32,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    position: Position,
}

#[derive(Debug, Deserialize)]
struct Position {
    lat: f64,
    lon: f64,
}

impl TomTomGeocoder {
    /// Creates a geocoder with the default base URL
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a geocoder against a custom base URL (used to point tests at
    /// a stub server)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn request_url(&self, address: &str) -> String {
        // The address travels as a path segment, so it must be fully
        // percent-encoded.
        format!(
            "{}/search/2/geocode/{}.json?storeResult=false&view=Unified&key={}",
            self.base_url,
            urlencoding::encode(address),
            self.api_key
        )
    }
}

#[async_trait]
impl Geocoder for TomTomGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let url = self.request_url(address);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GeocodeError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::RequestFailed(format!(
                "upstream returned {}",
                status
            )));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        if body.summary.num_results == 0 {
            return Err(GeocodeError::NoResults);
        }

        let position = &body
            .results
            .first()
            .ok_or_else(|| {
                GeocodeError::InvalidResponse("numResults > 0 but results empty".to_string())
            })?
            .position;

        debug!(lat = position.lat, lon = position.lon, "Geocoded address");

        Ok(Coordinates {
            lat: position.lat,
            lng: position.lon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_encodes_address() {
        let geocoder = TomTomGeocoder::with_base_url("test-key", "https://api.example.com/");
        let url = geocoder.request_url("20 W 34th St, New York");

        assert!(url.starts_with("https://api.example.com/search/2/geocode/20%20W%2034th%20St"));
        assert!(url.ends_with("key=test-key"));
        assert!(!url.contains(' '));
        assert!(!url.contains(','));
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "summary": { "numResults": 1 },
            "results": [ { "position": { "lat": 40.74, "lon": -73.98 } } ]
        }"#;

        let parsed: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.summary.num_results, 1);
        assert_eq!(parsed.results[0].position.lat, 40.74);
    }

    #[test]
    fn test_empty_response_parsing() {
        let json = r#"{ "summary": { "numResults": 0 } }"#;

        let parsed: GeocodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.summary.num_results, 0);
        assert!(parsed.results.is_empty());
    }
}
