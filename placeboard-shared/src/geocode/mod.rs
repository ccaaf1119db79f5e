/// Geocoding collaborator
///
/// Place creation receives a postal address from the client; the coordinates
/// stored alongside it come from an external geocoding service. The service
/// sits behind the `Geocoder` trait so handlers and tests do not care which
/// implementation answers:
///
/// - `TomTomGeocoder`: production implementation against the TomTom Search
///   API
/// - `FixedGeocoder`: canned coordinates for tests and demos
///
/// # Example
///
/// ```no_run
/// use placeboard_shared::geocode::{FixedGeocoder, Geocoder};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let geocoder = FixedGeocoder::new(40.748_441_7, -73.985_664_0);
/// let coords = geocoder.geocode("20 W 34th St, New York").await?;
/// assert_eq!(coords.lat, 40.748_441_7);
/// # Ok(())
/// # }
/// ```

pub mod fixed;
pub mod tomtom;

pub use fixed::FixedGeocoder;
pub use tomtom::TomTomGeocoder;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A geocoded coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees
    pub lat: f64,

    /// Longitude in degrees
    pub lng: f64,
}

/// Geocoding error types
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The address did not resolve to any location (client-correctable, 422)
    #[error("Could not find location for the specified address.")]
    NoResults,

    /// Transport or upstream failure (internal, 500)
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// The upstream response could not be parsed
    #[error("Unexpected geocoding response: {0}")]
    InvalidResponse(String),
}

/// Resolves postal addresses to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Geocodes a single address
    ///
    /// # Errors
    ///
    /// - `GeocodeError::NoResults` if the service finds no match
    /// - `GeocodeError::RequestFailed` / `InvalidResponse` on upstream failure
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError>;
}
