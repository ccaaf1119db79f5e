/// Fixed geocoder for testing and demos
///
/// Returns the same coordinates for every address, or `NoResults` when
/// configured to fail. Lets tests exercise place creation without an API key
/// or network access.

use async_trait::async_trait;

use super::{Coordinates, GeocodeError, Geocoder};

/// Geocoder that answers every request with canned coordinates
#[derive(Debug, Clone)]
pub struct FixedGeocoder {
    coordinates: Option<Coordinates>,
}

impl FixedGeocoder {
    /// Creates a geocoder that resolves every address to (lat, lng)
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            coordinates: Some(Coordinates { lat, lng }),
        }
    }

    /// Creates a geocoder that fails every request with `NoResults`
    pub fn unresolvable() -> Self {
        Self { coordinates: None }
    }
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Coordinates, GeocodeError> {
        self.coordinates.ok_or(GeocodeError::NoResults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_geocoder_resolves() {
        let geocoder = FixedGeocoder::new(41.32, 19.45);
        let coords = geocoder.geocode("anywhere").await.unwrap();
        assert_eq!(coords, Coordinates { lat: 41.32, lng: 19.45 });
    }

    #[tokio::test]
    async fn test_unresolvable_geocoder() {
        let geocoder = FixedGeocoder::unresolvable();
        let err = geocoder.geocode("nowhere").await.unwrap_err();
        assert!(matches!(err, GeocodeError::NoResults));
    }
}
