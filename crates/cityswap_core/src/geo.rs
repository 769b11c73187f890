//! Geodesy primitives for proximity matching
//!
//! Intents carry a longitude/latitude snapshot; the store ranks candidates by
//! great-circle distance from a reference point, in kilometers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point, longitude first (GeoJSON axis order)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// The (0, 0) sentinel a profile carries before the user has ever set a
    /// location. Treated as "no location" by the precondition checks.
    pub fn is_origin(&self) -> bool {
        self.longitude == 0.0 && self.latitude == 0.0
    }

    /// Both coordinates are finite and within geographic range
    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
    }

    /// Great-circle distance to `other` in kilometers (haversine)
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let p = GeoPoint::new(72.8, 19.0);
        assert_eq!(p.distance_km(&p), 0.0);
    }

    #[test]
    fn known_distance_mumbai_pune() {
        // Mumbai (72.8777, 19.0760) to Pune (73.8567, 18.5204) is ~120 km
        let mumbai = GeoPoint::new(72.8777, 19.0760);
        let pune = GeoPoint::new(73.8567, 18.5204);
        let d = mumbai.distance_km(&pune);
        assert!((115.0..125.0).contains(&d), "got {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(72.8, 19.0);
        let b = GeoPoint::new(72.81, 19.01);
        assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-9);
    }

    #[test]
    fn origin_detection() {
        assert!(GeoPoint::new(0.0, 0.0).is_origin());
        assert!(!GeoPoint::new(0.0, 0.1).is_origin());
    }

    #[test]
    fn range_validation() {
        assert!(GeoPoint::new(72.8, 19.0).is_valid());
        assert!(!GeoPoint::new(181.0, 19.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 19.0).is_valid());
    }
}
