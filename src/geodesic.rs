//! Geodesic distance
//!
//! Ellipsoidal (WGS84) surface distance between coordinate pairs, delegated
//! to the `geo` crate's Karney implementation. Coordinates are
//! (latitude, longitude) in decimal degrees throughout the service.

use geo::{point, GeodesicDistance};

/// Distance between two (latitude, longitude) points in kilometers.
pub fn distance_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let from = point!(x: from.1, y: from.0);
    let to = point!(x: to.1, y: to.0);
    from.geodesic_distance(&to) / 1000.0
}

/// Round a distance to two decimal places for presentation.
pub fn round_km(distance: f64) -> f64 {
    (distance * 100.0).round() / 100.0
}
