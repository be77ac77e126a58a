// src/geo.rs
//! Geodesic point helpers

use serde::{Deserialize, Serialize};

pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Mean earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Points this close to 0,0 are treated as an unset receiver default.
const NULL_ISLAND_EPSILON: f64 = 0.0001;

/// Predicate deciding whether a latitude/longitude pair is a usable position.
pub type PointValidator = fn(f64, f64) -> bool;

/// True when the pair lies strictly inside the valid ranges and is not the 0,0 placeholder.
pub fn is_valid(lat: f64, lon: f64) -> bool {
    let lat_abs = lat.abs();
    let lon_abs = lon.abs();
    if !(lat_abs < MAX_LATITUDE) || !(lon_abs < MAX_LONGITUDE) {
        return false;
    }
    !(lat_abs <= NULL_ISLAND_EPSILON && lon_abs <= NULL_ISLAND_EPSILON)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_valid(&self) -> bool {
        is_valid(self.latitude, self.longitude)
    }

    /// Great-circle distance (haversine)
    pub fn kilometers_to(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }

    /// Initial bearing toward `other`, in degrees `[0, 360)`.
    pub fn heading_to(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let y = dlon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
        (y.atan2(x).to_degrees() + 360.0) % 360.0
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5}/{:.5}", self.latitude, self.longitude)
    }
}
