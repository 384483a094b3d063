//! Geographic coordinate type and spatial utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Routing providers return
//! coordinates as `[lon, lat]` pairs (GeoJSON order); use
//! [`GeoPoint::from_lon_lat`] at the decoding boundary and never pass raw
//! pairs further in.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Mean Earth radius, metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build from a GeoJSON-ordered `[lon, lat]` pair.
    #[inline]
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self { lat: pair[1], lon: pair[0] }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Straight-line distance in degree space.
    ///
    /// Only meaningful for short spans; used for similarity thresholds and
    /// waypoint offsets, which are expressed in degrees.
    #[inline]
    pub fn planar_distance_deg(self, other: GeoPoint) -> f64 {
        (other.lat - self.lat).hypot(other.lon - self.lon)
    }

    /// Initial great-circle bearing from `self` towards `other`, in degrees
    /// clockwise from north, normalised to `[0, 360)`.
    pub fn bearing_deg(self, other: GeoPoint) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
        y.atan2(x).to_degrees().rem_euclid(360.0)
    }

    /// Arithmetic midpoint in degree space.
    #[inline]
    pub fn midpoint(self, other: GeoPoint) -> GeoPoint {
        GeoPoint::new((self.lat + other.lat) * 0.5, (self.lon + other.lon) * 0.5)
    }

    /// Shift by `magnitude_deg` degrees towards compass heading `heading_deg`
    /// (0 = north, 90 = east).
    pub fn offset_deg(self, heading_deg: f64, magnitude_deg: f64) -> GeoPoint {
        let theta = heading_deg.to_radians();
        GeoPoint::new(
            self.lat + magnitude_deg * theta.cos(),
            self.lon + magnitude_deg * theta.sin(),
        )
    }
}

/// Smallest angle between two compass headings, in `[0, 180]` degrees.
pub fn heading_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

impl FromStr for GeoPoint {
    type Err = CoreError;

    /// Parse `"lat,lon"` (whitespace around either number is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| CoreError::Coordinate(s.to_owned()))?;
        let lat: f64 = lat.trim().parse().map_err(|_| CoreError::Coordinate(s.to_owned()))?;
        let lon: f64 = lon.trim().parse().map_err(|_| CoreError::Coordinate(s.to_owned()))?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(CoreError::Coordinate(s.to_owned()));
        }
        Ok(GeoPoint::new(lat, lon))
    }
}
