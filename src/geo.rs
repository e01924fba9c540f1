//! Coordinates, great-circle distance and viewport regions.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (the value web map libraries use).
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A latitude/longitude pair in degrees.
///
/// Equality is exact on both coordinates. Deduplication and candidate lookup
/// rely on this, so no tolerance is applied anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_to(&self, other: GeoPoint) -> f64 {
        distance(*self, other)
    }

    /// Hashable key with the same equality as `PartialEq` (`-0.0 == 0.0`).
    pub(crate) fn key(&self) -> (u64, u64) {
        // Adding +0.0 folds -0.0 into 0.0.
        ((self.lat + 0.0).to_bits(), (self.lng + 0.0).to_bits())
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(point: GeoPoint) -> Self {
        (point.lat, point.lng)
    }
}

/// Haversine distance in meters between two coordinates.
///
/// Symmetric for every pair, and exactly zero when `a == b`.
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).abs().to_radians();
    let delta_lng = (b.lng - a.lng).abs().to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Axis-aligned lat/lng box, used to fit the map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl Region {
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Grow the region so it also covers `point`.
    pub fn extend(&mut self, point: GeoPoint) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }
}

/// Slack added to each side so rounding never puts the circle's rim outside.
const REGION_PAD_DEG: f64 = 1e-9;

/// Region guaranteed to contain a circle of `radius_m` around `center`.
///
/// Negative radii are treated as zero. A circle reaching a pole gets the
/// full longitude range.
pub fn bounding_region(center: GeoPoint, radius_m: f64) -> Region {
    let angular = radius_m.max(0.0) / EARTH_RADIUS_M;
    let lat_delta = angular.to_degrees() + REGION_PAD_DEG;

    let south = (center.lat - lat_delta).max(-90.0);
    let north = (center.lat + lat_delta).min(90.0);

    if center.lat.abs() + lat_delta >= 90.0 {
        return Region {
            south_west: GeoPoint::new(south, -180.0),
            north_east: GeoPoint::new(north, 180.0),
        };
    }

    // Widest longitude reach of a small circle, at the tangent meridians.
    let cos_lat = center.lat.to_radians().cos();
    let lng_delta = (angular.sin() / cos_lat).min(1.0).asin().to_degrees() + REGION_PAD_DEG;

    Region {
        south_west: GeoPoint::new(south, center.lng - lng_delta),
        north_east: GeoPoint::new(north, center.lng + lng_delta),
    }
}
