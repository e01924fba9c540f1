//! Straight-line route provider (fallback when OSRM unavailable).
//!
//! Connects waypoints with great-circle segments and estimates travel time
//! from an assumed speed. Ignores roads, but always available.

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::geo::GeoPoint;
use crate::polyline::Polyline;
use crate::routing::Route;
use crate::traits::RouteProvider;

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StraightLineRouter {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for StraightLineRouter {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl StraightLineRouter {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    fn meters_to_seconds(&self, meters: f64) -> f64 {
        if self.speed_kmh <= 0.0 {
            return f64::INFINITY;
        }
        meters / (self.speed_kmh / 3.6)
    }
}

impl RouteProvider for StraightLineRouter {
    fn route_for(&self, waypoints: &[GeoPoint]) -> Result<Route, RoutingError> {
        if waypoints.len() < 2 {
            return Err(RoutingError::TooFewWaypoints {
                count: waypoints.len(),
            });
        }

        let geometry = Polyline::new(waypoints.to_vec());
        let distance_m = geometry.length_m();

        Ok(Route {
            duration_s: self.meters_to_seconds(distance_m),
            distance_m,
            geometry,
        })
    }
}
