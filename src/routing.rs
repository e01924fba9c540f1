//! Route results and the request/response envelope used to drop stale
//! responses.
//!
//! Every change to the routed waypoint set gets a fresh [`RouteTicket`]. A
//! response is applied only while its ticket is still the session's current
//! one, so a slow provider can never paint a route for waypoints that have
//! since been edited or reset away.

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::geo::GeoPoint;
use crate::polyline::Polyline;
use crate::traits::RouteProvider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub geometry: Polyline,
    /// Total length in meters.
    pub distance_m: f64,
    /// Expected travel time in seconds.
    pub duration_s: f64,
}

/// Generation counter identifying one route request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteTicket(pub(crate) u64);

/// Outstanding request: ordered locations, start first, end last.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub ticket: RouteTicket,
    pub waypoints: Vec<GeoPoint>,
}

impl RouteRequest {
    /// Run the request against `provider`. May block; safe to call off the
    /// session thread.
    pub fn resolve<P>(self, provider: &P) -> RouteResponse
    where
        P: RouteProvider + ?Sized,
    {
        let result = if self.waypoints.len() < 2 {
            Err(RoutingError::TooFewWaypoints {
                count: self.waypoints.len(),
            })
        } else {
            provider.route_for(&self.waypoints)
        };
        RouteResponse {
            ticket: self.ticket,
            result,
        }
    }
}

#[derive(Debug)]
pub struct RouteResponse {
    pub ticket: RouteTicket,
    pub result: Result<Route, RoutingError>,
}

/// What the session did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Route drawn on the map.
    Applied,
    /// Provider failed; no route is shown, waypoints and matches untouched.
    Failed,
    /// Ticket superseded by a later edit or reset; response dropped.
    Stale,
}
