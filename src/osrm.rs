//! OSRM HTTP adapter for driving routes.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RoutingError;
use crate::geo::GeoPoint;
use crate::polyline::Polyline;
use crate::routing::Route;
use crate::traits::RouteProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, waypoints: &[GeoPoint]) -> String {
        let coords = waypoints
            .iter()
            .map(|point| format!("{:.6},{:.6}", point.lng, point.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

impl RouteProvider for OsrmClient {
    fn route_for(&self, waypoints: &[GeoPoint]) -> Result<Route, RoutingError> {
        if waypoints.len() < 2 {
            return Err(RoutingError::TooFewWaypoints {
                count: waypoints.len(),
            });
        }

        let url = self.route_url(waypoints);
        debug!(%url, "requesting OSRM route");

        let body = self
            .client
            .get(url)
            .send()
            // Error statuses still carry a JSON body with the OSRM code.
            .and_then(|resp| resp.json::<OsrmRouteResponse>())?;

        body.into_route()
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: `[lng, lat]`.
    coordinates: Vec<[f64; 2]>,
}

impl OsrmRouteResponse {
    fn into_route(self) -> Result<Route, RoutingError> {
        match self.code.as_str() {
            "Ok" => {}
            "NoRoute" => return Err(RoutingError::NoRoute),
            _ => {
                return Err(RoutingError::Service {
                    code: self.code,
                    message: self.message,
                });
            }
        }

        let best = self.routes.into_iter().next().ok_or(RoutingError::NoRoute)?;
        let points = best
            .geometry
            .coordinates
            .into_iter()
            .map(|[lng, lat]| GeoPoint::new(lat, lng))
            .collect();

        Ok(Route {
            geometry: Polyline::new(points),
            distance_m: best.distance,
            duration_s: best.duration,
        })
    }
}
