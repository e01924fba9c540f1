//! Seams to the external collaborators.
//!
//! The session owns the waypoint and coverage state; everything it draws or
//! asks for goes through these traits. Concrete apps implement them for their
//! own map widget and routing backend.

use crate::candidates::{Candidate, CandidateIndex};
use crate::error::RoutingError;
use crate::geo::{GeoPoint, Region};
use crate::routing::Route;
use crate::waypoints::Role;

/// Opaque handle for a marker placed on the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Opaque handle for a circle drawn on the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CircleHandle(pub u64);

/// Computes a drivable route through ordered waypoints.
///
/// Implementations may block; the session never calls a provider itself
/// except through [`RouteSession::dispatch_route`](crate::session::RouteSession::dispatch_route).
pub trait RouteProvider {
    fn route_for(&self, waypoints: &[GeoPoint]) -> Result<Route, RoutingError>;
}

/// Map rendering plus the point-drawing control.
///
/// Handles are only valid until the next [`reset`](MapSurface::reset).
pub trait MapSurface {
    /// Center the map at `center` with `zoom`.
    fn set_view(&mut self, center: GeoPoint, zoom: u8);

    /// Enable the drawing control, restricted to point placement.
    fn enable_point_drawing(&mut self);

    /// Add a candidate marker with its name as popup text.
    fn add_candidate_marker(&mut self, candidate: &Candidate) -> MarkerHandle;

    /// Add a waypoint marker drawn with the icon for `role`.
    fn add_waypoint_marker(&mut self, location: GeoPoint, role: Role) -> MarkerHandle;

    /// Swap the icon of an existing waypoint marker.
    fn set_marker_role(&mut self, marker: MarkerHandle, role: Role);

    /// Remove a marker of either kind.
    fn remove_marker(&mut self, marker: MarkerHandle);

    /// Draw a coverage circle of `radius_m` meters.
    fn add_circle(&mut self, center: GeoPoint, radius_m: f64) -> CircleHandle;

    /// Remove a circle drawn by `add_circle`.
    fn remove_circle(&mut self, circle: CircleHandle);

    /// Fit the viewport to `region`.
    fn focus_on(&mut self, region: Region);

    /// Open the popup bound to `marker`.
    fn open_popup(&mut self, marker: MarkerHandle);

    /// Replace the rendered route.
    fn draw_route(&mut self, route: &Route);

    /// Remove the rendered route, if any.
    fn clear_route(&mut self);

    /// Tear down every layer and control.
    fn reset(&mut self);
}

/// Anything that can produce the fixed candidate set at startup.
pub trait CandidateSource {
    fn load(self) -> CandidateIndex;
}
