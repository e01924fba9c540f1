//! In-memory map surface and scripted route providers.

use std::cell::Cell;
use std::collections::HashMap;

use route_coverage::candidates::Candidate;
use route_coverage::error::RoutingError;
use route_coverage::geo::{GeoPoint, Region};
use route_coverage::haversine::StraightLineRouter;
use route_coverage::routing::Route;
use route_coverage::traits::{CircleHandle, MapSurface, MarkerHandle, RouteProvider};
use route_coverage::waypoints::Role;

#[derive(Debug, Clone, PartialEq)]
pub enum MarkerKind {
    Candidate { popup: String, location: GeoPoint },
    Waypoint { location: GeoPoint, role: Role },
}

/// Map surface that keeps its layers in memory so tests can inspect them.
#[derive(Debug, Default)]
pub struct RecordingMap {
    next_id: u64,
    pub view: Option<(GeoPoint, u8)>,
    pub drawing_enabled: bool,
    pub markers: HashMap<MarkerHandle, MarkerKind>,
    pub circles: HashMap<CircleHandle, (GeoPoint, f64)>,
    pub route: Option<Route>,
    pub focused: Option<Region>,
    pub opened_popups: Vec<MarkerHandle>,
    pub role_changes: usize,
    pub resets: usize,
}

impl RecordingMap {
    fn next(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Waypoint markers as (location, role), sorted west to east.
    pub fn waypoint_markers(&self) -> Vec<(GeoPoint, Role)> {
        let mut markers: Vec<(GeoPoint, Role)> = self
            .markers
            .values()
            .filter_map(|kind| match kind {
                MarkerKind::Waypoint { location, role } => Some((*location, *role)),
                MarkerKind::Candidate { .. } => None,
            })
            .collect();
        markers.sort_by(|a, b| a.0.lng.total_cmp(&b.0.lng));
        markers
    }

    pub fn candidate_marker_count(&self) -> usize {
        self.markers
            .values()
            .filter(|kind| matches!(kind, MarkerKind::Candidate { .. }))
            .count()
    }

    pub fn popup_text(&self, marker: MarkerHandle) -> Option<&str> {
        match self.markers.get(&marker)? {
            MarkerKind::Candidate { popup, .. } => Some(popup.as_str()),
            MarkerKind::Waypoint { .. } => None,
        }
    }
}

impl MapSurface for RecordingMap {
    fn set_view(&mut self, center: GeoPoint, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn enable_point_drawing(&mut self) {
        self.drawing_enabled = true;
    }

    fn add_candidate_marker(&mut self, candidate: &Candidate) -> MarkerHandle {
        let handle = MarkerHandle(self.next());
        self.markers.insert(
            handle,
            MarkerKind::Candidate {
                popup: candidate.name(),
                location: candidate.location,
            },
        );
        handle
    }

    fn add_waypoint_marker(&mut self, location: GeoPoint, role: Role) -> MarkerHandle {
        let handle = MarkerHandle(self.next());
        self.markers
            .insert(handle, MarkerKind::Waypoint { location, role });
        handle
    }

    fn set_marker_role(&mut self, marker: MarkerHandle, new_role: Role) {
        if let Some(MarkerKind::Waypoint { role, .. }) = self.markers.get_mut(&marker) {
            *role = new_role;
            self.role_changes += 1;
        }
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        self.markers.remove(&marker);
    }

    fn add_circle(&mut self, center: GeoPoint, radius_m: f64) -> CircleHandle {
        let handle = CircleHandle(self.next());
        self.circles.insert(handle, (center, radius_m));
        handle
    }

    fn remove_circle(&mut self, circle: CircleHandle) {
        self.circles.remove(&circle);
    }

    fn focus_on(&mut self, region: Region) {
        self.focused = Some(region);
    }

    fn open_popup(&mut self, marker: MarkerHandle) {
        self.opened_popups.push(marker);
    }

    fn draw_route(&mut self, route: &Route) {
        self.route = Some(route.clone());
    }

    fn clear_route(&mut self) {
        self.route = None;
    }

    fn reset(&mut self) {
        self.view = None;
        self.drawing_enabled = false;
        self.markers.clear();
        self.circles.clear();
        self.route = None;
        self.focused = None;
        self.opened_popups.clear();
        self.resets += 1;
    }
}

/// Provider that always fails, counting calls.
#[derive(Debug, Default)]
pub struct FailingRouter {
    pub calls: Cell<usize>,
}

impl RouteProvider for FailingRouter {
    fn route_for(&self, _waypoints: &[GeoPoint]) -> Result<Route, RoutingError> {
        self.calls.set(self.calls.get() + 1);
        Err(RoutingError::NoRoute)
    }
}

/// Straight-line provider that records the waypoints it was asked for.
#[derive(Debug, Default)]
pub struct RecordingRouter {
    inner: StraightLineRouter,
    pub requests: std::cell::RefCell<Vec<Vec<GeoPoint>>>,
}

impl RouteProvider for RecordingRouter {
    fn route_for(&self, waypoints: &[GeoPoint]) -> Result<Route, RoutingError> {
        self.requests.borrow_mut().push(waypoints.to_vec());
        self.inner.route_for(waypoints)
    }
}
