//! Route session: waypoints, coverage and the route, kept in step with the
//! map surface.
//!
//! The session is the only owner of the waypoint list and the drawn coverage
//! circles. It is driven from a single event thread; every handler reads the
//! current state through `&mut self`, never a copy captured earlier. Route
//! computation is the one asynchronous step: the session hands out a
//! [`RouteRequest`] and later accepts the matching [`RouteResponse`], dropping
//! it if the waypoints changed in between.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::candidates::{CandidateId, CandidateIndex};
use crate::error::InputError;
use crate::geo::{GeoPoint, bounding_region};
use crate::proximity::{BufferDistance, CoverageRegion, Match, compute_coverage};
use crate::routing::{Route, RouteOutcome, RouteRequest, RouteResponse, RouteTicket};
use crate::traits::{CandidateSource, CircleHandle, MapSurface, MarkerHandle, RouteProvider};
use crate::waypoints::{Role, Waypoint, WaypointHandle, WaypointList};

/// Initial map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: GeoPoint::new(33.3152, 44.3661),
            zoom: 13,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub view: MapView,
    /// Buffer used until the user enters another value.
    pub default_buffer: BufferDistance,
    /// Radius of the area shown when focusing on a highlighted candidate.
    pub highlight_radius_m: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            view: MapView::default(),
            default_buffer: BufferDistance::default(),
            highlight_radius_m: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PlacedMarker {
    marker: MarkerHandle,
    shown: Role,
}

#[derive(Debug)]
pub struct RouteSession<M: MapSurface> {
    config: SessionConfig,
    map: M,
    candidates: CandidateIndex,
    candidate_markers: HashMap<CandidateId, MarkerHandle>,
    waypoints: WaypointList,
    waypoint_markers: HashMap<WaypointHandle, PlacedMarker>,
    regions: Vec<(CoverageRegion, CircleHandle)>,
    matches: Vec<Match>,
    buffer: BufferDistance,
    generation: u64,
    pending: Option<RouteRequest>,
    route: Option<Route>,
}

impl<M: MapSurface> RouteSession<M> {
    /// Load candidates and set up the map surface.
    pub fn new<S: CandidateSource>(config: SessionConfig, map: M, source: S) -> Self {
        let buffer = config.default_buffer;
        let mut session = Self {
            config,
            map,
            candidates: source.load(),
            candidate_markers: HashMap::new(),
            waypoints: WaypointList::new(),
            waypoint_markers: HashMap::new(),
            regions: Vec::new(),
            matches: Vec::new(),
            buffer,
            generation: 0,
            pending: None,
            route: None,
        };
        session.init_map();
        info!(candidates = session.candidates.len(), "route session ready");
        session
    }

    fn init_map(&mut self) {
        self.map.set_view(self.config.view.center, self.config.view.zoom);
        for candidate in self.candidates.iter() {
            let marker = self.map.add_candidate_marker(candidate);
            self.candidate_markers.insert(candidate.id, marker);
        }
        self.map.enable_point_drawing();
    }

    /// Handle a "marker created" event from the drawing control.
    pub fn place_waypoint(&mut self, location: GeoPoint) -> WaypointHandle {
        let handle = self.waypoints.append(location);
        let role = self.waypoints.role_of(handle).unwrap_or(Role::Start);
        let marker = self.map.add_waypoint_marker(location, role);
        self.waypoint_markers.insert(handle, PlacedMarker { marker, shown: role });
        debug!(?handle, lat = location.lat, lng = location.lng, "waypoint placed");

        self.sync_roles();
        self.refresh_route();
        handle
    }

    /// Handle a click on a rendered waypoint.
    ///
    /// Returns `false` when the waypoint is already gone (e.g. the click raced
    /// a reset); nothing changes in that case.
    pub fn remove_waypoint(&mut self, handle: WaypointHandle) -> bool {
        if self.waypoints.remove(handle).is_none() {
            debug!(?handle, "ignoring removal of unknown waypoint");
            return false;
        }

        if let Some(placed) = self.waypoint_markers.remove(&handle) {
            self.map.remove_marker(placed.marker);
        }

        let map = &mut self.map;
        self.regions.retain(|(region, circle)| {
            if region.owner == handle {
                map.remove_circle(*circle);
                false
            } else {
                true
            }
        });
        debug!(?handle, remaining = self.waypoints.len(), "waypoint removed");

        self.sync_roles();
        self.refresh_route();
        true
    }

    /// Re-icon every marker whose derived role changed.
    fn sync_roles(&mut self) {
        for waypoint in self.waypoints.snapshot() {
            if let Some(placed) = self.waypoint_markers.get_mut(&waypoint.handle) {
                if placed.shown != waypoint.role {
                    self.map.set_marker_role(placed.marker, waypoint.role);
                    placed.shown = waypoint.role;
                }
            }
        }
    }

    /// Issue a fresh ticket for the current waypoint set, superseding any
    /// outstanding request.
    fn refresh_route(&mut self) {
        self.generation += 1;
        if self.waypoints.len() >= 2 {
            let request = RouteRequest {
                ticket: RouteTicket(self.generation),
                waypoints: self.waypoints.locations(),
            };
            debug!(ticket = self.generation, stops = request.waypoints.len(), "route requested");
            self.pending = Some(request);
        } else {
            self.pending = None;
            if self.route.take().is_some() {
                self.map.clear_route();
                debug!("route cleared, fewer than two waypoints");
            }
        }
    }

    /// Take the outstanding route request, if any, for dispatch.
    pub fn take_route_request(&mut self) -> Option<RouteRequest> {
        self.pending.take()
    }

    /// Apply a provider response. Responses for superseded tickets are
    /// dropped silently.
    pub fn apply_route_response(&mut self, response: RouteResponse) -> RouteOutcome {
        if response.ticket != self.current_ticket() {
            debug!(
                ticket = response.ticket.0,
                current = self.generation,
                "discarding stale route response"
            );
            return RouteOutcome::Stale;
        }

        match response.result {
            Ok(route) => {
                self.map.draw_route(&route);
                debug!(distance_m = route.distance_m, "route drawn");
                self.route = Some(route);
                RouteOutcome::Applied
            }
            Err(err) => {
                warn!(error = %err, "routing failed");
                if self.route.take().is_some() {
                    self.map.clear_route();
                }
                RouteOutcome::Failed
            }
        }
    }

    /// Resolve the outstanding request synchronously against `provider`.
    pub fn dispatch_route<P>(&mut self, provider: &P) -> Option<RouteOutcome>
    where
        P: RouteProvider + ?Sized,
    {
        let request = self.take_route_request()?;
        let response = request.resolve(provider);
        Some(self.apply_route_response(response))
    }

    /// Ticket a response must carry to be applied.
    pub fn current_ticket(&self) -> RouteTicket {
        RouteTicket(self.generation)
    }

    /// Set the buffer distance. Negative values clamp to zero; a rejected
    /// value leaves the previous buffer in place.
    pub fn set_buffer_distance(&mut self, meters: f64) -> Result<BufferDistance, InputError> {
        let buffer = BufferDistance::new(meters).inspect_err(|err| warn!(%err, "buffer rejected"))?;
        self.buffer = buffer;
        Ok(buffer)
    }

    /// Set the buffer distance from text entered by the user.
    pub fn set_buffer_input(&mut self, input: &str) -> Result<BufferDistance, InputError> {
        let buffer =
            BufferDistance::parse(input).inspect_err(|err| warn!(%err, "buffer rejected"))?;
        self.buffer = buffer;
        Ok(buffer)
    }

    pub fn buffer_distance(&self) -> BufferDistance {
        self.buffer
    }

    /// Redraw coverage circles and recompute matches for the current
    /// waypoints and buffer.
    pub fn calculate_coverage(&mut self) -> &[Match] {
        for (_, circle) in self.regions.drain(..) {
            self.map.remove_circle(circle);
        }

        let coverage = compute_coverage(
            &self.waypoints.snapshot(),
            &self.candidates,
            self.buffer.meters(),
        );

        for region in coverage.regions {
            let circle = self.map.add_circle(region.center, region.radius_m);
            self.regions.push((region, circle));
        }
        self.matches = coverage.matches;

        info!(
            waypoints = self.waypoints.len(),
            buffer_m = self.buffer.meters(),
            matches = self.matches.len(),
            "coverage calculated"
        );
        &self.matches
    }

    /// Focus the map on the candidate behind `selected` and open its popup.
    ///
    /// Returns `false` (and leaves the map alone) if the candidate cannot be
    /// found.
    pub fn highlight(&mut self, selected: &Match) -> bool {
        let Some(candidate) = self.candidates.find_by_location(selected.location()) else {
            debug!(name = %selected.name(), "no candidate to highlight");
            return false;
        };
        let Some(&marker) = self.candidate_markers.get(&candidate.id) else {
            debug!(id = %candidate.id, "candidate has no marker");
            return false;
        };

        self.map
            .focus_on(bounding_region(candidate.location, self.config.highlight_radius_m));
        self.map.open_popup(marker);
        true
    }

    /// Drop all waypoints, matches, circles and the route, invalidate any
    /// outstanding route request, and rebuild the map surface.
    ///
    /// The buffer distance survives a reset.
    pub fn reset(&mut self) {
        self.waypoints.clear();
        self.waypoint_markers.clear();
        self.matches.clear();
        self.regions.clear();
        self.candidate_markers.clear();
        self.pending = None;
        self.route = None;
        self.generation += 1;

        self.map.clear_route();
        self.map.reset();
        self.init_map();
        info!(ticket = self.generation, "route session reset");
    }

    /// Current waypoints in route order, with derived roles.
    pub fn waypoints(&self) -> Vec<Waypoint> {
        self.waypoints.snapshot()
    }

    pub fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    pub fn role_of(&self, handle: WaypointHandle) -> Option<Role> {
        self.waypoints.role_of(handle)
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn coverage_regions(&self) -> impl Iterator<Item = &CoverageRegion> {
        self.regions.iter().map(|(region, _)| region)
    }

    /// The results panel is shown only once a route can exist.
    pub fn results_visible(&self) -> bool {
        self.waypoints.len() >= 2
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn candidates(&self) -> &CandidateIndex {
        &self.candidates
    }

    pub fn map(&self) -> &M {
        &self.map
    }
}
