//! Which candidates fall inside any waypoint's buffer circle.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::candidates::{Candidate, CandidateIndex};
use crate::error::InputError;
use crate::geo::{GeoPoint, distance};
use crate::waypoints::{Waypoint, WaypointHandle};

/// Buffer distance used when the user has not entered one.
pub const DEFAULT_BUFFER_M: f64 = 100.0;

/// Validated, non-negative buffer radius in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct BufferDistance(f64);

impl BufferDistance {
    /// Negative values clamp to zero; NaN and infinities are rejected.
    pub fn new(meters: f64) -> Result<Self, InputError> {
        if !meters.is_finite() {
            return Err(InputError::InvalidBufferValue {
                input: meters.to_string(),
            });
        }
        Ok(Self(meters.max(0.0)))
    }

    /// Parse user-entered text, e.g. the contents of a number field.
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let meters: f64 = input
            .trim()
            .parse()
            .map_err(|_| InputError::InvalidBufferValue {
                input: input.to_string(),
            })?;
        Self::new(meters).map_err(|_| InputError::InvalidBufferValue {
            input: input.to_string(),
        })
    }

    pub fn meters(self) -> f64 {
        self.0
    }
}

impl Default for BufferDistance {
    fn default() -> Self {
        Self(DEFAULT_BUFFER_M)
    }
}

impl TryFrom<f64> for BufferDistance {
    type Error = InputError;

    fn try_from(meters: f64) -> Result<Self, Self::Error> {
        Self::new(meters)
    }
}

impl From<BufferDistance> for f64 {
    fn from(buffer: BufferDistance) -> Self {
        buffer.0
    }
}

/// Circle of the buffer radius around one waypoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageRegion {
    /// Waypoint the circle was drawn for.
    pub owner: WaypointHandle,
    pub center: GeoPoint,
    pub radius_m: f64,
}

/// A candidate inside some waypoint's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub candidate: Candidate,
    /// Distance from the first waypoint whose scan found the candidate.
    pub distance_m: f64,
}

impl Match {
    pub fn name(&self) -> String {
        self.candidate.name()
    }

    pub fn location(&self) -> GeoPoint {
        self.candidate.location
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coverage {
    pub matches: Vec<Match>,
    pub regions: Vec<CoverageRegion>,
}

/// Compute coverage regions and deduplicated matches.
///
/// Matches are ordered by waypoint, then by candidate scan order. A candidate
/// covered by several waypoints is reported once, with the distance from the
/// first waypoint that reached it (not the minimum). The threshold is
/// inclusive. A negative `buffer_m` yields no matches; its regions get a zero
/// radius.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(waypoints = waypoints.len(), candidates = candidates.len(), buffer_m = buffer_m)
)]
pub fn compute_coverage(
    waypoints: &[Waypoint],
    candidates: &CandidateIndex,
    buffer_m: f64,
) -> Coverage {
    if waypoints.is_empty() {
        return Coverage::default();
    }

    let regions = waypoints
        .iter()
        .map(|waypoint| CoverageRegion {
            owner: waypoint.handle,
            center: waypoint.location,
            radius_m: buffer_m.max(0.0),
        })
        .collect();

    // Indexed collect keeps waypoint order.
    let hits: Vec<Vec<Match>> = waypoints
        .par_iter()
        .map(|waypoint| nearby(waypoint.location, candidates, buffer_m))
        .collect();
    let total_hits: usize = hits.iter().map(Vec::len).sum();

    let mut seen = HashSet::new();
    let matches: Vec<Match> = hits
        .into_iter()
        .flatten()
        .filter(|hit| seen.insert(hit.candidate.location.key()))
        .collect();

    debug!(total_hits, unique = matches.len(), "coverage computed");

    Coverage { matches, regions }
}

/// Candidates within `buffer_m` of `point`, in scan order.
pub fn nearby(point: GeoPoint, candidates: &CandidateIndex, buffer_m: f64) -> Vec<Match> {
    candidates
        .iter()
        .filter_map(|candidate| {
            let d = distance(point, candidate.location);
            (d <= buffer_m).then_some(Match {
                candidate: *candidate,
                distance_m: d,
            })
        })
        .collect()
}
