//! Ordered list of user-placed stops.
//!
//! Roles are never stored. They are a function of position and list length,
//! computed on read, so they cannot drift from the current order.

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Identity of a placed waypoint. Two waypoints may share a location but
/// never a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaypointHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Start,
    Stop,
    End,
}

/// Role of position `index` in a list of `len` waypoints.
///
/// A single waypoint is a start; an end needs at least two.
pub fn role_at(index: usize, len: usize) -> Option<Role> {
    if index >= len {
        None
    } else if index == 0 {
        Some(Role::Start)
    } else if index == len - 1 {
        Some(Role::End)
    } else {
        Some(Role::Stop)
    }
}

/// A waypoint as seen through a snapshot, with its derived role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub handle: WaypointHandle,
    pub location: GeoPoint,
    pub role: Role,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    handle: WaypointHandle,
    location: GeoPoint,
}

#[derive(Debug, Clone, Default)]
pub struct WaypointList {
    entries: Vec<Entry>,
    next_handle: u64,
}

impl WaypointList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a waypoint at the end of the route.
    pub fn append(&mut self, location: GeoPoint) -> WaypointHandle {
        let handle = WaypointHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry { handle, location });
        handle
    }

    /// Remove the waypoint with `handle`, wherever it sits.
    ///
    /// Returns `None` when the handle is no longer present; callers treat that
    /// as a no-op.
    pub fn remove(&mut self, handle: WaypointHandle) -> Option<GeoPoint> {
        let position = self.position(handle)?;
        Some(self.entries.remove(position).location)
    }

    /// Empty the list. Handles are not reused afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of waypoints currently placed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `handle` still refers to a placed waypoint.
    pub fn contains(&self, handle: WaypointHandle) -> bool {
        self.position(handle).is_some()
    }

    /// Role derived from the waypoint's current position.
    pub fn role_of(&self, handle: WaypointHandle) -> Option<Role> {
        role_at(self.position(handle)?, self.len())
    }

    /// Look up one waypoint, with its role, by handle.
    pub fn get(&self, handle: WaypointHandle) -> Option<Waypoint> {
        let index = self.position(handle)?;
        self.at(index)
    }

    /// Current waypoints in route order.
    pub fn snapshot(&self) -> Vec<Waypoint> {
        (0..self.len()).filter_map(|index| self.at(index)).collect()
    }

    /// Current locations in route order (start, stops, end).
    pub fn locations(&self) -> Vec<GeoPoint> {
        self.entries.iter().map(|entry| entry.location).collect()
    }

    fn at(&self, index: usize) -> Option<Waypoint> {
        let entry = self.entries.get(index)?;
        Some(Waypoint {
            handle: entry.handle,
            location: entry.location,
            role: role_at(index, self.len())?,
        })
    }

    fn position(&self, handle: WaypointHandle) -> Option<usize> {
        self.entries.iter().position(|entry| entry.handle == handle)
    }
}
