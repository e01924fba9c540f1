//! Coordinates around central Baghdad for session fixtures.
//!
//! Spacing is chosen so buffer sizes in the tests have clear-cut answers:
//! every mailbox is either well inside or well outside a given buffer.

use route_coverage::geo::GeoPoint;

/// A named location with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

// ============================================================================
// Route stops (west to east along one street)
// ============================================================================

pub const STOP_WEST: Location = Location::new("West stop", 33.3152, 44.3600);
pub const STOP_MIDDLE: Location = Location::new("Middle stop", 33.3152, 44.3661);
pub const STOP_EAST: Location = Location::new("East stop", 33.3152, 44.3720);

pub const STOPS: &[Location] = &[STOP_WEST, STOP_MIDDLE, STOP_EAST];

// ============================================================================
// Mailboxes
// ============================================================================

/// Mailbox 1: ~30m north of the west stop.
pub const MAILBOX_NEAR_WEST: Location = Location::new("Mailbox near west", 33.31547, 44.3600);
/// Mailbox 2: ~75m north of the middle stop.
pub const MAILBOX_NEAR_MIDDLE: Location = Location::new("Mailbox near middle", 33.31587, 44.3661);
/// Mailbox 3: ~3km away from every stop.
pub const MAILBOX_FAR: Location = Location::new("Mailbox far away", 33.3422, 44.3661);
/// Mailbox 4: ~40m south of the east stop.
pub const MAILBOX_NEAR_EAST: Location = Location::new("Mailbox near east", 33.31484, 44.3720);

pub const MAILBOXES: &[Location] = &[
    MAILBOX_NEAR_WEST,
    MAILBOX_NEAR_MIDDLE,
    MAILBOX_FAR,
    MAILBOX_NEAR_EAST,
];

pub fn mailbox_points() -> Vec<GeoPoint> {
    MAILBOXES.iter().map(Location::point).collect()
}
