//! route-coverage core
//!
//! Waypoint/route state and proximity matching: place stops on a map, route
//! through them, and list the mailboxes within a buffer distance of the stops.

pub mod traits;
pub mod geo;
pub mod candidates;
pub mod waypoints;
pub mod proximity;
pub mod routing;
pub mod polyline;
pub mod osrm;
pub mod haversine;
pub mod session;
pub mod error;
