//! Error types.
//!
//! Nothing here is fatal to a session: routing failures are absorbed by
//! [`RouteSession`](crate::session::RouteSession) and invalid input leaves the
//! previous value in place.

use thiserror::Error;

/// Failure reported by a [`RouteProvider`](crate::traits::RouteProvider).
#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("routing request failed")]
    Http(#[from] reqwest::Error),
    #[error("routing service returned {code}: {}", .message.as_deref().unwrap_or("no message"))]
    Service { code: String, message: Option<String> },
    #[error("no route found between waypoints")]
    NoRoute,
    #[error("a route needs at least two waypoints, got {count}")]
    TooFewWaypoints { count: usize },
}

/// Rejected user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("invalid buffer distance: {input:?}")]
    InvalidBufferValue { input: String },
}

/// Failure loading a candidate set.
#[derive(Error, Debug)]
pub enum CandidateError {
    #[error("failed to read candidates")]
    Io(#[from] std::io::Error),
    #[error("malformed candidate list")]
    Json(#[from] serde_json::Error),
}
