//! Test fixtures for route-coverage.
//!
//! Provides:
//! - Coordinates around central Baghdad (the default map view)
//! - A recording map surface and scripted route providers

#![allow(dead_code)]

pub mod baghdad_locations;
pub mod recording_map;

pub use baghdad_locations::*;
pub use recording_map::*;
