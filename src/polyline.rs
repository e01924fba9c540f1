//! Polyline representation for route geometries.
//!
//! Points are stored decoded. Wire formats (GeoJSON from OSRM, whatever the
//! map widget wants) are converted at the boundary.

use serde::{Deserialize, Serialize};

use crate::geo::{GeoPoint, Region, distance};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<GeoPoint>,
}

impl Polyline {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of great-circle segment lengths in meters.
    pub fn length_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| distance(pair[0], pair[1]))
            .sum()
    }

    /// Smallest region enclosing every point, or `None` when empty.
    pub fn bounds(&self) -> Option<Region> {
        let (first, rest) = self.points.split_first()?;
        let mut region = Region {
            south_west: *first,
            north_east: *first,
        };
        for point in rest {
            region.extend(*point);
        }
        Some(region)
    }
}

impl From<Vec<GeoPoint>> for Polyline {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}
