//! The fixed set of mailboxes that coverage is computed against.

use std::collections::HashMap;
use std::f64::consts::TAU;
use std::fmt;
use std::io::Read;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::CandidateError;
use crate::geo::{EARTH_RADIUS_M, GeoPoint};
use crate::traits::CandidateSource;

/// 1-based candidate identifier, stable for the lifetime of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub u32);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub location: GeoPoint,
}

impl Candidate {
    /// Display name, e.g. `"Mailbox 3"`.
    pub fn name(&self) -> String {
        format!("Mailbox {}", self.id)
    }
}

/// Immutable, preloaded candidate set.
#[derive(Debug, Clone, Default)]
pub struct CandidateIndex {
    candidates: Vec<Candidate>,
    by_location: HashMap<(u64, u64), usize>,
}

impl CandidateIndex {
    /// Build an index, assigning ids `1..=n` in input order.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let candidates: Vec<Candidate> = points
            .into_iter()
            .zip(1u32..)
            .map(|(location, id)| Candidate {
                id: CandidateId(id),
                location,
            })
            .collect();

        let mut by_location = HashMap::with_capacity(candidates.len());
        for (idx, candidate) in candidates.iter().enumerate() {
            // First candidate at a coordinate wins, same as result dedup.
            by_location.entry(candidate.location.key()).or_insert(idx);
        }

        Self {
            candidates,
            by_location,
        }
    }

    /// Load `[[lat, lng], ...]` from JSON.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CandidateError> {
        let raw: Vec<(f64, f64)> = serde_json::from_reader(reader)?;
        Ok(Self::from_points(raw.into_iter().map(GeoPoint::from)))
    }

    /// Deterministically scatter `count` candidates uniformly within
    /// `radius_m` of `center`.
    pub fn scatter(center: GeoPoint, count: usize, radius_m: f64, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let radius_m = radius_m.max(0.0);
        let cos_lat = center.lat.to_radians().cos().max(f64::EPSILON);

        let points: Vec<GeoPoint> = (0..count)
            .map(|_| {
                // sqrt keeps the density uniform over the disc
                let r = radius_m * rng.gen_range(0.0f64..1.0).sqrt();
                let theta = rng.gen_range(0.0..TAU);
                let north_m = r * theta.sin();
                let east_m = r * theta.cos();
                GeoPoint::new(
                    center.lat + (north_m / EARTH_RADIUS_M).to_degrees(),
                    center.lng + (east_m / EARTH_RADIUS_M).to_degrees() / cos_lat,
                )
            })
            .collect();

        Self::from_points(points)
    }

    /// Candidate by its 1-based id.
    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        let idx = usize::try_from(id.0).ok()?.checked_sub(1)?;
        self.candidates.get(idx)
    }

    /// Exact-coordinate lookup.
    pub fn find_by_location(&self, location: GeoPoint) -> Option<&Candidate> {
        self.by_location
            .get(&location.key())
            .and_then(|&idx| self.candidates.get(idx))
    }

    /// Candidates in scan order.
    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    /// Candidates in scan order, as a slice.
    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl<'a> IntoIterator for &'a CandidateIndex {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl CandidateSource for CandidateIndex {
    fn load(self) -> CandidateIndex {
        self
    }
}

impl CandidateSource for Vec<GeoPoint> {
    fn load(self) -> CandidateIndex {
        CandidateIndex::from_points(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::distance;

    #[test]
    fn test_ids_are_one_based_in_order() {
        let index = CandidateIndex::from_points(vec![
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(2.0, 2.0),
        ]);
        let ids: Vec<u32> = index.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(index.get(CandidateId(2)).map(|c| c.location), Some(GeoPoint::new(2.0, 2.0)));
        assert!(index.get(CandidateId(0)).is_none());
        assert!(index.get(CandidateId(3)).is_none());
    }

    #[test]
    fn test_name() {
        let index = CandidateIndex::from_points(vec![GeoPoint::new(0.0, 0.0)]);
        assert_eq!(index.iter().next().map(Candidate::name), Some("Mailbox 1".to_string()));
    }

    #[test]
    fn test_find_by_location_is_exact() {
        let index = CandidateIndex::from_points(vec![GeoPoint::new(33.3, 44.3)]);
        assert!(index.find_by_location(GeoPoint::new(33.3, 44.3)).is_some());
        assert!(index.find_by_location(GeoPoint::new(33.3, 44.300001)).is_none());
    }

    #[test]
    fn test_find_by_location_prefers_first() {
        let index = CandidateIndex::from_points(vec![
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 1.0),
        ]);
        assert_eq!(
            index.find_by_location(GeoPoint::new(1.0, 1.0)).map(|c| c.id),
            Some(CandidateId(1))
        );
    }

    #[test]
    fn test_from_json() {
        let json = "[[33.31, 44.36], [33.32, 44.37]]";
        let index = CandidateIndex::from_json_reader(json.as_bytes()).expect("valid json");
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.get(CandidateId(2)).map(|c| c.location),
            Some(GeoPoint::new(33.32, 44.37))
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let result = CandidateIndex::from_json_reader("{\"lat\": 1}".as_bytes());
        assert!(matches!(result, Err(CandidateError::Json(_))));
    }

    #[test]
    fn test_scatter_is_deterministic_and_bounded() {
        let center = GeoPoint::new(33.3152, 44.3661);
        let a = CandidateIndex::scatter(center, 50, 2_000.0, 7);
        let b = CandidateIndex::scatter(center, 50, 2_000.0, 7);
        assert_eq!(a.len(), 50);
        assert_eq!(a.as_slice(), b.as_slice());
        for candidate in &a {
            // Equirectangular offsets drift slightly from great-circle distance.
            assert!(distance(center, candidate.location) <= 2_010.0);
        }
    }
}
