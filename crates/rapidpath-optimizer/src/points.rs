//! Point Deduplicator

use rapidpath_core::Point2D;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Travel points with exact duplicates removed, in first-seen order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniquePoints(Vec<Point2D>);

impl UniquePoints {
    /// The points as a slice, ready for the optimizer
    pub fn as_slice(&self) -> &[Point2D] {
        &self.0
    }

    /// Number of unique points
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no points remain
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the points
    pub fn iter(&self) -> std::slice::Iter<'_, Point2D> {
        self.0.iter()
    }

    /// Take ownership of the points
    pub fn into_vec(self) -> Vec<Point2D> {
        self.0
    }
}

impl<'a> IntoIterator for &'a UniquePoints {
    type Item = &'a Point2D;
    type IntoIter = std::slice::Iter<'a, Point2D>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Remove points equal in both coordinates to an earlier point
///
/// Equality is exact: points that differ only by rounding noise stay
/// distinct. `-0.0` equals `0.0`.
pub fn dedupe(points: &[Point2D]) -> UniquePoints {
    let mut seen = HashSet::with_capacity(points.len());
    let unique = points
        .iter()
        .filter(|p| seen.insert(p.exact_key()))
        .copied()
        .collect();
    UniquePoints(unique)
}
