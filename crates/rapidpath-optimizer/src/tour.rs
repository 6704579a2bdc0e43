//! Tour representation

use crate::distance::DistanceMatrix;
use rapidpath_core::Point2D;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a tour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourKind {
    /// Cycle that returns to the first point after the last
    #[default]
    Closed,
    /// Path that ends at the last point
    Open,
}

impl fmt::Display for TourKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
        }
    }
}

/// Visiting order over a set of unique travel points
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Tour {
    /// Indices into the optimizer input, in visiting order
    pub order: Vec<usize>,
    /// The points in visiting order
    pub points: Vec<Point2D>,
    /// Total travel length, including the return edge for closed tours
    pub length: f64,
    /// Whether the tour returns to its start
    pub kind: TourKind,
}

impl Tour {
    /// Tour over no points
    pub fn empty(kind: TourKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Build a tour from a visiting order over `points`
    pub(crate) fn from_order(
        order: Vec<usize>,
        points: &[Point2D],
        matrix: &DistanceMatrix,
        kind: TourKind,
    ) -> Self {
        let length = match kind {
            TourKind::Closed => matrix.cycle_length(&order),
            TourKind::Open => matrix.path_length(&order),
        };
        let points = order.iter().map(|&i| points[i]).collect();
        Self {
            order,
            points,
            length,
            kind,
        }
    }

    /// Number of stops
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the tour visits no points
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Turn a closed cycle into the open path left after dropping its longest edge
///
/// The cycle edge `order[k] -> order[k+1]` (wrapping at the end) with the
/// greatest length is removed and the path starts at `order[k+1]`. Ties go to
/// the later edge, so a cycle whose edges are all equal keeps its order.
pub(crate) fn open_from_cycle(order: &[usize], matrix: &DistanceMatrix) -> Vec<usize> {
    let n = order.len();
    if n < 2 {
        return order.to_vec();
    }

    let mut longest = 0;
    let mut longest_length = f64::NEG_INFINITY;
    for k in 0..n {
        let d = matrix.get(order[k], order[(k + 1) % n]);
        if d >= longest_length {
            longest = k;
            longest_length = d;
        }
    }

    let start = (longest + 1) % n;
    order[start..].iter().chain(&order[..start]).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kind_is_closed() {
        assert_eq!(TourKind::default(), TourKind::Closed);
        assert_eq!(TourKind::Open.to_string(), "open");
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TourKind::Closed).unwrap(), r#""closed""#);
        let kind: TourKind = serde_json::from_str(r#""open""#).unwrap();
        assert_eq!(kind, TourKind::Open);
    }

    #[test]
    fn test_from_order_lengths() {
        let points = [
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 0.0),
            Point2D::new(3.0, 4.0),
        ];
        let matrix = DistanceMatrix::new(&points);

        let closed = Tour::from_order(vec![0, 1, 2], &points, &matrix, TourKind::Closed);
        assert_eq!(closed.length, 12.0);
        assert_eq!(closed.points[2], Point2D::new(3.0, 4.0));

        let open = Tour::from_order(vec![0, 1, 2], &points, &matrix, TourKind::Open);
        assert_eq!(open.length, 7.0);
        assert_eq!(open.len(), 3);
    }

    #[test]
    fn test_open_drops_longest_edge() {
        let points = [
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 0.0),
            Point2D::new(3.0, 4.0),
        ];
        let matrix = DistanceMatrix::new(&points);
        // Longest edge is 2 -> 0 (length 5), so the path runs 0, 1, 2
        assert_eq!(open_from_cycle(&[0, 1, 2], &matrix), vec![0, 1, 2]);
        // Rotated cycle: longest edge 2 -> 0 sits in the middle
        assert_eq!(open_from_cycle(&[1, 2, 0], &matrix), vec![0, 1, 2]);
    }

    #[test]
    fn test_open_ties_keep_order() {
        let points = [
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ];
        let matrix = DistanceMatrix::new(&points);
        assert_eq!(open_from_cycle(&[0, 1, 2, 3], &matrix), vec![0, 1, 2, 3]);
        assert_eq!(open_from_cycle(&[0, 1], &matrix), vec![0, 1]);
        assert_eq!(open_from_cycle(&[2], &matrix), vec![2]);
    }

    #[test]
    fn test_empty_tour() {
        let tour = Tour::empty(TourKind::Open);
        assert!(tour.is_empty());
        assert_eq!(tour.length, 0.0);
        assert_eq!(tour.kind, TourKind::Open);
    }
}
