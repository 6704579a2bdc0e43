//! Travel Path Optimizer
//!
//! Orders unique travel points into a short tour with Christofides'
//! construction:
//!
//! 1. Dense distance matrix over the points
//! 2. Minimum spanning tree (Prim)
//! 3. Minimum-weight perfect matching of the odd-degree tree vertices
//! 4. Eulerian circuit of tree plus matching, shortcut to a Hamiltonian cycle
//!
//! An optional 2-opt pass then removes crossings. The closed result is at
//! most 1.5 times the optimal cycle; an open tour drops the longest edge of
//! that cycle.

use crate::distance::DistanceMatrix;
use crate::euler::{shortcut, Multigraph};
use crate::matching::min_weight_perfect_matching;
use crate::mst::minimum_spanning_tree;
use crate::refine::two_opt;
use crate::tour::{open_from_cycle, Tour, TourKind};
use rapidpath_core::{GeometryError, OptimizerError, Point2D};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default upper bound on the number of points per call
pub const DEFAULT_MAX_POINTS: usize = 2000;

/// Default number of 2-opt sweeps
pub const DEFAULT_MAX_REFINE_PASSES: usize = 50;

/// Optimizer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerSettings {
    /// Closed cycle or open path
    pub tour_kind: TourKind,
    /// Run 2-opt after the Christofides construction
    pub refine: bool,
    /// Upper bound on 2-opt sweeps
    pub max_refine_passes: usize,
    /// Largest accepted input; larger inputs fail with `TooManyPoints`
    pub max_points: usize,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            tour_kind: TourKind::Closed,
            refine: true,
            max_refine_passes: DEFAULT_MAX_REFINE_PASSES,
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

/// Intermediate weights of one optimizer run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TourStats {
    /// Spanning tree weight, a lower bound on the optimal closed tour
    pub mst_weight: f64,
    /// Weight of the odd-vertex matching
    pub matching_weight: f64,
    /// Closed length straight out of the construction
    pub christofides_length: f64,
    /// Closed length after refinement (equal to `christofides_length` without it)
    pub refined_length: f64,
    /// Number of odd-degree tree vertices
    pub odd_vertices: usize,
}

/// Travel path optimizer
#[derive(Debug, Clone, Default)]
pub struct TravelOptimizer {
    settings: OptimizerSettings,
}

impl TravelOptimizer {
    /// Create an optimizer with the given settings
    pub fn new(settings: OptimizerSettings) -> Self {
        Self { settings }
    }

    /// Active settings
    pub fn settings(&self) -> &OptimizerSettings {
        &self.settings
    }

    /// Order `points` into a short tour
    ///
    /// # Errors
    /// [`OptimizerError::InvalidGeometry`] for a NaN or infinite coordinate,
    /// [`OptimizerError::TooManyPoints`] above `max_points`.
    pub fn optimize(&self, points: &[Point2D]) -> Result<Tour, OptimizerError> {
        self.optimize_with_stats(points).map(|(tour, _)| tour)
    }

    /// Order `points` and report the intermediate weights
    pub fn optimize_with_stats(
        &self,
        points: &[Point2D],
    ) -> Result<(Tour, TourStats), OptimizerError> {
        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(GeometryError::NonFinitePoint {
                index,
                x: p.x,
                y: p.y,
            }
            .into());
        }

        let n = points.len();
        if n > self.settings.max_points {
            return Err(OptimizerError::TooManyPoints {
                count: n,
                limit: self.settings.max_points,
            });
        }

        let kind = self.settings.tour_kind;
        if n == 0 {
            return Ok((Tour::empty(kind), TourStats::default()));
        }

        let matrix = DistanceMatrix::new(points);
        if n == 1 {
            return Ok((
                Tour::from_order(vec![0], points, &matrix, kind),
                TourStats::default(),
            ));
        }

        let tree = minimum_spanning_tree(&matrix);
        let odd = tree.odd_vertices(n);
        debug!(
            "Spanning tree over {} points: weight {:.4}, {} odd vertices",
            n,
            tree.weight,
            odd.len()
        );

        let matching = min_weight_perfect_matching(&matrix, &odd)?;

        let mut graph = Multigraph::new(n);
        for &(a, b) in tree.edges.iter().chain(&matching.pairs) {
            graph.add_edge(a, b);
        }

        let circuit = graph.eulerian_circuit(0);
        let mut order = shortcut(&circuit, n);
        let christofides_length = matrix.cycle_length(&order);
        debug!(
            "Eulerian circuit of {} edges shortcut to {} stops, length {:.4}",
            graph.edge_count(),
            order.len(),
            christofides_length
        );

        let refined_length = if self.settings.refine {
            let moves = two_opt(&mut order, &matrix, self.settings.max_refine_passes);
            let length = matrix.cycle_length(&order);
            debug!("2-opt applied {} moves, length {:.4}", moves, length);
            length
        } else {
            christofides_length
        };

        if kind == TourKind::Open {
            order = open_from_cycle(&order, &matrix);
        }

        let stats = TourStats {
            mst_weight: tree.weight,
            matching_weight: matching.weight,
            christofides_length,
            refined_length,
            odd_vertices: odd.len(),
        };

        Ok((Tour::from_order(order, points, &matrix, kind), stats))
    }
}

/// Order `points` into a closed tour with default settings
pub fn optimize(points: &[Point2D]) -> Result<Tour, OptimizerError> {
    TravelOptimizer::default().optimize(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_empty_input() {
        let tour = optimize(&[]).unwrap();
        assert!(tour.is_empty());
        assert_eq!(tour.length, 0.0);
        assert_eq!(tour.kind, TourKind::Closed);
    }

    #[test]
    fn test_single_point() {
        let tour = optimize(&[Point2D::new(5.0, 5.0)]).unwrap();
        assert_eq!(tour.order, vec![0]);
        assert_eq!(tour.points, vec![Point2D::new(5.0, 5.0)]);
        assert_eq!(tour.length, 0.0);
    }

    #[test]
    fn test_two_points_closed_and_open() {
        let points = [Point2D::new(0.0, 0.0), Point2D::new(3.0, 4.0)];
        let tour = optimize(&points).unwrap();
        assert_eq!(tour.order, vec![0, 1]);
        assert_eq!(tour.length, 10.0);

        let open = TravelOptimizer::new(OptimizerSettings {
            tour_kind: TourKind::Open,
            ..OptimizerSettings::default()
        })
        .optimize(&points)
        .unwrap();
        assert_eq!(open.order, vec![0, 1]);
        assert_eq!(open.length, 5.0);
    }

    #[test]
    fn test_square_perimeter() {
        let tour = optimize(&square()).unwrap();
        assert_eq!(tour.order, vec![0, 1, 2, 3]);
        assert_eq!(tour.length, 40.0);
    }

    #[test]
    fn test_square_open_path() {
        let optimizer = TravelOptimizer::new(OptimizerSettings {
            tour_kind: TourKind::Open,
            ..OptimizerSettings::default()
        });
        let tour = optimizer.optimize(&square()).unwrap();
        assert_eq!(tour.order, vec![0, 1, 2, 3]);
        assert_eq!(tour.length, 30.0);
        assert_eq!(tour.kind, TourKind::Open);
    }

    #[test]
    fn test_square_stats() {
        let (_, stats) = TravelOptimizer::default()
            .optimize_with_stats(&square())
            .unwrap();
        assert_eq!(stats.mst_weight, 30.0);
        assert_eq!(stats.matching_weight, 10.0);
        assert_eq!(stats.odd_vertices, 2);
        assert_eq!(stats.christofides_length, 40.0);
        assert_eq!(stats.refined_length, 40.0);
    }

    #[test]
    fn test_non_finite_point_is_rejected() {
        let points = [Point2D::new(0.0, 0.0), Point2D::new(f64::NAN, 1.0)];
        let err = optimize(&points).unwrap_err();
        assert!(matches!(
            err,
            OptimizerError::InvalidGeometry(GeometryError::NonFinitePoint { index: 1, .. })
        ));
    }

    #[test]
    fn test_too_many_points() {
        let optimizer = TravelOptimizer::new(OptimizerSettings {
            max_points: 3,
            ..OptimizerSettings::default()
        });
        let err = optimizer.optimize(&square()).unwrap_err();
        assert_eq!(err, OptimizerError::TooManyPoints { count: 4, limit: 3 });
    }

    #[test]
    fn test_collinear_points() {
        let points: Vec<Point2D> = [4.0, 0.0, 3.0, 1.0, 2.0]
            .iter()
            .map(|&x| Point2D::new(x, 7.0))
            .collect();
        let tour = optimize(&points).unwrap();
        assert_eq!(tour.len(), 5);
        assert!((tour.length - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_refinement_can_be_disabled() {
        let optimizer = TravelOptimizer::new(OptimizerSettings {
            refine: false,
            ..OptimizerSettings::default()
        });
        let (tour, stats) = optimizer.optimize_with_stats(&square()).unwrap();
        assert_eq!(stats.refined_length, stats.christofides_length);
        assert_eq!(tour.length, stats.christofides_length);
    }

    #[test]
    fn test_settings_deserialize_with_defaults() {
        let settings: OptimizerSettings =
            serde_json::from_str(r#"{"tour_kind":"open","max_points":10}"#).unwrap();
        assert_eq!(settings.tour_kind, TourKind::Open);
        assert_eq!(settings.max_points, 10);
        assert!(settings.refine);
        assert_eq!(settings.max_refine_passes, DEFAULT_MAX_REFINE_PASSES);
    }
}
