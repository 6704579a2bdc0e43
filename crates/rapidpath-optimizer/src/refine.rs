//! 2-opt refinement of a closed tour
//!
//! Repeatedly reverses the segment between two non-adjacent edges whenever
//! that strictly shortens the cycle. The first vertex never moves, so a
//! refined tour still starts where the construction started.

use crate::distance::DistanceMatrix;
use tracing::debug;

/// Relative improvement below which a move is treated as noise
const MIN_RELATIVE_GAIN: f64 = 1e-9;

/// Improve the closed cycle `order` in place with first-improvement 2-opt
///
/// Runs at most `max_passes` sweeps over all edge pairs and stops early once
/// a sweep finds nothing. Returns the number of reversals applied. Cycles
/// with fewer than four vertices have no non-adjacent edge pair and are left
/// untouched.
pub fn two_opt(order: &mut [usize], matrix: &DistanceMatrix, max_passes: usize) -> usize {
    let n = order.len();
    if n < 4 {
        return 0;
    }

    let mut moves = 0;
    for pass in 0..max_passes {
        let mut improved = false;

        for i in 0..n - 1 {
            for j in (i + 2)..n {
                // Edges (i, i+1) and (n-1, 0) share vertex 0
                if i == 0 && j == n - 1 {
                    continue;
                }

                let a = order[i];
                let b = order[i + 1];
                let c = order[j];
                let d = order[(j + 1) % n];

                let current = matrix.get(a, b) + matrix.get(c, d);
                let candidate = matrix.get(a, c) + matrix.get(b, d);

                if candidate - current < -MIN_RELATIVE_GAIN * current.max(1.0) {
                    order[i + 1..=j].reverse();
                    moves += 1;
                    improved = true;
                }
            }
        }

        if !improved {
            debug!("2-opt converged after {} passes, {} moves", pass + 1, moves);
            break;
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapidpath_core::Point2D;

    fn square() -> Vec<Point2D> {
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_uncrosses_bow_tie() {
        let matrix = DistanceMatrix::new(&square());
        let mut order = vec![0, 2, 1, 3];
        let before = matrix.cycle_length(&order);

        let moves = two_opt(&mut order, &matrix, 10);

        assert!(moves >= 1);
        assert_eq!(order[0], 0);
        assert_eq!(matrix.cycle_length(&order), 40.0);
        assert!(matrix.cycle_length(&order) < before);
    }

    #[test]
    fn test_optimal_tour_is_unchanged() {
        let matrix = DistanceMatrix::new(&square());
        let mut order = vec![0, 1, 2, 3];
        assert_eq!(two_opt(&mut order, &matrix, 10), 0);
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_small_tours_are_untouched() {
        let matrix = DistanceMatrix::new(&square()[..3]);
        let mut order = vec![0, 2, 1];
        assert_eq!(two_opt(&mut order, &matrix, 10), 0);
        assert_eq!(order, vec![0, 2, 1]);
    }

    #[test]
    fn test_zero_passes_does_nothing() {
        let matrix = DistanceMatrix::new(&square());
        let mut order = vec![0, 2, 1, 3];
        assert_eq!(two_opt(&mut order, &matrix, 0), 0);
        assert_eq!(order, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_never_lengthens_and_keeps_permutation() {
        let points: Vec<Point2D> = (0..30)
            .map(|i| {
                let angle = i as f64 * 2.399_963;
                let radius = 4.0 * (i as f64 + 1.0).sqrt();
                Point2D::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        let matrix = DistanceMatrix::new(&points);

        // Deliberately poor starting order: stride through the spiral
        let mut order: Vec<usize> = (0..30).map(|i| (i * 7) % 30).collect();
        let before = matrix.cycle_length(&order);

        two_opt(&mut order, &matrix, 50);

        assert!(matrix.cycle_length(&order) <= before);
        assert_eq!(order[0], 0);
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..30).collect::<Vec<_>>());
    }
}
