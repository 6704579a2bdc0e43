//! Dense Euclidean distance matrix
//!
//! Built once per optimizer call from the unique travel points and never
//! mutated afterwards. Symmetric, zero diagonal, row-major storage.

use rapidpath_core::Point2D;

/// Symmetric matrix of pairwise Euclidean distances
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Compute all pairwise distances between `points`
    pub fn new(points: &[Point2D]) -> Self {
        let size = points.len();
        let mut data = vec![0.0; size * size];

        for i in 0..size {
            for j in (i + 1)..size {
                let d = points[i].distance(&points[j]);
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }

        Self { size, data }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the matrix covers no points
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Distance between points `i` and `j`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }

    /// Length of an open path visiting `order` in sequence
    pub fn path_length(&self, order: &[usize]) -> f64 {
        order.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Length of the closed cycle through `order`, including the return edge
    pub fn cycle_length(&self, order: &[usize]) -> f64 {
        match (order.first(), order.last()) {
            (Some(&first), Some(&last)) if order.len() > 1 => {
                self.path_length(order) + self.get(last, first)
            }
            _ => 0.0,
        }
    }
}
