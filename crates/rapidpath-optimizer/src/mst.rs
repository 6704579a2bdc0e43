//! Minimum spanning tree over the complete distance graph
//!
//! Prim's algorithm on the dense matrix, O(n^2) time and O(n) extra memory.
//! The vertex with the smallest connection cost is added next; ties go to
//! the lowest vertex index, and a vertex only changes parent on a strictly
//! shorter edge, which keeps the tree deterministic for a given input order.

use crate::distance::DistanceMatrix;

/// Edges and total weight of a spanning tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpanningTree {
    /// Tree edges as (parent, child) vertex pairs, in insertion order
    pub edges: Vec<(usize, usize)>,
    /// Sum of edge weights
    pub weight: f64,
}

impl SpanningTree {
    /// Degree of every vertex in a tree over `vertex_count` vertices
    pub fn degrees(&self, vertex_count: usize) -> Vec<usize> {
        let mut degrees = vec![0; vertex_count];
        for &(a, b) in &self.edges {
            degrees[a] += 1;
            degrees[b] += 1;
        }
        degrees
    }

    /// Vertices with odd degree, ascending
    ///
    /// Always an even number of vertices (handshake lemma).
    pub fn odd_vertices(&self, vertex_count: usize) -> Vec<usize> {
        self.degrees(vertex_count)
            .into_iter()
            .enumerate()
            .filter(|&(_, degree)| degree % 2 == 1)
            .map(|(v, _)| v)
            .collect()
    }
}

/// Compute a minimum spanning tree of the complete graph described by `matrix`
pub fn minimum_spanning_tree(matrix: &DistanceMatrix) -> SpanningTree {
    let n = matrix.len();
    let mut tree = SpanningTree {
        edges: Vec::with_capacity(n.saturating_sub(1)),
        weight: 0.0,
    };

    if n == 0 {
        return tree;
    }

    let mut in_tree = vec![false; n];
    let mut key = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    key[0] = 0.0;

    for _ in 0..n {
        let mut next: Option<usize> = None;
        for v in 0..n {
            if in_tree[v] {
                continue;
            }
            match next {
                Some(u) if key[v] >= key[u] => {}
                _ => next = Some(v),
            }
        }

        let Some(u) = next else {
            break;
        };
        in_tree[u] = true;

        if let Some(p) = parent[u] {
            tree.edges.push((p, u));
            tree.weight += matrix.get(p, u);
        }

        for v in 0..n {
            if !in_tree[v] {
                let d = matrix.get(u, v);
                if d < key[v] {
                    key[v] = d;
                    parent[v] = Some(u);
                }
            }
        }
    }

    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapidpath_core::Point2D;

    #[test]
    fn test_empty_and_single() {
        let tree = minimum_spanning_tree(&DistanceMatrix::new(&[]));
        assert!(tree.edges.is_empty());
        assert_eq!(tree.weight, 0.0);

        let tree = minimum_spanning_tree(&DistanceMatrix::new(&[Point2D::new(1.0, 1.0)]));
        assert!(tree.edges.is_empty());
        assert_eq!(tree.weight, 0.0);
    }

    #[test]
    fn test_square_tree_uses_lowest_index_ties() {
        let points = [
            Point2D::new(0.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 10.0),
            Point2D::new(0.0, 10.0),
        ];
        let tree = minimum_spanning_tree(&DistanceMatrix::new(&points));

        assert_eq!(tree.edges, vec![(0, 1), (1, 2), (0, 3)]);
        assert_eq!(tree.weight, 30.0);
        assert_eq!(tree.odd_vertices(4), vec![2, 3]);
    }

    #[test]
    fn test_collinear_points_form_a_chain() {
        let points: Vec<Point2D> = (0..6).map(|i| Point2D::new(i as f64 * 2.0, 5.0)).collect();
        let tree = minimum_spanning_tree(&DistanceMatrix::new(&points));

        assert_eq!(tree.edges.len(), 5);
        assert_eq!(tree.weight, 10.0);
        assert_eq!(tree.odd_vertices(6), vec![0, 5]);
    }

    #[test]
    fn test_odd_vertex_count_is_even() {
        let points: Vec<Point2D> = (0..25)
            .map(|i| {
                let angle = i as f64 * 2.399_963;
                let radius = (i as f64).sqrt();
                Point2D::new(radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        let tree = minimum_spanning_tree(&DistanceMatrix::new(&points));

        assert_eq!(tree.edges.len(), 24);
        assert_eq!(tree.odd_vertices(points.len()).len() % 2, 0);
    }
}
