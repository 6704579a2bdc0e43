//! Eulerian circuits and shortcutting
//!
//! The spanning tree and the matching are overlaid into a multigraph in
//! which every vertex has even degree. Hierholzer's algorithm walks every
//! edge exactly once; skipping already-visited vertices then turns the walk
//! into a Hamiltonian cycle that is no longer than the walk itself, since
//! the distances obey the triangle inequality.

/// Undirected multigraph stored as adjacency lists
///
/// Parallel edges are kept; each entry is `(neighbor, edge_id)`.
#[derive(Debug, Clone, Default)]
pub struct Multigraph {
    adjacency: Vec<Vec<(usize, usize)>>,
    edge_count: usize,
}

impl Multigraph {
    /// Create a graph with `vertex_count` vertices and no edges
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        }
    }

    /// Add an undirected edge between `a` and `b`
    pub fn add_edge(&mut self, a: usize, b: usize) {
        let id = self.edge_count;
        self.adjacency[a].push((b, id));
        self.adjacency[b].push((a, id));
        self.edge_count += 1;
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges, counting parallel edges separately
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Degree of vertex `v`
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    /// Check that every vertex has even degree
    pub fn is_even(&self) -> bool {
        self.adjacency.iter().all(|edges| edges.len() % 2 == 0)
    }

    /// Closed walk from `start` using every edge reachable from it exactly once
    ///
    /// Iterative Hierholzer with a per-vertex cursor, O(V + E). The returned
    /// walk starts and ends at `start`. Returns `[start]` for an isolated
    /// vertex and an empty walk when `start` is out of range.
    pub fn eulerian_circuit(&self, start: usize) -> Vec<usize> {
        if start >= self.adjacency.len() {
            return Vec::new();
        }

        let mut used = vec![false; self.edge_count];
        let mut cursor = vec![0usize; self.adjacency.len()];
        let mut stack = vec![start];
        let mut circuit = Vec::with_capacity(self.edge_count + 1);

        while let Some(&v) = stack.last() {
            let edges = &self.adjacency[v];
            while cursor[v] < edges.len() && used[edges[cursor[v]].1] {
                cursor[v] += 1;
            }

            if let Some(&(next, id)) = edges.get(cursor[v]) {
                used[id] = true;
                stack.push(next);
            } else {
                circuit.push(v);
                stack.pop();
            }
        }

        circuit.reverse();
        circuit
    }
}

/// Reduce a walk to its first visit of each vertex
///
/// The result keeps the walk's starting vertex first and lists every vertex
/// below `vertex_count` that the walk touches exactly once.
pub fn shortcut(walk: &[usize], vertex_count: usize) -> Vec<usize> {
    let mut seen = vec![false; vertex_count];
    let mut order = Vec::with_capacity(vertex_count);
    for &v in walk {
        if v < vertex_count && !seen[v] {
            seen[v] = true;
            order.push(v);
        }
    }
    order
}
