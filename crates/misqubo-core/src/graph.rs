//! Undirected graphs for the Maximum Independent Set problem.
//!
//! MIS: Given a graph G = (V, E), find the largest subset S ⊆ V such that
//! no edge of E has both endpoints in S.
//!
//! This is an NP-hard combinatorial optimization problem; in neutral-atom
//! hardware it appears natively as the Rydberg blockade on unit-disk graphs.

use serde::{Deserialize, Serialize};

use crate::error::{MisError, MisResult};

/// An undirected, unweighted, simple graph on nodes `0..n_nodes`.
///
/// Edges are stored canonically as `(low, high)`, sorted and de-duplicated,
/// so two graphs with the same edge set compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct Graph {
    /// Number of nodes.
    n_nodes: usize,
    /// Edges as (`node_a`, `node_b`) with `node_a < node_b`.
    edges: Vec<(usize, usize)>,
}

/// Unvalidated wire form; deserialization goes through [`Graph::new`].
#[derive(Deserialize)]
struct RawGraph {
    n_nodes: usize,
    edges: Vec<(usize, usize)>,
}

impl TryFrom<RawGraph> for Graph {
    type Error = MisError;

    fn try_from(raw: RawGraph) -> MisResult<Self> {
        Graph::new(raw.n_nodes, raw.edges)
    }
}

impl Graph {
    /// Create a new graph, validating every edge.
    ///
    /// Endpoints must be `< n_nodes` and distinct. Edge orientation and
    /// duplicates are ignored.
    pub fn new(
        n_nodes: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> MisResult<Self> {
        let mut canonical = Vec::new();
        for (a, b) in edges {
            if a >= n_nodes || b >= n_nodes {
                return Err(MisError::invalid(format!(
                    "edge ({a}, {b}) references a node outside 0..{n_nodes}"
                )));
            }
            if a == b {
                return Err(MisError::invalid(format!("self-loop on node {a}")));
            }
            canonical.push((a.min(b), a.max(b)));
        }
        canonical.sort_unstable();
        canonical.dedup();
        Ok(Self {
            n_nodes,
            edges: canonical,
        })
    }

    /// Build from edges already known to be valid.
    pub(crate) fn from_canonical(n_nodes: usize, edges: Vec<(usize, usize)>) -> Self {
        debug_assert!(edges.iter().all(|&(a, b)| a < b && b < n_nodes));
        debug_assert!(edges.windows(2).all(|w| w[0] < w[1]));
        Self { n_nodes, edges }
    }

    /// Create a graph with no edges.
    pub fn empty(n_nodes: usize) -> Self {
        Self::from_canonical(n_nodes, vec![])
    }

    /// Create a complete graph K_n.
    pub fn complete(n_nodes: usize) -> Self {
        let edges = (0..n_nodes)
            .flat_map(|i| ((i + 1)..n_nodes).map(move |j| (i, j)))
            .collect();
        Self::from_canonical(n_nodes, edges)
    }

    /// Create a star: centre node 0 joined to `leaves` outer nodes.
    ///
    /// ```text
    ///     1
    ///     |
    /// 4 - 0 - 2
    ///     |
    ///     3
    /// ```
    ///
    /// The MIS is the set of leaves.
    pub fn star(leaves: usize) -> Self {
        Self::from_canonical(leaves + 1, (1..=leaves).map(|leaf| (0, leaf)).collect())
    }

    /// Create a path `0 - 1 - ... - (n-1)`.
    pub fn path(n_nodes: usize) -> Self {
        let edges = (1..n_nodes).map(|i| (i - 1, i)).collect();
        Self::from_canonical(n_nodes, edges)
    }

    /// Get the number of nodes.
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Edges as canonical `(low, high)` pairs in ascending order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Get the number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Check whether `a` and `b` are adjacent.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges.binary_search(&(a.min(b), a.max(b))).is_ok()
    }

    /// Number of edges touching `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.edges
            .iter()
            .filter(|&&(a, b)| a == node || b == node)
            .count()
    }

    /// Nodes adjacent to `node`, ascending.
    pub fn neighbors(&self, node: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .edges
            .iter()
            .filter_map(|&(a, b)| match (a == node, b == node) {
                (true, _) => Some(b),
                (_, true) => Some(a),
                _ => None,
            })
            .collect();
        out.sort_unstable();
        out
    }

    /// Edge density `m / (n choose 2)`; 0 for graphs with fewer than two nodes.
    pub fn density(&self) -> f64 {
        if self.n_nodes < 2 {
            return 0.0;
        }
        let pairs = self.n_nodes * (self.n_nodes - 1) / 2;
        self.edges.len() as f64 / pairs as f64
    }

    /// Edges with both endpoints selected.
    ///
    /// `assignment[i] = true` means node i is in the candidate set.
    pub fn violated_edges(&self, assignment: &[bool]) -> Vec<(usize, usize)> {
        self.edges
            .iter()
            .filter(|&&(a, b)| {
                assignment.get(a).copied().unwrap_or(false)
                    && assignment.get(b).copied().unwrap_or(false)
            })
            .copied()
            .collect()
    }

    /// Check whether the selected nodes form an independent set.
    pub fn is_independent_set(&self, assignment: &[bool]) -> bool {
        self.violated_edges(assignment).is_empty()
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Graph ({} nodes, {} edges):",
            self.n_nodes,
            self.edges.len()
        )?;
        for (a, b) in &self.edges {
            writeln!(f, "  {a} -- {b}")?;
        }
        Ok(())
    }
}
