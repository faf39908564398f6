//! Test-instance construction: grid layouts and seeded random graphs.
//!
//! Grid ("square") graphs are unit-disk graphs on an integer lattice, the
//! layout used when nodes stand for atoms in a neutral-atom register. Random
//! graphs follow the G(n, p) model with an explicit seed so experiments are
//! reproducible.

use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MisError, MisResult};
use crate::graph::Graph;

/// Default adjacency threshold in grid units.
///
/// Strictly-less-than comparison: both orthogonal neighbours (distance 1)
/// and diagonal neighbours (distance √2 ≈ 1.414) are adjacent.
pub const DEFAULT_ADJACENCY_THRESHOLD: f64 = 1.5;

/// 2-D positions, one per node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    points: Vec<(f64, f64)>,
}

impl Coordinates {
    /// Create from explicit points. All components must be finite.
    pub fn new(points: Vec<(f64, f64)>) -> MisResult<Self> {
        if let Some(node) = points
            .iter()
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(MisError::invalid(format!(
                "coordinate of node {node} is not finite"
            )));
        }
        Ok(Self { points })
    }

    /// Number of positioned nodes.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no node is positioned.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Position of `node`, if any.
    pub fn get(&self, node: usize) -> Option<(f64, f64)> {
        self.points.get(node).copied()
    }

    /// All positions in node order.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Euclidean distance between two positioned nodes.
    pub fn distance(&self, a: usize, b: usize) -> Option<f64> {
        let (xa, ya) = self.get(a)?;
        let (xb, yb) = self.get(b)?;
        Some((xa - xb).hypot(ya - yb))
    }

    /// Multiply every coordinate by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|&(x, y)| (x * factor, y * factor))
                .collect(),
        }
    }
}

/// Builds graph instances for MIS experiments.
///
/// `spacing` only scales the returned coordinates (e.g. the inter-atom
/// distance of a register); adjacency is always decided in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphProblemBuilder {
    /// Distance between neighbouring grid points in the returned coordinates.
    pub spacing: f64,
    /// Nodes closer than this (in grid units) are adjacent.
    pub adjacency_threshold: f64,
}

impl Default for GraphProblemBuilder {
    fn default() -> Self {
        Self {
            spacing: 1.0,
            adjacency_threshold: DEFAULT_ADJACENCY_THRESHOLD,
        }
    }
}

impl GraphProblemBuilder {
    /// Create a builder with unit spacing and the default threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the coordinate spacing.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the adjacency threshold (grid units).
    pub fn with_adjacency_threshold(mut self, threshold: f64) -> Self {
        self.adjacency_threshold = threshold;
        self
    }

    /// Place `num_nodes` nodes row-major on the smallest square grid that
    /// holds them and connect every pair closer than the threshold.
    ///
    /// ```text
    /// 4 nodes (2x2):      5 nodes (3x3, truncated):
    /// 0 --- 1             0 --- 1 --- 2
    /// |  X  |             |  X  |  /
    /// 2 --- 3             3 --- 4
    /// ```
    pub fn grid(&self, num_nodes: usize) -> MisResult<(Graph, Coordinates)> {
        if num_nodes == 0 {
            return Err(MisError::invalid("grid graph needs at least one node"));
        }
        self.validate()?;

        let side = grid_side(num_nodes);
        let unit = Coordinates {
            points: (0..num_nodes)
                .map(|k| ((k / side) as f64, (k % side) as f64))
                .collect(),
        };
        let graph = unit_disk_edges(&unit, self.adjacency_threshold);
        debug!(
            num_nodes,
            side,
            edges = graph.num_edges(),
            "built grid graph"
        );

        Ok((graph, unit.scaled(self.spacing)))
    }

    /// Generate a G(n, p) random graph.
    ///
    /// Pairs `(i, j)` with `i < j` are visited in lexicographic order and each
    /// is kept with probability `edge_probability`. The same arguments always
    /// yield the same edge set.
    pub fn random(&self, num_nodes: usize, edge_probability: f64, seed: u64) -> MisResult<Graph> {
        if !edge_probability.is_finite() || !(0.0..=1.0).contains(&edge_probability) {
            return Err(MisError::invalid(format!(
                "edge probability must be in [0, 1], got {edge_probability}"
            )));
        }

        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let mut edges = Vec::new();
        for i in 0..num_nodes {
            for j in (i + 1)..num_nodes {
                if rng.gen_bool(edge_probability) {
                    edges.push((i, j));
                }
            }
        }
        debug!(
            num_nodes,
            edge_probability,
            seed,
            edges = edges.len(),
            "built random graph"
        );

        Ok(Graph::from_canonical(num_nodes, edges))
    }

    /// Connect every pair of `coords` closer than `radius`.
    pub fn unit_disk(&self, coords: &Coordinates, radius: f64) -> MisResult<Graph> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MisError::invalid(format!(
                "unit-disk radius must be positive, got {radius}"
            )));
        }
        Ok(unit_disk_edges(coords, radius))
    }

    fn validate(&self) -> MisResult<()> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(MisError::invalid(format!(
                "spacing must be positive, got {}",
                self.spacing
            )));
        }
        if !self.adjacency_threshold.is_finite() || self.adjacency_threshold <= 0.0 {
            return Err(MisError::invalid(format!(
                "adjacency threshold must be positive, got {}",
                self.adjacency_threshold
            )));
        }
        Ok(())
    }
}

/// Build a grid graph with the default builder.
pub fn build_grid_graph(num_nodes: usize) -> MisResult<(Graph, Coordinates)> {
    GraphProblemBuilder::default().grid(num_nodes)
}

/// Build a seeded random graph with the default builder.
pub fn build_random_graph(num_nodes: usize, edge_probability: f64, seed: u64) -> MisResult<Graph> {
    GraphProblemBuilder::default().random(num_nodes, edge_probability, seed)
}

/// Build the unit-disk graph of `coords` with the given radius.
pub fn build_unit_disk_graph(coords: &Coordinates, radius: f64) -> MisResult<Graph> {
    GraphProblemBuilder::default().unit_disk(coords, radius)
}

/// Smallest `s` with `s * s >= n`.
fn grid_side(n: usize) -> usize {
    let mut side = (n as f64).sqrt() as usize;
    while side * side < n {
        side += 1;
    }
    side.max(1)
}

fn unit_disk_edges(coords: &Coordinates, radius: f64) -> Graph {
    let n = coords.len();
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            let (xi, yi) = coords.points[i];
            let (xj, yj) = coords.points[j];
            if (xi - xj).hypot(yi - yj) < radius {
                edges.push((i, j));
            }
        }
    }
    Graph::from_canonical(n, edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_side() {
        assert_eq!(grid_side(1), 1);
        assert_eq!(grid_side(4), 2);
        assert_eq!(grid_side(5), 3);
        assert_eq!(grid_side(9), 3);
        assert_eq!(grid_side(10), 4);
    }

    #[test]
    fn test_grid_4_is_complete() {
        let (g, coords) = build_grid_graph(4).unwrap();
        assert_eq!(
            coords.points(),
            &[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)]
        );
        assert_eq!(g.edges(), &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_grid_5_truncates_row_major() {
        let (g, coords) = build_grid_graph(5).unwrap();
        assert_eq!(coords.len(), 5);
        assert_eq!(coords.get(3), Some((1.0, 0.0)));
        assert_eq!(coords.get(4), Some((1.0, 1.0)));
        // 2 sits at (0, 2): adjacent to 1 (orthogonal) and 4 (diagonal) only
        assert_eq!(g.neighbors(2), vec![1, 4]);
        assert!(!g.has_edge(0, 2));
    }

    #[test]
    fn test_grid_single_node() {
        let (g, coords) = build_grid_graph(1).unwrap();
        assert_eq!(g.n_nodes(), 1);
        assert_eq!(g.num_edges(), 0);
        assert_eq!(coords.points(), &[(0.0, 0.0)]);
    }

    #[test]
    fn test_grid_rejects_zero() {
        assert!(matches!(
            build_grid_graph(0),
            Err(MisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_spacing_scales_coordinates_only() {
        let (plain, _) = build_grid_graph(6).unwrap();
        let (g, coords) = GraphProblemBuilder::new()
            .with_spacing(8.0)
            .grid(6)
            .unwrap();
        assert_eq!(g, plain);
        assert_eq!(coords.get(4), Some((8.0, 8.0)));
        assert_eq!(coords.distance(0, 1), Some(8.0));
    }

    #[test]
    fn test_threshold_excluding_diagonals() {
        let (g, _) = GraphProblemBuilder::new()
            .with_adjacency_threshold(1.2)
            .grid(4)
            .unwrap();
        assert_eq!(g.edges(), &[(0, 1), (0, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_invalid_spacing() {
        assert!(GraphProblemBuilder::new().with_spacing(0.0).grid(4).is_err());
        assert!(
            GraphProblemBuilder::new()
                .with_spacing(f64::NAN)
                .grid(4)
                .is_err()
        );
    }

    #[test]
    fn test_random_deterministic() {
        let a = build_random_graph(12, 0.4, 42).unwrap();
        let b = build_random_graph(12, 0.4, 42).unwrap();
        assert_eq!(a, b);
        assert!(a.num_edges() > 0);
    }

    #[test]
    fn test_random_extremes() {
        assert_eq!(build_random_graph(7, 0.0, 1).unwrap().num_edges(), 0);
        assert_eq!(
            build_random_graph(7, 1.0, 1).unwrap(),
            Graph::complete(7)
        );
    }

    #[test]
    fn test_random_rejects_bad_probability() {
        assert!(build_random_graph(4, -0.1, 0).is_err());
        assert!(build_random_graph(4, 1.5, 0).is_err());
        assert!(build_random_graph(4, f64::NAN, 0).is_err());
    }

    #[test]
    fn test_random_zero_nodes() {
        let g = build_random_graph(0, 0.5, 3).unwrap();
        assert_eq!(g.n_nodes(), 0);
    }

    #[test]
    fn test_unit_disk() {
        let coords = Coordinates::new(vec![(0.0, 0.0), (0.0, 5.0), (0.0, 12.0)]).unwrap();
        let g = build_unit_disk_graph(&coords, 7.5).unwrap();
        assert_eq!(g.edges(), &[(0, 1), (1, 2)]);
        assert!(build_unit_disk_graph(&coords, 0.0).is_err());
    }

    #[test]
    fn test_coordinates_reject_nan() {
        assert!(Coordinates::new(vec![(0.0, f64::INFINITY)]).is_err());
    }
}
