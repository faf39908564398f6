//! Scoring candidate solutions against a graph.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bitstring::Bitstring;
use crate::brute_force::BruteForceSolver;
use crate::error::{MisError, MisResult};
use crate::graph::Graph;
use crate::qubo::{QuboEncoder, QuboMatrix};

/// Evaluation of one candidate bitstring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionReport {
    /// The candidate.
    pub bitstring: Bitstring,
    /// QUBO cost of the candidate.
    pub cost: f64,
    /// Selected nodes, ascending.
    pub selected_nodes: Vec<usize>,
    /// Number of selected nodes.
    pub set_size: usize,
    /// True if no edge has both endpoints selected.
    pub is_independent: bool,
    /// Edges with both endpoints selected.
    pub violated_edges: Vec<(usize, usize)>,
}

impl SolutionReport {
    /// Score `bitstring` on `graph` under `qubo`.
    pub fn evaluate(graph: &Graph, qubo: &QuboMatrix, bitstring: &Bitstring) -> MisResult<Self> {
        if bitstring.len() != graph.n_nodes() {
            return Err(MisError::invalid(format!(
                "bitstring '{bitstring}' has {} bits, graph has {} nodes",
                bitstring.len(),
                graph.n_nodes()
            )));
        }
        if qubo.dim() != graph.n_nodes() {
            return Err(MisError::invalid(format!(
                "QUBO dimension {} does not match graph with {} nodes",
                qubo.dim(),
                graph.n_nodes()
            )));
        }

        let cost = qubo.cost(bitstring)?;
        let violated_edges = graph.violated_edges(bitstring.bits());
        Ok(Self {
            bitstring: bitstring.clone(),
            cost,
            selected_nodes: bitstring.selected_nodes(),
            set_size: bitstring.count_ones(),
            is_independent: violated_edges.is_empty(),
            violated_edges,
        })
    }
}

impl std::fmt::Display for SolutionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Bitstring:   {}", self.bitstring)?;
        writeln!(f, "Cost:        {:.1}", self.cost)?;
        writeln!(f, "Nodes:       {:?}", self.selected_nodes)?;
        writeln!(f, "Set size:    {}", self.set_size)?;
        if self.is_independent {
            write!(f, "Independent: yes")
        } else {
            write!(f, "Independent: no ({} violated edges)", self.violated_edges.len())
        }
    }
}

/// Encode `graph` and return the exact optimum found by brute force.
///
/// Ties are resolved towards the smallest bitstring.
pub fn solve_exact(graph: &Graph, encoder: &QuboEncoder) -> MisResult<SolutionReport> {
    let qubo = encoder.encode(graph);
    let best = BruteForceSolver::new().with_top_k(1).solve(&qubo)?;
    let optimum = best
        .into_iter()
        .next()
        .ok_or_else(|| MisError::invalid("exhaustive search returned no assignment"))?;

    let report = SolutionReport::evaluate(graph, &qubo, &optimum.bitstring)?;
    debug!(
        n = graph.n_nodes(),
        set_size = report.set_size,
        cost = report.cost,
        "exact MIS found"
    );
    Ok(report)
}

/// Ratio of a candidate set size to the optimum.
///
/// An empty optimum (zero nodes) yields 1.0.
pub fn approximation_ratio(candidate_size: usize, optimum_size: usize) -> f64 {
    if optimum_size == 0 {
        return 1.0;
    }
    candidate_size as f64 / optimum_size as f64
}
