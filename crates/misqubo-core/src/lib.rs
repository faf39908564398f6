//! Maximum Independent Set problems as QUBO instances
//!
//! This crate builds small test graphs, encodes the MIS objective as a QUBO
//! matrix, and provides an exhaustive ground-truth solver for checking the
//! output of quantum or heuristic samplers.
//!
//! # Overview
//!
//! The pipeline is
//! [`GraphProblemBuilder`] → [`QuboEncoder`] → external solver or
//! [`BruteForceSolver`] → [`SolutionReport`]. The QUBO matrix and its
//! [`IsingModel`] form are the hand-off point to any external solver.
//!
//! # Core Components
//!
//! - **Graphs**: [`Graph`] with canonical edges, [`Coordinates`] for spatial layouts
//! - **Builders**: grid, seeded random and unit-disk graphs via [`GraphProblemBuilder`]
//! - **Encoding**: [`QuboEncoder`] producing a [`QuboMatrix`]
//! - **Search**: [`BruteForceSolver`] with a [`SearchBudget`]
//! - **Verification**: [`Bitstring`], [`SampleCounts`], [`SolutionReport`]
//!
//! # Example: MIS of a 2x2 grid
//!
//! ```rust
//! use misqubo_core::{brute_force_minimize, build_grid_graph, QuboEncoder};
//!
//! // Four nodes with orthogonal and diagonal neighbours: a complete graph
//! let (graph, _coords) = build_grid_graph(4).unwrap();
//! assert_eq!(graph.num_edges(), 6);
//!
//! let qubo = QuboEncoder::default().encode(&graph);
//! let ranked = brute_force_minimize(&qubo, 3).unwrap();
//!
//! // Any single node is a maximum independent set
//! assert_eq!(ranked[0].bitstring.to_string(), "0001");
//! assert_eq!(ranked[0].cost, -10.0);
//! ```
//!
//! # Example: Checking a sampler result
//!
//! ```rust
//! use misqubo_core::{Graph, QuboEncoder, SampleCounts, SolutionReport};
//!
//! let graph = Graph::path(4);
//! let qubo = QuboEncoder::default().encode(&graph);
//!
//! // Sampler output with leading zeros dropped
//! let samples = SampleCounts::from_json(4, r#"{"101": 700, "1111": 300}"#).unwrap();
//! let (top, _) = samples.most_common(1).remove(0);
//!
//! let report = SolutionReport::evaluate(&graph, &qubo, &top).unwrap();
//! assert!(report.is_independent);
//! assert_eq!(report.selected_nodes, vec![1, 3]);
//! ```

pub mod bitstring;
pub mod brute_force;
pub mod builder;
pub mod error;
pub mod graph;
pub mod ising;
pub mod qubo;
pub mod report;
pub mod samples;

pub use bitstring::Bitstring;
pub use brute_force::{
    BruteForceSolver, DEFAULT_TOP_K, MAX_BRUTE_FORCE_DIM, ScoredBitstring, SearchBudget,
    brute_force_minimize,
};
pub use builder::{
    Coordinates, DEFAULT_ADJACENCY_THRESHOLD, GraphProblemBuilder, build_grid_graph,
    build_random_graph, build_unit_disk_graph,
};
pub use error::{MisError, MisResult};
pub use graph::Graph;
pub use ising::IsingModel;
pub use qubo::{DEFAULT_EDGE_PENALTY, DEFAULT_NODE_REWARD, QuboEncoder, QuboMatrix, encode};
pub use report::{SolutionReport, approximation_ratio, solve_exact};
pub use samples::{SampleCounts, most_probable};
