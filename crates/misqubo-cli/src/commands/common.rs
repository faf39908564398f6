//! Shared helpers for CLI commands.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use misqubo_core::{
    BruteForceSolver, Coordinates, Graph, GraphProblemBuilder, QuboEncoder, ScoredBitstring,
    SearchBudget, SolutionReport,
};

use crate::config::{GraphConfig, GraphKind, QuboConfig, SearchConfig};

/// Graph construction flags shared by every problem command.
#[derive(Args, Debug, Clone)]
pub struct GraphArgs {
    /// Graph family
    #[arg(short, long, value_enum, default_value = "grid")]
    pub kind: GraphKind,

    /// Number of nodes
    #[arg(short, long, default_value = "9")]
    pub nodes: usize,

    /// Edge probability (random graphs)
    #[arg(short, long, default_value = "0.5")]
    pub probability: f64,

    /// RNG seed (random graphs)
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Coordinate spacing (grid graphs)
    #[arg(long, default_value = "1.0")]
    pub spacing: f64,

    /// Adjacency threshold in grid units (grid graphs)
    #[arg(long, default_value = "1.5")]
    pub threshold: f64,
}

impl From<GraphArgs> for GraphConfig {
    fn from(args: GraphArgs) -> Self {
        GraphConfig {
            kind: args.kind,
            num_nodes: args.nodes,
            edge_probability: args.probability,
            seed: args.seed,
            spacing: args.spacing,
            adjacency_threshold: args.threshold,
        }
    }
}

/// QUBO constant flags.
#[derive(Args, Debug, Clone)]
pub struct QuboArgs {
    /// Reward per selected node
    #[arg(long, default_value = "10.0")]
    pub node_reward: f64,

    /// Penalty per edge
    #[arg(long, default_value = "20.0")]
    pub edge_penalty: f64,
}

impl From<QuboArgs> for QuboConfig {
    fn from(args: QuboArgs) -> Self {
        QuboConfig {
            node_reward: args.node_reward,
            edge_penalty: args.edge_penalty,
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output
    Table,
    /// Machine-readable JSON on stdout
    Json,
}

/// A built problem instance.
pub struct Problem {
    pub graph: Graph,
    pub coordinates: Option<Coordinates>,
}

/// Build the graph described by `config`.
pub fn build_graph(config: &GraphConfig) -> Result<Problem> {
    let builder = GraphProblemBuilder::new()
        .with_spacing(config.spacing)
        .with_adjacency_threshold(config.adjacency_threshold);
    let n = config.num_nodes;

    let problem = match config.kind {
        GraphKind::Grid => {
            let (graph, coords) = builder.grid(n)?;
            Problem {
                graph,
                coordinates: Some(coords),
            }
        }
        GraphKind::Random => Problem {
            graph: builder.random(n, config.edge_probability, config.seed)?,
            coordinates: None,
        },
        GraphKind::Star => {
            if n == 0 {
                anyhow::bail!("A star graph needs at least one node");
            }
            Problem {
                graph: Graph::star(n - 1),
                coordinates: None,
            }
        }
        GraphKind::Path => Problem {
            graph: Graph::path(n),
            coordinates: None,
        },
    };
    Ok(problem)
}

/// Encoder for `config`, warning when minima may not be independent sets.
pub fn encoder(config: &QuboConfig) -> QuboEncoder {
    let encoder = QuboEncoder::new(config.node_reward, config.edge_penalty);
    if !encoder.enforces_independence() {
        tracing::warn!(
            node_reward = config.node_reward,
            edge_penalty = config.edge_penalty,
            "edge penalty does not exceed node reward; optimal assignments may violate edges"
        );
    }
    encoder
}

/// Solver for `config`.
pub fn solver(config: &SearchConfig) -> BruteForceSolver {
    let mut budget = SearchBudget::unlimited();
    if let Some(ms) = config.timeout_ms {
        budget = budget.with_deadline(Duration::from_millis(ms));
    }
    if let Some(max) = config.max_evaluations {
        budget = budget.with_max_evaluations(max);
    }
    BruteForceSolver::new()
        .with_top_k(config.top_k)
        .with_budget(budget)
}

/// Spinner shown on stderr while a search runs.
pub fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .context("Invalid spinner template")?,
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

/// Print a graph summary, its edges and any coordinates.
pub fn print_problem(kind: GraphKind, problem: &Problem) {
    let graph = &problem.graph;
    println!(
        "{} {} graph: {} nodes, {} edges (density {:.2})",
        style("→").cyan().bold(),
        style(kind).yellow(),
        graph.n_nodes(),
        graph.num_edges(),
        graph.density()
    );

    for &(a, b) in graph.edges() {
        println!("  {a} -- {b}");
    }

    if let Some(coords) = &problem.coordinates {
        println!("\n  Coordinates:");
        for (node, (x, y)) in coords.points().iter().enumerate() {
            println!("  {:>3}: ({x:.2}, {y:.2})", style(node).cyan());
        }
    }
}

/// Print ranked assignments with a cost column.
pub fn print_ranked(ranked: &[ScoredBitstring]) {
    println!(
        "\n{} Best {} assignments:",
        style("✓").green().bold(),
        ranked.len()
    );
    for (rank, scored) in ranked.iter().enumerate() {
        println!(
            "  {:>2}. {}  cost {:>8.1}  size {}",
            rank + 1,
            style(&scored.bitstring).cyan(),
            scored.cost,
            scored.bitstring.count_ones()
        );
    }
}

/// Print a solution report.
pub fn print_report(report: &SolutionReport) {
    let verdict = if report.is_independent {
        style("independent").green().bold()
    } else {
        style("not independent").red().bold()
    };
    println!(
        "\n  {}  cost {:.1}  size {}  {}",
        style(&report.bitstring).cyan(),
        report.cost,
        report.set_size,
        verdict
    );
    println!("  Nodes: {:?}", report.selected_nodes);
    for (a, b) in &report.violated_edges {
        println!("  {} {a} -- {b}", style("✗").red());
    }
}
