//! Run command implementation.
//!
//! `misqubo run --config <pipeline.yaml> [--export <report.json>]`

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;
use tracing::info;

use misqubo_core::{Coordinates, Graph, IsingModel, QuboMatrix, ScoredBitstring, SolutionReport};

use crate::config::Config;

use super::common::{
    build_graph, encoder, print_problem, print_ranked, print_report, solver, spinner,
};

/// Full pipeline output.
#[derive(Debug, Serialize)]
pub struct RunReport {
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Tool version
    pub version: String,
    /// Effective configuration after env overrides
    pub config: Config,
    pub graph: Graph,
    pub coordinates: Option<Coordinates>,
    pub qubo: QuboMatrix,
    pub ising: IsingModel,
    /// Best assignments, ascending cost
    pub ranked: Vec<ScoredBitstring>,
    pub solution: Option<SolutionReport>,
    pub search_time_ms: u64,
}

/// Execute the run command.
pub fn execute(config: Config, export: Option<&str>) -> Result<()> {
    info!(?config, "running pipeline");

    let problem = build_graph(&config.graph)?;
    print_problem(config.graph.kind, &problem);

    let qubo = encoder(&config.qubo).encode(&problem.graph);
    let ising = qubo.to_ising();
    println!(
        "\n  QUBO: {0}x{0}, Ising terms: {1}",
        qubo.dim(),
        ising.num_terms()
    );

    let spinner = spinner("Searching for the maximum independent set...")?;
    let start = Instant::now();
    let result = solver(&config.search).solve(&qubo);
    let search_time_ms = start.elapsed().as_millis() as u64;
    spinner.finish_and_clear();
    let ranked = result.context("Exhaustive search failed")?;

    let solution = ranked
        .first()
        .map(|best| SolutionReport::evaluate(&problem.graph, &qubo, &best.bitstring))
        .transpose()?;

    print_ranked(&ranked);
    if let Some(report) = &solution {
        println!("\n{}", style("Maximum independent set").bold().underlined());
        print_report(report);
    }
    println!("\n  Search time: {} ms", style(search_time_ms).yellow());

    if let Some(path) = export {
        let report = RunReport {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config,
            graph: problem.graph,
            coordinates: problem.coordinates,
            qubo,
            ising,
            ranked,
            solution,
            search_time_ms,
        };
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).with_context(|| format!("Failed to write report: {path}"))?;
        eprintln!("{} Report written to {}", style("OK").green().bold(), path);
    }
    Ok(())
}
