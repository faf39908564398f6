//! Solve command implementation.

use std::time::Instant;

use anyhow::{Context, Result};
use console::style;
use serde_json::json;

use misqubo_core::{ScoredBitstring, SolutionReport};

use crate::config::{GraphConfig, QuboConfig, SearchConfig};

use super::common::{
    OutputFormat, build_graph, encoder, print_problem, print_ranked, print_report, solver,
};

/// Execute the solve command.
pub fn execute(
    graph_config: &GraphConfig,
    qubo_config: &QuboConfig,
    search_config: &SearchConfig,
    format: OutputFormat,
) -> Result<()> {
    let problem = build_graph(graph_config)?;
    let qubo = encoder(qubo_config).encode(&problem.graph);
    let solver = solver(search_config);

    if format == OutputFormat::Table {
        print_problem(graph_config.kind, &problem);
    }

    let start = Instant::now();
    let result = if format == OutputFormat::Table {
        let spinner = super::common::spinner(format!(
            "Searching {} assignments...",
            1_u64 << qubo.dim().min(63)
        ))?;
        let result = solver.solve(&qubo);
        spinner.finish_and_clear();
        result
    } else {
        solver.solve(&qubo)
    };
    let ranked: Vec<ScoredBitstring> = result.context("Exhaustive search failed")?;
    let elapsed = start.elapsed();

    let solution = ranked
        .first()
        .map(|best| SolutionReport::evaluate(&problem.graph, &qubo, &best.bitstring))
        .transpose()?;

    match format {
        OutputFormat::Table => {
            print_ranked(&ranked);
            if let Some(report) = &solution {
                println!("\n{}", style("Maximum independent set").bold().underlined());
                print_report(report);
            }
            println!(
                "\n  Search time: {} ms",
                style(elapsed.as_millis()).yellow()
            );
        }
        OutputFormat::Json => {
            let value = json!({
                "ranked": ranked,
                "solution": solution,
                "elapsed_ms": elapsed.as_millis() as u64,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}
