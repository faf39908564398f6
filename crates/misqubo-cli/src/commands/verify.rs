//! Verify command implementation.
//!
//! Scores a candidate from an external solver, either a single bitstring or
//! a JSON file of shot counts, against the exact optimum.

use std::fs;

use anyhow::{Context, Result};
use console::style;

use misqubo_core::{Bitstring, SampleCounts, SolutionReport, approximation_ratio, solve_exact};

use crate::config::{GraphConfig, QuboConfig};

use super::common::{build_graph, encoder, print_report};

/// Number of sampled outcomes listed.
const TOP_SAMPLES: usize = 10;

/// Execute the verify command.
pub fn execute(
    graph_config: &GraphConfig,
    qubo_config: &QuboConfig,
    bitstring: Option<&str>,
    samples_path: Option<&str>,
) -> Result<()> {
    let problem = build_graph(graph_config)?;
    let graph = &problem.graph;
    let encoder = encoder(qubo_config);
    let qubo = encoder.encode(graph);
    let n = graph.n_nodes();

    let candidate = match (bitstring, samples_path) {
        (Some(s), _) => Bitstring::left_padded(s, n)?,
        (None, Some(path)) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read samples file: {path}"))?;
            let samples = SampleCounts::from_json(n, &source)?;
            print_samples(&samples);
            samples
                .most_common(1)
                .into_iter()
                .next()
                .map(|(b, _)| b)
                .ok_or_else(|| anyhow::anyhow!("Samples file contains no outcomes"))?
        }
        (None, None) => anyhow::bail!("Provide a bitstring or --samples <file>"),
    };

    let report = SolutionReport::evaluate(graph, &qubo, &candidate)?;
    println!(
        "{} Candidate on {} nodes, {} edges",
        style("→").cyan().bold(),
        n,
        graph.num_edges()
    );
    print_report(&report);

    match solve_exact(graph, &encoder) {
        Ok(optimum) => {
            let ratio = if report.is_independent {
                approximation_ratio(report.set_size, optimum.set_size)
            } else {
                0.0
            };
            println!(
                "\n  Optimum size {}  ({}), approximation ratio {}",
                style(optimum.set_size).yellow(),
                style(&optimum.bitstring).cyan(),
                style(format!("{ratio:.3}")).yellow()
            );
        }
        Err(e) => {
            tracing::info!("exact optimum unavailable: {e}");
            println!("\n  {} Exact optimum unavailable: {e}", style("!").yellow());
        }
    }
    Ok(())
}

/// Print the most frequent sampled outcomes as a histogram.
fn print_samples(samples: &SampleCounts) {
    println!(
        "{} Samples ({} shots, {} outcomes):",
        style("✓").green().bold(),
        samples.total_shots(),
        samples.len()
    );

    for (bitstring, count) in samples.most_common(TOP_SAMPLES) {
        let prob = samples.probability(&bitstring) * 100.0;
        let bar: String = "█".repeat((prob / 2.0).round() as usize);
        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(&bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if samples.len() > TOP_SAMPLES {
        println!("  ... and {} more outcomes", samples.len() - TOP_SAMPLES);
    }
    println!();
}
