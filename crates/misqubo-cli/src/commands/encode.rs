//! Encode command implementation.

use anyhow::Result;
use console::style;
use serde_json::json;

use crate::config::{GraphConfig, QuboConfig};

use super::common::{OutputFormat, build_graph, encoder};

/// Execute the encode command.
pub fn execute(
    graph_config: &GraphConfig,
    qubo_config: &QuboConfig,
    format: OutputFormat,
    ising: bool,
) -> Result<()> {
    let problem = build_graph(graph_config)?;
    let qubo = encoder(qubo_config).encode(&problem.graph);

    match format {
        OutputFormat::Table => {
            println!(
                "{} Encoded {} graph ({} nodes, {} edges)\n",
                style("→").cyan().bold(),
                style(graph_config.kind).yellow(),
                problem.graph.n_nodes(),
                problem.graph.num_edges()
            );
            print!("{qubo}");
            if ising {
                println!();
                print!("{}", qubo.to_ising());
            }
        }
        OutputFormat::Json => {
            let value = if ising {
                json!({ "qubo": qubo, "ising": qubo.to_ising() })
            } else {
                json!({ "qubo": qubo })
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}
