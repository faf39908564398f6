//! Graph command implementation.

use anyhow::Result;
use serde_json::json;

use crate::config::GraphConfig;

use super::common::{OutputFormat, build_graph, print_problem};

/// Execute the graph command.
pub fn execute(config: &GraphConfig, format: OutputFormat) -> Result<()> {
    let problem = build_graph(config)?;

    match format {
        OutputFormat::Table => print_problem(config.kind, &problem),
        OutputFormat::Json => {
            let value = json!({
                "kind": config.kind,
                "graph": problem.graph,
                "coordinates": problem.coordinates,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
    }
    Ok(())
}
