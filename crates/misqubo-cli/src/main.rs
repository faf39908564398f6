//! misqubo Command-Line Interface
//!
//! Builds small MIS instances, encodes them as QUBO matrices, and solves
//! or verifies them against the exhaustive oracle.
//!
//! ```text
//!   0 --- 1 --- 2        Q = | -10  20   0 |
//!                            |  20 -10  20 |      MIS = 101
//!                            |   0  20 -10 |
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::common::{GraphArgs, OutputFormat, QuboArgs};
use commands::{encode, graph, run, solve, verify, version};
use config::{Config, SearchConfig};

/// misqubo - Maximum Independent Set problems as QUBO
#[derive(Parser)]
#[command(name = "misqubo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a graph and print its edges and coordinates
    Graph {
        #[command(flatten)]
        graph: GraphArgs,

        /// Output format (table, json)
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Build a graph and print its MIS QUBO matrix
    Encode {
        #[command(flatten)]
        graph: GraphArgs,

        #[command(flatten)]
        qubo: QuboArgs,

        /// Also print the Ising form
        #[arg(long)]
        ising: bool,

        /// Output format (table, json)
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Find the maximum independent set by exhaustive search
    Solve {
        #[command(flatten)]
        graph: GraphArgs,

        #[command(flatten)]
        qubo: QuboArgs,

        /// Number of ranked assignments to print
        #[arg(short, long, default_value = "3")]
        top_k: usize,

        /// Abort the search after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Refuse searches needing more evaluations than this
        #[arg(long)]
        max_evaluations: Option<u64>,

        /// Output format (table, json)
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Score a solver's answer against the graph
    Verify {
        #[command(flatten)]
        graph: GraphArgs,

        #[command(flatten)]
        qubo: QuboArgs,

        /// Candidate bitstring (node 0 first; leading zeros may be dropped)
        #[arg(required_unless_present = "samples")]
        bitstring: Option<String>,

        /// JSON file of shot counts, e.g. {"0101": 512}
        #[arg(short, long, conflicts_with = "bitstring")]
        samples: Option<String>,
    },

    /// Run the full pipeline from a YAML configuration file
    Run {
        /// Configuration file (YAML); defaults apply if omitted
        #[arg(short, long, env = "MISQUBO_CONFIG")]
        config: Option<String>,

        /// Output file for JSON report
        #[arg(short, long)]
        export: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The run command takes its default log level from the configuration
    let run_config = match &cli.command {
        Commands::Run { config, .. } => match Config::load(config.as_deref()) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("{} {}", style("Error:").red().bold(), e);
                std::process::exit(1);
            }
        },
        _ => None,
    };

    // Setup logging
    let filter = match cli.verbose {
        0 => run_config
            .as_ref()
            .map_or("warn", |config| config.logging.level.as_str()),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Graph { graph: args, format } => graph::execute(&args.into(), format),

        Commands::Encode {
            graph,
            qubo,
            ising,
            format,
        } => encode::execute(&graph.into(), &qubo.into(), format, ising),

        Commands::Solve {
            graph,
            qubo,
            top_k,
            timeout_ms,
            max_evaluations,
            format,
        } => {
            let search = SearchConfig {
                top_k,
                timeout_ms,
                max_evaluations,
            };
            solve::execute(&graph.into(), &qubo.into(), &search, format)
        }

        Commands::Verify {
            graph,
            qubo,
            bitstring,
            samples,
        } => verify::execute(
            &graph.into(),
            &qubo.into(),
            bitstring.as_deref(),
            samples.as_deref(),
        ),

        Commands::Run { export, .. } => match run_config {
            Some(config) => run::execute(config, export.as_deref()),
            None => Err(anyhow::anyhow!("Configuration was not loaded")),
        },

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
