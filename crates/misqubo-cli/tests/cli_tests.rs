//! CLI command parsing and pipeline tests.
//!
//! Tests cover argument parsing (via clap `try_parse_from`), the file
//! inputs the commands read, and error paths.

// The CLI is a binary crate, so clap parsing is checked on mirror structs
// and the command logic through the library it drives.

// ============================================================================
// Clap argument parsing (test via try_parse_from on equivalent structs)
// ============================================================================

mod clap_parsing {
    use clap::{Args, Parser, Subcommand, ValueEnum};

    #[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
    enum TestKind {
        Grid,
        Random,
        Star,
        Path,
    }

    #[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
    enum TestFormat {
        Table,
        Json,
    }

    #[derive(Args, Debug)]
    struct TestGraphArgs {
        #[arg(short, long, value_enum, default_value = "grid")]
        kind: TestKind,
        #[arg(short, long, default_value = "9")]
        nodes: usize,
        #[arg(short, long, default_value = "0.5")]
        probability: f64,
        #[arg(long, default_value = "42")]
        seed: u64,
        #[arg(long, default_value = "1.0")]
        spacing: f64,
        #[arg(long, default_value = "1.5")]
        threshold: f64,
    }

    #[derive(Args, Debug)]
    struct TestQuboArgs {
        #[arg(long, default_value = "10.0")]
        node_reward: f64,
        #[arg(long, default_value = "20.0")]
        edge_penalty: f64,
    }

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "misqubo")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Graph {
            #[command(flatten)]
            graph: TestGraphArgs,
            #[arg(short, long, value_enum, default_value = "table")]
            format: TestFormat,
        },
        Encode {
            #[command(flatten)]
            graph: TestGraphArgs,
            #[command(flatten)]
            qubo: TestQuboArgs,
            #[arg(long)]
            ising: bool,
            #[arg(short, long, value_enum, default_value = "table")]
            format: TestFormat,
        },
        Solve {
            #[command(flatten)]
            graph: TestGraphArgs,
            #[command(flatten)]
            qubo: TestQuboArgs,
            #[arg(short, long, default_value = "3")]
            top_k: usize,
            #[arg(long)]
            timeout_ms: Option<u64>,
            #[arg(long)]
            max_evaluations: Option<u64>,
            #[arg(short, long, value_enum, default_value = "table")]
            format: TestFormat,
        },
        Verify {
            #[command(flatten)]
            graph: TestGraphArgs,
            #[command(flatten)]
            qubo: TestQuboArgs,
            #[arg(required_unless_present = "samples")]
            bitstring: Option<String>,
            #[arg(short, long, conflicts_with = "bitstring")]
            samples: Option<String>,
        },
        Run {
            #[arg(short, long)]
            config: Option<String>,
            #[arg(short, long)]
            export: Option<String>,
        },
        Version,
    }

    // --- Graph command ---

    #[test]
    fn test_parse_graph_defaults() {
        let cli = TestCli::try_parse_from(["misqubo", "graph"]).unwrap();
        match cli.command {
            TestCommands::Graph { graph, format } => {
                assert_eq!(graph.kind, TestKind::Grid);
                assert_eq!(graph.nodes, 9);
                assert_eq!(graph.probability, 0.5);
                assert_eq!(graph.seed, 42);
                assert_eq!(graph.spacing, 1.0);
                assert_eq!(graph.threshold, 1.5);
                assert_eq!(format, TestFormat::Table);
            }
            _ => panic!("Expected Graph command"),
        }
    }

    #[test]
    fn test_parse_graph_random() {
        let cli = TestCli::try_parse_from([
            "misqubo", "graph", "-k", "random", "-n", "12", "-p", "0.3", "--seed", "7", "-f",
            "json",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Graph { graph, format } => {
                assert_eq!(graph.kind, TestKind::Random);
                assert_eq!(graph.nodes, 12);
                assert_eq!(graph.probability, 0.3);
                assert_eq!(graph.seed, 7);
                assert_eq!(format, TestFormat::Json);
            }
            _ => panic!("Expected Graph command"),
        }
    }

    #[test]
    fn test_parse_graph_unknown_kind() {
        let result = TestCli::try_parse_from(["misqubo", "graph", "--kind", "hexagon"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_graph_bad_node_count() {
        let result = TestCli::try_parse_from(["misqubo", "graph", "-n", "-3"]);
        assert!(result.is_err());
    }

    // --- Encode command ---

    #[test]
    fn test_parse_encode_with_constants() {
        let cli = TestCli::try_parse_from([
            "misqubo",
            "encode",
            "-k",
            "star",
            "-n",
            "5",
            "--node-reward",
            "1",
            "--edge-penalty",
            "3",
            "--ising",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Encode {
                graph, qubo, ising, ..
            } => {
                assert_eq!(graph.kind, TestKind::Star);
                assert_eq!(qubo.node_reward, 1.0);
                assert_eq!(qubo.edge_penalty, 3.0);
                assert!(ising);
            }
            _ => panic!("Expected Encode command"),
        }
    }

    // --- Solve command ---

    #[test]
    fn test_parse_solve_budget() {
        let cli = TestCli::try_parse_from([
            "misqubo",
            "solve",
            "-k",
            "path",
            "-t",
            "5",
            "--timeout-ms",
            "250",
            "--max-evaluations",
            "100000",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Solve {
                graph,
                top_k,
                timeout_ms,
                max_evaluations,
                ..
            } => {
                assert_eq!(graph.kind, TestKind::Path);
                assert_eq!(top_k, 5);
                assert_eq!(timeout_ms, Some(250));
                assert_eq!(max_evaluations, Some(100_000));
            }
            _ => panic!("Expected Solve command"),
        }
    }

    #[test]
    fn test_parse_solve_defaults() {
        let cli = TestCli::try_parse_from(["misqubo", "solve"]).unwrap();
        match cli.command {
            TestCommands::Solve {
                top_k,
                timeout_ms,
                max_evaluations,
                qubo,
                ..
            } => {
                assert_eq!(top_k, 3);
                assert!(timeout_ms.is_none());
                assert!(max_evaluations.is_none());
                assert_eq!(qubo.node_reward, 10.0);
                assert_eq!(qubo.edge_penalty, 20.0);
            }
            _ => panic!("Expected Solve command"),
        }
    }

    // --- Verify command ---

    #[test]
    fn test_parse_verify_bitstring() {
        let cli = TestCli::try_parse_from(["misqubo", "verify", "-k", "path", "-n", "4", "101"])
            .unwrap();
        match cli.command {
            TestCommands::Verify {
                bitstring, samples, ..
            } => {
                assert_eq!(bitstring.as_deref(), Some("101"));
                assert!(samples.is_none());
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_parse_verify_samples() {
        let cli =
            TestCli::try_parse_from(["misqubo", "verify", "--samples", "counts.json"]).unwrap();
        match cli.command {
            TestCommands::Verify {
                bitstring, samples, ..
            } => {
                assert!(bitstring.is_none());
                assert_eq!(samples.as_deref(), Some("counts.json"));
            }
            _ => panic!("Expected Verify command"),
        }
    }

    #[test]
    fn test_parse_verify_requires_input() {
        assert!(TestCli::try_parse_from(["misqubo", "verify"]).is_err());
        assert!(
            TestCli::try_parse_from(["misqubo", "verify", "0101", "--samples", "c.json"]).is_err()
        );
    }

    // --- Run command ---

    #[test]
    fn test_parse_run() {
        let cli = TestCli::try_parse_from([
            "misqubo",
            "run",
            "-c",
            "pipeline.yaml",
            "--export",
            "report.json",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Run { config, export } => {
                assert_eq!(config.as_deref(), Some("pipeline.yaml"));
                assert_eq!(export.as_deref(), Some("report.json"));
            }
            _ => panic!("Expected Run command"),
        }
    }

    // --- Global flags ---

    #[test]
    fn test_verbose_count() {
        let cli = TestCli::try_parse_from(["misqubo", "-vvv", "version"]).unwrap();
        assert_eq!(cli.verbose, 3);
        assert!(matches!(cli.command, TestCommands::Version));
    }

    #[test]
    fn test_verbose_after_subcommand() {
        let cli = TestCli::try_parse_from(["misqubo", "solve", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(TestCli::try_parse_from(["misqubo", "anneal"]).is_err());
    }
}

// ============================================================================
// File inputs
// ============================================================================

mod file_inputs {
    use std::fs;

    use misqubo_core::{Graph, QuboEncoder, SampleCounts, SolutionReport, solve_exact};

    #[test]
    fn test_samples_file_verification() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.json");
        fs::write(&path, r#"{"10101": 610, "1010": 250, "11011": 140}"#).unwrap();

        let source = fs::read_to_string(&path).unwrap();
        let samples = SampleCounts::from_json(5, &source).unwrap();
        let (top, count) = samples.most_common(1).remove(0);
        assert_eq!(count, 610);

        let graph = Graph::path(5);
        let qubo = QuboEncoder::default().encode(&graph);
        let report = SolutionReport::evaluate(&graph, &qubo, &top).unwrap();
        let optimum = solve_exact(&graph, &QuboEncoder::default()).unwrap();
        assert!(report.is_independent);
        assert_eq!(report.set_size, optimum.set_size);
    }

    #[test]
    fn test_samples_file_wrong_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counts.json");
        fs::write(&path, r#"{"1010101": 10}"#).unwrap();

        let source = fs::read_to_string(&path).unwrap();
        assert!(SampleCounts::from_json(5, &source).is_err());
    }
}
