//! Configuration for the `misqubo run` pipeline.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with MISQUBO_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use misqubo_core::{DEFAULT_ADJACENCY_THRESHOLD, DEFAULT_EDGE_PENALTY, DEFAULT_NODE_REWARD};

/// Complete pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Problem instance
    #[serde(default)]
    pub graph: GraphConfig,

    /// QUBO constants
    #[serde(default)]
    pub qubo: QuboConfig,

    /// Exhaustive search limits
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Graph family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    /// Square lattice with diagonal neighbours
    Grid,
    /// Seeded G(n, p)
    Random,
    /// Centre node joined to all others
    Star,
    /// Chain 0 - 1 - ... - (n-1)
    Path,
}

impl std::fmt::Display for GraphKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GraphKind::Grid => "grid",
            GraphKind::Random => "random",
            GraphKind::Star => "star",
            GraphKind::Path => "path",
        };
        f.write_str(name)
    }
}

/// Graph construction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Graph family
    #[serde(default = "default_graph_kind")]
    pub kind: GraphKind,

    /// Total number of nodes
    #[serde(default = "default_num_nodes")]
    pub num_nodes: usize,

    /// Edge probability for random graphs
    #[serde(default = "default_edge_probability")]
    pub edge_probability: f64,

    /// RNG seed for random graphs
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Coordinate spacing for grid graphs
    #[serde(default = "default_spacing")]
    pub spacing: f64,

    /// Grid adjacency threshold in grid units
    #[serde(default = "default_adjacency_threshold")]
    pub adjacency_threshold: f64,
}

/// QUBO encoding constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuboConfig {
    /// Reward per selected node
    #[serde(default = "default_node_reward")]
    pub node_reward: f64,

    /// Penalty per edge
    #[serde(default = "default_edge_penalty")]
    pub edge_penalty: f64,
}

/// Brute-force search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of ranked assignments to report
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Wall-clock limit in milliseconds
    #[serde(default)]
    pub timeout_ms: Option<u64>,

    /// Maximum number of assignments to score
    #[serde(default)]
    pub max_evaluations: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_graph_kind() -> GraphKind {
    GraphKind::Grid
}

fn default_num_nodes() -> usize {
    9
}

fn default_edge_probability() -> f64 {
    0.5
}

fn default_seed() -> u64 {
    42
}

fn default_spacing() -> f64 {
    1.0
}

fn default_adjacency_threshold() -> f64 {
    DEFAULT_ADJACENCY_THRESHOLD
}

fn default_node_reward() -> f64 {
    DEFAULT_NODE_REWARD
}

fn default_edge_penalty() -> f64 {
    DEFAULT_EDGE_PENALTY
}

fn default_top_k() -> usize {
    misqubo_core::DEFAULT_TOP_K
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            kind: default_graph_kind(),
            num_nodes: default_num_nodes(),
            edge_probability: default_edge_probability(),
            seed: default_seed(),
            spacing: default_spacing(),
            adjacency_threshold: default_adjacency_threshold(),
        }
    }
}

impl Default for QuboConfig {
    fn default() -> Self {
        QuboConfig {
            node_reward: default_node_reward(),
            edge_penalty: default_edge_penalty(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            top_k: default_top_k(),
            timeout_ms: None,
            max_evaluations: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;

        Self::from_yaml(&contents)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_file {
            Self::from_file(path)?
        } else {
            Config::default()
        };

        let config = config.merge_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `MISQUBO_*` overrides looked up through `lookup`.
    ///
    /// Only variables that are set override the current values. A set but
    /// unparsable variable is a validation error.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Graph
        if let Some(v) = lookup("MISQUBO_GRAPH_KIND") {
            self.graph.kind = GraphKind::from_str(&v, true).map_err(|_| {
                ConfigError::ValidationError(format!("Invalid MISQUBO_GRAPH_KIND: {v}"))
            })?;
        }
        if let Some(v) = lookup("MISQUBO_NUM_NODES") {
            self.graph.num_nodes = parse_env("MISQUBO_NUM_NODES", &v)?;
        }
        if let Some(v) = lookup("MISQUBO_EDGE_PROBABILITY") {
            self.graph.edge_probability = parse_env("MISQUBO_EDGE_PROBABILITY", &v)?;
        }
        if let Some(v) = lookup("MISQUBO_SEED") {
            self.graph.seed = parse_env("MISQUBO_SEED", &v)?;
        }
        if let Some(v) = lookup("MISQUBO_SPACING") {
            self.graph.spacing = parse_env("MISQUBO_SPACING", &v)?;
        }

        // QUBO
        if let Some(v) = lookup("MISQUBO_NODE_REWARD") {
            self.qubo.node_reward = parse_env("MISQUBO_NODE_REWARD", &v)?;
        }
        if let Some(v) = lookup("MISQUBO_EDGE_PENALTY") {
            self.qubo.edge_penalty = parse_env("MISQUBO_EDGE_PENALTY", &v)?;
        }

        // Search
        if let Some(v) = lookup("MISQUBO_TOP_K") {
            self.search.top_k = parse_env("MISQUBO_TOP_K", &v)?;
        }
        if let Some(v) = lookup("MISQUBO_TIMEOUT_MS") {
            self.search.timeout_ms = Some(parse_env("MISQUBO_TIMEOUT_MS", &v)?);
        }

        // Logging
        if let Some(v) = lookup("MISQUBO_LOG_LEVEL") {
            self.logging.level = v;
        }

        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.graph.num_nodes == 0 {
            return Err(ConfigError::ValidationError(
                "graph.num_nodes must be greater than 0".to_string(),
            ));
        }

        let p = self.graph.edge_probability;
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::ValidationError(format!(
                "graph.edge_probability must be in [0, 1], got {p}"
            )));
        }

        for (name, value) in [
            ("graph.spacing", self.graph.spacing),
            ("graph.adjacency_threshold", self.graph.adjacency_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("qubo.node_reward", self.qubo.node_reward),
            ("qubo.edge_penalty", self.qubo.edge_penalty),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("Invalid {key}: {value}")))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
