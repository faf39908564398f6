//! MIS → QUBO encoding.
//!
//! The MIS objective is written as minimization of `zᵗQz` over binary
//! vectors `z`:
//!
//! ```text
//! zᵗQz = edge_penalty · Σ_{(i,j) ∈ E} 2·z_i·z_j  −  node_reward · Σ_i z_i
//! ```
//!
//! Each selected node earns `node_reward`; each edge with both endpoints
//! selected costs `2 · edge_penalty`. With `edge_penalty > node_reward`
//! dropping one endpoint of a violated edge always lowers the cost, so the
//! minima are exactly the maximum independent sets.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::bitstring::Bitstring;
use crate::error::{MisError, MisResult};
use crate::graph::Graph;
use crate::ising::IsingModel;

/// Default reward (subtracted on the diagonal) per selected node.
pub const DEFAULT_NODE_REWARD: f64 = 10.0;

/// Default penalty (added off-diagonal, both triangles) per edge.
pub const DEFAULT_EDGE_PENALTY: f64 = 20.0;

/// A square QUBO matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQubo")]
pub struct QuboMatrix {
    matrix: Array2<f64>,
}

#[derive(Deserialize)]
struct RawQubo {
    matrix: Array2<f64>,
}

impl TryFrom<RawQubo> for QuboMatrix {
    type Error = MisError;

    fn try_from(raw: RawQubo) -> MisResult<Self> {
        QuboMatrix::from_array(raw.matrix)
    }
}

impl QuboMatrix {
    /// An `n × n` zero matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            matrix: Array2::zeros((n, n)),
        }
    }

    /// Wrap an existing matrix. It must be square with finite entries.
    pub fn from_array(matrix: Array2<f64>) -> MisResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(MisError::invalid(format!(
                "QUBO matrix must be square, got {rows}x{cols}"
            )));
        }
        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(MisError::invalid("QUBO matrix contains non-finite entries"));
        }
        Ok(Self { matrix })
    }

    /// Matrix dimension (number of binary variables).
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Entry `Q[i, j]`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[[i, j]]
    }

    /// Underlying matrix.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Check `Q[i, j] == Q[j, i]` for all entries.
    pub fn is_symmetric(&self) -> bool {
        self.matrix == self.matrix.t()
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> f64 {
        self.matrix.diag().sum()
    }

    /// Sum of the strictly upper-triangular entries.
    pub fn upper_triangle_sum(&self) -> f64 {
        let n = self.dim();
        (0..n)
            .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
            .map(|(i, j)| self.matrix[[i, j]])
            .sum()
    }

    /// Quadratic form `zᵗQz`.
    pub fn cost(&self, z: &Bitstring) -> MisResult<f64> {
        if z.len() != self.dim() {
            return Err(MisError::invalid(format!(
                "bitstring has {} bits, QUBO has dimension {}",
                z.len(),
                self.dim()
            )));
        }
        Ok(self.cost_of_selection(&z.selected_nodes()))
    }

    /// `zᵗQz` where `selected` lists the indices with `z_i = 1`.
    pub(crate) fn cost_of_selection(&self, selected: &[usize]) -> f64 {
        // Folding from +0.0 keeps the empty selection at 0 rather than -0.
        selected.iter().fold(0.0, |acc, &i| {
            acc + selected.iter().map(|&j| self.matrix[[i, j]]).sum::<f64>()
        })
    }

    /// Equivalent Ising model under `z_i = (1 − s_i) / 2`.
    ///
    /// A selected node (`z_i = 1`) maps to spin `s_i = −1`, the Z eigenvalue
    /// of |1⟩, so the model can be handed to a gate-based cost Hamiltonian
    /// unchanged.
    pub fn to_ising(&self) -> IsingModel {
        let n = self.dim();
        let mut offset = 0.0;
        let mut linear = vec![0.0; n];
        let mut couplings = Vec::new();

        for i in 0..n {
            let q_ii = self.matrix[[i, i]];
            offset += q_ii / 2.0;
            linear[i] -= q_ii / 2.0;

            for j in (i + 1)..n {
                let q = self.matrix[[i, j]] + self.matrix[[j, i]];
                if q == 0.0 {
                    continue;
                }
                offset += q / 4.0;
                linear[i] -= q / 4.0;
                linear[j] -= q / 4.0;
                couplings.push((i, j, q / 4.0));
            }
        }

        IsingModel::new(offset, linear, couplings)
    }
}

impl std::fmt::Display for QuboMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "QUBO ({0}x{0}):", self.dim())?;
        for row in self.matrix.rows() {
            write!(f, " ")?;
            for v in row {
                write!(f, " {v:>7.1}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Encodes graphs as MIS QUBO matrices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuboEncoder {
    /// Reward per selected node (subtracted from `Q[i, i]`).
    pub node_reward: f64,
    /// Penalty per edge (added to `Q[i, j]` and `Q[j, i]`).
    pub edge_penalty: f64,
}

impl Default for QuboEncoder {
    fn default() -> Self {
        Self {
            node_reward: DEFAULT_NODE_REWARD,
            edge_penalty: DEFAULT_EDGE_PENALTY,
        }
    }
}

impl QuboEncoder {
    /// Create an encoder with explicit constants.
    pub fn new(node_reward: f64, edge_penalty: f64) -> Self {
        Self {
            node_reward,
            edge_penalty,
        }
    }

    /// Whether minima of the encoding are guaranteed independent sets.
    ///
    /// The encoder itself never checks this.
    pub fn enforces_independence(&self) -> bool {
        self.edge_penalty > self.node_reward
    }

    /// Build the QUBO matrix of `graph`.
    pub fn encode(&self, graph: &Graph) -> QuboMatrix {
        let n = graph.n_nodes();
        let mut qubo = QuboMatrix::zeros(n);

        for &(i, j) in graph.edges() {
            qubo.matrix[[i, j]] += self.edge_penalty;
            qubo.matrix[[j, i]] += self.edge_penalty;
        }
        for i in 0..n {
            qubo.matrix[[i, i]] -= self.node_reward;
        }

        trace!(
            n,
            edges = graph.num_edges(),
            node_reward = self.node_reward,
            edge_penalty = self.edge_penalty,
            "encoded MIS QUBO"
        );
        qubo
    }
}

/// Encode `graph` with explicit reward and penalty.
pub fn encode(graph: &Graph, node_reward: f64, edge_penalty: f64) -> QuboMatrix {
    QuboEncoder::new(node_reward, edge_penalty).encode(graph)
}
