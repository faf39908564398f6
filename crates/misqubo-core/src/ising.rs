//! Ising form of a QUBO, the hand-off format for external solvers.
//!
//! A diagonal cost Hamiltonian is written as
//! H = c + Σᵢ hᵢ Zᵢ + Σ_{i<j} Jᵢⱼ Zᵢ Zⱼ
//! and its eigenvalue on a computational basis state equals the QUBO cost of
//! the corresponding bitstring.

use serde::{Deserialize, Serialize};

use crate::bitstring::Bitstring;
use crate::error::{MisError, MisResult};

/// An Ising model with a constant offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsingModel {
    /// Constant (identity) term.
    pub offset: f64,
    /// Single-spin fields hᵢ, one per spin.
    pub linear: Vec<f64>,
    /// Non-zero couplings as (i, j, Jᵢⱼ) with i < j.
    pub couplings: Vec<(usize, usize, f64)>,
}

impl IsingModel {
    /// Create a new model.
    pub fn new(offset: f64, linear: Vec<f64>, couplings: Vec<(usize, usize, f64)>) -> Self {
        Self {
            offset,
            linear,
            couplings,
        }
    }

    /// Number of spins.
    pub fn num_spins(&self) -> usize {
        self.linear.len()
    }

    /// Number of non-identity terms (non-zero fields plus couplings).
    pub fn num_terms(&self) -> usize {
        self.linear.iter().filter(|h| **h != 0.0).count() + self.couplings.len()
    }

    /// Energy of a spin configuration (`±1` per spin).
    pub fn energy(&self, spins: &[i8]) -> MisResult<f64> {
        if spins.len() != self.num_spins() {
            return Err(MisError::invalid(format!(
                "{} spins given, model has {}",
                spins.len(),
                self.num_spins()
            )));
        }
        if let Some(&(i, j, _)) = self
            .couplings
            .iter()
            .find(|&&(i, j, _)| i >= spins.len() || j >= spins.len())
        {
            return Err(MisError::invalid(format!(
                "coupling ({i}, {j}) out of range for {} spins",
                spins.len()
            )));
        }
        let field: f64 = self
            .linear
            .iter()
            .zip(spins)
            .map(|(h, &s)| h * f64::from(s))
            .sum();
        let coupling: f64 = self
            .couplings
            .iter()
            .map(|&(i, j, w)| w * f64::from(spins[i]) * f64::from(spins[j]))
            .sum();
        Ok(self.offset + field + coupling)
    }

    /// Energy of the basis state labelled by `z` (bit 1 ↦ spin −1).
    pub fn energy_of(&self, z: &Bitstring) -> MisResult<f64> {
        let spins: Vec<i8> = z.bits().iter().map(|&b| if b { -1 } else { 1 }).collect();
        self.energy(&spins)
    }
}

impl std::fmt::Display for IsingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Ising model ({} spins, {} terms):",
            self.num_spins(),
            self.num_terms()
        )?;
        writeln!(f, "  {:+.4} I", self.offset)?;
        for (i, h) in self.linear.iter().enumerate() {
            if *h != 0.0 {
                writeln!(f, "  {h:+.4} Z[{i}]")?;
            }
        }
        for (i, j, w) in &self.couplings {
            writeln!(f, "  {w:+.4} Z[{i}] Z[{j}]")?;
        }
        Ok(())
    }
}
