//! Measurement output from external samplers.
//!
//! Quantum solvers report either shot counts per bitstring or a dense
//! probability vector over all `2ⁿ` basis states. Both are turned into
//! [`Bitstring`]s here so they can be checked against the exact oracle.

use std::collections::{BTreeMap, HashMap};

use crate::bitstring::Bitstring;
use crate::brute_force::ScoredBitstring;
use crate::error::{MisError, MisResult};
use crate::qubo::QuboMatrix;

/// Shot counts keyed by fixed-width bitstring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleCounts {
    width: usize,
    counts: BTreeMap<Bitstring, u64>,
}

impl SampleCounts {
    /// An empty histogram over `width`-bit outcomes.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            counts: BTreeMap::new(),
        }
    }

    /// Build from `(bitstring, count)` pairs.
    ///
    /// Bitstrings with dropped leading zeros are left-padded to `width`;
    /// repeated keys are summed.
    pub fn from_pairs<S: AsRef<str>>(
        width: usize,
        pairs: impl IntoIterator<Item = (S, u64)>,
    ) -> MisResult<Self> {
        let mut samples = Self::new(width);
        for (s, count) in pairs {
            samples.record(Bitstring::left_padded(s.as_ref(), width)?, count)?;
        }
        Ok(samples)
    }

    /// Parse a JSON object such as `{"0101": 512, "1010": 488}`.
    pub fn from_json(width: usize, json: &str) -> MisResult<Self> {
        let raw: HashMap<String, u64> = serde_json::from_str(json)?;
        Self::from_pairs(width, raw)
    }

    /// Add `count` shots of `outcome`.
    pub fn record(&mut self, outcome: Bitstring, count: u64) -> MisResult<()> {
        if outcome.len() != self.width {
            return Err(MisError::invalid(format!(
                "outcome '{outcome}' has {} bits, expected {}",
                outcome.len(),
                self.width
            )));
        }
        let total = self.counts.entry(outcome).or_insert(0);
        *total = total.checked_add(count).ok_or_else(|| {
            MisError::SampleDecode(format!("shot count overflow after adding {count}"))
        })?;
        Ok(())
    }

    /// Outcome width in bits.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Shots recorded for `outcome`.
    pub fn get(&self, outcome: &Bitstring) -> u64 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total_shots(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |total, &count| total.saturating_add(count))
    }

    /// Fraction of shots that produced `outcome`.
    pub fn probability(&self, outcome: &Bitstring) -> f64 {
        let total = self.total_shots();
        if total == 0 {
            return 0.0;
        }
        self.get(outcome) as f64 / total as f64
    }

    /// The `k` most frequent outcomes, ties by ascending bitstring.
    pub fn most_common(&self, k: usize) -> Vec<(Bitstring, u64)> {
        let mut sorted: Vec<_> = self.counts.iter().map(|(b, c)| (b.clone(), *c)).collect();
        // BTreeMap order is ascending, and the sort is stable.
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(k);
        sorted
    }

    /// Lowest-cost sampled outcome under `qubo`, ties by ascending bitstring.
    pub fn best_by_cost(&self, qubo: &QuboMatrix) -> MisResult<Option<ScoredBitstring>> {
        let mut best: Option<ScoredBitstring> = None;
        for outcome in self.counts.keys() {
            let cost = qubo.cost(outcome)?;
            if best.as_ref().is_none_or(|b| cost < b.cost) {
                best = Some(ScoredBitstring {
                    bitstring: outcome.clone(),
                    cost,
                });
            }
        }
        Ok(best)
    }
}

/// Basis state with the highest probability in a dense `2ⁿ` vector.
///
/// Ties go to the lowest index.
pub fn most_probable(probabilities: &[f64]) -> MisResult<Bitstring> {
    let len = probabilities.len();
    if len == 0 || !len.is_power_of_two() {
        return Err(MisError::invalid(format!(
            "probability vector length {len} is not a power of two"
        )));
    }
    if probabilities.iter().any(|p| !p.is_finite()) {
        return Err(MisError::invalid("probability vector contains non-finite values"));
    }

    let width = len.trailing_zeros() as usize;
    let mut best = 0;
    for (i, p) in probabilities.iter().enumerate() {
        if *p > probabilities[best] {
            best = i;
        }
    }
    Ok(Bitstring::from_index(best as u64, width))
}
