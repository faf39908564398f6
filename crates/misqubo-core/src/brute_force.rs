//! Exhaustive QUBO minimization.
//!
//! Scores all `2ⁿ` assignments and keeps the best `top_k`. Only practical up
//! to n ≈ 20; it exists as a ground-truth oracle for checking heuristic and
//! quantum solvers on small instances.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bitstring::Bitstring;
use crate::error::{MisError, MisResult};
use crate::qubo::QuboMatrix;

/// Largest QUBO dimension accepted for exhaustive search.
pub const MAX_BRUTE_FORCE_DIM: usize = 20;

/// Default number of ranked results.
pub const DEFAULT_TOP_K: usize = 3;

/// Assignments scored between two deadline checks.
const DEADLINE_CHECK_INTERVAL: u64 = 4096;

/// Limits on an exhaustive search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchBudget {
    /// Wall-clock limit measured from the start of enumeration.
    pub deadline: Option<Duration>,
    /// Maximum number of assignments to score.
    pub max_evaluations: Option<u64>,
}

impl SearchBudget {
    /// No limits.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Set a wall-clock limit.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set an evaluation cap.
    pub fn with_max_evaluations(mut self, max: u64) -> Self {
        self.max_evaluations = Some(max);
        self
    }
}

/// A bitstring together with its QUBO cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredBitstring {
    /// The assignment.
    pub bitstring: Bitstring,
    /// `zᵗQz` for the assignment.
    pub cost: f64,
}

/// Heap entry ordered by `(cost, index)`.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    cost: f64,
    index: u64,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then(self.index.cmp(&other.index))
    }
}

/// Exhaustive QUBO solver.
#[derive(Debug, Clone)]
pub struct BruteForceSolver {
    /// Number of best assignments to return.
    pub top_k: usize,
    /// Dimension bound; never above [`MAX_BRUTE_FORCE_DIM`].
    pub max_dim: usize,
    /// Search limits.
    pub budget: SearchBudget,
}

impl Default for BruteForceSolver {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_dim: MAX_BRUTE_FORCE_DIM,
            budget: SearchBudget::unlimited(),
        }
    }
}

impl BruteForceSolver {
    /// Create a solver returning the best three assignments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of ranked results.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Lower the dimension bound.
    pub fn with_max_dim(mut self, max_dim: usize) -> Self {
        self.max_dim = max_dim.min(MAX_BRUTE_FORCE_DIM);
        self
    }

    /// Set search limits.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Rank all assignments of `qubo` and return the `top_k` cheapest.
    ///
    /// Results are sorted by ascending cost, ties by ascending bitstring.
    /// Size and evaluation-cap checks happen before enumeration starts.
    pub fn solve(&self, qubo: &QuboMatrix) -> MisResult<Vec<ScoredBitstring>> {
        let n = qubo.dim();
        if n > self.max_dim {
            return Err(MisError::Dimension {
                size: n,
                max: self.max_dim,
            });
        }

        let total: u64 = 1 << n;
        if let Some(cap) = self.budget.max_evaluations {
            if cap < total {
                return Err(MisError::Timeout {
                    evaluated: 0,
                    total,
                });
            }
        }
        if self.top_k == 0 {
            return Ok(vec![]);
        }

        debug!(n, total, top_k = self.top_k, "starting exhaustive search");
        let start = Instant::now();
        let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(self.top_k + 1);
        let mut selected = Vec::with_capacity(n);

        for index in 0..total {
            if let Some(deadline) = self.budget.deadline {
                if index % DEADLINE_CHECK_INTERVAL == 0 && start.elapsed() >= deadline {
                    debug!(evaluated = index, total, "search deadline exceeded");
                    return Err(MisError::Timeout {
                        evaluated: index,
                        total,
                    });
                }
            }

            selected.clear();
            selected.extend((0..n).filter(|&k| (index >> (n - 1 - k)) & 1 == 1));
            let candidate = Candidate {
                cost: qubo.cost_of_selection(&selected),
                index,
            };

            if heap.len() < self.top_k {
                heap.push(candidate);
            } else if heap.peek().is_some_and(|worst| candidate < *worst) {
                heap.pop();
                heap.push(candidate);
            }
        }

        let ranked: Vec<ScoredBitstring> = heap
            .into_sorted_vec()
            .into_iter()
            .map(|c| ScoredBitstring {
                bitstring: Bitstring::from_index(c.index, n),
                cost: c.cost,
            })
            .collect();

        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            best = ranked.first().map(|r| r.cost),
            "exhaustive search complete"
        );
        Ok(ranked)
    }
}

/// Return the `top_k` cheapest assignments of `qubo` with no time limit.
pub fn brute_force_minimize(qubo: &QuboMatrix, top_k: usize) -> MisResult<Vec<ScoredBitstring>> {
    BruteForceSolver::new().with_top_k(top_k).solve(qubo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::qubo::QuboEncoder;

    fn ranked(graph: &Graph, top_k: usize) -> Vec<(String, f64)> {
        let q = QuboEncoder::default().encode(graph);
        brute_force_minimize(&q, top_k)
            .unwrap()
            .into_iter()
            .map(|r| (r.bitstring.to_string(), r.cost))
            .collect()
    }

    #[test]
    fn test_single_edge() {
        let g = Graph::new(2, vec![(0, 1)]).unwrap();
        assert_eq!(
            ranked(&g, 4),
            vec![
                ("01".to_string(), -10.0),
                ("10".to_string(), -10.0),
                ("00".to_string(), 0.0),
                ("11".to_string(), 20.0),
            ]
        );
    }

    #[test]
    fn test_empty_graph_selects_everything() {
        let results = ranked(&Graph::empty(5), 3);
        assert_eq!(results[0], ("11111".to_string(), -50.0));
        assert_eq!(results[1].1, -40.0);
    }

    #[test]
    fn test_ties_broken_by_bitstring() {
        // Path 0-1-2-3: MIS of size 2 is {0,2}, {0,3}, {1,3}
        let results = ranked(&Graph::path(4), 3);
        let strings: Vec<_> = results.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(strings, vec!["0101", "1001", "1010"]);
        assert!(results.iter().all(|(_, c)| *c == -20.0));
    }

    #[test]
    fn test_star_mis_is_leaves() {
        let results = ranked(&Graph::star(4), 1);
        assert_eq!(results, vec![("01111".to_string(), -40.0)]);
    }

    #[test]
    fn test_zero_nodes() {
        let results = ranked(&Graph::empty(0), 3);
        assert_eq!(results, vec![(String::new(), 0.0)]);
    }

    #[test]
    fn test_top_k_zero() {
        assert!(ranked(&Graph::path(3), 0).is_empty());
    }

    #[test]
    fn test_dimension_guard() {
        let q = QuboMatrix::zeros(MAX_BRUTE_FORCE_DIM + 1);
        assert_eq!(
            brute_force_minimize(&q, 3),
            Err(MisError::Dimension {
                size: 21,
                max: MAX_BRUTE_FORCE_DIM
            })
        );
    }

    #[test]
    fn test_lowered_max_dim() {
        let q = QuboMatrix::zeros(6);
        let solver = BruteForceSolver::new().with_max_dim(5);
        assert!(matches!(solver.solve(&q), Err(MisError::Dimension { .. })));
        // cannot be raised above the hard bound
        assert_eq!(BruteForceSolver::new().with_max_dim(64).max_dim, MAX_BRUTE_FORCE_DIM);
    }

    #[test]
    fn test_evaluation_cap_fails_eagerly() {
        let q = QuboMatrix::zeros(10);
        let solver = BruteForceSolver::new()
            .with_budget(SearchBudget::unlimited().with_max_evaluations(1000));
        assert_eq!(
            solver.solve(&q),
            Err(MisError::Timeout {
                evaluated: 0,
                total: 1024
            })
        );

        let solver = BruteForceSolver::new()
            .with_budget(SearchBudget::unlimited().with_max_evaluations(1024));
        assert!(solver.solve(&q).is_ok());
    }

    #[test]
    fn test_candidate_order_is_total() {
        let entry = |cost, index| Candidate { cost, index };
        let mut entries: Vec<Candidate> = vec![
            entry(f64::NAN, 0),
            entry(f64::INFINITY, 1),
            entry(-3.0, 2),
            entry(f64::NEG_INFINITY, 3),
            entry(-3.0, 1),
        ];
        entries.sort();
        let order: Vec<u64> = entries.iter().map(|c| c.index).collect();
        assert_eq!(order, vec![3, 1, 2, 1, 0]);
        assert_eq!(entry(f64::NAN, 4), entry(f64::NAN, 4));
        assert!(entry(f64::INFINITY, 0) > entry(f64::MAX, 9));
    }

    #[test]
    fn test_overflowing_costs_still_ranked() {
        let q = QuboMatrix::from_array(ndarray::Array2::from_elem((2, 2), f64::MAX)).unwrap();
        let best = brute_force_minimize(&q, 4).unwrap();
        assert_eq!(best.len(), 4);
        assert_eq!(best[0].bitstring.to_string(), "00");
        assert_eq!(best[0].cost, 0.0);
    }

    #[test]
    fn test_zero_deadline_times_out() {
        let q = QuboEncoder::default().encode(&Graph::complete(16));
        let budget = SearchBudget::unlimited().with_deadline(Duration::ZERO);
        let solver = BruteForceSolver::new().with_budget(budget);
        assert!(matches!(solver.solve(&q), Err(MisError::Timeout { .. })));
    }
}
