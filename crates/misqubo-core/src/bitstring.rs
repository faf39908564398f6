//! Node-selection bitstrings.
//!
//! Character `k` of the string (from the left) is node `k`; the integer
//! value of a bitstring is its big-endian binary reading, so enumerating
//! integers `0..2ⁿ` visits bitstrings in lexicographic order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{MisError, MisResult};
use crate::graph::Graph;

/// Largest width representable as a `u64` index.
pub const MAX_INDEX_WIDTH: usize = 64;

/// A fixed-width selection of graph nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bitstring {
    bits: Vec<bool>,
}

impl Bitstring {
    /// Create from per-node flags.
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// All-zero bitstring of the given width.
    pub fn zeros(width: usize) -> Self {
        Self::new(vec![false; width])
    }

    /// All-one bitstring of the given width.
    pub fn ones(width: usize) -> Self {
        Self::new(vec![true; width])
    }

    /// Zero-padded binary representation of `value` with `width` digits.
    ///
    /// Bits of `value` above `width` are ignored.
    pub fn from_index(value: u64, width: usize) -> Self {
        let bits = (0..width)
            .map(|k| {
                let shift = width - 1 - k;
                shift < MAX_INDEX_WIDTH && (value >> shift) & 1 == 1
            })
            .collect();
        Self { bits }
    }

    /// Parse a solver output that may have lost its leading zeros.
    ///
    /// Shorter strings are left-padded with `0` up to `width`; longer ones
    /// are rejected.
    pub fn left_padded(s: &str, width: usize) -> MisResult<Self> {
        let parsed: Bitstring = s.parse()?;
        if parsed.len() > width {
            return Err(MisError::invalid(format!(
                "bitstring '{s}' has {} bits but only {width} nodes exist",
                parsed.len()
            )));
        }
        let mut bits = vec![false; width - parsed.len()];
        bits.extend(parsed.bits);
        Ok(Self { bits })
    }

    /// Parse a bitstring that must cover exactly the nodes of `graph`.
    pub fn for_graph(s: &str, graph: &Graph) -> MisResult<Self> {
        let parsed: Bitstring = s.parse()?;
        if parsed.len() != graph.n_nodes() {
            return Err(MisError::invalid(format!(
                "bitstring '{s}' has {} bits, graph has {} nodes",
                parsed.len(),
                graph.n_nodes()
            )));
        }
        Ok(parsed)
    }

    /// Width in bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True for the zero-width bitstring.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Per-node flags.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Whether `node` is selected.
    pub fn is_set(&self, node: usize) -> bool {
        self.bits.get(node).copied().unwrap_or(false)
    }

    /// Number of selected nodes.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Indices of selected nodes, ascending.
    pub fn selected_nodes(&self) -> Vec<usize> {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
            .collect()
    }

    /// Big-endian integer value, `None` if wider than 64 bits.
    pub fn to_index(&self) -> Option<u64> {
        if self.bits.len() > MAX_INDEX_WIDTH {
            return None;
        }
        Some(
            self.bits
                .iter()
                .fold(0u64, |acc, &b| (acc << 1) | u64::from(b)),
        )
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Bitstring {
    type Err = MisError;

    fn from_str(s: &str) -> MisResult<Self> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(MisError::invalid(format!(
                    "bitstring '{s}' contains non-binary character '{other}'"
                ))),
            })
            .collect::<MisResult<Vec<_>>>()
            .map(Self::new)
    }
}

impl Serialize for Bitstring {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bitstring {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_is_msb_first() {
        assert_eq!(Bitstring::from_index(1, 4).to_string(), "0001");
        assert_eq!(Bitstring::from_index(10, 4).to_string(), "1010");
        assert_eq!(Bitstring::from_index(0, 0).to_string(), "");
    }

    #[test]
    fn test_index_roundtrip() {
        for v in 0..32u64 {
            assert_eq!(Bitstring::from_index(v, 5).to_index(), Some(v));
        }
    }

    #[test]
    fn test_selected_nodes() {
        let b: Bitstring = "01101".parse().unwrap();
        assert_eq!(b.selected_nodes(), vec![1, 2, 4]);
        assert_eq!(b.count_ones(), 3);
        assert!(b.is_set(4));
        assert!(!b.is_set(7));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("01x1".parse::<Bitstring>().is_err());
    }

    #[test]
    fn test_left_padded() {
        assert_eq!(
            Bitstring::left_padded("101", 5).unwrap().to_string(),
            "00101"
        );
        assert!(Bitstring::left_padded("110011", 5).is_err());
    }

    #[test]
    fn test_for_graph_length_mismatch() {
        let g = Graph::path(4);
        assert!(Bitstring::for_graph("1010", &g).is_ok());
        assert!(matches!(
            Bitstring::for_graph("101", &g),
            Err(MisError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_ordering_matches_index() {
        let a = Bitstring::from_index(3, 4);
        let b = Bitstring::from_index(8, 4);
        assert!(a < b);
    }

    #[test]
    fn test_serde_as_string() {
        let b = Bitstring::from_index(5, 4);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "\"0101\"");
        let back: Bitstring = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);
    }
}
