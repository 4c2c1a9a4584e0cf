//! Execution results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts keyed by bit-string.
///
/// Bit-strings are written with classical bit 0 as the leftmost character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Number of times `bitstring` was observed.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of observations.
    pub fn total_shots(&self) -> u64 {
        self.0.values().sum()
    }

    /// Iterate over (bit-string, count) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The most frequently observed outcome.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.iter().max_by_key(|&(_, count)| count)
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (bitstring, count) in iter {
            counts.insert(bitstring, count);
        }
        counts
    }
}

/// The result of running a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Observed outcomes.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock execution time in microseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_us: Option<u64>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_us: None,
        }
    }

    /// Record how long execution took.
    #[must_use]
    pub fn with_execution_time(mut self, micros: u64) -> Self {
        self.execution_time_us = Some(micros);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate() {
        let mut counts = Counts::new();
        counts.insert("0", 1);
        counts.insert("1", 2);
        counts.insert("0", 3);

        assert_eq!(counts.get("0"), 4);
        assert_eq!(counts.get("1"), 2);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total_shots(), 6);
        assert_eq!(counts.most_frequent(), Some(("0", 4)));
    }

    #[test]
    fn test_counts_from_iter() {
        let counts: Counts = [("1", 1)].into_iter().collect();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("1"), 1);
        assert!(Counts::new().is_empty());
    }

    #[test]
    fn test_execution_result_serializes_counts_as_map() {
        let result = ExecutionResult::new([("1", 1)].into_iter().collect(), 1).with_execution_time(42);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["counts"]["1"], 1);
        assert_eq!(json["shots"], 1);
        assert_eq!(json["execution_time_us"], 42);
    }
}
