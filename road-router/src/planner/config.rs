//! Search configuration for the shortest-path engine.

use std::fmt;
use std::str::FromStr;

/// How the engine picks the next node to settle.
///
/// Both strategies settle nodes in non-decreasing cost order and produce
/// the same costs. They may differ in which of several equal-cost
/// predecessors a node ends up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Scan every unvisited node for the minimum, O(V) per pick.
    /// Ties go to the lowest node index.
    LinearScan,

    /// Pop from a binary min-heap with lazy deletion of stale entries.
    #[default]
    BinaryHeap,
}

/// Error returned when parsing an unknown selection strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection strategy {0:?} (expected \"linear\" or \"heap\")")]
pub struct InvalidSelection(String);

impl FromStr for Selection {
    type Err = InvalidSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "linear-scan" | "scan" => Ok(Selection::LinearScan),
            "heap" | "binary-heap" => Ok(Selection::BinaryHeap),
            _ => Err(InvalidSelection(s.to_string())),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::LinearScan => f.write_str("linear"),
            Selection::BinaryHeap => f.write_str("heap"),
        }
    }
}

/// Configuration parameters for shortest-path search.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// Strategy for choosing the closest unvisited node.
    pub selection: Selection,
}

impl SearchConfig {
    /// Create a new configuration with the given selection strategy.
    pub fn new(selection: Selection) -> Self {
        Self { selection }
    }
}
