//! Round setup: deriving a target from the outcome distribution and finding
//! the combinations that reach it.
//!
//! Target selection runs once per round, before any attempt is accepted; the
//! target is fixed for the round's duration.

use serde::{Deserialize, Serialize};

use crate::enumerate::{combination_triples, ordered_triples};
use crate::evaluate::{evaluate, expression};
use crate::{Outcome, Tile};

/// Why a round could not be started from a tile set.
///
/// Callers must not start a round on this error; substituting a default
/// target would create a round with no reachable correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    /// The tile set is smaller than one triple.
    TooFewTiles(usize),
    /// Every enumerated outcome was undefined or non-finite.
    NoFiniteOutcomes,
}

impl std::fmt::Display for RoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewTiles(n) => {
                write!(f, "no target determinable: {} tiles, need at least 3", n)
            }
            Self::NoFiniteOutcomes => {
                write!(f, "no target determinable: tile set yields no finite outcome")
            }
        }
    }
}

impl std::error::Error for RoundError {}

/// The statistically most common finite outcome across the ordered-triple
/// space, with its occurrence count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetSelection {
    pub value: f64,
    pub frequency: usize,
}

/// Frequency table of finite outcomes over all ordered triples, in
/// ascending numeric order.
///
/// Undefined outcomes are excluded from all statistics. Negative zero is
/// folded into zero so a single outcome value cannot split into two buckets.
pub fn outcome_distribution(tiles: &[Tile]) -> Vec<(f64, usize)> {
    let mut outcomes: Vec<f64> = ordered_triples(tiles)
        .filter_map(|(a, b, c)| evaluate(a, b, c).value())
        .map(|v| if v == 0.0 { 0.0 } else { v })
        .collect();
    outcomes.sort_by(f64::total_cmp);

    let mut distribution: Vec<(f64, usize)> = Vec::new();
    for v in outcomes {
        match distribution.last_mut() {
            Some((prev, count)) if *prev == v => *count += 1,
            _ => distribution.push((v, 1)),
        }
    }
    distribution
}

/// Pick the round's target: the most frequent finite outcome, ties broken
/// by the numerically smallest value.
///
/// Deterministic for a fixed tile set; re-running returns the same value.
pub fn select_target(tiles: &[Tile]) -> Result<TargetSelection, RoundError> {
    if tiles.len() < 3 {
        return Err(RoundError::TooFewTiles(tiles.len()));
    }

    // Ascending scan with a strict comparison keeps the smallest value on
    // a frequency tie.
    outcome_distribution(tiles)
        .into_iter()
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })
        .map(|(value, frequency)| TargetSelection { value, frequency })
        .ok_or(RoundError::NoFiniteOutcomes)
}

/// Which enumeration a solution scan walks. The policy is the caller's
/// choice, not hard-coded into the finder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriplePolicy {
    /// Every permutation is a distinct solution record.
    AllOrdered,
    /// One canonical ascending-index ordering per tile combination; keeps
    /// duplicate permutations out of the list shown to the player.
    CombinationsOnly,
}

/// A combination whose outcome equals the round's target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// The tiles in evaluation order.
    pub tiles: [Tile; 3],
    /// Concatenated tile labels in evaluation order.
    pub name_key: String,
    pub outcome: f64,
    /// Rendered formula, e.g. `"5 / 2 - 3"`.
    pub expression: String,
}

impl Solution {
    fn from_triple(a: &Tile, b: &Tile, c: &Tile, outcome: f64) -> Self {
        Self {
            tiles: [a.clone(), b.clone(), c.clone()],
            name_key: format!("{}{}{}", a.label(), b.label(), c.label()),
            outcome,
            expression: expression(a, b, c),
        }
    }
}

/// Scan the chosen enumeration for combinations whose outcome equals
/// `target` exactly. Undefined outcomes never match, whatever the target.
pub fn find_solutions(tiles: &[Tile], target: f64, policy: TriplePolicy) -> Vec<Solution> {
    match policy {
        TriplePolicy::AllOrdered => matching(ordered_triples(tiles), target),
        TriplePolicy::CombinationsOnly => matching(combination_triples(tiles), target),
    }
}

fn matching<'a>(
    triples: impl Iterator<Item = (&'a Tile, &'a Tile, &'a Tile)>,
    target: f64,
) -> Vec<Solution> {
    triples
        .filter_map(|(a, b, c)| match evaluate(a, b, c) {
            Outcome::Value(v) if v == target => Some(Solution::from_triple(a, b, c, v)),
            _ => None,
        })
        .collect()
}
