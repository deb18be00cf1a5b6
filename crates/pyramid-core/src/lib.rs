//! Core engine for the Formula Pyramid tile puzzle.
//!
//! A round deals a fixed set of operator/operand tiles; the player selects
//! three, which chain left to right through two binary operations into a
//! single value compared against the round's target. This crate owns the
//! arithmetic, the combinatorics over the tile set, target selection,
//! solution finding, and the session state machine. Rendering and transport
//! live in the surface crates and only consume plain data from here.

pub mod enumerate;
pub mod evaluate;
pub mod generator;
pub mod round;
pub mod session;

pub use enumerate::{combination_count, combination_triples, ordered_triple_count, ordered_triples};
pub use evaluate::{evaluate, expression, perform_operation};
pub use generator::{GeneratorConfig, TileGenerator};
pub use round::{
    find_solutions, outcome_distribution, select_target, RoundError, Solution, TargetSelection,
    TriplePolicy,
};
pub use session::{
    AttemptError, AttemptReport, EndReason, SelectionUpdate, Session, SessionStatus,
    DEFAULT_ROUND_SECS,
};

use serde::{Deserialize, Serialize};

/// Arithmetic operator carried by a tile.
///
/// The alphabet is closed: every tile holds one of these four variants, so
/// an "invalid operator" cannot be represented once a tile exists. Transport
/// layers reject anything else at deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Operator {
    /// All operators, in the order the reference generator draws from.
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    /// Single-character form, matching the serialized representation.
    pub fn as_char(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// An immutable operator/operand unit with a stable identity.
///
/// Exactly ten tiles exist per round in the reference configuration, but the
/// engine accepts any tile set of three or more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Identity, stable within a round.
    pub id: u32,
    pub operator: Operator,
    /// 1..=9 in the reference configuration.
    pub operand: u8,
    /// Optional display label; combination name keys concatenate these.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Tile {
    pub fn new(id: u32, operator: Operator, operand: u8) -> Self {
        Self {
            id,
            operator,
            operand,
            name: None,
        }
    }

    pub fn named(id: u32, operator: Operator, operand: u8, name: impl Into<String>) -> Self {
        Self {
            id,
            operator,
            operand,
            name: Some(name.into()),
        }
    }

    /// Stable label for name keys: the display name if set, else the id.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.id.to_string(),
        }
    }
}

/// Result of evaluating a combination.
///
/// Division by zero is not an error; it is this sentinel, and it propagates
/// through chained evaluation. A tagged type rather than a floating-point
/// constant keeps match exhaustiveness and avoids colliding with any
/// legitimately large finite result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Value(f64),
    Undefined,
}

impl Outcome {
    /// Wrap a computed value, normalizing anything non-finite to `Undefined`.
    pub fn from_value(value: f64) -> Self {
        if value.is_finite() {
            Outcome::Value(value)
        } else {
            Outcome::Undefined
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Value(v) => Some(*v),
            Outcome::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Outcome::Undefined)
    }

    /// Exact numeric comparison against a target. Undefined never matches.
    pub fn equals(&self, target: f64) -> bool {
        matches!(self, Outcome::Value(v) if *v == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_serde_chars() {
        assert_eq!(serde_json::to_string(&Operator::Add).unwrap(), "\"+\"");
        assert_eq!(serde_json::to_string(&Operator::Div).unwrap(), "\"/\"");
        let op: Operator = serde_json::from_str("\"*\"").unwrap();
        assert_eq!(op, Operator::Mul);
        assert!(serde_json::from_str::<Operator>("\"%\"").is_err());
    }

    #[test]
    fn test_tile_serde_round_trip() {
        let tile = Tile::named(3, Operator::Sub, 7, "C");
        let json = serde_json::to_string(&tile).unwrap();
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tile);

        // name is optional on the wire
        let bare: Tile = serde_json::from_str(r#"{"id":1,"operator":"+","operand":5}"#).unwrap();
        assert_eq!(bare, Tile::new(1, Operator::Add, 5));
    }

    #[test]
    fn test_label_falls_back_to_id() {
        assert_eq!(Tile::named(2, Operator::Add, 4, "B").label(), "B");
        assert_eq!(Tile::new(2, Operator::Add, 4).label(), "2");
    }

    #[test]
    fn test_outcome_normalizes_non_finite() {
        assert_eq!(Outcome::from_value(2.5), Outcome::Value(2.5));
        assert!(Outcome::from_value(f64::INFINITY).is_undefined());
        assert!(Outcome::from_value(f64::NAN).is_undefined());
    }

    #[test]
    fn test_outcome_equality_is_exact() {
        assert!(Outcome::Value(-0.5).equals(-0.5));
        assert!(!Outcome::Value(-0.5).equals(-0.5000001));
        assert!(!Outcome::Undefined.equals(0.0));
    }
}
