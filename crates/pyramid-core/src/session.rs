//! Session tracking for one round of play.
//!
//! A session is a synchronous state machine mutated from two external
//! triggers: attempt processing and timer ticks. Callers keep those
//! serialized (one owning event loop, or a mutex around the session); the
//! machine itself performs no I/O and never blocks.

use std::collections::HashSet;

use serde::Serialize;

use crate::enumerate::ordered_triple_count;
use crate::evaluate::evaluate;
use crate::round::{find_solutions, select_target, RoundError, Solution, TriplePolicy};
use crate::{Outcome, Tile};

/// Round length in seconds for the reference configuration.
pub const DEFAULT_ROUND_SECS: u32 = 120;

/// Why a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    TimeExpired,
    AllCombinationsTried,
}

/// Session lifecycle. No transition leaves `Ended`; a new round requires a
/// fresh [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    Active,
    Ended(EndReason),
}

impl SessionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }
}

/// An attempt rejected before touching session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptError {
    /// The session has already ended.
    RoundOver,
    /// An attempt takes exactly three tiles.
    WrongTileCount(usize),
    /// The same tile cannot fill two positions of one triple.
    DuplicateTile(u32),
    /// The id does not belong to this round's tile set.
    UnknownTile(u32),
}

impl std::fmt::Display for AttemptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoundOver => write!(f, "round is over, no further attempts accepted"),
            Self::WrongTileCount(n) => write!(f, "an attempt needs exactly 3 tiles, got {}", n),
            Self::DuplicateTile(id) => write!(f, "tile {} appears more than once", id),
            Self::UnknownTile(id) => write!(f, "tile {} is not part of this round", id),
        }
    }
}

impl std::error::Error for AttemptError {}

/// What a processed attempt did to the session.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptReport {
    pub outcome: Outcome,
    /// Whether the outcome equals the round's target exactly.
    pub matched: bool,
    /// Whether this ordered triple had been tried before.
    pub repeat: bool,
    /// The name key, if this attempt added a new entry to the found list.
    pub new_solution: Option<String>,
    /// Raw score after this attempt (every matching attempt counts).
    pub score: u32,
    /// Tried-set size after this attempt.
    pub tried: usize,
    /// Session status after this attempt, including the transition to
    /// `Ended(AllCombinationsTried)` the attempt itself may have caused.
    pub status: SessionStatus,
}

/// Result of toggling a tile in the selection buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionUpdate {
    /// Tile added; the buffer now holds this many tiles.
    Selected(usize),
    /// Tile was already buffered and has been removed instead.
    Deselected(usize),
    /// The third tile landed: the attempt fired and the buffer is clear.
    Fired(AttemptReport),
}

/// Mutable state of one round: timer, score, tried set, selection buffer.
pub struct Session {
    tiles: Vec<Tile>,
    target: f64,
    /// All ordered solutions, so every matching attempt maps to exactly one
    /// record here.
    solutions: Vec<Solution>,
    total_ordered: usize,
    tried: HashSet<[u32; 3]>,
    found: Vec<String>,
    score: u32,
    time_remaining: u32,
    status: SessionStatus,
    selection: Vec<u32>,
}

impl Session {
    /// Start a round: fix the target and precompute the solution set.
    ///
    /// Fails on a degenerate tile set; a round without a determinable
    /// target must not start.
    pub fn new(tiles: Vec<Tile>, round_secs: u32) -> Result<Self, RoundError> {
        let target = select_target(&tiles)?;
        let solutions = find_solutions(&tiles, target.value, TriplePolicy::AllOrdered);
        Ok(Self {
            total_ordered: ordered_triple_count(tiles.len()),
            target: target.value,
            solutions,
            tiles,
            tried: HashSet::new(),
            found: Vec::new(),
            score: 0,
            time_remaining: round_secs,
            status: SessionStatus::Active,
            selection: Vec::new(),
        })
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn tried_count(&self) -> usize {
        self.tried.len()
    }

    pub fn total_ordered_triples(&self) -> usize {
        self.total_ordered
    }

    /// The round's full solution set (all orderings).
    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    /// Name keys of solutions found so far, in discovery order.
    pub fn found(&self) -> &[String] {
        &self.found
    }

    /// `(found, total)` solution progress.
    pub fn progress(&self) -> (usize, usize) {
        (self.found.len(), self.solutions.len())
    }

    /// Whether every solution has been found. A progress condition, not a
    /// termination reason: the round still runs until time or combination
    /// space is exhausted.
    pub fn all_solutions_found(&self) -> bool {
        self.found.len() == self.solutions.len()
    }

    /// Currently buffered tile ids, in selection order.
    pub fn selection(&self) -> &[u32] {
        &self.selection
    }

    fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Process one attempt.
    ///
    /// Validation failures reject the attempt without mutating any state.
    /// A valid attempt records the ordered identity key (idempotent),
    /// increments the raw score on a target match, appends the name key to
    /// the found list if new, and only then checks for combination-space
    /// exhaustion — so the terminating attempt's own score effect is part
    /// of the final report.
    pub fn attempt(&mut self, ids: &[u32]) -> Result<AttemptReport, AttemptError> {
        if !self.status.is_active() {
            return Err(AttemptError::RoundOver);
        }
        if ids.len() != 3 {
            return Err(AttemptError::WrongTileCount(ids.len()));
        }
        let key = [ids[0], ids[1], ids[2]];
        if key[0] == key[1] || key[0] == key[2] {
            return Err(AttemptError::DuplicateTile(key[0]));
        }
        if key[1] == key[2] {
            return Err(AttemptError::DuplicateTile(key[1]));
        }

        let t1 = self.tile(key[0]).ok_or(AttemptError::UnknownTile(key[0]))?;
        let t2 = self.tile(key[1]).ok_or(AttemptError::UnknownTile(key[1]))?;
        let t3 = self.tile(key[2]).ok_or(AttemptError::UnknownTile(key[2]))?;

        let outcome = evaluate(t1, t2, t3);
        let name_key = format!("{}{}{}", t1.label(), t2.label(), t3.label());

        let repeat = !self.tried.insert(key);
        let matched = outcome.equals(self.target);
        let mut new_solution = None;
        if matched {
            self.score += 1;
            if !self.found.iter().any(|k| k == &name_key) {
                self.found.push(name_key.clone());
                new_solution = Some(name_key);
            }
        }

        if self.tried.len() >= self.total_ordered {
            self.status = SessionStatus::Ended(EndReason::AllCombinationsTried);
        }

        Ok(AttemptReport {
            outcome,
            matched,
            repeat,
            new_solution,
            score: self.score,
            tried: self.tried.len(),
            status: self.status,
        })
    }

    /// One countdown step, driven by an external once-per-second callback.
    /// Reaching zero ends the round; ticking an ended session is a no-op.
    pub fn tick(&mut self) -> SessionStatus {
        if self.status.is_active() {
            self.time_remaining = self.time_remaining.saturating_sub(1);
            if self.time_remaining == 0 {
                self.status = SessionStatus::Ended(EndReason::TimeExpired);
            }
        }
        self.status
    }

    /// Toggle a tile in the pre-attempt selection buffer.
    ///
    /// A buffered tile toggles off; the third tile fires the attempt
    /// automatically, and the buffer is cleared regardless of outcome.
    pub fn toggle_select(&mut self, id: u32) -> Result<SelectionUpdate, AttemptError> {
        if !self.status.is_active() {
            return Err(AttemptError::RoundOver);
        }
        if self.tile(id).is_none() {
            return Err(AttemptError::UnknownTile(id));
        }

        if let Some(pos) = self.selection.iter().position(|&s| s == id) {
            self.selection.remove(pos);
            return Ok(SelectionUpdate::Deselected(self.selection.len()));
        }

        self.selection.push(id);
        if self.selection.len() == 3 {
            let ids = std::mem::take(&mut self.selection);
            let report = self.attempt(&ids)?;
            return Ok(SelectionUpdate::Fired(report));
        }
        Ok(SelectionUpdate::Selected(self.selection.len()))
    }
}
