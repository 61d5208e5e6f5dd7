//! Core domain types for the N×N board.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mark a player places on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Mark X, held by the primary (human) seat.
    X,
    /// Mark O, held by the opponent seat.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Cell holds a mark. Never reverts to `Empty`.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// Board coordinate. `row` selects the line scanned first when
/// evaluating, `col` the position within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Coord {
    /// Row index, `0..size`.
    pub row: usize,
    /// Column index, `0..size`.
    pub col: usize,
}

impl Coord {
    /// Row-major index into a board of the given size.
    #[instrument(level = "trace")]
    pub fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Inverse of [`Coord::to_index`].
    #[instrument(level = "trace")]
    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    /// Whether the coordinate lies on a board of the given size.
    pub fn fits(self, size: usize) -> bool {
        self.row < size && self.col < size
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Match outcome judged from the reference mark's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Outcome {
    /// No line complete and empty cells remain.
    InProgress,
    /// The reference mark completed a line.
    Win,
    /// The other mark completed a line.
    Lose,
    /// Board full, no line complete.
    Draw,
}

impl Outcome {
    /// True for `Win`, `Lose` and `Draw`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_getters::Getters, derive_new::new)]
pub struct Evaluation {
    /// Outcome relative to the reference mark.
    outcome: Outcome,
    /// Mark that completed a line, if any.
    winner: Option<Mark>,
}
