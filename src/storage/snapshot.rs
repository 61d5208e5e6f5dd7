//! Serializable match state.

use super::SnapshotError;
use crate::game::{Board, Mark, Square};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Complete state of one match at a point in time.
///
/// The board is stored flattened in row-major order
/// (`index = row * board_size + col`).
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct MatchSnapshot {
    board_size: usize,
    cells: Vec<Square>,
    in_progress: bool,
    current_mark: Mark,
    reference_mark: Mark,
    reaction_times: Vec<f64>,
    /// Score summed over every finished match. Set by the persistence engine.
    total_score: i64,
}

impl MatchSnapshot {
    /// Captures live match state. The board is copied, never shared.
    #[instrument(skip(board, reaction_times), fields(size = board.size()))]
    pub fn capture(
        board: &Board,
        in_progress: bool,
        current_mark: Mark,
        reference_mark: Mark,
        reaction_times: &[f64],
    ) -> Self {
        Self {
            board_size: board.size(),
            cells: flatten(board),
            in_progress,
            current_mark,
            reference_mark,
            reaction_times: reaction_times.to_vec(),
            total_score: 0,
        }
    }

    /// Rebuilds the board.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the cell array does not describe a
    /// `board_size × board_size` board.
    #[instrument(skip(self), fields(size = self.board_size))]
    pub fn board(&self) -> Result<Board, SnapshotError> {
        unflatten(self.board_size, &self.cells)
    }

    pub(super) fn set_total_score(&mut self, total_score: i64) {
        self.total_score = total_score;
    }
}

/// Flattens a board into row-major cells.
pub fn flatten(board: &Board) -> Vec<Square> {
    board.squares().to_vec()
}

/// Rebuilds a board from row-major cells.
///
/// # Errors
///
/// Returns [`SnapshotError::ZeroSize`] for a zero size and
/// [`SnapshotError::CellCount`] when `cells.len() != size * size`.
pub fn unflatten(size: usize, cells: &[Square]) -> Result<Board, SnapshotError> {
    if size == 0 {
        return Err(SnapshotError::ZeroSize);
    }
    let expected = size.checked_mul(size).unwrap_or(usize::MAX);
    Board::from_squares(size, cells.to_vec()).ok_or(SnapshotError::CellCount {
        expected,
        got: cells.len(),
    })
}
