//! Win and draw detection for N×N boards.

use super::board::Board;
use super::types::{Coord, Evaluation, Mark, Outcome, Square};
use tracing::{debug, instrument};

/// Coordinates of every line that wins the game, in scan order:
/// rows top to bottom, columns left to right, main diagonal, anti-diagonal.
#[instrument]
pub fn winning_lines(size: usize) -> Vec<Vec<Coord>> {
    let mut lines = Vec::with_capacity(2 * size + 2);
    for row in 0..size {
        lines.push((0..size).map(|col| Coord::new(row, col)).collect());
    }
    for col in 0..size {
        lines.push((0..size).map(|row| Coord::new(row, col)).collect());
    }
    lines.push((0..size).map(|i| Coord::new(i, i)).collect());
    lines.push((0..size).map(|i| Coord::new(i, size - 1 - i)).collect());
    lines
}

/// Returns the mark holding the first complete line, if any.
#[instrument(skip(board), fields(size = board.size()))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    if board.size() == 0 {
        return None;
    }
    for line in winning_lines(board.size()) {
        let first = board.get(line[0]);
        let Some(Square::Occupied(mark)) = first else {
            continue;
        };
        if line[1..].iter().all(|c| board.get(*c) == first) {
            debug!(%mark, "Complete line found");
            return Some(mark);
        }
    }
    None
}

impl Board {
    /// Evaluates the board relative to `reference`.
    ///
    /// A complete line yields `Win` when it belongs to `reference` and
    /// `Lose` otherwise. With no line, a full board is a `Draw` and
    /// anything else is `InProgress`.
    #[instrument(skip(self), fields(size = self.size()))]
    pub fn evaluate(&self, reference: Mark) -> Evaluation {
        if let Some(winner) = check_winner(self) {
            let outcome = if winner == reference {
                Outcome::Win
            } else {
                Outcome::Lose
            };
            return Evaluation::new(outcome, Some(winner));
        }
        if self.is_full() {
            return Evaluation::new(Outcome::Draw, None);
        }
        Evaluation::new(Outcome::InProgress, None)
    }
}
