//! Rendering seam.

use crate::game::Board;

/// Receives the board after it is loaded and after every committed move.
pub trait BoardView: Send {
    /// Draws the current board.
    fn draw_board(&mut self, board: &Board);
}

impl<V: BoardView + ?Sized> BoardView for Box<V> {
    fn draw_board(&mut self, board: &Board) {
        (**self).draw_board(board)
    }
}
