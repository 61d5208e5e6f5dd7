//! N×N board with placement and availability queries.

use super::types::{Coord, Mark, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Square N×N board. The size is fixed when the board is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    /// Squares in row-major order.
    squares: Vec<Square>,
}

impl Board {
    /// Creates an empty board of the given size.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size],
        }
    }

    /// Rebuilds a board from row-major squares.
    ///
    /// Returns `None` when the square count is not `size * size`,
    /// including when `size * size` overflows.
    #[instrument(skip(squares), fields(count = squares.len()))]
    pub fn from_squares(size: usize, squares: Vec<Square>) -> Option<Self> {
        if size.checked_mul(size) != Some(squares.len()) {
            warn!("Square count does not match board size");
            return None;
        }
        Some(Self { size, squares })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Squares in row-major order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Gets the square at a coordinate, `None` if out of range.
    pub fn get(&self, coord: Coord) -> Option<Square> {
        if !coord.fits(self.size) {
            return None;
        }
        self.squares.get(coord.to_index(self.size)).copied()
    }

    /// Checks whether a coordinate is on the board and empty.
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Square::Empty))
    }

    /// Places a mark on an empty square.
    ///
    /// Returns `false` without touching the board when the square is
    /// occupied or the coordinate is off the board.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn place(&mut self, coord: Coord, mark: Mark) -> bool {
        if !coord.fits(self.size) {
            warn!(%coord, "Placement outside the board");
            return false;
        }
        let idx = coord.to_index(self.size);
        if self.squares[idx] != Square::Empty {
            debug!(%coord, "Square already occupied");
            return false;
        }
        self.squares[idx] = Square::Occupied(mark);
        true
    }

    /// Availability grid: `true` for every empty square.
    #[instrument(skip(self))]
    pub fn availability(&self) -> Availability {
        Availability {
            size: self.size,
            open: self.squares.iter().map(|s| *s == Square::Empty).collect(),
        }
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..self.size {
            let line: Vec<&str> = (0..self.size)
                .map(|col| match self.squares[row * self.size + col] {
                    Square::Empty => ".",
                    Square::Occupied(Mark::X) => "X",
                    Square::Occupied(Mark::O) => "O",
                })
                .collect();
            result.push_str(&line.join("|"));
            if row + 1 < self.size {
                result.push('\n');
            }
        }
        result
    }
}

/// Which squares could take a mark, as seen when a move was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    size: usize,
    open: Vec<bool>,
}

impl Availability {
    /// Side length of the board this grid describes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether a move at `coord` would be accepted.
    pub fn is_available(&self, coord: Coord) -> bool {
        coord.fits(self.size) && self.open[coord.to_index(self.size)]
    }

    /// Available coordinates in row-major order.
    pub fn available_coords(&self) -> Vec<Coord> {
        self.open
            .iter()
            .enumerate()
            .filter(|(_, open)| **open)
            .map(|(idx, _)| Coord::from_index(idx, self.size))
            .collect()
    }

    /// Number of available squares.
    pub fn count(&self) -> usize {
        self.open.iter().filter(|open| **open).count()
    }

    /// True when nothing can be played.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
