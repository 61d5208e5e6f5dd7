mod board;
mod rules;
mod types;

pub use board::{Availability, Board};
pub use rules::{check_winner, winning_lines};
pub use types::{Coord, Evaluation, Mark, Outcome, Square};
