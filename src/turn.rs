//! Whose turn it is.

use crate::game::Mark;
use crate::players::Player;
use tracing::{debug, instrument};

/// Two seats and the mark that moves next.
///
/// Only two states exist (X to move, O to move) and [`switch`] is the only
/// transition. The starting side is chosen once per match.
///
/// [`switch`]: TurnCoordinator::switch
pub struct TurnCoordinator {
    player_x: Box<dyn Player>,
    player_o: Box<dyn Player>,
    current: Mark,
}

impl TurnCoordinator {
    /// Seats both players with X to move.
    pub fn new(player_x: Box<dyn Player>, player_o: Box<dyn Player>) -> Self {
        Self {
            player_x,
            player_o,
            current: Mark::X,
        }
    }

    /// Chooses the starting side: X when `x_first`, O otherwise.
    #[instrument(skip(self))]
    pub fn initialize(&mut self, x_first: bool) {
        self.current = if x_first { Mark::X } else { Mark::O };
        debug!(current = %self.current, "Turn order initialized");
    }

    /// Restores the side to move from a saved match.
    #[instrument(skip(self))]
    pub fn resume_at(&mut self, mark: Mark) {
        self.current = mark;
    }

    /// Hands the turn to the other side.
    pub fn switch(&mut self) {
        self.current = self.current.opponent();
    }

    /// Mark of the side to move.
    pub fn current_mark(&self) -> Mark {
        self.current
    }

    /// Player of the side to move.
    pub fn current_actor(&self) -> &dyn Player {
        match self.current {
            Mark::X => self.player_x.as_ref(),
            Mark::O => self.player_o.as_ref(),
        }
    }

    /// Mutable access to the side to move.
    pub fn current_actor_mut(&mut self) -> &mut dyn Player {
        match self.current {
            Mark::X => self.player_x.as_mut(),
            Mark::O => self.player_o.as_mut(),
        }
    }

    /// Player holding `mark`.
    pub fn player(&self, mark: Mark) -> &dyn Player {
        match mark {
            Mark::X => self.player_x.as_ref(),
            Mark::O => self.player_o.as_ref(),
        }
    }
}
