//! Player trait and implementations.

mod automated;
mod interactive;
mod remote;

pub use automated::AutomatedPlayer;
pub use interactive::{InteractivePlayer, MoveRequest};
pub use remote::RemotePlayer;

use crate::game::{Availability, Coord};
use derive_more::{Display, Error};

/// Trait for anything that can produce moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Produces the next move given the squares that are still open.
    ///
    /// May suspend for as long as the player needs. Callers abandon the
    /// future on cancellation, so implementations must not leave partial
    /// state behind across an await.
    async fn produce_move(&mut self, availability: &Availability) -> Result<Coord, PlayerError>;

    /// Whether this player's turns count towards the reaction-time log.
    fn records_latency(&self) -> bool {
        false
    }

    /// Returns the player's display name.
    fn name(&self) -> &str;
}

/// Errors a player can raise while producing a move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PlayerError {
    /// Asked to move on a board with no open squares.
    #[display("No available moves for {}", player)]
    NoAvailableMoves {
        /// Name of the player that was asked.
        player: String,
    },
    /// The input side went away before answering.
    #[display("Input channel closed for {}", player)]
    InputClosed {
        /// Name of the player that was waiting.
        player: String,
    },
    /// The player variant has no implementation yet.
    #[display("{} is not implemented", feature)]
    Unimplemented {
        /// Missing capability.
        feature: &'static str,
    },
}
