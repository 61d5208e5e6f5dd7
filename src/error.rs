//! Crate-level error type.

use crate::config::ConfigError;
use crate::players::PlayerError;
use crate::score::ScoreError;
use crate::storage::PersistError;
use derive_more::{Display, Error, From};

/// Errors that stop a match.
///
/// Rejected moves and cancellation are not errors; they surface as
/// [`TurnOutcome`](crate::TurnOutcome) variants.
#[derive(Debug, Display, Error, From)]
pub enum EngineError {
    /// A player failed to produce a move.
    #[display("Player error: {}", _0)]
    #[from]
    Player(PlayerError),
    /// Scoring was invoked with a non-terminal outcome.
    #[display("Score error: {}", _0)]
    #[from]
    Score(ScoreError),
    /// The snapshot could not be written.
    #[display("Persistence error: {}", _0)]
    #[from]
    Persistence(PersistError),
    /// The configuration is unusable.
    #[display("{}", _0)]
    #[from]
    Config(ConfigError),
    /// `load_new_game` has not been called.
    #[display("No match loaded")]
    NoMatchLoaded,
    /// The match already ended.
    #[display("Match already finished")]
    MatchFinished,
    /// A previous fatal error ended the match. Load it again to resume.
    #[display("Match aborted after a fatal error")]
    MatchAborted,
}
