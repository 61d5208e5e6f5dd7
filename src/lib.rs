//! Timed tic-tac-toe - resumable N×N matches with reaction-time scoring
//!
//! This library provides the match engine: the board, the players, turn
//! order, scoring and save/resume. Rendering and input live behind the
//! [`BoardView`] and [`MoveRequest`] seams.
//!
//! # Architecture
//!
//! - **Board**: N×N grid, placement, win/draw evaluation
//! - **Players**: interactive (channel-driven), automated (random), remote (stub)
//! - **Score**: reaction-time log mapped onto configured score ranges
//! - **Storage**: key-value stores and the snapshot persistence engine
//! - **Orchestrator**: new-or-resume, the turn loop, game over
//!
//! # Example
//!
//! ```no_run
//! use timed_tictactoe::{
//!     AutomatedPlayer, Board, BoardView, GameConfig, GameOrchestrator, InteractivePlayer,
//!     MemoryStore, PersistenceEngine,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! struct Print;
//! impl BoardView for Print {
//!     fn draw_board(&mut self, board: &Board) {
//!         println!("{}", board.display());
//!     }
//! }
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default();
//! let (human, _requests) = InteractivePlayer::new("Human");
//! let bot = AutomatedPlayer::new("Bot", config.bot());
//! let persistence = PersistenceEngine::new(Box::new(MemoryStore::new()));
//!
//! let mut game = GameOrchestrator::new(config, persistence, Box::new(human), Box::new(bot), Print)?;
//! game.load_new_game(Some(true))?;
//! let result = game.run(&CancellationToken::new()).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod error;
mod game;
mod orchestrator;
mod players;
mod score;
mod storage;
mod turn;
mod view;

// Crate-level exports - Configuration
pub use config::{
    BotConfig, ConfigError, GameConfig, MAX_BOARD_SIZE, ScoringConfig, StorageBackend,
    StorageConfig,
};

// Crate-level exports - Errors
pub use error::EngineError;

// Crate-level exports - Board
pub use game::{
    Availability, Board, Coord, Evaluation, Mark, Outcome, Square, check_winner, winning_lines,
};

// Crate-level exports - Players
pub use players::{
    AutomatedPlayer, InteractivePlayer, MoveRequest, Player, PlayerError, RemotePlayer,
};

// Crate-level exports - Turn order and scoring
pub use score::{ScoreEngine, ScoreError};
pub use turn::TurnCoordinator;

// Crate-level exports - Storage
pub use storage::{
    DEFAULT_SAVE_KEY, FileStore, KeyValueStore, MatchSnapshot, MemoryStore, PersistError,
    PersistenceEngine, SnapshotError, StoreError, StoreErrorKind, flatten, unflatten,
};

// Crate-level exports - Orchestration
pub use orchestrator::{GameOrchestrator, GameOver, MatchPhase, MatchStart, TurnOutcome};
pub use view::BoardView;
