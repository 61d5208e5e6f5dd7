//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;
use timed_tictactoe::{
    Availability, Board, BoardView, Coord, GameConfig, GameOrchestrator, MemoryStore,
    PersistenceEngine, Player, PlayerError, StorageBackend, StorageConfig,
};

/// Plays a fixed list of moves, each after `delay`.
pub struct ScriptedPlayer {
    name: String,
    moves: VecDeque<Coord>,
    delay: Duration,
    timed: bool,
}

impl ScriptedPlayer {
    /// Untimed player answering instantly.
    pub fn new(name: &str, moves: &[(usize, usize)]) -> Self {
        Self {
            name: name.to_string(),
            moves: moves.iter().map(|&(r, c)| Coord::new(r, c)).collect(),
            delay: Duration::ZERO,
            timed: false,
        }
    }

    /// Timed player that takes `secs` per move.
    pub fn timed(name: &str, moves: &[(usize, usize)], secs: u64) -> Self {
        Self {
            delay: Duration::from_secs(secs),
            timed: true,
            ..Self::new(name, moves)
        }
    }
}

#[async_trait::async_trait]
impl Player for ScriptedPlayer {
    async fn produce_move(&mut self, _availability: &Availability) -> Result<Coord, PlayerError> {
        tokio::time::sleep(self.delay).await;
        self.moves
            .pop_front()
            .ok_or_else(|| PlayerError::NoAvailableMoves {
                player: self.name.clone(),
            })
    }

    fn records_latency(&self) -> bool {
        self.timed
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Keeps every rendered board.
#[derive(Default)]
pub struct RecordingView {
    pub frames: Vec<String>,
}

impl BoardView for RecordingView {
    fn draw_board(&mut self, board: &Board) {
        self.frames.push(board.display());
    }
}

/// Default config on the in-memory backend.
pub fn memory_config() -> GameConfig {
    GameConfig::default()
        .with_storage(StorageConfig::default().with_backend(StorageBackend::Memory))
}

/// Orchestrator over a clone of `store`, so callers can reopen the same save.
pub fn orchestrator(
    store: &MemoryStore,
    x: ScriptedPlayer,
    o: ScriptedPlayer,
) -> GameOrchestrator<RecordingView> {
    let persistence = PersistenceEngine::new(Box::new(store.clone()));
    GameOrchestrator::new(
        memory_config(),
        persistence,
        Box::new(x),
        Box::new(o),
        RecordingView::default(),
    )
    .expect("Default config is valid")
}
