//! Automated player that picks a random open square after a delay.

use super::{Player, PlayerError};
use crate::config::BotConfig;
use crate::game::{Availability, Coord};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bot that waits a random delay, then plays a uniformly random open square.
pub struct AutomatedPlayer {
    name: String,
    min_delay_secs: f64,
    max_delay_secs: f64,
    rng: StdRng,
}

impl AutomatedPlayer {
    /// Creates a bot seeded from the operating system.
    pub fn new(name: impl Into<String>, config: &BotConfig) -> Self {
        Self::with_rng(name, config, StdRng::from_os_rng())
    }

    /// Creates a bot with an explicit random source.
    pub fn with_rng(name: impl Into<String>, config: &BotConfig, rng: StdRng) -> Self {
        Self {
            name: name.into(),
            min_delay_secs: *config.min_delay_secs(),
            max_delay_secs: *config.max_delay_secs(),
            rng,
        }
    }

    fn thinking_time(&mut self) -> Duration {
        let secs = if self.max_delay_secs > self.min_delay_secs {
            self.rng.random_range(self.min_delay_secs..=self.max_delay_secs)
        } else {
            self.min_delay_secs
        };
        Duration::from_secs_f64(secs.max(0.0))
    }
}

#[async_trait::async_trait]
impl Player for AutomatedPlayer {
    #[instrument(skip(self, availability), fields(player = %self.name, open = availability.count()))]
    async fn produce_move(&mut self, availability: &Availability) -> Result<Coord, PlayerError> {
        let delay = self.thinking_time();
        debug!(delay_ms = delay.as_millis() as u64, "Bot thinking");
        tokio::time::sleep(delay).await;

        let open = availability.available_coords();
        let coord = open
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| PlayerError::NoAvailableMoves {
                player: self.name.clone(),
            })?;

        debug!(%coord, "Bot chose square");
        Ok(coord)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Mark};

    fn bot(seed: u64) -> AutomatedPlayer {
        AutomatedPlayer::with_rng("Bot", &BotConfig::new(1.0, 3.0), StdRng::seed_from_u64(seed))
    }

    #[tokio::test(start_paused = true)]
    async fn test_picks_only_open_square() {
        let mut board = Board::new(3);
        for (row, col) in [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)] {
            board.place(Coord::new(row, col), Mark::X);
        }
        let mut player = bot(7);
        let coord = player
            .produce_move(&board.availability())
            .await
            .expect("move");
        assert_eq!(coord, Coord::new(1, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_within_delay_bounds() {
        let mut player = bot(11);
        let start = tokio::time::Instant::now();
        player
            .produce_move(&Board::new(3).availability())
            .await
            .expect("move");
        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(1), "waited {waited:?}");
        assert!(waited <= Duration::from_secs(3), "waited {waited:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_board_is_an_error() {
        let mut board = Board::new(1);
        board.place(Coord::new(0, 0), Mark::O);
        let mut player = bot(3);
        let result = player.produce_move(&board.availability()).await;
        assert!(matches!(result, Err(PlayerError::NoAvailableMoves { .. })));
    }

    #[test]
    fn test_does_not_record_latency() {
        assert!(!bot(0).records_latency());
    }
}
