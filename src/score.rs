//! Reaction-time scoring.
//!
//! Interactive turns are timed and logged. Once a match ends the log's
//! average is mapped onto the win or draw score range: an average at or
//! below `fast_turn_secs` earns the maximum, one at or above
//! `slow_turn_secs` the minimum, with linear interpolation between.

use crate::config::ScoringConfig;
use crate::game::Outcome;
use derive_more::{Display, Error};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Errors raised by the score engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ScoreError {
    /// Scoring was requested before the match ended.
    #[display("Cannot score a match with outcome {:?}", outcome)]
    InvalidOutcome {
        /// Outcome that was passed in.
        outcome: Outcome,
    },
}

/// Records turn durations and computes the final score.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    config: ScoringConfig,
    reaction_times: Vec<f64>,
    turn_started: Option<Instant>,
}

impl ScoreEngine {
    /// Creates an engine with an empty reaction-time log.
    #[instrument(skip(config))]
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_reaction_times(config, Vec::new())
    }

    /// Creates an engine that continues an existing reaction-time log.
    #[instrument(skip(config, reaction_times), fields(turns = reaction_times.len()))]
    pub fn with_reaction_times(config: ScoringConfig, reaction_times: Vec<f64>) -> Self {
        Self {
            config,
            reaction_times,
            turn_started: None,
        }
    }

    /// Marks the start of a timed turn.
    #[instrument(skip(self))]
    pub fn record_turn_start(&mut self) {
        self.turn_started = Some(Instant::now());
    }

    /// True between a turn start and its end or abandonment.
    pub fn is_timing_turn(&self) -> bool {
        self.turn_started.is_some()
    }

    /// Drops the pending turn start without logging a duration.
    #[instrument(skip(self))]
    pub fn abandon_turn(&mut self) {
        if self.turn_started.take().is_some() {
            debug!("Timed turn abandoned");
        }
    }

    /// Closes the timed turn and appends its duration in seconds.
    #[instrument(skip(self))]
    pub fn record_turn_end(&mut self) {
        let Some(started) = self.turn_started.take() else {
            warn!("Turn end recorded without a start");
            return;
        };
        let secs = started.elapsed().as_secs_f64();
        debug!(secs, "Turn timed");
        self.reaction_times.push(secs);
    }

    /// Durations of every completed timed turn, in order.
    pub fn reaction_times(&self) -> &[f64] {
        &self.reaction_times
    }

    /// Mean of the reaction-time log, zero when empty.
    pub fn average_reaction_time(&self) -> f64 {
        if self.reaction_times.is_empty() {
            return 0.0;
        }
        self.reaction_times.iter().sum::<f64>() / self.reaction_times.len() as f64
    }

    /// Computes the score for a finished match.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::InvalidOutcome`] for [`Outcome::InProgress`].
    #[instrument(skip(self), fields(turns = self.reaction_times.len()))]
    pub fn compute_final_score(&self, outcome: Outcome) -> Result<i64, ScoreError> {
        let (min, max) = match outcome {
            Outcome::Win => (*self.config.win_min(), *self.config.win_max()),
            Outcome::Draw => (*self.config.draw_min(), *self.config.draw_max()),
            Outcome::Lose => return Ok(*self.config.lose_score()),
            Outcome::InProgress => return Err(ScoreError::InvalidOutcome { outcome }),
        };

        let avg = self.average_reaction_time();
        let t = inverse_lerp(
            *self.config.slow_turn_secs(),
            *self.config.fast_turn_secs(),
            avg,
        );
        let score = lerp(min as f64, max as f64, t).round_ties_even() as i64;
        info!(%outcome, avg, t, score, "Final score computed");
        Ok(score)
    }
}

/// Position of `value` between `a` and `b`, clamped to `[0, 1]`.
/// Zero when the endpoints coincide.
fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
