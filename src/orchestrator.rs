//! Match lifecycle: new game or resume, the turn loop, game over.

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::game::{Board, Coord, Mark, Outcome};
use crate::players::Player;
use crate::score::ScoreEngine;
use crate::storage::{MatchSnapshot, PersistenceEngine};
use crate::turn::TurnCoordinator;
use crate::view::BoardView;
use derive_getters::Getters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

/// Where the orchestrator is in the match lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MatchPhase {
    /// No match loaded yet.
    Uninitialized,
    /// A saved match was restored; no turn taken since.
    Resuming,
    /// A fresh match was created; no turn taken since.
    Starting,
    /// Turns are being played.
    InProgress,
    /// The board reached a terminal outcome.
    Finished,
    /// A fatal error stopped the match. The last saved snapshot is intact.
    Aborted,
}

/// How `load_new_game` obtained its match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStart {
    /// Restored from the saved snapshot.
    Resumed {
        /// Side to move next.
        current: Mark,
    },
    /// Created from scratch.
    Started {
        /// Side that moves first.
        first: Mark,
    },
}

/// Published once when a match ends.
#[derive(Debug, Clone, PartialEq, Getters, derive_new::new)]
pub struct GameOver {
    /// Outcome relative to the reference mark.
    outcome: Outcome,
    /// Mark that completed a line, `None` for a draw.
    winner: Option<Mark>,
    /// Score earned by this match.
    score: i64,
    /// Cumulative score including this match.
    total_score: i64,
}

/// Result of one call to [`GameOrchestrator::wait_for_turn`].
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Move placed; the other side is up.
    Committed {
        /// Mark that moved.
        mark: Mark,
        /// Where it was placed.
        coord: Coord,
    },
    /// Square was taken or off the board. The same side moves again.
    Rejected {
        /// Mark that tried to move.
        mark: Mark,
        /// Square it asked for.
        coord: Coord,
    },
    /// Move placed and the match ended.
    GameOver(GameOver),
    /// Cancelled while waiting for a move. Nothing changed.
    Cancelled,
}

struct ActiveMatch {
    board: Board,
    score: ScoreEngine,
    reference: Mark,
}

/// Runs a match between two seats.
///
/// The player in seat X is the primary player: X is the reference mark,
/// so outcomes and scores are from X's point of view.
pub struct GameOrchestrator<V: BoardView> {
    config: GameConfig,
    persistence: PersistenceEngine,
    turns: TurnCoordinator,
    view: V,
    rng: StdRng,
    phase: MatchPhase,
    active: Option<ActiveMatch>,
    game_over: watch::Sender<Option<GameOver>>,
}

impl<V: BoardView> GameOrchestrator<V> {
    /// Creates an orchestrator. Nothing is loaded until [`load_new_game`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the configuration is invalid.
    ///
    /// [`load_new_game`]: GameOrchestrator::load_new_game
    #[instrument(skip_all, fields(board_size = config.board_size()))]
    pub fn new(
        config: GameConfig,
        persistence: PersistenceEngine,
        player_x: Box<dyn Player>,
        player_o: Box<dyn Player>,
        view: V,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        info!(
            player_x = player_x.name(),
            player_o = player_o.name(),
            "Creating orchestrator"
        );
        let (game_over, _) = watch::channel(None);
        Ok(Self {
            config,
            persistence,
            turns: TurnCoordinator::new(player_x, player_o),
            view,
            rng: StdRng::from_os_rng(),
            phase: MatchPhase::Uninitialized,
            active: None,
            game_over,
        })
    }

    /// Replaces the random source used for the first-move coin flip.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Resumes the saved match if there is one, otherwise starts a new one.
    ///
    /// For a new match the primary player moves first when
    /// `first_actor_is_human` is `Some(true)`, second when `Some(false)`,
    /// and a coin flip decides when `None`. The initial snapshot is written
    /// before this returns. A saved match that cannot be rebuilt is treated
    /// as absent.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Persistence`] if the initial snapshot cannot
    /// be written.
    #[instrument(skip(self))]
    pub fn load_new_game(
        &mut self,
        first_actor_is_human: Option<bool>,
    ) -> Result<MatchStart, EngineError> {
        self.game_over.send_replace(None);

        if let Some((active, current)) = self.restore_saved_match() {
            self.turns.resume_at(current);
            self.view.draw_board(&active.board);
            self.active = Some(active);
            self.phase = MatchPhase::Resuming;
            info!(%current, "Resumed saved match");
            return Ok(MatchStart::Resumed { current });
        }

        let human_first = first_actor_is_human.unwrap_or_else(|| self.rng.random_bool(0.5));
        self.turns.initialize(human_first);
        let first = self.turns.current_mark();

        let active = ActiveMatch {
            board: Board::new(*self.config.board_size()),
            score: ScoreEngine::new(self.config.scoring().clone()),
            reference: Mark::X,
        };
        let snapshot = MatchSnapshot::capture(
            &active.board,
            true,
            first,
            active.reference,
            active.score.reaction_times(),
        );
        self.persistence.persist(snapshot, 0)?;

        self.view.draw_board(&active.board);
        self.active = Some(active);
        self.phase = MatchPhase::Starting;
        info!(%first, human_first, "Started new match");
        Ok(MatchStart::Started { first })
    }

    fn restore_saved_match(&self) -> Option<(ActiveMatch, Mark)> {
        if !self.persistence.has_resumable_match() {
            return None;
        }
        let snapshot = self.persistence.current_snapshot()?;

        let board = match snapshot.board() {
            Ok(board) => board,
            Err(e) => {
                warn!(error = %e, "Saved match unusable, starting fresh");
                return None;
            }
        };
        if board.size() != *self.config.board_size() {
            warn!(
                saved = board.size(),
                configured = *self.config.board_size(),
                "Saved board size differs from configuration, starting fresh"
            );
            return None;
        }
        let reference = *snapshot.reference_mark();
        if board.evaluate(reference).outcome().is_terminal() {
            warn!("Saved match is already decided, starting fresh");
            return None;
        }

        let score = ScoreEngine::with_reaction_times(
            self.config.scoring().clone(),
            snapshot.reaction_times().clone(),
        );
        Some((
            ActiveMatch {
                board,
                score,
                reference,
            },
            *snapshot.current_mark(),
        ))
    }

    /// Plays one turn.
    ///
    /// Suspends until the side to move produces a move or `cancel` fires.
    /// A move onto a taken square is dropped and the same side is asked
    /// again next call. For timed players the reaction time runs from the
    /// first attempt of the turn to the committed move; a cancelled turn
    /// logs nothing. A committed move is drawn and persisted; if it ends
    /// the match the final score is added to the cumulative total and the
    /// game-over notification is published.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoMatchLoaded`], [`EngineError::MatchFinished`] or
    /// [`EngineError::MatchAborted`] when no turn can be played. Player,
    /// scoring and persistence failures are fatal and move the match to
    /// [`MatchPhase::Aborted`].
    #[instrument(skip(self, cancel), fields(phase = %self.phase))]
    pub async fn wait_for_turn(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<TurnOutcome, EngineError> {
        match self.phase {
            MatchPhase::Uninitialized => return Err(EngineError::NoMatchLoaded),
            MatchPhase::Finished => return Err(EngineError::MatchFinished),
            MatchPhase::Aborted => return Err(EngineError::MatchAborted),
            MatchPhase::Resuming | MatchPhase::Starting | MatchPhase::InProgress => {}
        }

        match self.take_turn(cancel).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!(error = %e, "Match aborted");
                self.phase = MatchPhase::Aborted;
                Err(e)
            }
        }
    }

    async fn take_turn(&mut self, cancel: &CancellationToken) -> Result<TurnOutcome, EngineError> {
        let active = self.active.as_mut().ok_or(EngineError::NoMatchLoaded)?;
        self.phase = MatchPhase::InProgress;

        let mark = self.turns.current_mark();
        let availability = active.board.availability();
        let actor = self.turns.current_actor_mut();
        let timed = actor.records_latency();
        debug!(%mark, player = actor.name(), open = availability.count(), "Waiting for move");

        // A retry after a rejected move keeps the clock from the first attempt.
        if timed && !active.score.is_timing_turn() {
            active.score.record_turn_start();
        }
        let coord = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = actor.produce_move(&availability) => Some(result?),
        };
        let Some(coord) = coord else {
            active.score.abandon_turn();
            info!(%mark, "Turn cancelled");
            return Ok(TurnOutcome::Cancelled);
        };

        if !active.board.place(coord, mark) {
            warn!(%mark, %coord, "Move rejected, asking again");
            return Ok(TurnOutcome::Rejected { mark, coord });
        }
        if timed {
            active.score.record_turn_end();
        }
        self.view.draw_board(&active.board);

        let evaluation = active.board.evaluate(active.reference);
        let outcome = *evaluation.outcome();

        if outcome.is_terminal() {
            let score = active.score.compute_final_score(outcome)?;
            let snapshot = MatchSnapshot::capture(
                &active.board,
                false,
                mark,
                active.reference,
                active.score.reaction_times(),
            );
            let total_score = *self.persistence.persist(snapshot, score)?.total_score();
            self.phase = MatchPhase::Finished;

            let game_over = GameOver::new(outcome, *evaluation.winner(), score, total_score);
            info!(%outcome, score, total_score, "Game over");
            self.game_over.send_replace(Some(game_over.clone()));
            return Ok(TurnOutcome::GameOver(game_over));
        }

        self.turns.switch();
        let snapshot = MatchSnapshot::capture(
            &active.board,
            true,
            self.turns.current_mark(),
            active.reference,
            active.score.reaction_times(),
        );
        self.persistence.persist(snapshot, 0)?;
        debug!(%mark, %coord, "Move committed");
        Ok(TurnOutcome::Committed { mark, coord })
    }

    /// Plays turns until the match ends or `cancel` fires.
    ///
    /// Returns `Some` with the result when the match ends and `None` when
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`wait_for_turn`](Self::wait_for_turn).
    #[instrument(skip(self, cancel))]
    pub async fn run(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Option<GameOver>, EngineError> {
        loop {
            match self.wait_for_turn(cancel).await? {
                TurnOutcome::GameOver(game_over) => return Ok(Some(game_over)),
                TurnOutcome::Cancelled => return Ok(None),
                TurnOutcome::Committed { .. } | TurnOutcome::Rejected { .. } => {}
            }
        }
    }

    /// Subscribes to the game-over notification. Drop the receiver to
    /// unsubscribe. The value resets to `None` when a match is loaded.
    pub fn subscribe_game_over(&self) -> watch::Receiver<Option<GameOver>> {
        self.game_over.subscribe()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// True while turns can still be played.
    pub fn is_game_in_progress(&self) -> bool {
        matches!(
            self.phase,
            MatchPhase::Resuming | MatchPhase::Starting | MatchPhase::InProgress
        )
    }

    /// Score of the finished match, if it has finished.
    pub fn final_score(&self) -> Option<i64> {
        self.game_over.borrow().as_ref().map(|g| *g.score())
    }

    /// Live board of the loaded match.
    pub fn board(&self) -> Option<&Board> {
        self.active.as_ref().map(|a| &a.board)
    }

    /// Mark the outcome is judged against.
    pub fn reference_mark(&self) -> Option<Mark> {
        self.active.as_ref().map(|a| a.reference)
    }

    /// Side to move.
    pub fn current_mark(&self) -> Mark {
        self.turns.current_mark()
    }

    /// Reaction times logged so far in the loaded match.
    pub fn reaction_times(&self) -> &[f64] {
        self.active
            .as_ref()
            .map(|a| a.score.reaction_times())
            .unwrap_or(&[])
    }

    /// Cumulative score across finished matches.
    pub fn total_score(&self) -> i64 {
        self.persistence.total_score()
    }

    /// The persistence engine.
    pub fn persistence(&self) -> &PersistenceEngine {
        &self.persistence
    }

    /// The attached view.
    pub fn view(&self) -> &V {
        &self.view
    }
}
