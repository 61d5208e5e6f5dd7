//! End-to-end match flow through the orchestrator.

mod common;

use common::{ScriptedPlayer, orchestrator};
use timed_tictactoe::{
    Coord, EngineError, Mark, MatchPhase, MatchStart, MemoryStore, Outcome, Square, TurnOutcome,
};
use tokio_util::sync::CancellationToken;

#[tokio::test(start_paused = true)]
async fn test_top_row_win_scores_from_reaction_time() {
    let store = MemoryStore::new();
    let x = ScriptedPlayer::timed("Human", &[(0, 0), (0, 1), (0, 2)], 12);
    let o = ScriptedPlayer::new("Bot", &[(1, 0), (1, 1)]);
    let mut game = orchestrator(&store, x, o);
    let mut game_over_rx = game.subscribe_game_over();

    let start = game.load_new_game(Some(true)).expect("New match");
    assert_eq!(start, MatchStart::Started { first: Mark::X });
    assert_eq!(game.phase(), MatchPhase::Starting);

    let result = game
        .run(&CancellationToken::new())
        .await
        .expect("Match runs")
        .expect("Match finishes");

    assert_eq!(*result.outcome(), Outcome::Win);
    assert_eq!(*result.winner(), Some(Mark::X));
    // avg 12s: 80% of the way from slow (20s) to fast (10s)
    assert_eq!(*result.score(), 90);
    assert_eq!(*result.total_score(), 90);

    assert_eq!(game.phase(), MatchPhase::Finished);
    assert!(!game.is_game_in_progress());
    assert_eq!(game.final_score(), Some(90));
    assert_eq!(game.reaction_times().len(), 3);

    game_over_rx.changed().await.expect("Game over published");
    assert_eq!(game_over_rx.borrow().as_ref(), Some(&result));

    let snapshot = game.persistence().current_snapshot().expect("Saved");
    assert!(!*snapshot.in_progress());
    assert_eq!(*snapshot.total_score(), 90);
}

#[tokio::test(start_paused = true)]
async fn test_full_board_draw() {
    // X O X
    // X O O
    // O X X
    let store = MemoryStore::new();
    let x = ScriptedPlayer::timed("Human", &[(0, 0), (0, 2), (1, 0), (2, 1), (2, 2)], 20);
    let o = ScriptedPlayer::new("Bot", &[(0, 1), (1, 1), (1, 2), (2, 0)]);
    let mut game = orchestrator(&store, x, o);

    game.load_new_game(Some(true)).expect("New match");
    let result = game
        .run(&CancellationToken::new())
        .await
        .expect("Match runs")
        .expect("Match finishes");

    assert_eq!(*result.outcome(), Outcome::Draw);
    assert_eq!(*result.winner(), None);
    // Slowest possible draw
    assert_eq!(*result.score(), 2);
    assert!(game.board().expect("Loaded").is_full());
}

#[tokio::test(start_paused = true)]
async fn test_bot_win_is_a_loss_for_reference() {
    let store = MemoryStore::new();
    let x = ScriptedPlayer::timed("Human", &[(1, 0), (2, 2)], 1);
    let o = ScriptedPlayer::new("Bot", &[(0, 0), (0, 1), (0, 2)]);
    let mut game = orchestrator(&store, x, o);

    let start = game.load_new_game(Some(false)).expect("New match");
    assert_eq!(start, MatchStart::Started { first: Mark::O });

    let result = game
        .run(&CancellationToken::new())
        .await
        .expect("Match runs")
        .expect("Match finishes");

    assert_eq!(*result.outcome(), Outcome::Lose);
    assert_eq!(*result.winner(), Some(Mark::O));
    assert_eq!(*result.score(), 1);
}

#[tokio::test]
async fn test_turns_alternate_and_render() {
    let store = MemoryStore::new();
    let x = ScriptedPlayer::new("Human", &[(0, 0)]);
    let o = ScriptedPlayer::new("Bot", &[(2, 2)]);
    let mut game = orchestrator(&store, x, o);
    let cancel = CancellationToken::new();

    game.load_new_game(Some(true)).expect("New match");
    assert_eq!(game.view().frames.len(), 1);

    let first = game.wait_for_turn(&cancel).await.expect("Turn");
    assert_eq!(
        first,
        TurnOutcome::Committed {
            mark: Mark::X,
            coord: Coord::new(0, 0)
        }
    );
    assert_eq!(game.current_mark(), Mark::O);
    assert_eq!(game.phase(), MatchPhase::InProgress);

    let second = game.wait_for_turn(&cancel).await.expect("Turn");
    assert_eq!(
        second,
        TurnOutcome::Committed {
            mark: Mark::O,
            coord: Coord::new(2, 2)
        }
    );
    assert_eq!(game.current_mark(), Mark::X);
    assert_eq!(game.view().frames.len(), 3);
    assert_eq!(game.view().frames[2], "X|.|.\n.|.|.\n.|.|O");

    // Each committed move is saved with the next side to move
    let snapshot = game.persistence().current_snapshot().expect("Saved");
    assert!(*snapshot.in_progress());
    assert_eq!(*snapshot.current_mark(), Mark::X);
}

#[tokio::test]
async fn test_rejected_move_asks_same_side_again() {
    let store = MemoryStore::new();
    let x = ScriptedPlayer::new("Human", &[(1, 1)]);
    let o = ScriptedPlayer::new("Bot", &[(1, 1), (0, 0)]);
    let mut game = orchestrator(&store, x, o);
    let cancel = CancellationToken::new();

    game.load_new_game(Some(true)).expect("New match");
    game.wait_for_turn(&cancel).await.expect("X moves");
    let saved = game.persistence().current_snapshot().cloned();

    let rejected = game.wait_for_turn(&cancel).await.expect("O tries");
    assert_eq!(
        rejected,
        TurnOutcome::Rejected {
            mark: Mark::O,
            coord: Coord::new(1, 1)
        }
    );
    assert_eq!(game.current_mark(), Mark::O);
    assert_eq!(
        game.board().expect("Loaded").get(Coord::new(1, 1)),
        Some(Square::Occupied(Mark::X))
    );
    assert_eq!(game.persistence().current_snapshot().cloned(), saved);

    let retried = game.wait_for_turn(&cancel).await.expect("O retries");
    assert_eq!(
        retried,
        TurnOutcome::Committed {
            mark: Mark::O,
            coord: Coord::new(0, 0)
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_reaction_time_spans_rejected_attempts() {
    let store = MemoryStore::new();
    // X's second turn takes two attempts of 5s each
    let x = ScriptedPlayer::timed("Human", &[(1, 1), (0, 0), (2, 2)], 5);
    let o = ScriptedPlayer::new("Bot", &[(0, 0)]);
    let mut game = orchestrator(&store, x, o);
    let cancel = CancellationToken::new();

    game.load_new_game(Some(true)).expect("New match");
    game.wait_for_turn(&cancel).await.expect("X moves");
    game.wait_for_turn(&cancel).await.expect("O moves");

    let rejected = game.wait_for_turn(&cancel).await.expect("X tries");
    assert!(matches!(rejected, TurnOutcome::Rejected { mark: Mark::X, .. }));
    assert_eq!(game.reaction_times(), &[5.0]);

    let committed = game.wait_for_turn(&cancel).await.expect("X retries");
    assert!(matches!(committed, TurnOutcome::Committed { mark: Mark::X, .. }));
    assert_eq!(game.reaction_times(), &[5.0, 10.0]);
}

#[tokio::test]
async fn test_turn_before_load_fails() {
    let store = MemoryStore::new();
    let mut game = orchestrator(
        &store,
        ScriptedPlayer::new("Human", &[]),
        ScriptedPlayer::new("Bot", &[]),
    );
    let result = game.wait_for_turn(&CancellationToken::new()).await;
    assert!(matches!(result, Err(EngineError::NoMatchLoaded)));
    assert_eq!(game.phase(), MatchPhase::Uninitialized);
}

#[tokio::test(start_paused = true)]
async fn test_turn_after_finish_fails() {
    let store = MemoryStore::new();
    let x = ScriptedPlayer::new("Human", &[(0, 0), (1, 1), (2, 2)]);
    let o = ScriptedPlayer::new("Bot", &[(0, 1), (0, 2)]);
    let mut game = orchestrator(&store, x, o);
    let cancel = CancellationToken::new();

    game.load_new_game(Some(true)).expect("New match");
    let result = game.run(&cancel).await.expect("Match runs");
    assert!(result.is_some());

    let again = game.wait_for_turn(&cancel).await;
    assert!(matches!(again, Err(EngineError::MatchFinished)));
}

#[tokio::test]
async fn test_player_failure_aborts_match() {
    let store = MemoryStore::new();
    // X runs out of scripted moves on its second turn
    let x = ScriptedPlayer::new("Human", &[(0, 0)]);
    let o = ScriptedPlayer::new("Bot", &[(1, 1)]);
    let mut game = orchestrator(&store, x, o);
    let cancel = CancellationToken::new();

    game.load_new_game(Some(true)).expect("New match");
    let result = game.run(&cancel).await;
    assert!(matches!(result, Err(EngineError::Player(_))));
    assert_eq!(game.phase(), MatchPhase::Aborted);

    let again = game.wait_for_turn(&cancel).await;
    assert!(matches!(again, Err(EngineError::MatchAborted)));

    // The last committed position is still on disk
    let snapshot = game.persistence().current_snapshot().expect("Saved");
    assert!(*snapshot.in_progress());
    assert_eq!(*snapshot.current_mark(), Mark::X);
}

#[tokio::test(start_paused = true)]
async fn test_consecutive_matches_accumulate_total() {
    let store = MemoryStore::new();
    // Two identical wins, 12s per human move
    let x = ScriptedPlayer::timed("Human", &[(0, 0), (0, 1), (0, 2), (0, 0), (0, 1), (0, 2)], 12);
    let o = ScriptedPlayer::new("Bot", &[(1, 0), (1, 1), (1, 0), (1, 1)]);
    let mut game = orchestrator(&store, x, o);
    let cancel = CancellationToken::new();

    game.load_new_game(Some(true)).expect("First match");
    let first = game.run(&cancel).await.expect("Runs").expect("Finishes");
    assert_eq!(*first.total_score(), 90);
    assert_eq!(game.final_score(), Some(90));

    let start = game.load_new_game(Some(true)).expect("Second match");
    assert_eq!(start, MatchStart::Started { first: Mark::X });
    assert_eq!(game.final_score(), None);
    assert!(game.reaction_times().is_empty());

    let second = game.run(&cancel).await.expect("Runs").expect("Finishes");
    assert_eq!(*second.score(), 90);
    assert_eq!(*second.total_score(), 180);
    assert_eq!(game.total_score(), 180);
}
