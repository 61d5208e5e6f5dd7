//! Timed tic-tac-toe - terminal front end
//!
//! Plays resumable matches against a random bot.

#![warn(missing_docs)]

mod cli;
mod console;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use console::{ConsoleView, serve_input};
use timed_tictactoe::{
    AutomatedPlayer, FileStore, GameConfig, GameOrchestrator, InteractivePlayer, KeyValueStore,
    MatchStart, MemoryStore, Outcome, PersistenceEngine, StorageBackend, StorageConfig,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let persistence =
        PersistenceEngine::with_key(open_store(config.storage()), config.storage().key());

    match cli.command {
        Command::Play { .. } => {
            play(config, persistence, cli.command.first_actor_is_human()).await
        }
        Command::Status => {
            show_status(&persistence);
            Ok(())
        }
        Command::Reset => reset(persistence),
    }
}

/// Loads the config file (if any) and applies command-line overrides.
#[instrument(skip(cli))]
fn load_config(cli: &Cli) -> Result<GameConfig> {
    let config = match &cli.config {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };

    let mut storage: StorageConfig = config.storage().clone();
    if let Some(store) = cli.store {
        storage = storage.with_backend(store.into());
    }
    if let Some(dir) = &cli.save_dir {
        storage = storage.with_dir(dir);
    }
    let config = config.with_storage(storage);
    config.validate()?;
    Ok(config)
}

/// Builds the store backend named in the config.
#[instrument(skip(storage), fields(backend = %storage.backend()))]
fn open_store(storage: &StorageConfig) -> Box<dyn KeyValueStore> {
    match storage.backend() {
        StorageBackend::Memory => Box::new(MemoryStore::new()),
        StorageBackend::File => Box::new(FileStore::new(storage.dir())),
    }
}

/// Runs one match in the terminal.
#[instrument(skip(config, persistence))]
async fn play(
    config: GameConfig,
    persistence: PersistenceEngine,
    first_actor_is_human: Option<bool>,
) -> Result<()> {
    let (human, requests) = InteractivePlayer::new("You");
    let bot = AutomatedPlayer::new("Bot", config.bot());

    let mut game = GameOrchestrator::new(
        config,
        persistence,
        Box::new(human),
        Box::new(bot),
        ConsoleView,
    )?;

    let cancel = CancellationToken::new();
    let input = tokio::spawn(serve_input(requests, cancel.clone()));
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted, saving and exiting");
                cancel.cancel();
            }
        }
    });

    match game.load_new_game(first_actor_is_human)? {
        MatchStart::Resumed { current } => println!("Resuming saved match, {} to move.", current),
        MatchStart::Started { first } => println!("New match, {} moves first. You are X.", first),
    }

    let result = game.run(&cancel).await.context("Match aborted")?;
    cancel.cancel();
    if let Err(e) = input.await {
        warn!(error = %e, "Input task failed");
    }

    match result {
        Some(game_over) => {
            let verdict = match game_over.outcome() {
                Outcome::Win => "You win!",
                Outcome::Lose => "You lose.",
                Outcome::Draw => "Draw.",
                Outcome::InProgress => "Unfinished.",
            };
            println!(
                "{} Score: {} (total {})",
                verdict,
                game_over.score(),
                game_over.total_score()
            );
        }
        None => println!("Match saved. Run `play` again to resume."),
    }
    Ok(())
}

fn show_status(persistence: &PersistenceEngine) {
    match persistence.current_snapshot() {
        Some(snapshot) => {
            let state = if *snapshot.in_progress() {
                format!("in progress, {} to move", snapshot.current_mark())
            } else {
                "finished".to_string()
            };
            println!(
                "Saved match: {}x{} board, {}, {} timed turns",
                snapshot.board_size(),
                snapshot.board_size(),
                state,
                snapshot.reaction_times().len()
            );
            if let Ok(board) = snapshot.board() {
                println!("\n{}\n", board.display());
            }
        }
        None => println!("No saved match."),
    }
    println!("Total score: {}", persistence.total_score());
}

fn reset(mut persistence: PersistenceEngine) -> Result<()> {
    persistence.discard()?;
    println!("Saved match and total score cleared.");
    Ok(())
}
