//! Command-line interface for timed_tictactoe.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use timed_tictactoe::StorageBackend;

/// Timed tic-tac-toe - resumable matches against a random bot
#[derive(Parser, Debug)]
#[command(name = "timed_tictactoe")]
#[command(about = "Resumable tic-tac-toe with reaction-time scoring", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults are used when absent)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the storage backend from the config
    #[arg(long, global = true)]
    pub store: Option<StoreArg>,

    /// Override the save directory for the file backend
    #[arg(long, global = true)]
    pub save_dir: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play (or resume) a match in the terminal
    Play {
        /// You move first in a new match
        #[arg(long, conflicts_with = "bot_first")]
        human_first: bool,

        /// The bot moves first in a new match
        #[arg(long)]
        bot_first: bool,
    },

    /// Show the saved match and cumulative score
    Status,

    /// Delete the saved match and cumulative score
    Reset,
}

impl Command {
    /// First-move preference for `play`; `None` means flip a coin.
    pub fn first_actor_is_human(&self) -> Option<bool> {
        match self {
            Command::Play {
                human_first: true, ..
            } => Some(true),
            Command::Play { bot_first: true, .. } => Some(false),
            _ => None,
        }
    }
}

/// Storage backend choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreArg {
    /// Keep the save in memory only
    Memory,
    /// Keep the save in a JSON file
    File,
}

impl From<StoreArg> for StorageBackend {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::Memory => StorageBackend::Memory,
            StoreArg::File => StorageBackend::File,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_actor_flags() {
        let cli = Cli::parse_from(["timed_tictactoe", "play", "--human-first"]);
        assert_eq!(cli.command.first_actor_is_human(), Some(true));

        let cli = Cli::parse_from(["timed_tictactoe", "play", "--bot-first"]);
        assert_eq!(cli.command.first_actor_is_human(), Some(false));

        let cli = Cli::parse_from(["timed_tictactoe", "play"]);
        assert_eq!(cli.command.first_actor_is_human(), None);
    }

    #[test]
    fn test_conflicting_first_flags_rejected() {
        let result =
            Cli::try_parse_from(["timed_tictactoe", "play", "--human-first", "--bot-first"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_store_override() {
        let cli = Cli::parse_from(["timed_tictactoe", "status", "--store", "memory"]);
        assert_eq!(cli.store, Some(StoreArg::Memory));
        assert!(matches!(cli.command, Command::Status));
    }
}
