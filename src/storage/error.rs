//! Storage error types.

use derive_more::{Display, Error, From};
use tracing::instrument;

/// Broad category of a store failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum StoreErrorKind {
    /// Nothing stored under the key.
    NotFound,
    /// The backend failed to read or write.
    Io,
}

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error ({}): {} at {}:{}", kind, message, file, line)]
pub struct StoreError {
    /// What went wrong.
    pub kind: StoreErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a missing key.
    #[track_caller]
    pub fn not_found(key: &str) -> Self {
        Self::new(StoreErrorKind::NotFound, format!("No entry for key '{}'", key))
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StoreErrorKind::NotFound,
            _ => StoreErrorKind::Io,
        };
        Self::new(kind, format!("I/O error: {}", err))
    }
}

/// Errors from snapshot reconstruction.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SnapshotError {
    /// Board size of zero.
    #[display("Snapshot board size is zero")]
    ZeroSize,
    /// Cell array does not cover the board.
    #[display("Snapshot holds {} cells, board needs {}", got, expected)]
    CellCount {
        /// `board_size²`.
        expected: usize,
        /// Cells actually present.
        got: usize,
    },
}

/// Errors from the persistence engine.
#[derive(Debug, Display, Error, From)]
pub enum PersistError {
    /// The store rejected the write.
    #[display("{}", _0)]
    Store(StoreError),
    /// The snapshot could not be encoded.
    #[display("Failed to encode snapshot: {}", _0)]
    Encode(serde_json::Error),
}
