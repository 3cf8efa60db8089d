use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures surfaced to the player as a load failure. Nothing else in the
/// system is user-visible or fatal.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum LoadError {
    #[error("failed to load puzzle data: {0}")]
    ProviderUnavailable(String),
    #[error("no puzzle found for {0}")]
    NoPuzzleForToday(String),
}

/// Why a persisted snapshot was rejected. Every variant degrades to a
/// fresh session rather than an error shown to the player.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum SnapshotError {
    #[error("snapshot is for {snapshot} but the puzzle is for {puzzle}")]
    DateKeyMismatch { snapshot: String, puzzle: String },
}
