//! Errors surfaced to the user by board operations.

use crate::storage::StorageError;
use thiserror::Error;

/// Failures of user-requested board actions.
///
/// None of these are fatal: the action becomes a no-op and the board keeps
/// its previous state.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The text prompt was cancelled or left blank.
    #[error("No text entered")]
    EmptyInput,
    /// No board is saved under the requested name.
    #[error("No saved board named {0:?}")]
    MissingBoard(String),
    /// The board could not be encoded for saving.
    #[error("Failed to write board data: {0}")]
    Serialization(String),
    /// The saved payload could not be turned back into a board.
    #[error("Failed to read board data: {0}")]
    Deserialization(String),
    /// The storage backend failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;
