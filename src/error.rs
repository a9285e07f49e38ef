//! Error types for army commands and snapshot persistence.

use std::fmt;
use std::io;

use crate::game::Rank;

/// Errors from recruiting and training commands.
///
/// Commands are atomic: on any error the general's gold and army are
/// exactly as they were before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The general cannot afford the operation.
    InsufficientGold {
        /// Gold the operation would cost.
        needed: u32,
        /// Gold the general actually has.
        available: u32,
    },
    /// The rank cannot be recruited directly.
    UnsupportedRank(Rank),
    /// A training selection index does not refer to a soldier in the army.
    UnknownSoldier(usize),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::InsufficientGold { needed, available } => {
                write!(f, "insufficient gold: need {needed}, have {available}")
            }
            CommandError::UnsupportedRank(rank) => {
                write!(f, "rank {rank} cannot be recruited directly")
            }
            CommandError::UnknownSoldier(index) => {
                write!(f, "no soldier at roster index {index}")
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// Result type for recruiting and training commands.
pub type CommandResult<T> = Result<T, CommandError>;

/// Errors from snapshot save/load.
#[derive(Debug)]
pub enum SnapshotError {
    /// The snapshot bytes are malformed or truncated.
    Corrupt(String),
    /// The underlying storage failed.
    Storage(io::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Corrupt(reason) => write!(f, "corrupt snapshot: {reason}"),
            SnapshotError::Storage(err) => write!(f, "storage unavailable: {err}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<io::Error> for SnapshotError {
    fn from(err: io::Error) -> Self {
        SnapshotError::Storage(err)
    }
}

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
