use std::io;
use thiserror::Error;

/// Errors surfaced by the renaming core.
///
/// Unresolved name collisions are deliberately not represented here: they are
/// per-item data on the resolution outcome, reported and skipped rather than
/// escalated.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed request parameters, rejected before any mutation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Undo was requested with an empty history stack.
    #[error("no rename history available to undo")]
    NoHistory,

    /// A filesystem error that aborted the remainder of a resolution.
    /// Renames committed before the failure are kept.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
