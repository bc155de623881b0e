use crate::apply::Resolution;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The renames actually performed by one apply invocation.
///
/// Pairs are stored in reversal order, new path first, so undo can feed them
/// straight back through the resolution engine as (from, to).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameBatch {
    /// RFC 3339 timestamp of when the batch was applied.
    pub created_at: String,
    pub directory: PathBuf,
    /// `(new_path, original_path)` per file, in commit order.
    pub renames: Vec<(PathBuf, PathBuf)>,
}

impl RenameBatch {
    pub fn from_resolution(directory: PathBuf, resolution: &Resolution) -> Self {
        Self {
            created_at: Local::now().to_rfc3339(),
            directory,
            renames: resolution.reversal_pairs(),
        }
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }
}

/// In-memory stack of completed batches for one session.
///
/// An explicit value owned by the caller rather than process-global state, so
/// independent sessions can coexist. Nothing is persisted: the stack is born
/// empty and dies with the process.
#[derive(Debug, Default)]
pub struct HistoryStack {
    batches: Vec<RenameBatch>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, batch: RenameBatch) {
        self.batches.push(batch);
    }

    pub fn pop(&mut self) -> Option<RenameBatch> {
        self.batches.pop()
    }

    pub fn last(&self) -> Option<&RenameBatch> {
        self.batches.last()
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Batches most recent first, for display.
    pub fn entries(&self) -> impl Iterator<Item = &RenameBatch> {
        self.batches.iter().rev()
    }
}
