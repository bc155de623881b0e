use crate::apply::Resolution;
use crate::fsops::FileOps;
use crate::history::HistoryStack;
use crate::output::{OutputFormat, OutputFormatter, UndoResult};
use crate::undo::undo_last;
use anyhow::Result;

/// High-level undo operation - reverses the most recent batch on the stack.
pub fn undo_operation<F: FileOps>(
    stack: &mut HistoryStack,
    ops: &F,
    format: OutputFormat,
) -> Result<String> {
    let (batch, resolution) = undo_last(stack, ops)?;

    let Resolution {
        events,
        conflicts,
        failure,
    } = resolution;

    if let Some(failure) = failure {
        return Err(failure.into());
    }

    let result = UndoResult {
        directory: batch.directory.display().to_string(),
        restored: events.len(),
        events,
        conflicts,
    };

    Ok(result.format(format))
}
