use crate::apply::{resolve_renames, Resolution};
use crate::error::{Error, Result};
use crate::fsops::FileOps;
use crate::history::{HistoryStack, RenameBatch};

/// Reverse the most recent batch through the same fixpoint resolution used
/// for apply, so an undo that creates its own temporary collisions is handled
/// symmetrically.
///
/// The batch is consumed even when some pairs stay conflicted, matching the
/// forward direction's lenient make-as-much-progress-as-possible policy.
pub fn undo_last<F: FileOps>(
    stack: &mut HistoryStack,
    ops: &F,
) -> Result<(RenameBatch, Resolution)> {
    let batch = stack.pop().ok_or(Error::NoHistory)?;
    // Stored pairs are already (new_path, original_path), i.e. (from, to)
    // for the reverse direction.
    let resolution = resolve_renames(batch.renames.clone(), ops);
    Ok((batch, resolution))
}
