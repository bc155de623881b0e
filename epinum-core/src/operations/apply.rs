use crate::apply::{apply_plan, Resolution};
use crate::fsops::FileOps;
use crate::history::{HistoryStack, RenameBatch};
use crate::output::{ApplyResult, OutputFormat, OutputFormatter};
use crate::plan::{scan_and_plan, RenameRequest};
use anyhow::Result;

/// High-level apply operation - equivalent to `epinum rename`. Plans against
/// the live listing, applies with collision resolution, and records the
/// batch on the caller's history stack.
pub fn apply_operation<F: FileOps>(
    request: &RenameRequest,
    stack: &mut HistoryStack,
    ops: &F,
    format: OutputFormat,
) -> Result<String> {
    let plan = scan_and_plan(request)?;
    let resolution = apply_plan(&plan, ops);

    // Record whatever was committed, even on a partial failure, so the
    // session can still undo it.
    let batch = RenameBatch::from_resolution(request.directory.clone(), &resolution);
    if !batch.is_empty() {
        stack.push(batch);
    }

    let Resolution {
        events,
        conflicts,
        failure,
    } = resolution;

    if let Some(failure) = failure {
        return Err(failure.into());
    }

    let result = ApplyResult {
        directory: request.directory.display().to_string(),
        renamed: events.len(),
        events,
        conflicts,
    };

    Ok(result.format(format))
}
