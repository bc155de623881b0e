use crate::history::HistoryStack;
use crate::output::{HistoryItem, HistoryResult, OutputFormat, OutputFormatter};
use anyhow::Result;

/// List the session's batches, most recent first.
pub fn history_operation(stack: &HistoryStack, format: OutputFormat) -> Result<String> {
    let entries = stack
        .entries()
        .enumerate()
        .map(|(i, batch)| HistoryItem {
            position: i + 1,
            created_at: batch.created_at.clone(),
            directory: batch.directory.display().to_string(),
            renames: batch.len(),
        })
        .collect();

    let result = HistoryResult { entries };
    Ok(result.format(format))
}
