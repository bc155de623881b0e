use crate::apply::{Conflict, RenameEvent};
use crate::plan::{format_target, RenamePlan};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::borrow::Cow;
use std::fmt::Write;
use std::path::Path;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a plan operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub directory: String,
    pub base_name: String,
    pub season_tag: Option<String>,
    pub start_index: i64,
    pub width: usize,
    pub files: usize,
    pub unchanged: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<RenamePlan>,
}

/// Result of an apply operation
#[derive(Debug, Serialize, Deserialize)]
pub struct ApplyResult {
    pub directory: String,
    pub renamed: usize,
    pub events: Vec<RenameEvent>,
    pub conflicts: Vec<Conflict>,
}

/// Result of an undo operation
#[derive(Debug, Serialize, Deserialize)]
pub struct UndoResult {
    pub directory: String,
    pub restored: usize,
    pub events: Vec<RenameEvent>,
    pub conflicts: Vec<Conflict>,
}

/// Result of a history listing
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResult {
    pub entries: Vec<HistoryItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryItem {
    /// 1 = most recent (the batch an undo would reverse next).
    pub position: usize,
    pub created_at: String,
    pub directory: String,
    pub renames: usize,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String;
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

fn file_name(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy())
}

fn write_rename_lines(output: &mut String, events: &[RenameEvent], verb: &str) {
    for event in events {
        if event.retried {
            writeln!(
                output,
                "{} '{}' to '{}' (after retry)",
                verb,
                file_name(&event.from),
                file_name(&event.to)
            )
            .unwrap();
        } else {
            writeln!(
                output,
                "{} '{}' to '{}'",
                verb,
                file_name(&event.from),
                file_name(&event.to)
            )
            .unwrap();
        }
    }
}

fn write_conflict_lines(output: &mut String, conflicts: &[Conflict]) {
    for conflict in conflicts {
        writeln!(
            output,
            "Could not rename '{}': persistent conflict with '{}'",
            file_name(&conflict.from),
            file_name(&conflict.to)
        )
        .unwrap();
    }
}

impl OutputFormatter for PlanResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "directory": self.directory,
            "base_name": self.base_name,
            "season_tag": self.season_tag,
            "start_index": self.start_index,
            "summary": {
                "files": self.files,
                "unchanged": self.unchanged,
                "width": self.width,
            },
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        writeln!(
            output,
            "Epinum plan: {} files in {}",
            self.files, self.directory
        )
        .unwrap();

        let preview = format_target(
            &self.base_name,
            self.season_tag.as_deref(),
            self.start_index,
            self.width,
            ".ext",
        );
        writeln!(output, "Preview: {}", preview).unwrap();

        if self.unchanged > 0 {
            writeln!(
                output,
                "{} files already match the template",
                self.unchanged
            )
            .unwrap();
        }

        output
    }
}

impl OutputFormatter for ApplyResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "rename",
            "directory": self.directory,
            "summary": {
                "renamed": self.renamed,
                "conflicts": self.conflicts.len(),
            },
            "renames": self.events,
            "conflicts": self.conflicts,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        write_rename_lines(&mut output, &self.events, "Renamed");
        write_conflict_lines(&mut output, &self.conflicts);

        if self.conflicts.is_empty() {
            writeln!(
                output,
                "✓ Renamed {} files in {}",
                self.renamed, self.directory
            )
            .unwrap();
        } else {
            writeln!(
                output,
                "Renamed {} files in {} ({} unresolved conflicts)",
                self.renamed,
                self.directory,
                self.conflicts.len()
            )
            .unwrap();
        }

        output
    }
}

impl OutputFormatter for UndoResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "undo",
            "directory": self.directory,
            "summary": {
                "restored": self.restored,
                "conflicts": self.conflicts.len(),
            },
            "renames": self.events,
            "conflicts": self.conflicts,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        write_rename_lines(&mut output, &self.events, "Restored");
        write_conflict_lines(&mut output, &self.conflicts);

        if self.conflicts.is_empty() {
            writeln!(
                output,
                "✓ Restored {} files in {}",
                self.restored, self.directory
            )
            .unwrap();
        } else {
            writeln!(
                output,
                "Restored {} files in {} ({} unresolved conflicts)",
                self.restored,
                self.directory,
                self.conflicts.len()
            )
            .unwrap();
        }

        output
    }
}

impl OutputFormatter for HistoryResult {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "history",
            "entries": self.entries,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        if self.entries.is_empty() {
            return "No renames recorded in this session\n".to_string();
        }

        use comfy_table::{Cell, Color, Table};

        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("Date").fg(Color::Cyan),
            Cell::new("Directory").fg(Color::Cyan),
            Cell::new("Renames").fg(Color::Cyan),
        ]);

        for entry in &self.entries {
            let date = entry
                .created_at
                .split('T')
                .next()
                .unwrap_or(&entry.created_at);
            table.add_row(vec![
                &entry.position.to_string(),
                date,
                &entry.directory,
                &entry.renames.to_string(),
            ]);
        }

        table.to_string()
    }
}
