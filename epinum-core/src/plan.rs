use crate::error::{Error, Result};
use crate::sort::natural_sort_key;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Zero-padding policy for episode indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroPad {
    /// Wide enough to represent the last index of the batch.
    Auto,
    /// Caller-supplied width; must be positive.
    Fixed(usize),
}

/// One renaming invocation's parameters. Immutable once built.
#[derive(Debug, Clone)]
pub struct RenameRequest {
    pub directory: PathBuf,
    pub base_name: String,
    pub start_index: i64,
    pub season_tag: Option<String>,
    pub zero_pad: ZeroPad,
}

impl RenameRequest {
    /// Reject malformed parameters before anything is listed or renamed.
    pub fn validate(&self) -> Result<()> {
        if self.base_name.trim().is_empty() {
            return Err(Error::InvalidInput("base name must not be empty".into()));
        }
        if self.zero_pad == ZeroPad::Fixed(0) {
            return Err(Error::InvalidInput(
                "zero-pad width must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// One existing file in the target directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// File name including extension.
    pub name: String,
    /// Extension with its leading dot, or empty. A bare leading dot (a
    /// dotfile) is not an extension.
    pub extension: String,
}

impl FileEntry {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let extension = match name.rfind('.') {
            Some(pos) if pos > 0 => name[pos..].to_string(),
            _ => String::new(),
        };
        Self { name, extension }
    }
}

/// One planned pair, computed before any filesystem mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRename {
    pub original_name: String,
    pub target_name: String,
    pub index: i64,
    /// Target equals the current name; applied as a no-op rather than parked
    /// in the retry buffer.
    pub unchanged: bool,
}

/// The precomputed, not-yet-applied mapping for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    pub directory: PathBuf,
    /// Resolved zero-pad width, uniform across the whole batch.
    pub width: usize,
    pub renames: Vec<PlannedRename>,
}

/// List the regular files in `directory`, sorted by natural key.
/// Subdirectories are skipped; only files participate in the numbering.
pub fn list_directory(directory: &Path) -> Result<Vec<FileEntry>> {
    if !directory.is_dir() {
        return Err(Error::InvalidInput(format!(
            "not a directory: {}",
            directory.display()
        )));
    }

    let iter = fs::read_dir(directory)
        .map_err(|e| Error::io(format!("failed to list {}", directory.display()), e))?;

    let mut entries = Vec::new();
    for entry in iter {
        let entry =
            entry.map_err(|e| Error::io(format!("failed to list {}", directory.display()), e))?;
        let file_type = entry.file_type().map_err(|e| {
            Error::io(
                format!("failed to stat {}", entry.path().display()),
                e,
            )
        })?;
        if !file_type.is_file() {
            continue;
        }
        entries.push(FileEntry::new(entry.file_name().to_string_lossy().into_owned()));
    }

    entries.sort_by_cached_key(|e| natural_sort_key(&e.name));
    Ok(entries)
}

/// Format one target name from the template pieces.
pub fn format_target(
    base: &str,
    season: Option<&str>,
    index: i64,
    width: usize,
    extension: &str,
) -> String {
    match season {
        Some(tag) if !tag.is_empty() => {
            format!("{base} - {tag}E{index:0width$}{extension}")
        },
        _ => format!("{base} - E{index:0width$}{extension}"),
    }
}

/// Resolve the pad width once for the whole batch so padding is uniform.
fn resolve_width(request: &RenameRequest, file_count: usize) -> usize {
    match request.zero_pad {
        ZeroPad::Fixed(width) => width,
        ZeroPad::Auto => {
            let last = request.start_index + file_count as i64 - 1;
            last.to_string().len()
        },
    }
}

/// Compute the rename plan for `entries`, which must already be in sorted
/// order. Pure: the same request and listing always yield the same plan.
pub fn build_plan(request: &RenameRequest, entries: &[FileEntry]) -> Result<RenamePlan> {
    request.validate()?;

    let width = resolve_width(request, entries.len());
    let renames = entries
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let index = request.start_index + position as i64;
            let target_name = format_target(
                &request.base_name,
                request.season_tag.as_deref(),
                index,
                width,
                &entry.extension,
            );
            PlannedRename {
                unchanged: entry.name == target_name,
                original_name: entry.name.clone(),
                target_name,
                index,
            }
        })
        .collect();

    Ok(RenamePlan {
        directory: request.directory.clone(),
        width,
        renames,
    })
}

/// List the live directory and compute the plan in one call.
pub fn scan_and_plan(request: &RenameRequest) -> Result<RenamePlan> {
    request.validate()?;
    let entries = list_directory(&request.directory)?;
    build_plan(request, &entries)
}
