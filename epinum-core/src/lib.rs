#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod apply;
pub mod config;
pub mod error;
pub mod fsops;
pub mod history;
pub mod operations;
pub mod output;
pub mod plan;
pub mod preview;
pub mod sort;
pub mod undo;

pub use apply::{apply_plan, resolve_renames, Conflict, RenameEvent, Resolution};
pub use config::Config;
pub use error::{Error, Result};
pub use fsops::{DiskOps, FileOps};
pub use history::{HistoryStack, RenameBatch};
pub use operations::{apply_operation, history_operation, plan_operation, undo_operation};
pub use output::{
    ApplyResult, HistoryItem, HistoryResult, OutputFormat, OutputFormatter, PlanResult, UndoResult,
};
pub use plan::{
    build_plan, format_target, list_directory, scan_and_plan, FileEntry, PlannedRename,
    RenamePlan, RenameRequest, ZeroPad,
};
pub use preview::render_plan;
pub use sort::{natural_sort_key, SortKey};
pub use undo::undo_last;
