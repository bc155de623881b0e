use clap::{Args, Parser, Subcommand};
use epinum_core::{Config, RenameRequest, ZeroPad};
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Batch episode renamer with reversible in-session history
#[derive(Parser, Debug)]
#[command(name = "epinum")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Assume yes for all prompts (skip the keep/undo prompt after renaming)
    #[arg(short = 'y', long = "yes", global = true, env = "EPINUM_YES")]
    pub yes: bool,
}

/// Naming template and numbering arguments shared by plan and rename
#[derive(Args, Debug, Clone)]
pub struct TemplateArgs {
    /// Directory containing the episode files
    pub directory: PathBuf,

    /// Series name used as the literal prefix of every produced name
    #[arg(short = 'n', long = "name")]
    pub name: String,

    /// Episode number assigned to the first file in sorted order
    #[arg(short = 's', long = "start", default_value_t = 1, allow_negative_numbers = true)]
    pub start: i64,

    /// Season tag inserted before the episode marker (e.g. S01)
    #[arg(long)]
    pub season: Option<String>,

    /// Explicit zero-pad width (default: wide enough for the last episode)
    #[arg(long, value_name = "WIDTH")]
    pub pad: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Summary)]
    pub output: OutputFormat,
}

impl TemplateArgs {
    /// Build the core request, filling gaps from the config defaults.
    pub fn to_request(&self, config: &Config) -> RenameRequest {
        let zero_pad = self
            .pad
            .or(config.defaults.zero_pad)
            .map_or(ZeroPad::Auto, ZeroPad::Fixed);

        RenameRequest {
            directory: self.directory.clone(),
            base_name: self.name.clone(),
            start_index: self.start,
            season_tag: self.season.clone().filter(|s| !s.trim().is_empty()),
            zero_pad,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Preview the rename plan without touching any files
    Plan {
        #[command(flatten)]
        template: TemplateArgs,

        /// Preview style (defaults to the config file's preview_format)
        #[arg(long, value_enum)]
        preview: Option<PreviewArg>,
    },

    /// Rename the files, then offer to undo while the session is open
    Rename {
        #[command(flatten)]
        template: TemplateArgs,
    },
}
