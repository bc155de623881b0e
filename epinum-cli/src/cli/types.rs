use clap::ValueEnum;

/// Output format accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<OutputFormat> for epinum_core::OutputFormat {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// Preview style for the plan command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewArg {
    /// Full table of current and target names
    Table,
    /// Counts and a sample target name only
    Summary,
}

impl PreviewArg {
    /// Parse a config-file value; unknown strings fall back to the table.
    pub fn from_config(value: &str) -> Self {
        match value {
            "summary" => Self::Summary,
            _ => Self::Table,
        }
    }
}
