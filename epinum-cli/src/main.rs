use clap::Parser;
use epinum_core::Config;
use std::io::{self, IsTerminal};
use std::process;

mod cli;
mod plan;
mod rename;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Load config to get defaults
    let config = Config::load().unwrap_or_default();

    let use_color = if cli.no_color {
        false
    } else {
        config
            .defaults
            .use_color
            .unwrap_or_else(|| io::stdout().is_terminal())
    };

    let result = match &cli.command {
        Commands::Plan { template, preview } => {
            plan::handle_plan(template, *preview, &config, use_color)
        },
        Commands::Rename { template } => rename::handle_rename(template, &config, cli.yes),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(2);
    }
}
