use crate::cli::TemplateArgs;
use anyhow::Result;
use epinum_core::{
    apply_operation, history_operation, undo_operation, Config, DiskOps, HistoryStack,
    OutputFormat,
};
use std::io::{self, BufRead, Write};

pub fn handle_rename(template: &TemplateArgs, config: &Config, yes: bool) -> Result<()> {
    let request = template.to_request(config);
    let format: OutputFormat = template.output.into();
    let ops = DiskOps;
    let mut stack = HistoryStack::new();

    let output = apply_operation(&request, &mut stack, &ops, format)?;
    println!("{output}");

    if yes || stack.is_empty() {
        return Ok(());
    }

    // History lives only in this process, so the chance to undo is now.
    prompt_keep_or_undo(&mut stack, &ops, format)
}

fn prompt_keep_or_undo(stack: &mut HistoryStack, ops: &DiskOps, format: OutputFormat) -> Result<()> {
    let stdin = io::stdin();
    loop {
        print!("Keep these names? [Y]es / [u]ndo / [h]istory: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF: keep the renames.
            return Ok(());
        }

        match line.trim().to_lowercase().as_str() {
            "" | "y" | "yes" | "k" | "keep" | "q" => return Ok(()),
            "u" | "undo" => {
                let output = undo_operation(stack, ops, format)?;
                println!("{output}");
                return Ok(());
            },
            "h" | "history" => {
                println!("{}", history_operation(stack, format)?);
            },
            other => println!("Unrecognized choice: '{other}'"),
        }
    }
}
