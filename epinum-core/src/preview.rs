use crate::plan::RenamePlan;
use comfy_table::{Cell, Color, Table};
use nu_ansi_term::Color as AnsiColor;

/// Render a plan as a table of current and target names, one row per file.
pub fn render_plan(plan: &RenamePlan, use_color: bool) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Episode").fg(Color::Cyan),
        Cell::new("Current name").fg(Color::Cyan),
        Cell::new("New name").fg(Color::Cyan),
    ]);

    for rename in &plan.renames {
        let target = if rename.unchanged {
            format!("{} (unchanged)", rename.target_name)
        } else if use_color {
            AnsiColor::Green.paint(rename.target_name.as_str()).to_string()
        } else {
            rename.target_name.clone()
        };

        table.add_row(vec![
            format!("E{:0width$}", rename.index, width = plan.width),
            rename.original_name.clone(),
            target,
        ]);
    }

    table.to_string()
}
