use crate::output::{OutputFormat, OutputFormatter, PlanResult};
use crate::plan::{scan_and_plan, RenameRequest};
use crate::preview::render_plan;
use anyhow::Result;

/// High-level plan preview - equivalent to `epinum plan`. Computes the plan
/// against the live directory listing without touching any files.
pub fn plan_operation(
    request: &RenameRequest,
    format: OutputFormat,
    preview_table: bool,
    use_color: bool,
) -> Result<String> {
    let plan = scan_and_plan(request)?;
    let unchanged = plan.renames.iter().filter(|r| r.unchanged).count();

    let result = PlanResult {
        directory: request.directory.display().to_string(),
        base_name: request.base_name.clone(),
        season_tag: request.season_tag.clone(),
        start_index: request.start_index,
        width: plan.width,
        files: plan.renames.len(),
        unchanged,
        // The full pair list only goes out in machine-readable form.
        plan: (format == OutputFormat::Json).then(|| plan.clone()),
    };

    if format == OutputFormat::Summary && preview_table {
        let mut output = render_plan(&plan, use_color);
        output.push('\n');
        output.push_str(&result.format_summary());
        Ok(output)
    } else {
        Ok(result.format(format))
    }
}
