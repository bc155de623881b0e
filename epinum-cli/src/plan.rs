use crate::cli::{PreviewArg, TemplateArgs};
use anyhow::Result;
use epinum_core::{plan_operation, Config};

pub fn handle_plan(
    template: &TemplateArgs,
    preview: Option<PreviewArg>,
    config: &Config,
    use_color: bool,
) -> Result<()> {
    let request = template.to_request(config);
    let preview = preview.unwrap_or_else(|| PreviewArg::from_config(&config.defaults.preview_format));

    let output = plan_operation(
        &request,
        template.output.into(),
        preview == PreviewArg::Table,
        use_color,
    )?;
    println!("{output}");
    Ok(())
}
