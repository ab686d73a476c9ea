use tera::{Context, Tera};
use tracing::debug;

use crate::error::ExportError;
use crate::report::ReportContext;

pub const DEFAULT_TEMPLATE_NAME: &str = "report.md";
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/report.md.tera");

/// Render a Tera template with a [`ReportContext`].
///
/// The `template_content` is the raw template string (Jinja2 syntax).
/// The context fields become the template variables.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    report: &ReportContext,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(report)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    debug!(template = template_name, bytes = rendered.len(), "report rendered");
    Ok(rendered)
}

/// Render with the built-in medical report layout.
pub fn render_report(report: &ReportContext) -> Result<String, ExportError> {
    render_template(DEFAULT_TEMPLATE_NAME, DEFAULT_TEMPLATE, report)
}
