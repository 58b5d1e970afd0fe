use serde::Serialize;
use tera::{Context, Tera};

use crate::error::ExportError;
use crate::report::ResultReport;

pub const REPORT_TEMPLATE_NAME: &str = "report.html";
pub const REPORT_TEMPLATE: &str = include_str!("../templates/report.html");

/// Render a Tera template against any serializable value.
///
/// The value's fields become the template context variables. Names ending in
/// `.html` are autoescaped.
pub fn render_template<T: Serialize>(
    template_name: &str,
    template_content: &str,
    value: &T,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(value)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

/// Render the built-in HTML results page.
pub fn render_report(report: &ResultReport) -> Result<String, ExportError> {
    let html = render_template(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE, report)?;
    tracing::debug!(session_id = %report.session_id, bytes = html.len(), "report rendered");
    Ok(html)
}
