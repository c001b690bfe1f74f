use std::collections::HashMap;

use tera::{Context, Tera, Value};

use dermassist_report::ReportDocument;

use crate::error::ExportError;
use crate::renderer::{ExportFormat, Renderer};

/// Built-in layout. Bars are drawn with the `bar` filter.
pub const DEFAULT_TEMPLATE: &str = r#"# {{ title }}

{% for section in sections -%}
{% if section.title %}## {{ section.title }}

{% endif -%}
{% for block in section.blocks -%}
{% if block.kind == "text" -%}
{% if block.text %}{{ block.text }}

{% endif -%}
{% elif block.kind == "columns" -%}
{% for column in block.columns -%}
{% for line in column.lines -%}
{% if line.text %}{{ line.text }}

{% endif -%}
{% endfor -%}
{% endfor -%}
{% elif block.kind == "fields" -%}
| Field | Value |
|---|---|
{% for field in block.fields -%}
| {{ field.label | title }} | {{ field.value }} |
{% endfor %}
{% elif block.kind == "table" -%}
|{% for column in block.columns %} {{ column.title }} |{% endfor %}
|{% for column in block.columns %}---|{% endfor %}
{% for row in block.rows -%}
|{% for cell in row.cells %} {% if cell.kind == "bar" %}`{{ cell.fraction | bar }}`{% elif row.emphasized %}**{{ cell.text }}**{% else %}{{ cell.text }}{% endif %} |{% endfor %}
{% endfor %}
{% elif block.kind == "rule" -%}
---

{% endif -%}
{% endfor -%}
{% endfor -%}
"#;

const BAR_SLOTS: usize = 20;

/// Renders the document through a Tera template into Markdown text.
///
/// The template context is the JSON form of the document, so custom
/// templates can address any field by name.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    template_name: String,
    template_content: String,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::with_template("report.md", DEFAULT_TEMPLATE)
    }
}

impl MarkdownRenderer {
    pub fn with_template(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            template_name: name.into(),
            template_content: content.into(),
        }
    }

    pub fn render_string(&self, document: &ReportDocument) -> Result<String, ExportError> {
        render_template(&self.template_name, &self.template_content, document)
    }
}

impl Renderer for MarkdownRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Markdown
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        let rendered = self.render_string(document)?;
        tracing::debug!(
            report_id = %document.report_id,
            template = %self.template_name,
            bytes = rendered.len(),
            "rendered Markdown"
        );
        Ok(rendered.into_bytes())
    }
}

/// Render a Tera template with a report document.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
/// The document fields become the template context variables.
pub fn render_template(
    template_name: &str,
    template_content: &str,
    document: &ReportDocument,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.register_filter("bar", bar_filter);
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    // Convert the document to a Tera context via serde_json
    let value = serde_json::to_value(document)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render(template_name, &context)?;
    Ok(rendered)
}

/// `{{ fraction | bar }}`: a fixed-width text bar, e.g. `█████░░░░░...`.
fn bar_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let fraction = value
        .as_f64()
        .ok_or_else(|| tera::Error::msg(format!("bar filter expects a number, got {value}")))?;
    Ok(Value::String(text_bar(fraction, BAR_SLOTS)))
}

/// Fill `slots` characters in proportion to `fraction` (clamped to `[0, 1]`).
pub fn text_bar(fraction: f64, slots: usize) -> String {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let filled = (fraction * slots as f64).round() as usize;
    let mut bar = "\u{2588}".repeat(filled);
    bar.push_str(&"\u{2591}".repeat(slots - filled));
    bar
}
