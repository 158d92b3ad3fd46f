use std::collections::HashMap;

use tera::{Context, Tera, Value};

use soraya_core::models::report::RenderedReport;

use crate::error::ExportError;

/// The report document template. Output is the markdown-ish subset the
/// layout stage understands: `#`/`##` headings, `- ` bullets, `N. `
/// numbered items, `! ` for high-priority recommendations and `> ` for
/// boxed note lines (the 5-year risk highlight and the disclaimer).
pub const REPORT_TEMPLATE: &str = r#"# {{ title | placeholder }}

Generated on {{ generated_on }}

## Patient
- Age: {{ patient.age }}
- Population group: {{ patient.race_label | placeholder }}
- 5-year projection to age {{ patient.projection_age_5year }}
- Lifetime projection to age {{ patient.projection_age_lifetime }}

## Risk figures
> 5-year absolute risk: {{ score.absolute_5year | placeholder }}
- Category: {{ score.category_label | placeholder }}
- 5-year population average: {{ score.average_5year | placeholder }}
- Relative risk: {{ score.relative_5year | placeholder }}
{%- if score.lifetime %}
- Lifetime absolute risk: {{ score.lifetime.absolute | placeholder }}
- Lifetime population average: {{ score.lifetime.average | placeholder }}
- Lifetime relative risk: {{ score.lifetime.relative | placeholder }}
{%- endif %}

## Interpretation
{{ interpretation | placeholder }}

## Risk factors
{%- for finding in findings %}
- {{ finding.name | placeholder }}: {{ finding.description | placeholder }}
{%- endfor %}

## Recommendations
{%- for rec in recommendations %}
{%- if rec.priority == "high" %}
! {{ loop.index }}. {{ rec.text | placeholder }}
{%- else %}
{{ loop.index }}. {{ rec.text | placeholder }}
{%- endif %}
{%- endfor %}

> {{ disclaimer | placeholder }}
"#;

/// Render the report through the document template.
///
/// The report fields become the template context variables, so the
/// template sees exactly what the frontend report view sees. Empty or
/// null values render as `N/A` instead of failing the export.
pub fn render_report(report: &RenderedReport) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.register_filter("placeholder", placeholder);
    tera.add_raw_template("report", REPORT_TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(report)?;
    let context = Context::from_value(value)
        .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    let rendered = tera.render("report", &context)?;
    Ok(rendered)
}

fn placeholder(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let missing = match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    };

    if missing {
        Ok(Value::String("N/A".to_string()))
    } else {
        Ok(value.clone())
    }
}
