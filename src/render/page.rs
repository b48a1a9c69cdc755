//! Command page renderer — one standalone HTML page per command,
//! assembled by direct string building between caller-supplied header
//! and footer templates.

use crate::model::{HelpFields, ParameterEntry};

/// Assemble `header + body + footer`.
///
/// The templates may carry a `${name}` placeholder, substituted with the
/// command name. No escaping happens here: the syntax line and the
/// parameter names arrive pre-escaped from extraction, and everything
/// else passes through verbatim.
pub fn render_page(fields: &HelpFields, header: &str, footer: &str) -> String {
    let mut out = String::new();
    out.push_str(&header.replace("${name}", &fields.name));
    out.push_str(&render_body(fields));
    out.push_str(&footer.replace("${name}", &fields.name));
    out
}

fn render_body(fields: &HelpFields) -> String {
    let mut out = String::new();

    out.push_str(&format!("<h1>{}</h1>\n", fields.name));
    if !fields.synopsis.is_empty() {
        out.push_str(&format!("<p>{}</p>\n", fields.synopsis));
    }
    if !fields.syntax.is_empty() {
        out.push_str("<h2>Syntax</h2>\n");
        out.push_str(&format!("<pre>{}</pre>\n", fields.syntax));
    }
    if !fields.description.is_empty() {
        out.push_str("<h2>Description</h2>\n");
        out.push_str(&format!("<p>{}</p>\n", fields.description));
    }

    if !fields.parameters.is_empty() {
        out.push_str("<h2>Parameters</h2>\n");
        for param in &fields.parameters {
            out.push_str(&render_parameter(param));
        }
    }

    for example in &fields.examples {
        out.push_str(&format!("<h2>Example {}</h2>\n", example.number));
        out.push_str(&format!("<pre>{}</pre>\n", example.body));
    }

    out
}

fn render_parameter(param: &ParameterEntry) -> String {
    let mut out = String::new();
    out.push_str(&format!("<h3>-{}</h3>\n", param.name));
    out.push_str("<table>\n");
    out.push_str(&table_row("Description", &param.description));
    out.push_str(&table_row("Required?", &param.required));
    out.push_str(&table_row("Position?", &param.position));
    out.push_str(&table_row("Default value", &param.default_value));
    out.push_str(&table_row("Accept pipeline input?", &param.pipeline_input));
    out.push_str(&table_row("Accept wildcard characters?", &param.wildcards));
    out.push_str("</table>\n");
    out
}

fn table_row(label: &str, value: &str) -> String {
    format!("  <tr><td>{label}</td><td>{value}</td></tr>\n")
}
