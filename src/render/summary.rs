//! Module summary renderers — an intro line stating the command count,
//! then one list entry per command linking to its page.

use crate::model::CommandSummary;
use crate::render::SummaryRenderer;

/// Marker shown before commands whose documentation is still being written.
const IN_PROGRESS: &str = "[IN PROGRESS]";

pub struct HtmlSummary;

impl SummaryRenderer for HtmlSummary {
    fn render(&self, module: &str, entries: &[CommandSummary]) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "<p>The {} module exports {} commands:</p>\n",
            module,
            entries.len()
        ));
        out.push_str("<ul>\n");
        for entry in entries {
            let marker = if entry.in_progress {
                format!("<b>{IN_PROGRESS}</b> ")
            } else {
                String::new()
            };
            out.push_str(&format!(
                "  <li>{}<a href=\"cmdlets/{}.html\">{}</a>: {}</li>\n",
                marker, entry.name, entry.name, entry.synopsis
            ));
        }
        out.push_str("</ul>\n");
        out
    }

    fn default_file_name(&self, module: &str) -> String {
        format!("{module}.html")
    }
}

pub struct MarkdownSummary {
    /// Absolute base URL the command pages are published under.
    pub base_url: String,
}

impl SummaryRenderer for MarkdownSummary {
    fn render(&self, module: &str, entries: &[CommandSummary]) -> String {
        let base = self.base_url.trim_end_matches('/');
        let mut out = String::new();
        out.push_str(&format!(
            "The {} module exports {} commands:\n\n",
            module,
            entries.len()
        ));
        for entry in entries {
            let marker = if entry.in_progress {
                format!("**{IN_PROGRESS}** ")
            } else {
                String::new()
            };
            out.push_str(&format!(
                "* {}[{}]({}/{}.html): {}\n",
                marker, entry.name, base, entry.name, entry.synopsis
            ));
        }
        out
    }

    fn default_file_name(&self, _module: &str) -> String {
        "README.md".to_string()
    }
}
