//! Renderer module — command pages plus summary format dispatch.

pub mod page;
pub mod summary;

use crate::model::CommandSummary;
use anyhow::{anyhow, Result};

/// Trait for rendering a module summary in a specific output format.
pub trait SummaryRenderer {
    fn render(&self, module: &str, entries: &[CommandSummary]) -> String;
    fn default_file_name(&self, module: &str) -> String;
}

/// Create a summary renderer for the given format name.
pub fn create_renderer(format: &str, base_url: &str) -> Result<Box<dyn SummaryRenderer>> {
    match format {
        "html" => Ok(Box::new(summary::HtmlSummary)),
        "markdown" | "md" => Ok(Box::new(summary::MarkdownSummary {
            base_url: base_url.to_string(),
        })),
        _ => Err(anyhow!("unknown format: {}. Use html or markdown", format)),
    }
}
