//! Data model for scraped help text and bundling — format-agnostic.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Fields extracted from one command's help document.
///
/// Every scalar field is the empty string when its section is absent from
/// the source text; extraction never fails for a missing section.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HelpFields {
    pub name: String,
    pub synopsis: String,
    /// Angle brackets are HTML-escaped at extraction time.
    pub syntax: String,
    pub description: String,
    /// Parameter blocks in source order; duplicates pass through as-is.
    pub parameters: Vec<ParameterEntry>,
    /// Example blocks in source order, numbered as in the source text.
    pub examples: Vec<ExampleEntry>,
}

/// One parameter block from the PARAMETERS section.
///
/// All values are kept as the text the help formatter printed;
/// booleans and positions are not parsed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParameterEntry {
    /// Parameter name without the leading dash, angle brackets escaped.
    pub name: String,
    pub description: String,
    pub required: String,
    pub position: String,
    /// May be empty: the help formatter prints the label with no value.
    pub default_value: String,
    pub pipeline_input: String,
    pub wildcards: String,
}

/// One example block from the EXAMPLES section.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExampleEntry {
    /// Number as it appears in the source text, never renumbered.
    pub number: u32,
    /// Body text, trimmed of leading and trailing whitespace.
    pub body: String,
}

/// One command's entry on a module summary page.
#[derive(Debug, Clone)]
pub struct CommandSummary {
    pub name: String,
    pub synopsis: String,
    pub in_progress: bool,
}

/// Result of bundling one module's script files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BundleResult {
    /// Source files in bundling order.
    pub sources: Vec<PathBuf>,
    /// Newline-joined concatenation of the source texts.
    pub text: String,
    /// Hex SHA-256 per input file, keyed by its path. Computed for change
    /// detection; no pipeline consumes it yet.
    #[allow(dead_code)]
    pub hashes: BTreeMap<PathBuf, String>,
}
