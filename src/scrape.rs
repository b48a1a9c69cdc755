//! Help-text scraping — ordered, greedy pattern matching over the help
//! formatter's semi-structured output, not a full parser.
//!
//! Every assumption about the formatter's layout (header tokens, field
//! order, blank-line separators) lives in this module so a structured
//! data source can replace it without touching the renderers. Matching
//! is case-sensitive and assumes the fixed-width layout the host emits.

use crate::model::{ExampleEntry, HelpFields, ParameterEntry};
use regex::Regex;
use std::sync::LazyLock;

// -- Section patterns ---------------------------------------------------------

// Scalar sections: header token at the start of a line, value on the first
// non-blank indented line after it.
static RE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^NAME[ \t]*\n(?:[ \t]*\n)*[ \t]+([^\n]*\S)").unwrap());

static RE_SYNOPSIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^SYNOPSIS[ \t]*\n(?:[ \t]*\n)*[ \t]+([^\n]*\S)").unwrap());

static RE_SYNTAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^SYNTAX[ \t]*\n(?:[ \t]*\n)*[ \t]+([^\n]*\S)").unwrap());

static RE_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^DESCRIPTION[ \t]*\n(?:[ \t]*\n)*[ \t]+([^\n]*\S)").unwrap()
});

static RE_PARAMETERS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^PARAMETERS[ \t]*$").unwrap());

// Parameter blocks are anchored by an indented `-Name` line.
static RE_PARAM_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*-([A-Za-z_][\w-]*)").unwrap());

// Labeled fields inside one parameter block. Arbitrary blank lines may
// separate them; the chunk boundary keeps them from crossing into the
// next parameter's anchor.
static RE_REQUIRED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*Required\?[ \t]+([^\n]*)$").unwrap());

static RE_POSITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*Position\?[ \t]+([^\n]*)$").unwrap());

static RE_DEFAULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*Default value[ \t]*([^\n]*)$").unwrap());

static RE_PIPELINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*Accept pipeline input\?[ \t]+([^\n]*)$").unwrap());

static RE_WILDCARDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*Accept wildcard characters\?[ \t]+([^\n]*)$").unwrap()
});

// Example blocks are anchored by a dashed separator line.
static RE_EXAMPLE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*-+[ \t]*EXAMPLE[ \t]+(\d+)[ \t]*-*[ \t]*$").unwrap()
});

// -- Public API ---------------------------------------------------------------

/// Extract structured fields from one command's help document.
///
/// Pure function of the input text. Missing sections yield empty fields;
/// only an undecodable document fails, and that happens upstream in the
/// spool, never here.
pub fn scrape_help(raw: &str) -> HelpFields {
    let text = raw.replace("\r\n", "\n");
    HelpFields {
        name: scalar(&text, &RE_NAME),
        synopsis: scalar(&text, &RE_SYNOPSIS),
        syntax: escape_angle(&scalar(&text, &RE_SYNTAX)),
        description: scalar(&text, &RE_DESCRIPTION),
        parameters: scrape_parameters(&text),
        examples: scrape_examples(&text),
    }
}

// -- Scalar sections ----------------------------------------------------------

fn scalar(text: &str, re: &Regex) -> String {
    re.captures(text)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_default()
}

/// HTML-escape angle brackets for syntax lines and parameter names.
fn escape_angle(s: &str) -> String {
    s.replace('<', "&lt;").replace('>', "&gt;")
}

// -- Parameters ---------------------------------------------------------------

/// The PARAMETERS section body: from its header to the first example
/// separator, or to the end of the text.
fn parameters_region(text: &str) -> &str {
    let Some(header) = RE_PARAMETERS_HEADER.find(text) else {
        return "";
    };
    let start = header.end();
    let end = RE_EXAMPLE_ANCHOR
        .find_at(text, start)
        .map(|m| m.start())
        .unwrap_or(text.len());
    &text[start..end]
}

fn scrape_parameters(text: &str) -> Vec<ParameterEntry> {
    let region = parameters_region(text);
    let anchors: Vec<(usize, String)> = RE_PARAM_ANCHOR
        .captures_iter(region)
        .map(|c| (c.get(0).unwrap().start(), c[1].to_string()))
        .collect();

    let mut parameters = Vec::new();
    for (i, (start, name)) in anchors.iter().enumerate() {
        let end = anchors
            .get(i + 1)
            .map(|(next, _)| *next)
            .unwrap_or(region.len());
        if let Some(entry) = parse_parameter(name, &region[*start..end]) {
            parameters.push(entry);
        }
    }
    parameters
}

/// Parse one parameter chunk, from its anchor line up to the next anchor.
///
/// A chunk without the four labeled question fields is not a parameter
/// block and is skipped. The `Default value` label may carry no value.
fn parse_parameter(name: &str, chunk: &str) -> Option<ParameterEntry> {
    let required = field(chunk, &RE_REQUIRED)?;
    let position = field(chunk, &RE_POSITION)?;
    let pipeline_input = field(chunk, &RE_PIPELINE)?;
    let wildcards = field(chunk, &RE_WILDCARDS)?;
    let default_value = field(chunk, &RE_DEFAULT).unwrap_or_default();

    // First non-blank line after the anchor, unless the block jumps
    // straight to the labeled fields.
    let description = chunk
        .lines()
        .skip(1)
        .map(str::trim)
        .find(|line| !line.is_empty())
        .filter(|line| !line.starts_with("Required?"))
        .unwrap_or("")
        .to_string();

    Some(ParameterEntry {
        name: escape_angle(name),
        description,
        required,
        position,
        default_value,
        pipeline_input,
        wildcards,
    })
}

fn field(chunk: &str, re: &Regex) -> Option<String> {
    re.captures(chunk).map(|c| c[1].trim().to_string())
}

// -- Examples -----------------------------------------------------------------

fn scrape_examples(text: &str) -> Vec<ExampleEntry> {
    let anchors: Vec<(u32, usize, usize)> = RE_EXAMPLE_ANCHOR
        .captures_iter(text)
        .map(|c| {
            let m = c.get(0).unwrap();
            (c[1].parse().unwrap_or(0), m.start(), m.end())
        })
        .collect();

    let mut examples = Vec::new();
    for (i, (number, _, body_start)) in anchors.iter().enumerate() {
        let body_end = anchors
            .get(i + 1)
            .map(|(_, next_start, _)| *next_start)
            .unwrap_or(text.len());
        let body = cut_at_blank_run(&text[*body_start..body_end]);
        examples.push(ExampleEntry {
            number: *number,
            body: body.trim().to_string(),
        });
    }
    examples
}

/// Truncate an example body at the first run of three consecutive
/// blank-ish (whitespace-only) lines.
fn cut_at_blank_run(body: &str) -> &str {
    let mut blanks = 0;
    let mut run_start = 0;
    let mut pos = 0;
    for line in body.split_inclusive('\n') {
        if line.trim().is_empty() {
            if blanks == 0 {
                run_start = pos;
            }
            blanks += 1;
            if blanks == 3 {
                return &body[..run_start];
            }
        } else {
            blanks = 0;
        }
        pos += line.len();
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
NAME
    Get-Foo

SYNOPSIS
    Does the thing.

SYNTAX
    Get-Foo [-Name] <String> [-Count <Int32>]

DESCRIPTION
    Retrieves the thing and prints it.

PARAMETERS
    -Name <String>
        The name of the thing.

        Required?                    true
        Position?                    1
        Default value
        Accept pipeline input?       false
        Accept wildcard characters?  false

    -Count <Int32>
        How many things.

        Required?                    false
        Position?                    2
        Default value                1
        Accept pipeline input?       false
        Accept wildcard characters?  false

    <CommonParameters>
        Common parameters are supported.

    -------------------------- EXAMPLE 1 --------------------------

    Get-Foo -Name widget

    Fetches the widget.

    -------------------------- EXAMPLE 3 --------------------------

    Get-Foo -Name widget -Count 2

    Fetches two widgets.
";

    #[test]
    fn scalar_sections() {
        let fields = scrape_help(SAMPLE);
        assert_eq!(fields.name, "Get-Foo");
        assert_eq!(fields.synopsis, "Does the thing.");
        assert_eq!(fields.description, "Retrieves the thing and prints it.");
    }

    #[test]
    fn syntax_is_angle_escaped() {
        let fields = scrape_help(SAMPLE);
        assert_eq!(
            fields.syntax,
            "Get-Foo [-Name] &lt;String&gt; [-Count &lt;Int32&gt;]"
        );
    }

    #[test]
    fn synopsis_is_not_escaped() {
        let text = "SYNOPSIS\n    Emits <raw> markers.\n";
        assert_eq!(scrape_help(text).synopsis, "Emits <raw> markers.");
    }

    #[test]
    fn parameters_in_source_order() {
        let fields = scrape_help(SAMPLE);
        assert_eq!(fields.parameters.len(), 2);

        let name = &fields.parameters[0];
        assert_eq!(name.name, "Name");
        assert_eq!(name.description, "The name of the thing.");
        assert_eq!(name.required, "true");
        assert_eq!(name.position, "1");
        assert_eq!(name.default_value, "");
        assert_eq!(name.pipeline_input, "false");
        assert_eq!(name.wildcards, "false");

        let count = &fields.parameters[1];
        assert_eq!(count.name, "Count");
        assert_eq!(count.position, "2");
        assert_eq!(count.default_value, "1");
    }

    #[test]
    fn examples_keep_source_numbers() {
        let fields = scrape_help(SAMPLE);
        let numbers: Vec<u32> = fields.examples.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert!(fields.examples[0].body.starts_with("Get-Foo -Name widget"));
        assert!(fields.examples[0].body.ends_with("Fetches the widget."));
        assert!(fields.examples[1].body.contains("-Count 2"));
    }

    #[test]
    fn example_body_stops_at_blank_run() {
        let text = "\
    -------------------------- EXAMPLE 1 --------------------------

    Get-Foo

    Output line.



REMARKS
    Trailing section.
";
        let fields = scrape_help(text);
        assert_eq!(fields.examples.len(), 1);
        assert!(fields.examples[0].body.ends_with("Output line."));
        assert!(!fields.examples[0].body.contains("REMARKS"));
    }

    #[test]
    fn missing_sections_yield_empty_fields() {
        let fields = scrape_help("no structure here at all\n");
        assert_eq!(fields, HelpFields::default());
    }

    #[test]
    fn extraction_is_idempotent() {
        assert_eq!(scrape_help(SAMPLE), scrape_help(SAMPLE));
    }

    #[test]
    fn crlf_input_matches_lf_input() {
        let crlf = SAMPLE.replace('\n', "\r\n");
        assert_eq!(scrape_help(&crlf), scrape_help(SAMPLE));
    }

    #[test]
    fn duplicate_parameters_pass_through() {
        let text = "\
PARAMETERS
    -Name <String>
        First occurrence.

        Required?                    true
        Position?                    1
        Default value
        Accept pipeline input?       false
        Accept wildcard characters?  false

    -Name <String>
        Second occurrence.

        Required?                    false
        Position?                    2
        Default value
        Accept pipeline input?       false
        Accept wildcard characters?  false
";
        let fields = scrape_help(text);
        assert_eq!(fields.parameters.len(), 2);
        assert_eq!(fields.parameters[0].description, "First occurrence.");
        assert_eq!(fields.parameters[1].description, "Second occurrence.");
    }
}
