//! modoc — bundle command modules and generate documentation pages from
//! their built-in help text.
//!
//! Three independent, stateless pipelines:
//!
//! - **bundle** — concatenate a module's script files into one bundle file
//! - **pages** — scrape each command's help text and render one HTML page
//!   per command
//! - **summary** — render a module overview page (HTML or markdown) listing
//!   every command with its synopsis

mod bundle;
mod error;
mod host;
mod model;
mod render;
mod scrape;
mod spool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use error::DocError;
use host::{DirHost, ModuleHost};
use model::CommandSummary;

#[derive(Parser)]
#[command(
    name = "modoc",
    about = "Bundle command modules and generate documentation from their help text"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Concatenate a module's script files into a single bundle
    Bundle {
        /// Module name, used for the bundle file name
        #[arg(short, long)]
        module: String,

        /// Directory containing the loose script files
        #[arg(short, long)]
        source: PathBuf,

        /// Output directory for the bundle file
        #[arg(short, long)]
        out: PathBuf,

        /// Glob-style pattern of file names to exclude
        #[arg(short = 'x', long)]
        exclude: Option<String>,

        /// Help-text store root, used to reload the bundled module
        #[arg(long, default_value = ".")]
        store: PathBuf,
    },

    /// Render one HTML page per command from scraped help text
    Pages {
        /// Command name, or a module name to render every command in it
        #[arg(short, long)]
        name: String,

        /// Help-text store root
        #[arg(long)]
        store: PathBuf,

        /// Output directory for the HTML pages
        #[arg(short, long)]
        out: PathBuf,

        /// Header template file, prepended to every page (${name} substituted)
        #[arg(long)]
        header: PathBuf,

        /// Footer template file, appended to every page
        #[arg(long)]
        footer: PathBuf,

        /// Command names to skip when rendering a whole module (repeatable)
        #[arg(short = 'x', long)]
        exclude: Vec<String>,
    },

    /// Render a module overview page listing every command
    Summary {
        /// Module name
        #[arg(short, long)]
        module: String,

        /// Help-text store root
        #[arg(long)]
        store: PathBuf,

        /// Output directory for the summary file
        #[arg(short, long)]
        out: PathBuf,

        /// Output format: html (default) or markdown
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Output file name, overriding the format's default
        #[arg(long)]
        file: Option<String>,

        /// Command names to leave out (repeatable)
        #[arg(short = 'x', long)]
        exclude: Vec<String>,

        /// Commands flagged as still in progress (repeatable)
        #[arg(long = "in-progress")]
        in_progress: Vec<String>,

        /// Absolute base URL for markdown links to command pages
        #[arg(
            long,
            required_if_eq_any([("format", "markdown"), ("format", "md")])
        )]
        base_url: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Bundle {
            module,
            source,
            out,
            exclude,
            store,
        } => run_bundle(&module, &source, &out, exclude.as_deref(), &store),
        Command::Pages {
            name,
            store,
            out,
            header,
            footer,
            exclude,
        } => run_pages(&DirHost::new(store), &name, &out, &header, &footer, &exclude),
        Command::Summary {
            module,
            store,
            out,
            format,
            file,
            exclude,
            in_progress,
            base_url,
        } => run_summary(
            &DirHost::new(store),
            &SummaryConfig {
                module: &module,
                out: &out,
                format: &format,
                file,
                exclude: &exclude,
                in_progress: &in_progress,
                base_url: base_url.as_deref().unwrap_or(""),
            },
        ),
    }
}

// -- bundle -------------------------------------------------------------------

fn run_bundle(
    module: &str,
    source: &Path,
    out: &Path,
    exclude: Option<&str>,
    store: &Path,
) -> Result<()> {
    let pattern = exclude
        .map(glob::Pattern::new)
        .transpose()
        .context("invalid exclusion pattern")?;

    let result = bundle::collect(source, pattern.as_ref())?;
    let bundle_path = bundle::write_bundle(&result, module, out)?;

    // Freshly bundled definitions must be importable downstream.
    let host = DirHost::new(store);
    host.reload(module, &bundle_path)?;

    eprintln!(
        "bundled {} files into {}",
        result.sources.len(),
        bundle_path.display()
    );
    Ok(())
}

// -- pages --------------------------------------------------------------------

fn run_pages(
    host: &impl ModuleHost,
    name: &str,
    out: &Path,
    header_path: &Path,
    footer_path: &Path,
    exclude: &[String],
) -> Result<()> {
    let header = fs::read_to_string(header_path)
        .with_context(|| format!("failed to read header template {}", header_path.display()))?;
    let footer = fs::read_to_string(footer_path)
        .with_context(|| format!("failed to read footer template {}", footer_path.display()))?;

    // Resolve the name to a command list before touching the output
    // directory, so an unknown name writes nothing.
    let (commands, batch) = match host.commands(name) {
        Ok(all) => {
            let skip: HashSet<&str> = exclude.iter().map(String::as_str).collect();
            let kept: Vec<String> = all
                .into_iter()
                .filter(|c| !skip.contains(c.as_str()))
                .collect();
            (kept, true)
        }
        Err(DocError::NotFound(_)) => {
            if host.is_command(name) {
                (vec![name.to_string()], false)
            } else {
                return Err(DocError::not_found(format!("command or module '{name}'")).into());
            }
        }
        Err(e) => return Err(e.into()),
    };

    fs::create_dir_all(out)
        .with_context(|| format!("failed to create output directory {}", out.display()))?;

    let total = commands.len();
    for (i, command) in commands.iter().enumerate() {
        eprintln!("[{}/{}] {}", i + 1, total, command);
        match render_one_page(host, command, &header, &footer, out) {
            Ok(()) => {}
            // One undecodable document must not sink a whole-module batch.
            Err(e @ DocError::MalformedInput { .. }) if batch => {
                eprintln!("warning: skipping {command}: {e}");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn render_one_page(
    host: &impl ModuleHost,
    command: &str,
    header: &str,
    footer: &str,
    out: &Path,
) -> error::Result<()> {
    let raw = host.help_text(command)?;
    let text = spool::spool_help(command, &raw)?;
    let fields = scrape::scrape_help(&text);
    let page = render::page::render_page(&fields, header, footer);
    let path = out.join(format!("{command}.html"));
    fs::write(&path, page).map_err(|e| DocError::io(&path, e))
}

// -- summary ------------------------------------------------------------------

/// Inputs of one summary invocation.
struct SummaryConfig<'a> {
    module: &'a str,
    out: &'a Path,
    format: &'a str,
    file: Option<String>,
    exclude: &'a [String],
    in_progress: &'a [String],
    base_url: &'a str,
}

fn run_summary(host: &impl ModuleHost, config: &SummaryConfig) -> Result<()> {
    let renderer = render::create_renderer(config.format, config.base_url)?;

    // An unknown module fails here, before any output file exists.
    let commands = host.commands(config.module)?;

    let skip: HashSet<&str> = config.exclude.iter().map(String::as_str).collect();
    let flagged: HashSet<&str> = config.in_progress.iter().map(String::as_str).collect();

    let mut entries = Vec::new();
    for command in commands.iter().filter(|c| !skip.contains(c.as_str())) {
        match summarize(host, command) {
            Ok(synopsis) => entries.push(CommandSummary {
                name: command.clone(),
                synopsis,
                in_progress: flagged.contains(command.as_str()),
            }),
            Err(e @ DocError::MalformedInput { .. }) => {
                eprintln!("warning: skipping {command}: {e}");
            }
            Err(e) => return Err(e.into()),
        }
    }

    fs::create_dir_all(config.out)
        .with_context(|| format!("failed to create output directory {}", config.out.display()))?;

    let file_name = config
        .file
        .clone()
        .unwrap_or_else(|| renderer.default_file_name(config.module));
    let path = config.out.join(file_name);
    fs::write(&path, renderer.render(config.module, &entries))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn summarize(host: &impl ModuleHost, command: &str) -> error::Result<String> {
    let raw = host.help_text(command)?;
    let text = spool::spool_help(command, &raw)?;
    Ok(scrape::scrape_help(&text).synopsis)
}
