//! Command-line front end for the blockdoc content engine.
//!
//! Usage:
//!   blockdoc [--config PATH] normalize [FILE]
//!   blockdoc [--config PATH] render [FILE] [--format markdown|html|json]
//!   blockdoc [--config PATH] structure [FILE]
//!   blockdoc [--config PATH] edit --document FILE --operations FILE
//!
//! Inputs may be Markdown, canonical JSON or simplified JSON. A missing FILE
//! or `-` reads standard input.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blockdoc_config::{Config, OutputFormat};
use blockdoc_engine::editing::EditRequest;
use blockdoc_engine::{ContentEngine, Document, EngineOptions};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(name = "blockdoc")]
#[command(about = "Convert, normalize and edit block documents", long_about = None)]
struct Args {
    /// Config file (defaults to ~/.config/blockdoc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the canonical JSON tree of a document
    Normalize {
        /// Input file, or `-` for stdin
        file: Option<PathBuf>,
    },
    /// Serialize a document as Markdown, HTML or JSON
    Render {
        /// Input file, or `-` for stdin
        file: Option<PathBuf>,
        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },
    /// List the top-level blocks with their previews
    Structure {
        /// Input file, or `-` for stdin
        file: Option<PathBuf>,
    },
    /// Apply an edit request and print the outcome as JSON
    Edit {
        /// Document to edit
        #[arg(long)]
        document: PathBuf,
        /// JSON edit request, or a bare array of operations
        #[arg(long)]
        operations: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum FormatArg {
    Markdown,
    Html,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Markdown => OutputFormat::Markdown,
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let config = Config::load_or_default(args.config.as_deref())?;
    log::debug!("Using config: {config:?}");

    let mut engine = ContentEngine::new().with_options(engine_options(&config));

    let output = match args.command {
        Commands::Normalize { file } => {
            let doc = load_document(&mut engine, file.as_deref())?;
            to_json(&doc, config.output.pretty_json)?
        }
        Commands::Render { file, format } => {
            let doc = load_document(&mut engine, file.as_deref())?;
            let format = format.map(OutputFormat::from).unwrap_or(config.output.format);
            match format {
                OutputFormat::Markdown => engine.to_markdown(&doc),
                OutputFormat::Html => engine.to_html(&doc),
                OutputFormat::Json => to_json(&doc, config.output.pretty_json)?,
            }
        }
        Commands::Structure { file } => {
            let doc = load_document(&mut engine, file.as_deref())?;
            to_json(&engine.structure(&doc), config.output.pretty_json)?
        }
        Commands::Edit {
            document,
            operations,
        } => {
            let doc = load_document(&mut engine, Some(&document))?;
            let request_text = read_input(Some(&operations))?;
            let request = EditRequest::from_json(&request_text)
                .with_context(|| format!("Failed to decode {}", operations.display()))?;
            let outcome = engine.apply_request(&doc, &request);
            log::info!(
                "Applied {} of {} operations",
                outcome.operations_applied,
                request.operations.len()
            );
            to_json(&outcome, config.output.pretty_json)?
        }
    };

    println!("{output}");
    Ok(())
}

fn engine_options(config: &Config) -> EngineOptions {
    EngineOptions::default()
        .with_max_depth(config.limits.max_depth)
        .with_preview_chars(config.editor.preview_chars)
}

/// Reads a file, or stdin for `None` and `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// The normalizer decodes JSON strings itself and treats anything else as
/// Markdown, so raw input goes in as a string value.
fn load_document(engine: &mut ContentEngine, path: Option<&Path>) -> Result<Document> {
    let text = read_input(path)?;
    Ok(engine.normalize(&Value::String(text)))
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
