//! `context-path` - evaluate path expressions against a JSON document.
//!
//! Reads the document from `--input` or stdin and prints one JSON value per
//! path, in argument order.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use context_path::{Evaluator, PathError};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "context-path")]
#[command(about = "Resolve path expressions such as `books[currentBook].pages` against JSON")]
struct Cli {
    /// JSON document to query; stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Pretty-print resolved values
    #[arg(long)]
    pretty: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    /// Path expressions to resolve
    #[arg(required = true)]
    paths: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<PathError>() {
                Some(path_err) => eprintln!("error[{}]: {path_err}", path_err.code()),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let document = read_document(cli.input.as_deref())?;
    if document.is_null() {
        return Err(PathError::EmptyContext.into());
    }
    let evaluator = Evaluator::from(document);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for path in &cli.paths {
        let value = evaluator.parse(path)?;
        let rendered = if cli.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        writeln!(out, "{rendered}")?;
    }
    Ok(())
}

fn read_document(input: Option<&Path>) -> Result<Value> {
    let text = match input {
        Some(file) => fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };
    log::debug!("read {} bytes of JSON input", text.len());
    serde_json::from_str(&text).context("input is not valid JSON")
}
