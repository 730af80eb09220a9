//! Command-line front end for `structdiff-core`.
//!
//! Compares two JSON (or YAML) documents and prints one line per difference.
//! The exit status is 0 when the documents match, 1 when differences were
//! found and 2 when the inputs could not be read or parsed.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde_json::Value;
use structdiff_core::{Comparer, Diff, DiffOptions, Inspect};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "STRUCTDIFF_LOG";

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    /// One `path (type): left => right` line per difference.
    #[default]
    Text,
    /// A JSON array of difference records.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "structdiff",
    version,
    about = "Report field-level differences between two JSON or YAML documents.",
    after_help = "When SECOND is omitted it is read from STDIN.\n\
                  Set STRUCTDIFF_LOG (e.g. `debug`) to see comparison events on STDERR."
)]
struct Cli {
    /// Also report what the second document has that the first lacks.
    #[arg(long)]
    full: bool,

    /// Read YAML instead of JSON.
    #[arg(long)]
    yaml: bool,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Drop differences at PATH or below it. May be repeated.
    #[arg(long = "ignore", value_name = "PATH")]
    ignore: Vec<String>,

    /// Sort arrays before comparing them element by element.
    #[arg(long)]
    sort_lists: bool,

    /// Write output to FILE instead of STDOUT.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// First document.
    first: PathBuf,

    /// Second document.
    second: Option<PathBuf>,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::from(1),
        Ok(false) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr(), "structdiff: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_writer(io::stderr).with_env_filter(filter).try_init();
}

/// Returns whether any difference was reported.
fn run(cli: &Cli) -> Result<bool> {
    let first = InputSource::File(cli.first.clone());
    let second = cli.second.clone().map_or(InputSource::Stdin, InputSource::File);

    let lhs = parse_document(&read_input(&first)?, cli.yaml)
        .with_context(|| format!("failed to parse {first}"))?;
    let rhs = parse_document(&read_input(&second)?, cli.yaml)
        .with_context(|| format!("failed to parse {second}"))?;

    let mut comparer = Comparer::new();
    if cli.sort_lists {
        comparer.register_natural(Value::type_ref());
    }

    let options = DiffOptions::default();
    let diffs = if cli.full {
        comparer.full_diff_with(&lhs, &rhs, &options)?
    } else {
        comparer.diff_with(&lhs, &rhs, &options)?
    };
    let diffs: Vec<Diff> =
        diffs.into_iter().filter(|diff| !is_ignored(&diff.path, &cli.ignore)).collect();
    tracing::debug!(count = diffs.len(), full = cli.full, "documents compared");

    let rendered = render(&diffs, cli.format)?;
    if let Some(path) = &cli.output {
        fs::write(path, rendered.as_bytes())
            .with_context(|| format!("failed to write output to {}", path.display()))?;
    } else {
        print!("{rendered}");
        io::stdout().flush().ok();
    }

    Ok(!diffs.is_empty())
}

#[derive(Debug)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdin => f.write_str("STDIN"),
        }
    }
}

fn read_input(source: &InputSource) -> Result<String> {
    match source {
        InputSource::File(path) => read_file(path),
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("failed to read STDIN")?;
            Ok(buffer)
        }
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn parse_document(input: &str, yaml: bool) -> Result<Value> {
    if yaml {
        Ok(serde_yaml::from_str(input)?)
    } else {
        Ok(serde_json::from_str(input)?)
    }
}

/// Whether `path` is `ignored` itself or lies below it.
fn is_ignored(path: &str, ignored: &[String]) -> bool {
    ignored.iter().any(|prefix| {
        path.strip_prefix(prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
    })
}

fn render(diffs: &[Diff], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(diffs.iter().map(|diff| format!("{diff}\n")).collect()),
        OutputFormat::Json => {
            let mut out =
                serde_json::to_string_pretty(diffs).context("failed to serialize differences")?;
            out.push('\n');
            Ok(out)
        }
    }
}
