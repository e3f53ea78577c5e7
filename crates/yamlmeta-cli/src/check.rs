//! # Check Subcommand
//!
//! Parse a YAML document as one of the demo record kinds and print the
//! result.
//!
//! ## Usage
//!
//! ```bash
//! # Validate and print as annotated text:
//! yamlmeta check person.yaml --record person
//!
//! # Lenient parse, printed as JSON:
//! yamlmeta check service.yaml --record service-config --lenient --format json
//!
//! # Machine-readable error report:
//! yamlmeta check service.yaml --record service-config --format errors-json
//! ```
//!
//! Exit code 0 means the document is valid (or was parsed leniently),
//! 1 means validation failed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::json;
use yamlmeta_schema::{parse, render, Node, ParseMode, ParseOutcome, Record, ValidationResult};

use crate::records::{AppConfig, DatabaseConfig, LogEntry, Person, RecordKind, ServiceConfig, User};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// YAML document to check.
    pub file: PathBuf,

    /// Record kind to parse the document as.
    #[arg(long, value_enum)]
    pub record: RecordKind,

    /// Never fail: fill missing or invalid fields with defaults.
    #[arg(long)]
    pub lenient: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// How a checked record is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `name: value  # description` lines.
    Text,
    /// A JSON object in field order.
    Json,
    /// `name=value` lines.
    Map,
    /// A JSON report with the validity flag and every field error.
    ErrorsJson,
}

/// Output and exit code of one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub code: u8,
    pub output: String,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    tracing::info!(
        file = %args.file.display(),
        record = args.record.type_name(),
        "checking document"
    );
    let report = check_file(&args.file, args.record, args.lenient, args.format)?;
    print!("{}", report.output);
    Ok(report.code)
}

/// Read `path` and check its contents.
pub fn check_file(
    path: &Path,
    kind: RecordKind,
    lenient: bool,
    format: OutputFormat,
) -> Result<CheckReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    check_text(&text, kind, lenient, format)
        .with_context(|| format!("failed to check {}", path.display()))
}

/// Check YAML text as record kind `kind`.
pub fn check_text(
    text: &str,
    kind: RecordKind,
    lenient: bool,
    format: OutputFormat,
) -> Result<CheckReport> {
    let doc: serde_yaml::Value = serde_yaml::from_str(text).context("document is not valid YAML")?;
    let mode = if lenient { ParseMode::BestEffort } else { ParseMode::Validated };
    let node = Node::new(&doc);
    let report = match kind {
        RecordKind::Person => check_as::<Person>(node, mode, format),
        RecordKind::User => check_as::<User>(node, mode, format),
        RecordKind::AppConfig => check_as::<AppConfig>(node, mode, format),
        RecordKind::DatabaseConfig => check_as::<DatabaseConfig>(node, mode, format),
        RecordKind::ServiceConfig => check_as::<ServiceConfig>(node, mode, format),
        RecordKind::LogEntry => check_as::<LogEntry>(node, mode, format),
    };
    Ok(report)
}

fn check_as<R: Record>(node: Node<'_>, mode: ParseMode, format: OutputFormat) -> CheckReport {
    let type_name = R::schema().type_name();
    match parse::<R>(node, mode) {
        ParseOutcome::BestEffort(record) | ParseOutcome::Validated(Ok(record)) => CheckReport {
            code: 0,
            output: render_record(&record, format),
        },
        ParseOutcome::Validated(Err(errors)) => {
            tracing::debug!(record = type_name, errors = errors.len(), "document rejected");
            CheckReport {
                code: 1,
                output: render_failure(type_name, &errors, format),
            }
        }
    }
}

fn render_record<R: Record>(record: &R, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render::to_text(record),
        OutputFormat::Json => format!("{}\n", render::to_json(record)),
        OutputFormat::Map => render::to_flat_map(record)
            .into_iter()
            .map(|(name, value)| format!("{name}={value}\n"))
            .collect(),
        OutputFormat::ErrorsJson => errors_json(R::schema().type_name(), &ValidationResult::new()),
    }
}

fn render_failure(type_name: &str, errors: &ValidationResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json | OutputFormat::ErrorsJson => errors_json(type_name, errors),
        OutputFormat::Text | OutputFormat::Map => {
            let noun = if errors.len() == 1 { "error" } else { "errors" };
            format!("invalid {type_name}: {} {noun}\n{errors}\n", errors.len())
        }
    }
}

fn errors_json(type_name: &str, errors: &ValidationResult) -> String {
    let report = json!({
        "record": type_name,
        "valid": errors.is_valid(),
        "errors": errors.errors(),
    });
    format!("{report:#}\n")
}
