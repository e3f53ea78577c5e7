//! # Schema Subcommand
//!
//! Print the field descriptors of a demo record kind as a table or JSON.

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::records::RecordKind;

/// Arguments for the schema subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Record kind to describe.
    #[arg(long, value_enum)]
    pub record: RecordKind,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    print!("{}", describe(args.record, args.json));
    Ok(0)
}

/// Render the descriptor list of `kind`.
pub fn describe(kind: RecordKind, as_json: bool) -> String {
    let fields = kind.describe();
    if as_json {
        let value = json!({ "record": kind.type_name(), "fields": fields });
        return format!("{value:#}\n");
    }

    let mut out = format!("{}\n", kind.type_name());
    for f in &fields {
        let line = format!(
            "  {:<16} {:<28} {:<9} {}",
            f.name,
            f.type_name,
            f.requirement.as_str(),
            f.description
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
