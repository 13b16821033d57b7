//! Generate command.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::{debug, warn};
use tuid::{Codec, IdError, Identifier, TypeRef};

use crate::error::CliError;
use crate::output::{print_output, OutputFormat};

use super::CommandContext;

/// Generate new identifiers.
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Type code (0-2047) or registered prefix.
    #[arg(value_name = "TYPE")]
    type_arg: String,

    /// Timestamp to embed (RFC 3339). Defaults to now.
    #[arg(long)]
    at: Option<String>,

    /// Number of identifiers to generate.
    #[arg(long, default_value = "1")]
    count: usize,

    /// Print the standard hyphenated form instead of the prefixed form.
    #[arg(long)]
    standard: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct GeneratedRow {
    #[tabled(rename = "Standard")]
    standard: String,

    #[tabled(rename = "Prefixed", display = "display_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    prefixed: Option<String>,
}

fn display_option(opt: &Option<String>) -> String {
    opt.as_deref().unwrap_or("-").to_string()
}

impl GenerateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let at = self.at.as_deref().map(parse_timestamp).transpose()?;
        let ty = type_ref(&self.type_arg);
        debug!(type_ref = ?ty, count = self.count, "Generating identifiers");

        let rows = (0..self.count)
            .map(|_| generate_row(&ctx.codec, ty, at, self.standard))
            .collect::<Result<Vec<_>>>()?;

        match ctx.format {
            OutputFormat::Json => print_output(&rows, ctx.format),
            OutputFormat::Table => {
                for row in &rows {
                    println!("{}", row.prefixed.as_deref().unwrap_or(&row.standard));
                }
            }
        }

        Ok(())
    }
}

/// Numeric arguments are codes; anything else is a prefix.
fn type_ref(arg: &str) -> TypeRef<'_> {
    match arg.parse::<i64>() {
        Ok(code) => TypeRef::Code(code),
        Err(_) => TypeRef::Prefix(arg),
    }
}

fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            CliError::InvalidTimestamp {
                input: input.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
}

fn generate_row(
    codec: &Codec,
    ty: TypeRef<'_>,
    at: Option<DateTime<Utc>>,
    standard_only: bool,
) -> Result<GeneratedRow> {
    let id = match at {
        Some(at) => codec.generate_at(ty, at),
        None => codec.generate(ty),
    }
    .context("Failed to generate identifier")?;

    let prefixed = if standard_only {
        None
    } else {
        prefixed_or_fallback(codec, &id, ty)?
    };

    Ok(GeneratedRow {
        standard: id.to_standard(),
        prefixed,
    })
}

/// A numeric code without a registered prefix falls back to the standard form.
fn prefixed_or_fallback(codec: &Codec, id: &Identifier, ty: TypeRef<'_>) -> Result<Option<String>> {
    match codec.to_prefixed(id) {
        Ok(text) => Ok(Some(text)),
        Err(IdError::UndefinedType(code)) if matches!(ty, TypeRef::Code(_)) => {
            warn!(code, "No prefix registered, printing standard form");
            Ok(None)
        }
        Err(e) => Err(CliError::Id(e).into()),
    }
}
