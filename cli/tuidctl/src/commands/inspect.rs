//! Inspect command.

use anyhow::Result;
use chrono::SecondsFormat;
use clap::Args;
use serde::Serialize;
use tuid::{Codec, Identifier};

use crate::error::CliError;
use crate::output::{print_output, print_single, FieldRow, OutputFormat};

use super::CommandContext;

/// Show the fields of an identifier.
#[derive(Debug, Args)]
pub struct InspectCommand {
    /// Identifier in standard or prefixed form.
    id: String,
}

#[derive(Debug, Serialize)]
struct IdView {
    standard: String,
    prefixed: Option<String>,
    type_code: u16,
    prefix: Option<String>,
    timestamp: String,
    timestamp_ms: u64,
}

impl IdView {
    fn new(codec: &Codec, id: &Identifier) -> Self {
        let prefix = codec.registry().prefix_for(id.type_code()).ok();
        Self {
            standard: id.to_standard(),
            prefixed: codec.to_prefixed(id).ok(),
            type_code: id.type_code(),
            prefix,
            timestamp: id.datetime().to_rfc3339_opts(SecondsFormat::Millis, true),
            timestamp_ms: id.timestamp_ms(),
        }
    }

    fn rows(&self) -> Vec<FieldRow> {
        let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        vec![
            FieldRow::new("Standard", self.standard.clone()),
            FieldRow::new("Prefixed", or_dash(&self.prefixed)),
            FieldRow::new("Type code", self.type_code.to_string()),
            FieldRow::new("Prefix", or_dash(&self.prefix)),
            FieldRow::new("Timestamp", self.timestamp.clone()),
            FieldRow::new("Timestamp (ms)", self.timestamp_ms.to_string()),
        ]
    }
}

impl InspectCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let id = ctx.codec.parse(self.id.trim()).map_err(CliError::Id)?;
        let view = IdView::new(&ctx.codec, &id);

        match ctx.format {
            OutputFormat::Json => print_single(&view),
            OutputFormat::Table => print_output(&view.rows(), ctx.format),
        }

        Ok(())
    }
}
