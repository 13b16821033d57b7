//! Convert command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tuid::Codec;

use crate::error::CliError;
use crate::output::{print_single, OutputFormat};

use super::CommandContext;

/// Convert between standard and prefixed forms.
#[derive(Debug, Args)]
pub struct ConvertCommand {
    /// Identifier in standard or prefixed form.
    id: String,
}

#[derive(Debug, Serialize)]
struct Conversion {
    input: String,
    output: String,
}

impl ConvertCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let input = self.id.trim();
        let output = convert(&ctx.codec, input)?;

        match ctx.format {
            OutputFormat::Json => print_single(&Conversion {
                input: input.to_string(),
                output,
            }),
            OutputFormat::Table => println!("{}", output),
        }

        Ok(())
    }
}

/// Standard input converts to prefixed, prefixed input to standard.
fn convert(codec: &Codec, input: &str) -> Result<String> {
    let id = codec.parse(input).map_err(CliError::Id)?;
    let standard = id.to_standard();

    if input.eq_ignore_ascii_case(&standard) {
        Ok(codec.to_prefixed(&id).map_err(CliError::Id)?)
    } else {
        Ok(standard)
    }
}
