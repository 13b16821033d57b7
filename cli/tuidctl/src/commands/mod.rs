//! CLI commands.

mod convert;
mod generate;
mod inspect;
mod types;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tuid::{Codec, Registry};

use crate::config::RegistryFile;
use crate::output::OutputFormat;

/// tuid CLI - Generate, convert, and inspect type-tagged identifiers.
#[derive(Debug, Parser)]
#[command(name = "tuid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Registry file listing type codes and prefixes.
    #[arg(long, global = true, env = "TUID_REGISTRY")]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate new identifiers.
    Generate(generate::GenerateCommand),

    /// Show the fields of an identifier.
    Inspect(inspect::InspectCommand),

    /// Convert between standard and prefixed forms.
    Convert(convert::ConvertCommand),

    /// List the registered types.
    Types(types::TypesCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let format = OutputFormat::from_flag(&self.format);

        let file = RegistryFile::load_or_default(self.registry.as_deref())?;
        let registry = match file.to_type_map()? {
            Some(map) => Registry::from_map(map),
            None => Registry::new(),
        };

        let ctx = CommandContext {
            codec: Codec::new(registry.into()),
            format,
        };

        match self.command {
            Commands::Generate(cmd) => cmd.run(ctx),
            Commands::Inspect(cmd) => cmd.run(ctx),
            Commands::Convert(cmd) => cmd.run(ctx),
            Commands::Types(cmd) => cmd.run(ctx),
            Commands::Version => {
                println!("tuid {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub codec: Codec,
    pub format: OutputFormat,
}
