//! Types command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tuid::TypeMap;

use crate::output::print_output;

use super::CommandContext;

/// List the registered types.
#[derive(Debug, Args)]
pub struct TypesCommand {}

#[derive(Debug, Serialize, Tabled)]
struct TypeRow {
    #[tabled(rename = "Code")]
    code: u16,

    #[tabled(rename = "Prefix")]
    prefix: String,
}

fn type_rows(map: &TypeMap) -> Vec<TypeRow> {
    map.iter()
        .map(|(code, prefix)| TypeRow {
            code,
            prefix: prefix.to_string(),
        })
        .collect()
}

impl TypesCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let rows = type_rows(&ctx.codec.registry().snapshot());
        print_output(&rows, ctx.format);
        Ok(())
    }
}
