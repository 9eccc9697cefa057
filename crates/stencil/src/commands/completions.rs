//! Shell completions generation

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{generate, generate_to};
use std::io;

use crate::cli::{Cli, CompletionsArgs};
use crate::output;

const BIN_NAME: &str = "stencil";

/// Print completions, or write them into `--output` when given
pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();

    let Some(dir) = args.output else {
        generate(args.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        return Ok(());
    };

    std::fs::create_dir_all(&dir).with_context(|| format!("Failed to create {}", dir))?;
    let path = generate_to(args.shell, &mut cmd, BIN_NAME, dir.as_str())
        .with_context(|| format!("Failed to write {} completions to {}", args.shell, dir))?;
    output::success(&format!("Wrote {}", path.display()));
    Ok(())
}
