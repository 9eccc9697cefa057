//! Config command

use anyhow::Result;
use camino::Utf8Path;

use crate::cli::{ConfigCommands, ConfigShowArgs};
use crate::commands::config_loader;
use crate::output;

pub fn run(cmd: ConfigCommands, config: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => show(args, config),
    }
}

fn show(args: ConfigShowArgs, config: Option<&Utf8Path>) -> Result<()> {
    let loader = config_loader(config)?;
    let resolved = loader.load()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    output::header("Configuration");
    let source = if loader.config_file().exists() {
        loader.config_file().to_string()
    } else {
        format!("{} (not found, using defaults)", loader.config_file())
    };
    output::kv("File", &source);
    println!();
    print!("{}", serde_yaml_ng::to_string(&resolved)?);

    Ok(())
}
