//! Version command

use anyhow::Result;
use camino::Utf8Path;
use stencil_projects::SystemRunner;

use crate::cli::VersionArgs;
use crate::commands::load_config;
use crate::output;
use crate::version::{ToolRole, VersionInfo};

pub async fn run(args: VersionArgs, config: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config)?;
    let info = VersionInfo::build()
        .probe_tools(&SystemRunner::new(), &config)
        .await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", info.headline());
    if let Some(date) = &info.build_date {
        output::kv("Built", date);
    }

    output::header("Tools");
    for tool in &info.tools {
        let found = tool
            .version
            .as_ref()
            .map_or_else(|| "not found".to_string(), ToString::to_string);
        output::kv(
            &format!("{} ({})", tool.program, tool.role.label()),
            &found,
        );
    }

    let managers = &config.package_managers;
    let required = managers.min_alternate_version()?;
    if let Some(found) = info
        .tool(ToolRole::AlternateManager)
        .and_then(|tool| tool.version.as_ref())
    {
        if *found < required {
            output::warning(&format!(
                "{} {} is older than {}; {} will be ignored by create --pnp",
                managers.alternate, found, required, managers.alternate_mode_flag
            ));
        }
    }

    Ok(())
}
