//! Create command

use anyhow::{Context, Result};
use camino::Utf8Path;
use stencil_projects::{CreateOptions, CreateReport, Scaffolder, SystemRunner, TemplateSource};
use tracing::debug;

use crate::cli::CreateArgs;
use crate::commands::load_config;
use crate::output;

pub async fn run(args: CreateArgs, config: Option<&Utf8Path>) -> Result<()> {
    let config = load_config(config)?;
    debug!("Resolved configuration: {:?}", config);

    let source = TemplateSource::classify(&args.source);
    output::header("Creating project");
    output::kv("Template", &source.to_string());
    output::kv(
        "Directory",
        args.path.as_ref().map_or(".", |path| path.as_str()),
    );

    let options = CreateOptions {
        root_path: args.path,
        use_alternate_mode: args.pnp,
        skip_install: args.skip_install,
    };

    let scaffolder = Scaffolder::new(SystemRunner::new(), config);
    let report = scaffolder
        .create(&args.source, &options)
        .await
        .with_context(|| format!("Failed to create project from {}", args.source))?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &CreateReport) {
    if let Some(shortfall) = report.plan.as_ref().and_then(|plan| plan.shortfall()) {
        output::warning(&shortfall.to_string());
    }

    if let Some(stats) = report.copied {
        output::info(&format!(
            "Copied {} files and {} directories",
            stats.files, stats.dirs
        ));
    }

    output::success(&format!("Project created in {}", report.target));

    match &report.install {
        Some(install) => {
            output::kv("Installed with", &install.command);
            output::kv("Took", &format!("{:.1}s", install.elapsed.as_secs_f64()));
        }
        None => output::info("Dependency installation skipped"),
    }

    println!();
    output::info("Next steps:");
    println!("  cd {}", report.target);
}
