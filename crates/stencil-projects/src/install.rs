//! Dependency installation

use crate::error::Result;
use crate::package_manager::InstallPlan;
use crate::runner::CommandRunner;
use crate::workdir::WorkingDirGuard;
use camino::Utf8Path;
use std::time::{Duration, Instant};
use tracing::info;

/// Summary of a finished install
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Command line that was run
    pub command: String,
    /// Wall time spent in the package manager
    pub elapsed: Duration,
}

/// Run the planned install inside `target`
///
/// The process working directory is switched to `target` for the duration of
/// the install and restored afterwards, whether the install succeeds or not.
pub async fn install<R: CommandRunner>(
    runner: &R,
    target: &Utf8Path,
    plan: &InstallPlan,
) -> Result<InstallReport> {
    let _cwd = WorkingDirGuard::enter(target)?;

    let command = plan.command();
    info!("Installing dependencies with {} in {}", plan.program(), target);

    let started = Instant::now();
    runner.run(&command).await?.check(&command)?;
    let elapsed = started.elapsed();

    info!("Dependencies installed in {:.1}s", elapsed.as_secs_f64());

    Ok(InstallReport {
        command: command.to_string(),
        elapsed,
    })
}
