//! Package manager selection
//!
//! The alternate manager (yarn by default) is preferred whenever it is
//! installed. Its alternate resolution mode (Plug'n'Play) is only enabled when
//! requested and when the installed version is recent enough.

use crate::error::Result;
use crate::runner::{CommandRunner, CommandSpec};
use semver::Version;
use serde::Serialize;
use std::fmt;
use stencil_core::PackageManagerConfig;
use tracing::{debug, info};

/// Which configured manager an install uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagerChoice {
    Alternate,
    Default,
}

/// Installed alternate manager is older than the alternate mode requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionShortfall {
    pub manager: String,
    pub found: Version,
    pub required: Version,
}

impl fmt::Display for VersionShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} is installed, but {} or newer is required for the requested install mode; continuing without it",
            self.manager, self.found, self.required
        )
    }
}

/// A resolved install invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    choice: ManagerChoice,
    program: String,
    mode_flag: Option<String>,
    shortfall: Option<VersionShortfall>,
}

impl InstallPlan {
    /// Plan using the default manager
    pub fn default_manager(program: impl Into<String>) -> Self {
        Self {
            choice: ManagerChoice::Default,
            program: program.into(),
            mode_flag: None,
            shortfall: None,
        }
    }

    /// Plan using the alternate manager, optionally with its mode flag
    pub fn alternate_manager(program: impl Into<String>, mode_flag: Option<String>) -> Self {
        Self {
            choice: ManagerChoice::Alternate,
            program: program.into(),
            mode_flag,
            shortfall: None,
        }
    }

    pub fn choice(&self) -> ManagerChoice {
        self.choice
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether the alternate resolution mode will be used
    pub fn alternate_mode(&self) -> bool {
        self.mode_flag.is_some()
    }

    /// Set when the alternate mode was requested but the manager was too old
    pub fn shortfall(&self) -> Option<&VersionShortfall> {
        self.shortfall.as_ref()
    }

    /// The install command line
    pub fn command(&self) -> CommandSpec {
        let cmd = CommandSpec::new(&self.program).arg("install");
        match &self.mode_flag {
            Some(flag) => cmd.arg(flag),
            None => cmd,
        }
    }
}

/// Chooses the package manager for an install
pub struct PackageManagerSelector<'a, R: CommandRunner> {
    runner: &'a R,
    config: &'a PackageManagerConfig,
}

impl<'a, R: CommandRunner> PackageManagerSelector<'a, R> {
    pub fn new(runner: &'a R, config: &'a PackageManagerConfig) -> Self {
        Self { runner, config }
    }

    /// Resolve the install plan
    ///
    /// The alternate mode is dropped whenever the alternate manager is absent,
    /// whatever `use_alternate_mode` says.
    pub async fn select(&self, use_alternate_mode: bool) -> Result<InstallPlan> {
        if !self.alternate_available().await {
            debug!(
                "{} not available, using {}",
                self.config.alternate, self.config.default
            );
            return Ok(InstallPlan::default_manager(&self.config.default));
        }

        if !use_alternate_mode {
            return Ok(InstallPlan::alternate_manager(&self.config.alternate, None));
        }

        let required = self.config.min_alternate_version()?;
        let Some(found) = self.alternate_version().await else {
            debug!(
                "Could not determine {} version, disabling alternate install mode",
                self.config.alternate
            );
            return Ok(InstallPlan::alternate_manager(&self.config.alternate, None));
        };

        if found < required {
            let shortfall = VersionShortfall {
                manager: self.config.alternate.clone(),
                found,
                required,
            };
            debug!("{}", shortfall);
            let mut plan = InstallPlan::alternate_manager(&self.config.alternate, None);
            plan.shortfall = Some(shortfall);
            return Ok(plan);
        }

        info!(
            "Using {} {} with {}",
            self.config.alternate, found, self.config.alternate_mode_flag
        );
        Ok(InstallPlan::alternate_manager(
            &self.config.alternate,
            Some(self.config.alternate_mode_flag.clone()),
        ))
    }

    fn version_command(&self) -> CommandSpec {
        CommandSpec::new(&self.config.alternate).arg("--version")
    }

    /// Presence probe: the version command exits successfully
    async fn alternate_available(&self) -> bool {
        match self.runner.probe(&self.version_command()).await {
            Ok(outcome) => outcome.is_success(),
            Err(e) => {
                debug!("{} probe failed: {}", self.config.alternate, e);
                false
            }
        }
    }

    async fn alternate_version(&self) -> Option<Version> {
        let outcome = self.runner.probe(&self.version_command()).await.ok()?;
        if !outcome.is_success() {
            return None;
        }
        parse_reported_version(&outcome.stdout)
    }
}

/// Parse a `--version` report, dropping any pre-release or build suffix
///
/// `1.22.19`, `v1.22.19`, `4.0.0-rc.42` and `1.13.0+git` are all accepted;
/// a missing patch component counts as zero.
pub fn parse_reported_version(reported: &str) -> Option<Version> {
    let line = reported.lines().map(str::trim).find(|l| !l.is_empty())?;
    let line = line.strip_prefix('v').unwrap_or(line);
    let core = line.split(['-', '+']).next()?;

    let mut parts = core.split('.').map(|p| p.parse::<u64>());
    let major = parts.next()?.ok()?;
    let minor = parts.next().unwrap_or(Ok(0)).ok()?;
    let patch = parts.next().unwrap_or(Ok(0)).ok()?;
    if parts.next().is_some() {
        return None;
    }

    Some(Version::new(major, minor, patch))
}
