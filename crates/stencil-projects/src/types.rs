//! Core types for project scaffolding

use crate::copy::CopyStats;
use crate::install::InstallReport;
use crate::package_manager::InstallPlan;
use crate::source::TemplateSource;
use camino::Utf8PathBuf;

/// Options for [`Scaffolder::create`](crate::Scaffolder::create)
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Where the project is created; the current directory when `None`
    pub root_path: Option<Utf8PathBuf>,
    /// Request the alternate manager's alternate resolution mode (yarn PnP)
    pub use_alternate_mode: bool,
    /// Stop after cloning or copying
    pub skip_install: bool,
}

/// Outcome of a successful create
#[derive(Debug, Clone)]
pub struct CreateReport {
    /// Directory the project was created in
    pub target: Utf8PathBuf,
    /// Classified template source
    pub source: TemplateSource,
    /// Copy statistics, for local templates
    pub copied: Option<CopyStats>,
    /// Resolved install plan, unless the install was skipped
    pub plan: Option<InstallPlan>,
    /// Install summary, unless the install was skipped
    pub install: Option<InstallReport>,
}
