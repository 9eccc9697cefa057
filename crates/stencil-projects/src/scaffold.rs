//! Project creation entry point
//!
//! Validates the target, classifies the template source, then clones or
//! copies it and installs dependencies.

use crate::clone::clone_template;
use crate::copy::copy_template;
use crate::error::{Error, Result};
use crate::install::install;
use crate::package_manager::PackageManagerSelector;
use crate::runner::CommandRunner;
use crate::source::TemplateSource;
use crate::types::{CreateOptions, CreateReport};
use camino::{Utf8Path, Utf8PathBuf};
use stencil_core::StencilConfig;
use tracing::info;
use url::Url;

/// Creates projects from templates
pub struct Scaffolder<R: CommandRunner> {
    runner: R,
    config: StencilConfig,
}

impl<R: CommandRunner> Scaffolder<R> {
    pub fn new(runner: R, config: StencilConfig) -> Self {
        Self { runner, config }
    }

    pub fn config(&self) -> &StencilConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Create a project from `source`
    ///
    /// # Errors
    /// Returns error if:
    /// - The target path is a URL
    /// - The target already contains the manifest file
    /// - A local source is missing, not a directory, or is `.`
    /// - git or the package manager exits unsuccessfully
    pub async fn create(&self, source: &str, options: &CreateOptions) -> Result<CreateReport> {
        let target = self.resolve_target(options.root_path.as_deref())?;
        self.ensure_not_project(&target)?;

        let source = TemplateSource::classify(source);
        info!("Creating project in {} from {} template", target, source.kind());

        let copied = match &source {
            TemplateSource::Hosted(hosted) => {
                clone_template(&self.runner, &self.config.git, hosted, &target).await?;
                None
            }
            TemplateSource::Local(path) => Some(copy_template(path, &target).await?),
        };

        if options.skip_install {
            info!("Skipping dependency installation");
            return Ok(CreateReport {
                target,
                source,
                copied,
                plan: None,
                install: None,
            });
        }

        let plan = PackageManagerSelector::new(&self.runner, &self.config.package_managers)
            .select(options.use_alternate_mode)
            .await?;
        let report = install(&self.runner, &target, &plan).await?;

        Ok(CreateReport {
            target,
            source,
            copied,
            plan: Some(plan),
            install: Some(report),
        })
    }

    fn resolve_target(&self, root_path: Option<&Utf8Path>) -> Result<Utf8PathBuf> {
        match root_path {
            Some(path) if is_absolute_url(path.as_str()) => Err(Error::target_is_url(path.as_str())),
            Some(path) => Ok(path.to_path_buf()),
            None => {
                let cwd = std::env::current_dir()?;
                Utf8PathBuf::from_path_buf(cwd)
                    .map_err(|p| Error::invalid_path(p.display().to_string()))
            }
        }
    }

    fn ensure_not_project(&self, target: &Utf8Path) -> Result<()> {
        if target.join(&self.config.manifest).exists() {
            return Err(Error::project_exists(target.as_str(), &self.config.manifest));
        }
        Ok(())
    }
}

/// Whether `target` parses as an absolute URL
///
/// Single-letter schemes are Windows drive letters (`C:\work`), not URLs.
/// The scheme must be followed by `/`, so directory names containing a colon
/// (`app:v2`) stay paths.
pub fn is_absolute_url(target: &str) -> bool {
    let Ok(url) = Url::parse(target) else {
        return false;
    };
    let scheme_len = url.scheme().len();
    scheme_len > 1
        && target
            .get(scheme_len + 1..)
            .is_some_and(|rest| rest.starts_with('/'))
}
