//! # stencil-projects
//!
//! Project scaffolding library for the stencil CLI providing:
//! - Template source classification (hosted git repositories vs local directories)
//! - Cloning hosted templates and copying local ones
//! - Package manager selection and dependency installation
//!
//! # Examples
//!
//! ## Create a project from a GitHub template
//!
//! ```no_run
//! use stencil_core::StencilConfig;
//! use stencil_projects::{CreateOptions, Scaffolder, SystemRunner};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scaffolder = Scaffolder::new(SystemRunner::new(), StencilConfig::default());
//! let options = CreateOptions {
//!     root_path: Some("my-app".into()),
//!     use_alternate_mode: true,
//!     ..Default::default()
//! };
//! let report = scaffolder.create("acme/starter#v2", &options).await?;
//! println!("created {}", report.target);
//! # Ok(())
//! # }
//! ```

pub mod clone;
pub mod copy;
pub mod error;
pub mod install;
pub mod package_manager;
pub mod runner;
pub mod scaffold;
pub mod source;
pub mod types;
pub mod workdir;

pub use error::{Error, ErrorKind, Result};
pub use package_manager::{InstallPlan, ManagerChoice, PackageManagerSelector};
pub use runner::{CommandOutcome, CommandRunner, CommandSpec, SystemRunner};
pub use scaffold::Scaffolder;
pub use source::{GitHost, HostedGitSource, Representation, TemplateSource, Transport};
pub use types::{CreateOptions, CreateReport};
pub use workdir::WorkingDirGuard;
