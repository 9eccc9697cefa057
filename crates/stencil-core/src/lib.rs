//! # stencil-core
//!
//! Core library for the stencil CLI providing:
//! - Hierarchical configuration loading (embedded defaults, config file, environment)
//! - Shared error types

pub mod config;
pub mod error;
pub mod utils;

pub use config::{ConfigLoader, PackageManagerConfig, StencilConfig};
pub use error::{Error, Result};
pub use utils::get_home_dir;
