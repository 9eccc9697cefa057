//! Error types for stencil-projects

use thiserror::Error;

/// Result type alias using stencil-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category of a scaffolding failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected input (target or source)
    Validation,
    /// A child process failed or could not be started
    Process,
    /// Copy, mkdir or remove failure
    Filesystem,
    /// Configuration could not be resolved
    Config,
}

/// Scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Target path is a URL
    #[error("Target path must be a filesystem path, not a URL: {target}")]
    TargetIsUrl { target: String },

    /// Target already holds a project
    #[error("A project already exists at {path} ({manifest} found)")]
    ProjectExists { path: String, manifest: String },

    /// Local source does not exist
    #[error("Template source does not exist: {path}")]
    SourceNotFound { path: String },

    /// Local source is a file rather than a directory
    #[error("Template source is not a directory: {path}")]
    SourceNotDirectory { path: String },

    /// Target lies inside the template it would be copied from
    #[error("Cannot copy template {source_path} into its own subdirectory {target}")]
    TargetInsideSource { source_path: String, target: String },

    /// Local source is the current directory
    #[error("Cannot use the current directory (.) as a template source")]
    CurrentDirectorySource,

    /// Path is not valid UTF-8
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// Child process exited unsuccessfully
    #[error("Command failed ({status}): {command}")]
    ProcessFailed { command: String, status: String },

    /// Executable missing from PATH
    #[error("Required command not found: {command}")]
    CommandNotFound { command: String },

    /// Directory traversal error while copying
    #[error("Failed to walk template directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] stencil_core::Error),
}

impl Error {
    /// Create a target-is-URL error
    pub fn target_is_url(target: impl Into<String>) -> Self {
        Self::TargetIsUrl {
            target: target.into(),
        }
    }

    /// Create a project exists error
    pub fn project_exists(path: impl Into<String>, manifest: impl Into<String>) -> Self {
        Self::ProjectExists {
            path: path.into(),
            manifest: manifest.into(),
        }
    }

    /// Create a source not found error
    pub fn source_not_found(path: impl Into<String>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    /// Create a source not directory error
    pub fn source_not_directory(path: impl Into<String>) -> Self {
        Self::SourceNotDirectory { path: path.into() }
    }

    /// Create a target inside source error
    pub fn target_inside_source(source_path: impl Into<String>, target: impl Into<String>) -> Self {
        Self::TargetInsideSource {
            source_path: source_path.into(),
            target: target.into(),
        }
    }

    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create a process failed error
    pub fn process_failed(command: impl Into<String>, code: Option<i32>) -> Self {
        Self::ProcessFailed {
            command: command.into(),
            status: match code {
                Some(code) => format!("exit code {}", code),
                None => "terminated by signal".to_string(),
            },
        }
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TargetIsUrl { .. }
            | Self::ProjectExists { .. }
            | Self::SourceNotFound { .. }
            | Self::SourceNotDirectory { .. }
            | Self::TargetInsideSource { .. }
            | Self::CurrentDirectorySource
            | Self::InvalidPath { .. } => ErrorKind::Validation,
            Self::ProcessFailed { .. } | Self::CommandNotFound { .. } => ErrorKind::Process,
            Self::Walk(_) | Self::Io(_) => ErrorKind::Filesystem,
            Self::Core(_) => ErrorKind::Config,
        }
    }
}
