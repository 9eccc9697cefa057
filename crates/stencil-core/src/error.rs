//! Error types for stencil-core

use thiserror::Error;

/// Result type alias using stencil-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for stencil
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid semver version
    #[error("Invalid version format: {version}")]
    InvalidVersion { version: String },

    /// Home directory could not be resolved
    #[error("Could not determine home directory")]
    HomeNotFound,
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_errors_convert() {
        let err: Error = serde_yaml_ng::from_str::<serde_yaml_ng::Value>("a: [1, 2")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_invalid_version_message() {
        let err = Error::invalid_version("latest");
        assert_eq!(err.to_string(), "Invalid version format: latest");
    }
}
