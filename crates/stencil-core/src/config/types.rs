//! Configuration types

use crate::error::{Error, Result};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Resolved stencil configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StencilConfig {
    /// Git executable used for cloning
    pub git: String,

    /// Marker file whose presence means a directory is already a project
    pub manifest: String,

    /// Package manager selection
    pub package_managers: PackageManagerConfig,
}

/// Package manager configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PackageManagerConfig {
    /// Manager used when the alternate one is unavailable
    pub default: String,

    /// Preferred manager, used whenever it is installed
    pub alternate: String,

    /// Flag passed to the alternate manager to enable its alternate resolution mode
    pub alternate_mode_flag: String,

    /// Minimum alternate manager version supporting the alternate mode
    pub alternate_mode_min_version: String,
}

impl Default for StencilConfig {
    fn default() -> Self {
        Self {
            git: "git".to_string(),
            manifest: "package.json".to_string(),
            package_managers: PackageManagerConfig::default(),
        }
    }
}

impl Default for PackageManagerConfig {
    fn default() -> Self {
        Self {
            default: "npm".to_string(),
            alternate: "yarn".to_string(),
            alternate_mode_flag: "--enable-pnp".to_string(),
            alternate_mode_min_version: "1.12.0".to_string(),
        }
    }
}

impl PackageManagerConfig {
    /// Parse the minimum alternate manager version
    pub fn min_alternate_version(&self) -> Result<Version> {
        Version::parse(self.alternate_mode_min_version.trim())
            .map_err(|_| Error::invalid_version(&self.alternate_mode_min_version))
    }
}

impl StencilConfig {
    /// Check that every field holds a usable value
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("git", &self.git),
            ("manifest", &self.manifest),
            ("package-managers.default", &self.package_managers.default),
            ("package-managers.alternate", &self.package_managers.alternate),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::invalid_config(format!("{} must not be empty", field)));
            }
        }

        if self.manifest.contains(['/', '\\']) {
            return Err(Error::invalid_config(format!(
                "manifest must be a file name, got: {}",
                self.manifest
            )));
        }

        self.package_managers.min_alternate_version()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(StencilConfig::default().validate().is_ok());
    }

    #[test]
    fn test_min_alternate_version() {
        let config = PackageManagerConfig::default();
        assert_eq!(
            config.min_alternate_version().unwrap(),
            Version::new(1, 12, 0)
        );
    }

    #[test]
    fn test_invalid_min_version_rejected() {
        let mut config = StencilConfig::default();
        config.package_managers.alternate_mode_min_version = "one.two".to_string();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidVersion { .. })
        ));
    }

    #[test]
    fn test_empty_manager_rejected() {
        let mut config = StencilConfig::default();
        config.package_managers.default = "  ".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_manifest_with_separator_rejected() {
        let mut config = StencilConfig::default();
        config.manifest = "nested/package.json".to_string();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_serializes_kebab_case() {
        let yaml = serde_yaml_ng::to_string(&StencilConfig::default()).unwrap();
        assert!(yaml.contains("package-managers:"));
        assert!(yaml.contains("alternate-mode-min-version:"));
    }
}
