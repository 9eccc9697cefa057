//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. Config file (~/.stencil/config.yaml, or an explicit --config path)
//! 3. Environment variables (STENCIL_* prefix)
//! 4. CLI flags (handled by caller)

use super::types::StencilConfig;
use crate::error::{Error, Result};
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde_yaml_ng::Value;
use std::env;
use std::fs;
use tracing::debug;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

const DEFAULTS_FILE: &str = "defaults.yaml";

/// Environment variable overrides, applied in order
const ENV_OVERRIDES: &[(&str, &[&str])] = &[
    ("STENCIL_GIT", &["git"]),
    ("STENCIL_MANIFEST", &["manifest"]),
    ("STENCIL_DEFAULT_MANAGER", &["package-managers", "default"]),
    ("STENCIL_ALTERNATE_MANAGER", &["package-managers", "alternate"]),
    (
        "STENCIL_MIN_PNP_VERSION",
        &["package-managers", "alternate-mode-min-version"],
    ),
];

/// Configuration hierarchy loader
pub struct ConfigLoader {
    /// Config file layered over the embedded defaults
    config_file: Utf8PathBuf,

    /// Whether a missing config file is an error
    required: bool,
}

impl ConfigLoader {
    /// Create a loader reading the global config file (~/.stencil/config.yaml)
    pub fn new() -> Result<Self> {
        let home = get_home_dir()?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|p| Error::invalid_config(format!("Home directory is not UTF-8: {:?}", p)))?;

        Ok(Self {
            config_file: home.join(".stencil").join("config.yaml"),
            required: false,
        })
    }

    /// Create a loader reading an explicit config file, which must exist
    pub fn with_file(config_file: impl Into<Utf8PathBuf>) -> Self {
        Self {
            config_file: config_file.into(),
            required: true,
        }
    }

    /// Path of the config file this loader layers over the defaults
    pub fn config_file(&self) -> &Utf8Path {
        &self.config_file
    }

    /// Load the configuration with hierarchical precedence
    pub fn load(&self) -> Result<StencilConfig> {
        let mut value = Self::load_embedded_defaults()?;

        if self.config_file.exists() {
            debug!("Loading config file: {}", self.config_file);
            let overlay = self.load_yaml_file(&self.config_file)?;
            merge_values(&mut value, overlay);
        } else if self.required {
            return Err(Error::config_not_found(self.config_file.as_str()));
        }

        apply_env_overrides(&mut value);

        let config: StencilConfig = serde_yaml_ng::from_value(value)
            .map_err(|e| Error::invalid_config(format!("Failed to resolve configuration: {}", e)))?;
        config.validate()?;

        Ok(config)
    }

    /// Load the embedded defaults file
    fn load_embedded_defaults() -> Result<Value> {
        let embedded_file = EmbeddedConfigs::get(DEFAULTS_FILE).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", DEFAULTS_FILE))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", DEFAULTS_FILE))
        })?;

        Ok(serde_yaml_ng::from_str(content)?)
    }

    /// Load a YAML file and parse it
    fn load_yaml_file(&self, path: &Utf8Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;

        match value {
            Value::Mapping(_) => Ok(value),
            // An empty file overrides nothing
            Value::Null => Ok(Value::Mapping(Default::default())),
            _ => Err(Error::invalid_config(format!(
                "{} must contain a YAML mapping",
                path
            ))),
        }
    }
}

/// Merge `overlay` into `base`, overlay values winning. Mappings merge key by key.
fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(base_value) => merge_values(base_value, overlay_value),
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Apply STENCIL_* environment variables onto the merged tree
fn apply_env_overrides(value: &mut Value) {
    for (var, path) in ENV_OVERRIDES {
        let Ok(raw) = env::var(var) else {
            continue;
        };
        if raw.trim().is_empty() {
            continue;
        }

        debug!("Applying {} override", var);
        let mut overlay = Value::String(raw);
        for key in path.iter().rev() {
            let mut map = serde_yaml_ng::Mapping::new();
            map.insert(Value::String((*key).to_string()), overlay);
            overlay = Value::Mapping(map);
        }
        merge_values(value, overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn temp_config_path(temp_dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp_dir.path().join("config.yaml")).expect("Invalid UTF-8 path")
    }

    fn clear_env() {
        for (var, _) in ENV_OVERRIDES {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_embedded_defaults_match_default_impl() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader {
            config_file: temp_config_path(&temp_dir),
            required: false,
        };

        let config = loader.load().unwrap();
        assert_eq!(config, StencilConfig::default());
    }

    #[test]
    #[serial]
    fn test_partial_file_overrides_only_named_keys() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_config_path(&temp_dir);
        fs::write(
            &path,
            r#"
package-managers:
  alternate: pnpm
  alternate-mode-min-version: 2.0.0
"#,
        )
        .unwrap();

        let config = ConfigLoader::with_file(path).load().unwrap();
        assert_eq!(config.package_managers.alternate, "pnpm");
        assert_eq!(config.package_managers.alternate_mode_min_version, "2.0.0");
        assert_eq!(config.package_managers.default, "npm");
        assert_eq!(config.manifest, "package.json");
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_error() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_file(temp_config_path(&temp_dir));

        assert!(matches!(loader.load(), Err(Error::ConfigNotFound { .. })));
    }

    #[test]
    #[serial]
    fn test_empty_file_keeps_defaults() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_config_path(&temp_dir);
        fs::write(&path, "").unwrap();

        let config = ConfigLoader::with_file(path).load().unwrap();
        assert_eq!(config, StencilConfig::default());
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_invalid_config() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_config_path(&temp_dir);
        fs::write(&path, "- just\n- a list\n").unwrap();

        assert!(matches!(
            ConfigLoader::with_file(path).load(),
            Err(Error::InvalidConfig { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_config_path(&temp_dir);
        fs::write(&path, "git: /usr/local/bin/git\n").unwrap();

        env::set_var("STENCIL_GIT", "/opt/git/bin/git");
        env::set_var("STENCIL_DEFAULT_MANAGER", "pnpm");
        env::set_var("STENCIL_MIN_PNP_VERSION", "1.20.0");

        let result = ConfigLoader::with_file(path).load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.git, "/opt/git/bin/git");
        assert_eq!(config.package_managers.default, "pnpm");
        assert_eq!(config.package_managers.alternate_mode_min_version, "1.20.0");
    }

    #[test]
    #[serial]
    fn test_env_invalid_version_rejected() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let loader = ConfigLoader {
            config_file: temp_config_path(&temp_dir),
            required: false,
        };

        env::set_var("STENCIL_MIN_PNP_VERSION", "latest");
        let result = loader.load();
        clear_env();

        assert!(matches!(result, Err(Error::InvalidVersion { .. })));
    }

    #[test]
    fn test_merge_values_nested() {
        let mut base: Value = serde_yaml_ng::from_str("a: 1\nb:\n  c: 2\n  d: 3\n").unwrap();
        let overlay: Value = serde_yaml_ng::from_str("b:\n  d: 4\ne: 5\n").unwrap();

        merge_values(&mut base, overlay);

        let expected: Value = serde_yaml_ng::from_str("a: 1\nb:\n  c: 2\n  d: 4\ne: 5\n").unwrap();
        assert_eq!(base, expected);
    }
}
