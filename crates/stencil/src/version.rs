//! Build metadata and the versions of the tools `create` drives

use serde::{Deserialize, Serialize};
use stencil_core::StencilConfig;
use stencil_projects::package_manager::parse_reported_version;
use stencil_projects::{CommandRunner, CommandSpec};

/// Part a tool plays when creating a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolRole {
    Git,
    DefaultManager,
    AlternateManager,
}

impl ToolRole {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Git => "clone",
            Self::DefaultManager => "default install",
            Self::AlternateManager => "preferred install",
        }
    }
}

/// A configured tool and the version it reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolVersion {
    pub role: ToolRole,
    pub program: String,
    /// `None` when the program is missing or its report could not be parsed
    pub version: Option<semver::Version>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub commit: Option<String>,
    pub build_date: Option<String>,
    pub target: Option<String>,
    #[serde(default)]
    pub tools: Vec<ToolVersion>,
}

impl VersionInfo {
    /// Metadata stamped in by `build.rs`; no tools probed yet
    pub fn build() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: option_env!("GIT_SHA").map(String::from),
            build_date: option_env!("BUILD_DATE").map(String::from),
            target: option_env!("TARGET").map(String::from),
            tools: Vec::new(),
        }
    }

    /// Ask git and both configured package managers for `--version`
    pub async fn probe_tools<R: CommandRunner>(mut self, runner: &R, config: &StencilConfig) -> Self {
        let managers = &config.package_managers;
        let tools = [
            (ToolRole::Git, &config.git),
            (ToolRole::DefaultManager, &managers.default),
            (ToolRole::AlternateManager, &managers.alternate),
        ];

        for (role, program) in tools {
            self.tools.push(ToolVersion {
                role,
                program: program.clone(),
                version: probe_version(runner, program).await,
            });
        }
        self
    }

    pub fn tool(&self, role: ToolRole) -> Option<&ToolVersion> {
        self.tools.iter().find(|tool| tool.role == role)
    }

    /// `stencil 0.3.0 (abc1234, x86_64-unknown-linux-gnu)`
    pub fn headline(&self) -> String {
        let build: Vec<&str> = [self.commit.as_deref(), self.target.as_deref()]
            .into_iter()
            .flatten()
            .collect();

        if build.is_empty() {
            format!("stencil {}", self.version)
        } else {
            format!("stencil {} ({})", self.version, build.join(", "))
        }
    }
}

/// First token of the `--version` report that reads as a version
///
/// git answers `git version 2.43.0`, package managers answer `10.2.4`.
async fn probe_version<R: CommandRunner>(runner: &R, program: &str) -> Option<semver::Version> {
    let spec = CommandSpec::new(program).arg("--version");
    let outcome = runner.probe(&spec).await.ok()?;
    if !outcome.is_success() {
        return None;
    }
    outcome
        .stdout
        .split_whitespace()
        .find_map(parse_reported_version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use semver::Version;
    use stencil_projects::{CommandOutcome, Error, Result};

    /// Answers `--version` from a fixed table; unknown programs are missing
    struct VersionTable(Vec<(&'static str, &'static str)>);

    #[async_trait]
    impl CommandRunner for VersionTable {
        async fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
            self.probe(spec).await
        }

        async fn probe(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
            self.0
                .iter()
                .find(|(program, _)| *program == spec.program())
                .map(|(_, report)| CommandOutcome::success(*report))
                .ok_or_else(|| Error::command_not_found(spec.program()))
        }
    }

    fn bare(version: &str) -> VersionInfo {
        VersionInfo {
            version: version.to_string(),
            commit: None,
            build_date: None,
            target: None,
            tools: Vec::new(),
        }
    }

    #[test]
    fn test_build_version_is_valid_semver() {
        let info = VersionInfo::build();
        assert!(
            Version::parse(&info.version).is_ok(),
            "version should be valid semver, got: {}",
            info.version
        );
        assert!(info.tools.is_empty());
    }

    #[test]
    fn test_headline() {
        assert_eq!(bare("0.1.0").headline(), "stencil 0.1.0");

        let info = VersionInfo {
            commit: Some("abc1234".to_string()),
            target: Some("x86_64-unknown-linux-gnu".to_string()),
            ..bare("1.2.3")
        };
        assert_eq!(
            info.headline(),
            "stencil 1.2.3 (abc1234, x86_64-unknown-linux-gnu)"
        );
    }

    #[tokio::test]
    async fn test_probe_tools_uses_configured_programs() {
        let runner = VersionTable(vec![
            ("git", "git version 2.43.0\n"),
            ("npm", "10.2.4\n"),
        ]);

        let info = bare("0.1.0")
            .probe_tools(&runner, &StencilConfig::default())
            .await;

        assert_eq!(info.tools.len(), 3);
        let git = info.tool(ToolRole::Git).unwrap();
        assert_eq!(git.version, Some(Version::new(2, 43, 0)));
        let npm = info.tool(ToolRole::DefaultManager).unwrap();
        assert_eq!(npm.program, "npm");
        assert_eq!(npm.version, Some(Version::new(10, 2, 4)));
        let yarn = info.tool(ToolRole::AlternateManager).unwrap();
        assert_eq!(yarn.program, "yarn");
        assert_eq!(yarn.version, None);
    }

    #[tokio::test]
    async fn test_unparsable_report_has_no_version() {
        let runner = VersionTable(vec![("yarn", "unknown build\n")]);
        let info = bare("0.1.0")
            .probe_tools(&runner, &StencilConfig::default())
            .await;

        assert_eq!(info.tool(ToolRole::AlternateManager).unwrap().version, None);
    }

    #[test]
    fn test_json_shape() {
        let info = VersionInfo {
            tools: vec![ToolVersion {
                role: ToolRole::AlternateManager,
                program: "yarn".to_string(),
                version: Some(Version::new(1, 22, 19)),
            }],
            ..bare("0.3.0")
        };
        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(value["tools"][0]["role"], "alternate-manager");
        assert_eq!(value["tools"][0]["version"], "1.22.19");
    }
}
