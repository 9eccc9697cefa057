//! Cloning a hosted template repository

use crate::error::Result;
use crate::runner::{CommandRunner, CommandSpec};
use crate::source::HostedGitSource;
use camino::Utf8Path;
use std::io::ErrorKind;
use tracing::{debug, info};

/// Build `git clone [--branch <ref>] <url> <target>`
pub fn clone_command(git: &str, source: &HostedGitSource, target: &Utf8Path) -> CommandSpec {
    let mut cmd = CommandSpec::new(git).arg("clone");

    if let Some(committish) = source.committish() {
        cmd = cmd.args(["--branch", committish]);
    }

    cmd.arg(source.clone_url()).arg(target.as_str())
}

/// Clone `source` into `target` and strip its git metadata
///
/// A clone that fails part way is not rolled back.
pub async fn clone_template<R: CommandRunner>(
    runner: &R,
    git: &str,
    source: &HostedGitSource,
    target: &Utf8Path,
) -> Result<()> {
    info!("Cloning {} -> {}", source.clone_url(), target);

    let cmd = clone_command(git, source, target);
    runner.run(&cmd).await?.check(&cmd)?;

    remove_git_metadata(target).await?;
    info!("Repository cloned successfully");
    Ok(())
}

/// Remove `<target>/.git`; a missing directory is fine
async fn remove_git_metadata(target: &Utf8Path) -> Result<()> {
    let git_dir = target.join(".git");
    match tokio::fs::remove_dir_all(&git_dir).await {
        Ok(()) => {
            debug!("Removed {}", git_dir);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TemplateSource;

    fn hosted(input: &str) -> HostedGitSource {
        TemplateSource::classify(input)
            .as_hosted()
            .cloned()
            .expect("hosted source")
    }

    #[test]
    fn test_clone_command_without_ref() {
        let cmd = clone_command("git", &hosted("acme/starter"), Utf8Path::new("my-app"));
        assert_eq!(
            cmd.to_string(),
            "git clone https://github.com/acme/starter.git my-app"
        );
    }

    #[test]
    fn test_clone_command_with_ref() {
        let cmd = clone_command(
            "/usr/bin/git",
            &hosted("git@github.com:acme/starter.git#release-2"),
            Utf8Path::new("/work/my-app"),
        );
        assert_eq!(cmd.program(), "/usr/bin/git");
        assert_eq!(
            cmd.get_args(),
            [
                "clone",
                "--branch",
                "release-2",
                "git@github.com:acme/starter.git",
                "/work/my-app"
            ]
        );
    }

    #[tokio::test]
    async fn test_remove_git_metadata_missing_is_ok() {
        let temp = tempfile::TempDir::new().unwrap();
        let target = camino::Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        assert!(remove_git_metadata(&target).await.is_ok());
    }
}
