//! Child process execution
//!
//! Every external tool (git, npm, yarn) is started through a [`CommandRunner`],
//! so the scaffolding flow can be driven by a fake runner in tests.

use crate::error::{Error, Result};
use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// A command line to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    current_dir: Option<Utf8PathBuf>,
}

impl CommandSpec {
    /// Create a command for `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run in `dir` instead of the process working directory
    pub fn current_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_current_dir(&self) -> Option<&Utf8Path> {
        self.current_dir.as_deref()
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of a finished child process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    /// Captured stdout (always empty for inherited-stream runs)
    pub stdout: String,
}

impl CommandOutcome {
    /// A successful outcome with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
        }
    }

    /// A failed outcome with the given exit code
    pub fn failure(code: i32) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn an unsuccessful outcome into a [`Error::ProcessFailed`]
    pub fn check(self, spec: &CommandSpec) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::process_failed(spec.to_string(), self.code))
        }
    }

    fn from_status(status: ExitStatus, stdout: String) -> Self {
        Self {
            code: status.code(),
            stdout,
        }
    }
}

/// Executes external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run with stdin, stdout and stderr connected to the terminal
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome>;

    /// Run with stdout captured and stderr discarded
    async fn probe(&self, spec: &CommandSpec) -> Result<CommandOutcome>;
}

#[async_trait]
impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        (**self).run(spec).await
    }

    async fn probe(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        (**self).probe(spec).await
    }
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(spec: &CommandSpec) -> Result<Command> {
        // Resolve through PATH (and PATHEXT on Windows, where npm is npm.cmd)
        let program = which::which(spec.program())
            .map_err(|_| Error::command_not_found(spec.program()))?;

        let mut cmd = Command::new(program);
        cmd.args(spec.get_args());
        if let Some(dir) = spec.get_current_dir() {
            cmd.current_dir(dir);
        }
        Ok(cmd)
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        debug!("Running: {}", spec);

        let status = Self::command(spec)?
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        Ok(CommandOutcome::from_status(status, String::new()))
    }

    async fn probe(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        debug!("Probing: {}", spec);

        let output = Self::command(spec)?
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        Ok(CommandOutcome::from_status(output.status, stdout))
    }
}
