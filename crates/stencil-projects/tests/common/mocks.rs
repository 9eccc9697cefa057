//! Mock implementations for testing
//!
//! [`FakeRunner`] stands in for real child processes. It records every
//! invocation (with the working directory at the time of the call) and
//! answers from pre-configured responses keyed by command-line prefix.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use stencil_projects::{CommandOutcome, CommandRunner, CommandSpec, Error, Result};

/// How a command was started
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvocationMode {
    Run,
    Probe,
}

/// Record of a command invocation
#[derive(Clone, Debug)]
pub struct Invocation {
    pub mode: InvocationMode,
    pub command: String,
    pub cwd: PathBuf,
}

type Hook = Arc<dyn Fn(&CommandSpec) -> CommandOutcome + Send + Sync>;

enum Response {
    Outcome(Hook),
    Missing,
}

/// Fake command runner for testing
pub struct FakeRunner {
    /// (command-line prefix, response), first match wins
    responses: Mutex<Vec<(String, Response)>>,
    /// Recorded command invocations
    invocations: Mutex<Vec<Invocation>>,
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeRunner {
    /// Runner where every command succeeds with empty output
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Answer commands starting with `prefix` by calling `hook`
    pub fn on<F>(self, prefix: &str, hook: F) -> Self
    where
        F: Fn(&CommandSpec) -> CommandOutcome + Send + Sync + 'static,
    {
        self.responses
            .lock()
            .unwrap()
            .push((prefix.to_string(), Response::Outcome(Arc::new(hook))));
        self
    }

    /// Answer commands starting with `prefix` with a fixed outcome
    pub fn respond(self, prefix: &str, outcome: CommandOutcome) -> Self {
        self.on(prefix, move |_| outcome.clone())
    }

    /// Treat `program` as not installed
    pub fn missing(self, program: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push((program.to_string(), Response::Missing));
        self
    }

    /// Get all recorded invocations
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }

    /// Command lines of all recorded invocations
    pub fn commands(&self) -> Vec<String> {
        self.invocations()
            .into_iter()
            .map(|invocation| invocation.command)
            .collect()
    }

    /// Command lines started with inherited streams
    pub fn runs(&self) -> Vec<String> {
        self.invocations()
            .into_iter()
            .filter(|invocation| invocation.mode == InvocationMode::Run)
            .map(|invocation| invocation.command)
            .collect()
    }

    /// Check if a command line starting with `prefix` was invoked
    pub fn was_invoked(&self, prefix: &str) -> bool {
        self.commands().iter().any(|c| c.starts_with(prefix))
    }

    fn answer(&self, mode: InvocationMode, spec: &CommandSpec) -> Result<CommandOutcome> {
        let command = spec.to_string();
        self.invocations.lock().unwrap().push(Invocation {
            mode,
            command: command.clone(),
            cwd: std::env::current_dir().unwrap_or_default(),
        });

        let responses = self.responses.lock().unwrap();
        let response = responses
            .iter()
            .find(|(prefix, _)| command == *prefix || command.starts_with(&format!("{} ", prefix)));

        match response {
            Some((_, Response::Missing)) => Err(Error::command_not_found(spec.program())),
            Some((_, Response::Outcome(hook))) => Ok(hook(spec)),
            None => Ok(CommandOutcome::success("")),
        }
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        self.answer(InvocationMode::Run, spec)
    }

    async fn probe(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        self.answer(InvocationMode::Probe, spec)
    }
}
