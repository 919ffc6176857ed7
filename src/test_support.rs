//! Recording fakes shared by unit tests.
//!
//! `tests/common/mod.rs` carries the same `FakeHost` for integration tests,
//! which cannot see this module. Keep the two in sync.

use crate::{CommandResult, Probe, Shell, ShellCommand};
use std::collections::HashSet;
use std::sync::Mutex;

/// A fake machine: a set of present executables, a list of command
/// substrings that fail, and a log of every command run.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    present: HashSet<String>,
    failing: Vec<String>,
    ran: Mutex<Vec<ShellCommand>>,
}

impl FakeHost {
    pub(crate) fn with_tools(tools: &[&str]) -> Self {
        Self {
            present: tools.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub(crate) fn failing_on(mut self, pattern: &str) -> Self {
        self.failing.push(pattern.to_string());
        self
    }

    pub(crate) fn commands(&self) -> Vec<ShellCommand> {
        self.ran.lock().unwrap().clone()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.commands().into_iter().map(|c| c.line).collect()
    }
}

impl Probe for FakeHost {
    fn exists(&self, name: &str) -> bool {
        self.present.contains(name)
    }
}

impl Shell for FakeHost {
    async fn run(&self, command: &ShellCommand) -> CommandResult {
        self.ran.lock().unwrap().push(command.clone());
        if self.failing.iter().any(|p| command.line.contains(p.as_str())) {
            CommandResult::failure("simulated failure")
        } else {
            CommandResult::success("")
        }
    }
}
