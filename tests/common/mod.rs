//! A recording fake host for end-to-end runs.
//!
//! Mirrors `src/test_support.rs`, which is private to the library's unit
//! tests. Keep the two in sync.

use cd3_setup::{CommandResult, Console, Orchestrator, Probe, SetupOptions, Shell, ShellCommand};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct FakeHost {
    present: HashSet<String>,
    failing: Vec<String>,
    ran: Mutex<Vec<ShellCommand>>,
}

impl FakeHost {
    pub fn with_tools(tools: &[&str]) -> Self {
        Self {
            present: tools.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, pattern: &str) -> Self {
        self.failing.push(pattern.to_string());
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.ran.lock().unwrap().iter().map(|c| c.line.clone()).collect()
    }

    pub fn commands(&self) -> Vec<ShellCommand> {
        self.ran.lock().unwrap().clone()
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

pub type FakeOrchestrator = Orchestrator<FakeHost, Cursor<String>, Vec<u8>>;

pub fn options(system_name: &str, script_dir: &Path, home: &Path) -> SetupOptions {
    let mut options = SetupOptions::for_system(system_name);
    options.python = Some("python3".to_string());
    options.script_dir = script_dir.to_path_buf();
    options.home_dir = Some(home.to_path_buf());
    options
}

pub fn orchestrator(options: SetupOptions, host: FakeHost, input: &str) -> FakeOrchestrator {
    Orchestrator::new(
        options,
        host,
        Console::new(Cursor::new(input.to_string()), Vec::new()),
    )
}
