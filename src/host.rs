//! The real machine: a [`SystemShell`] and a [`PathProbe`] behind one value.

use crate::{CommandResult, OsIdentity, PathProbe, Probe, Shell, ShellCommand, SystemShell};
use std::future::Future;
use std::path::PathBuf;

/// Runs commands and probes executables on the local machine.
#[derive(Debug, Clone)]
pub struct SystemHost {
    shell: SystemShell,
    probe: PathProbe,
}

impl SystemHost {
    /// Create a host for `os`, using `home` for user-local probe fallbacks.
    pub fn new(os: OsIdentity, home: Option<PathBuf>) -> Self {
        Self {
            shell: SystemShell::new(os),
            probe: PathProbe::new(os, home),
        }
    }
}

impl Shell for SystemHost {
    fn run(&self, command: &ShellCommand) -> impl Future<Output = CommandResult> + Send {
        self.shell.run(command)
    }
}

impl Probe for SystemHost {
    fn exists(&self, name: &str) -> bool {
        self.probe.exists(name)
    }
}
