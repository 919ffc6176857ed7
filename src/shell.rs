//! External command execution through the OS shell.
//!
//! Every installation action is a command line handed to `sh -c` or
//! `cmd /C`. The exact command text is part of the operator-facing
//! contract, so it is kept as a single string rather than split into
//! program and arguments.

use crate::OsIdentity;
use std::borrow::Cow;
use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// A command line to run through the shell.
///
/// # Example
///
/// ```rust
/// use cd3_setup::ShellCommand;
///
/// let cmd = ShellCommand::tolerant("sudo apt-get update");
/// assert!(cmd.tolerates_failure);
/// assert_eq!(cmd.line, "sudo apt-get update");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    /// The command line, passed verbatim to the shell.
    pub line: String,

    /// Whether a failure should let a command chain carry on.
    pub tolerates_failure: bool,

    /// Working directory for the child process only.
    ///
    /// The setup process itself never changes directory.
    pub working_dir: Option<PathBuf>,

    /// Inherit the terminal instead of capturing output.
    ///
    /// Used for commands that prompt the operator themselves.
    pub interactive: bool,
}

impl ShellCommand {
    /// A command whose failure ends the chain it belongs to.
    pub fn strict(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            tolerates_failure: false,
            working_dir: None,
            interactive: false,
        }
    }

    /// A best-effort command: on failure, the chain continues.
    pub fn tolerant(line: impl Into<String>) -> Self {
        Self {
            tolerates_failure: true,
            ..Self::strict(line)
        }
    }

    /// Run the child process in `dir`.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Let the child talk to the terminal directly.
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }
}

/// Quote `arg` for the shell that runs on `os`.
///
/// Arguments made only of path-safe characters come back unchanged, so
/// ordinary command lines stay byte-identical. Anything else is wrapped in
/// single quotes for `sh` or double quotes for `cmd`.
///
/// # Example
///
/// ```rust
/// use cd3_setup::{quote_arg, OsIdentity};
///
/// assert_eq!(quote_arg(OsIdentity::Linux, "/opt/cd3"), "/opt/cd3");
/// assert_eq!(quote_arg(OsIdentity::Linux, "/tmp/Jane Doe"), "'/tmp/Jane Doe'");
/// assert_eq!(quote_arg(OsIdentity::Windows, r"C:\Users\Jane Doe"), r#""C:\Users\Jane Doe""#);
/// ```
pub fn quote_arg(os: OsIdentity, arg: &str) -> Cow<'_, str> {
    let plain = |c: char| c.is_ascii_alphanumeric() || "/._-+:,=@".contains(c);
    let windows = os == OsIdentity::Windows;

    if !arg.is_empty() && arg.chars().all(|c| plain(c) || (windows && c == '\\')) {
        return Cow::Borrowed(arg);
    }
    if windows {
        // Windows paths cannot contain '"'.
        Cow::Owned(format!("\"{}\"", arg))
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}

/// Result of running one [`ShellCommand`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command exited with a success status.
    pub succeeded: bool,
    /// Captured standard output (empty for interactive commands).
    pub stdout: String,
    /// Captured standard error, or the spawn error text.
    pub stderr: String,
}

impl CommandResult {
    /// A successful result with the given output.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed result with the given error text.
    pub fn failure(stderr: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Runs commands and reports their outcome.
///
/// Implementations never fail the caller: a command that cannot even be
/// spawned is a failed [`CommandResult`]. Each call completes before it
/// returns, and no timeout is applied.
pub trait Shell: Send + Sync {
    /// Run `command` to completion.
    fn run(&self, command: &ShellCommand) -> impl Future<Output = CommandResult> + Send;
}

/// The real [`Shell`], backed by `tokio::process`.
#[derive(Debug, Clone, Copy)]
pub struct SystemShell {
    os: OsIdentity,
}

impl SystemShell {
    /// Create a shell for the given OS.
    pub fn new(os: OsIdentity) -> Self {
        Self { os }
    }

    fn command_for(&self, line: &str) -> Command {
        match self.os {
            OsIdentity::Windows => {
                let mut command = Command::new("cmd");
                command.arg("/C").arg(line);
                command
            }
            _ => {
                let mut command = Command::new("sh");
                command.arg("-c").arg(line);
                command
            }
        }
    }
}

impl Shell for SystemShell {
    async fn run(&self, command: &ShellCommand) -> CommandResult {
        println!("Running: {}", command.line);

        let mut child = self.command_for(&command.line);
        if let Some(dir) = &command.working_dir {
            child.current_dir(dir);
        }

        let result = if command.interactive {
            child
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
            match child.status().await {
                Ok(status) => CommandResult {
                    succeeded: status.success(),
                    ..Default::default()
                },
                Err(e) => CommandResult::failure(e.to_string()),
            }
        } else {
            child
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
            match child.output().await {
                Ok(output) => CommandResult {
                    succeeded: output.status.success(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                },
                Err(e) => CommandResult::failure(e.to_string()),
            }
        };

        if !result.stdout.is_empty() {
            println!("{}", result.stdout);
        }
        if !result.succeeded {
            println!("Error: {}", result.stderr);
        }
        tracing::debug!(line = %command.line, succeeded = result.succeeded, "command finished");
        result
    }
}
