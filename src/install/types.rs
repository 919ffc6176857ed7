//! Type definitions for installer steps.

use crate::{ShellCommand, Tool};
use serde::Serialize;

/// How a tool gets installed on the current OS.
///
/// Produced by a [`PackageStrategy`](super::PackageStrategy); carries data
/// only, so plans can be inspected without running anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallPlan {
    /// Run these commands in order.
    Commands {
        /// A package manager that must be present first (Homebrew on macOS).
        bootstrap: Option<Tool>,
        /// The chain, each command flagged strict or tolerant.
        commands: Vec<ShellCommand>,
    },

    /// No automated path: the operator installs from `url`.
    Manual {
        /// Download page for the tool.
        url: &'static str,
    },

    /// Nothing on this machine can install the tool.
    Unavailable {
        /// Why no plan exists (e.g. no supported package manager).
        reason: String,
    },
}

impl InstallPlan {
    /// A chain with no bootstrap requirement.
    pub(crate) fn commands(commands: Vec<ShellCommand>) -> Self {
        Self::Commands {
            bootstrap: None,
            commands,
        }
    }

    /// A chain that needs `bootstrap` installed first.
    pub(crate) fn after(bootstrap: Tool, commands: Vec<ShellCommand>) -> Self {
        Self::Commands {
            bootstrap: Some(bootstrap),
            commands,
        }
    }

    /// The command lines this plan would run, for display.
    pub fn command_lines(&self) -> Vec<&str> {
        match self {
            Self::Commands { commands, .. } => commands.iter().map(|c| c.line.as_str()).collect(),
            Self::Manual { .. } | Self::Unavailable { .. } => Vec::new(),
        }
    }
}

/// One entry of the fixed step list.
///
/// # Example
///
/// ```rust
/// use cd3_setup::{InstallStep, Tool};
///
/// let step = InstallStep::required(Tool::Git);
/// assert!(step.required);
/// assert!(!InstallStep::optional(Tool::Homebrew).required);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InstallStep {
    /// The tool this step installs.
    pub tool: Tool,
    /// Whether a failure is flagged in the final summary.
    pub required: bool,
}

impl InstallStep {
    /// A step whose failure needs the operator's attention.
    pub fn required(tool: Tool) -> Self {
        Self {
            tool,
            required: true,
        }
    }

    /// A non-blocking step.
    pub fn optional(tool: Tool) -> Self {
        Self {
            tool,
            required: false,
        }
    }
}

/// Terminal state of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StepOutcome {
    /// The tool was already present; nothing ran.
    AlreadySatisfied,
    /// The install chain ran to the end.
    Installed,
    /// The step could not install the tool.
    Failed {
        /// Short explanation shown in the summary.
        reason: String,
    },
}

impl StepOutcome {
    /// Whether the step ended in `Done` (installed or already present).
    pub fn is_done(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

/// A step together with how it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// The step that ran.
    pub step: InstallStep,
    /// How it ended.
    pub outcome: StepOutcome,
}

impl StepReport {
    /// Whether this report should be flagged to the operator.
    pub fn needs_attention(&self) -> bool {
        self.step.required && !self.outcome.is_done()
    }
}
