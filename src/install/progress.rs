//! Progress reporting for installer steps.
//!
//! A step moves through
//! `Probing -> (AlreadySatisfied | Installing) -> (Completed | Failed)`;
//! each transition is reported to the caller's callback as a
//! [`StepProgress`].

use crate::Tool;

/// Progress stages of one installer step.
///
/// # Example
///
/// ```rust
/// use cd3_setup::{StepProgress, Tool};
///
/// fn on_progress(progress: StepProgress) {
///     match &progress {
///         StepProgress::Failed { tool, reason } => {
///             eprintln!("{} failed: {}", tool.display_name(), reason);
///         }
///         other => println!("{}", other.description()),
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepProgress {
    /// Checking whether the tool is already present.
    Probing {
        /// The tool being probed.
        tool: Tool,
    },

    /// The tool was found; nothing will run.
    AlreadySatisfied {
        /// The tool that was found.
        tool: Tool,
    },

    /// Running the install plan.
    Installing {
        /// The tool being installed.
        tool: Tool,
    },

    /// The install plan ran to the end.
    Completed {
        /// The tool that was installed.
        tool: Tool,
    },

    /// The step could not install the tool.
    Failed {
        /// The tool that failed.
        tool: Tool,
        /// Why.
        reason: String,
    },
}

impl StepProgress {
    /// Human-readable description of the stage.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Probing { .. } => "Checking for existing installation",
            Self::AlreadySatisfied { .. } => "Already installed",
            Self::Installing { .. } => "Installing",
            Self::Completed { .. } => "Installation complete",
            Self::Failed { .. } => "Installation failed",
        }
    }

    /// Whether this is a terminal stage.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::AlreadySatisfied { .. } | Self::Completed { .. } | Self::Failed { .. }
        )
    }
}
