//! Error types for the setup run.
//!
//! Only conditions that end the whole run are errors. A failed install
//! command is an expected outcome and is reported through
//! [`StepOutcome::Failed`](crate::StepOutcome) instead.

use std::io;
use thiserror::Error;

/// Errors that halt the setup run.
///
/// Each variant carries a `fix` with an actionable suggestion for the
/// operator.
///
/// # Example
///
/// ```rust
/// use cd3_setup::SetupError;
///
/// fn report(error: &SetupError) {
///     eprintln!("Setup failed: {}", error);
///     eprintln!("To fix: {}", error.fix_suggestion());
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SetupError {
    /// The platform is not Linux, macOS or Windows.
    #[error("Unsupported OS: {name}")]
    UnsupportedOs {
        /// The system name that was reported.
        name: String,
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// The operator interrupted the run (Ctrl-C, or end of input at a prompt).
    #[error("Setup interrupted by user.")]
    Interrupted,

    /// No home directory could be determined for the current user.
    #[error("Could not determine the home directory")]
    HomeDirUnavailable {
        /// Actionable suggestion for resolving the issue.
        fix: String,
    },

    /// Reading from or writing to the console failed.
    #[error("Console I/O failed: {0}")]
    Console(#[from] io::Error),
}

impl SetupError {
    /// Get an actionable suggestion for fixing this error.
    pub fn fix_suggestion(&self) -> &str {
        match self {
            Self::UnsupportedOs { fix, .. } => fix,
            Self::Interrupted => "Re-run the setup when ready; completed steps are skipped",
            Self::HomeDirUnavailable { fix } => fix,
            Self::Console(_) => "Run the setup from an interactive terminal",
        }
    }
}
