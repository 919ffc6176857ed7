//! Post-install verification.
//!
//! Unlike the existence probe, verification runs each tool's own version
//! command, so a binary that is on PATH but broken shows up as not found.

use crate::detection::parse_version;
use crate::{RunContext, Shell, ShellCommand};
use semver::Version;
use serde::Serialize;
use std::fmt;
use strum::IntoEnumIterator;

const RULE: &str = "============================================================";

/// A tool checked by the verification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::EnumIter)]
pub enum VerifyTarget {
    /// `git --version`
    Git,
    /// `<python> --version`
    Python,
    /// `<python> -m pip --version`
    Pip,
    /// `terraform version`
    Terraform,
    /// `oci --version`
    OciCli,
}

impl VerifyTarget {
    /// Name shown in the summary table.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Git => "Git",
            Self::Python => "Python",
            Self::Pip => "Pip",
            Self::Terraform => "Terraform",
            Self::OciCli => "OCI CLI",
        }
    }

    /// The identity command for this tool.
    pub fn command(&self, ctx: &RunContext) -> String {
        match self {
            Self::Git => "git --version".to_string(),
            Self::Python => format!("{} --version", ctx.python),
            Self::Pip => format!("{} -m pip --version", ctx.python),
            Self::Terraform => "terraform version".to_string(),
            Self::OciCli => "oci --version".to_string(),
        }
    }

    /// All targets, in report order.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}

/// Verification result for one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ToolStatus {
    /// The version command succeeded.
    Installed {
        /// Version parsed from the command output, when it had one.
        version: Option<Version>,
    },
    /// The version command failed.
    NotFound,
}

impl ToolStatus {
    /// Whether the tool is installed.
    pub fn is_installed(&self) -> bool {
        matches!(self, Self::Installed { .. })
    }
}

/// One row of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationEntry {
    /// The tool checked.
    pub target: VerifyTarget,
    /// What was found.
    pub status: ToolStatus,
}

/// Ordered verification results, built once.
///
/// `Display` renders the fixed-width summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    entries: Vec<VerificationEntry>,
}

impl VerificationReport {
    /// The rows, in check order.
    pub fn entries(&self) -> &[VerificationEntry] {
        &self.entries
    }

    /// Status for one target.
    pub fn status(&self, target: VerifyTarget) -> Option<&ToolStatus> {
        self.entries
            .iter()
            .find(|e| e.target == target)
            .map(|e| &e.status)
    }

    /// Whether every tool was found.
    pub fn all_installed(&self) -> bool {
        self.entries.iter().all(|e| e.status.is_installed())
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Installation Summary:")?;
        writeln!(f, "{}", RULE)?;
        for entry in &self.entries {
            let status = match &entry.status {
                ToolStatus::Installed { version: Some(v) } => format!("✓ Installed ({})", v),
                ToolStatus::Installed { version: None } => "✓ Installed".to_string(),
                ToolStatus::NotFound => "✗ Not found".to_string(),
            };
            writeln!(f, "{:15} : {}", entry.target.display_name(), status)?;
        }
        Ok(())
    }
}

/// Run every target's version command and build the report.
pub async fn verify<S: Shell>(ctx: &RunContext, shell: &S) -> VerificationReport {
    let mut entries = Vec::new();
    for target in VerifyTarget::all() {
        println!("\nChecking {}...", target.display_name());
        let result = shell
            .run(&ShellCommand::tolerant(target.command(ctx)))
            .await;
        let status = if result.succeeded {
            // Some tools (older Python) print their version to stderr.
            let version = parse_version(&result.stdout).or_else(|| parse_version(&result.stderr));
            ToolStatus::Installed { version }
        } else {
            ToolStatus::NotFound
        };
        tracing::debug!(tool = target.display_name(), ?status, "verified");
        entries.push(VerificationEntry { target, status });
    }
    VerificationReport { entries }
}
