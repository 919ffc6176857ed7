//! The prerequisite tools the setup knows how to install.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A prerequisite tool installed by an [`InstallStep`](crate::InstallStep).
///
/// # Example
///
/// ```rust
/// use cd3_setup::Tool;
///
/// for tool in Tool::all() {
///     println!("{}: {}", tool.display_name(), tool.executable_name());
/// }
/// assert_eq!(Tool::OciCli.executable_name(), "oci");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Tool {
    /// Homebrew, the macOS package manager. Only installed on macOS.
    Homebrew,
    /// The Git version control client.
    Git,
    /// HashiCorp Terraform.
    Terraform,
    /// The Oracle Cloud Infrastructure CLI.
    OciCli,
}

impl Tool {
    /// The executable name probed on the search path.
    pub fn executable_name(&self) -> &'static str {
        match self {
            Self::Homebrew => "brew",
            Self::Git => "git",
            Self::Terraform => "terraform",
            Self::OciCli => "oci",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Homebrew => "Homebrew",
            Self::Git => "Git",
            Self::Terraform => "Terraform",
            Self::OciCli => "OCI CLI",
        }
    }

    /// Where to get the tool when it has to be installed by hand.
    pub fn manual_url(&self) -> &'static str {
        match self {
            Self::Homebrew => "https://brew.sh",
            Self::Git => "https://git-scm.com/download/win",
            Self::Terraform => "https://www.terraform.io/downloads",
            Self::OciCli => {
                "https://docs.oracle.com/en-us/iaas/Content/API/SDKDocs/cliinstall.htm"
            }
        }
    }

    /// Iterator over all known tools.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as IntoEnumIterator>::iter()
    }
}
