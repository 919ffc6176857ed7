//! Operating system classification.

use serde::{Deserialize, Serialize};

/// The operating system family the setup is running on.
///
/// Derived once at startup via [`OsIdentity::detect`] and never re-derived.
/// Every OS-specific decision in the crate dispatches on this value rather
/// than inspecting the raw platform string again.
///
/// # Example
///
/// ```rust
/// use cd3_setup::OsIdentity;
///
/// assert_eq!(OsIdentity::classify("Darwin"), OsIdentity::MacOs);
/// assert_eq!(OsIdentity::classify("linux"), OsIdentity::Linux);
/// assert!(!OsIdentity::classify("BSD").is_supported());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsIdentity {
    /// Any Linux distribution.
    Linux,
    /// macOS (reported as `Darwin` or `macos`).
    MacOs,
    /// Windows.
    Windows,
    /// Anything else. The run halts when this is detected.
    Unsupported,
}

impl OsIdentity {
    /// Map a reported system name to an identity.
    ///
    /// Accepts both the kernel-style names (`Linux`, `Darwin`, `Windows`) and
    /// Rust's `std::env::consts::OS` values (`linux`, `macos`, `windows`),
    /// case-insensitively.
    pub fn classify(system_name: &str) -> Self {
        match system_name.trim().to_ascii_lowercase().as_str() {
            "linux" => Self::Linux,
            "darwin" | "macos" => Self::MacOs,
            "windows" => Self::Windows,
            _ => Self::Unsupported,
        }
    }

    /// Classify the platform this binary was built for.
    pub fn detect() -> Self {
        Self::classify(std::env::consts::OS)
    }

    /// Whether the setup can proceed on this OS.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Human-readable name, as printed in the detection banner.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::MacOs => "macOS",
            Self::Windows => "Windows",
            Self::Unsupported => "Unsupported",
        }
    }
}
