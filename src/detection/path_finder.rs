//! PATH-based executable lookup with per-OS fallback locations.

use crate::OsIdentity;
use std::path::{Path, PathBuf};

/// Answers whether a named executable is available, without side effects.
///
/// Absence is an expected outcome, not an error. Results are never cached:
/// installation steps change the environment between probes.
pub trait Probe: Send + Sync {
    /// Whether `name` resolves to an executable.
    fn exists(&self, name: &str) -> bool;
}

/// The real [`Probe`]: search-path lookup plus well-known install directories.
///
/// The `which` crate performs the platform lookup (PATHEXT-aware on
/// Windows, POSIX semantics elsewhere). Tools freshly installed by a
/// bootstrap script often land outside the current PATH, so Unix-like
/// systems also check a few fixed directories.
#[derive(Debug, Clone)]
pub struct PathProbe {
    os: OsIdentity,
    home: Option<PathBuf>,
}

impl PathProbe {
    /// Create a probe for the given OS, with `home` used for user-local fallbacks.
    pub fn new(os: OsIdentity, home: Option<PathBuf>) -> Self {
        Self { os, home }
    }

    fn fallback_dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = match self.os {
            OsIdentity::Linux => vec!["/usr/local/bin".into(), "/usr/bin".into()],
            OsIdentity::MacOs => vec![
                "/opt/homebrew/bin".into(),
                "/usr/local/bin".into(),
                "/usr/bin".into(),
            ],
            OsIdentity::Windows | OsIdentity::Unsupported => return Vec::new(),
        };
        if let Some(home) = &self.home {
            dirs.push(home.join(".local").join("bin"));
            dirs.push(home.join("bin"));
        }
        dirs
    }
}

impl Probe for PathProbe {
    fn exists(&self, name: &str) -> bool {
        find_executable(name, &self.fallback_dirs()).is_some()
    }
}

/// Find an executable by name on the search path, then in `fallbacks`.
pub(crate) fn find_executable(name: &str, fallbacks: &[PathBuf]) -> Option<PathBuf> {
    if let Ok(path) = which::which(name) {
        tracing::debug!(name, path = %path.display(), "found on PATH");
        return Some(path);
    }

    let found = fallbacks
        .iter()
        .map(|dir| dir.join(name))
        .find(|candidate| is_file(candidate));
    match &found {
        Some(path) => tracing::debug!(name, path = %path.display(), "found in fallback location"),
        None => tracing::debug!(name, "not found"),
    }
    found
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|m| m.is_file()).unwrap_or(false)
}
