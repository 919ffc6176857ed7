//! Setup configuration and the per-run context.
//!
//! [`SetupOptions`] is what the caller controls; [`RunContext`] is the
//! immutable value resolved from it once at the start of a run and then
//! passed by reference into every step.

use crate::{OsIdentity, Probe, SetupError};
use std::path::PathBuf;

/// Python executables tried, in order, when none is configured.
const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Configuration options for a setup run.
///
/// # Default Behavior
///
/// - system name: the platform this binary was built for
/// - `python`: auto-detected (`python3`, then `python`)
/// - `script_dir`: the process working directory
/// - `home_dir`: the current user's home directory
///
/// The system name is classified once, when the options are built; the
/// host and the run context both read that single result.
///
/// # Example
///
/// ```rust
/// use cd3_setup::{OsIdentity, SetupOptions};
///
/// let mut opts = SetupOptions::for_system("Darwin");
/// opts.python = Some("/usr/bin/python3.11".to_string());
/// assert_eq!(opts.os(), OsIdentity::MacOs);
/// assert_eq!(opts.system_name(), "Darwin");
/// ```
#[derive(Debug, Clone)]
pub struct SetupOptions {
    system_name: String,
    os: OsIdentity,

    /// Python interpreter used for pip and verification.
    pub python: Option<String>,

    /// Base directory for the "current directory" install choice.
    pub script_dir: PathBuf,

    /// Base directory for the "home directory" install choice and `~/.oci`.
    pub home_dir: Option<PathBuf>,
}

impl SetupOptions {
    /// Options for the named platform, other fields at their defaults.
    pub fn for_system(system_name: impl Into<String>) -> Self {
        let system_name = system_name.into();
        Self {
            os: OsIdentity::classify(&system_name),
            system_name,
            python: None,
            script_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            home_dir: dirs::home_dir(),
        }
    }

    /// The platform name as reported.
    pub fn system_name(&self) -> &str {
        &self.system_name
    }

    /// The classified platform.
    pub fn os(&self) -> OsIdentity {
        self.os
    }
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self::for_system(std::env::consts::OS)
    }
}

/// Everything a step needs to know about the run, resolved once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// The classified operating system. Never [`OsIdentity::Unsupported`].
    pub os: OsIdentity,

    /// Python interpreter command.
    pub python: String,

    /// Base directory for install choice 1.
    pub script_dir: PathBuf,

    /// The operator's home directory.
    pub home_dir: PathBuf,
}

impl RunContext {
    /// Resolve the context from options.
    ///
    /// Fails when the OS is unsupported or no home directory is known.
    pub fn resolve(options: &SetupOptions, probe: &dyn Probe) -> Result<Self, SetupError> {
        let os = options.os;
        if !os.is_supported() {
            return Err(SetupError::UnsupportedOs {
                name: options.system_name.clone(),
                fix: "Run the setup on Linux, macOS or Windows".to_string(),
            });
        }

        let home_dir = options
            .home_dir
            .clone()
            .ok_or_else(|| SetupError::HomeDirUnavailable {
                fix: "Set the HOME (or USERPROFILE) environment variable".to_string(),
            })?;

        let python = options
            .python
            .clone()
            .or_else(|| {
                PYTHON_CANDIDATES
                    .iter()
                    .find(|name| probe.exists(name))
                    .map(|name| name.to_string())
            })
            .unwrap_or_else(|| PYTHON_CANDIDATES[0].to_string());

        Ok(Self {
            os,
            python,
            script_dir: options.script_dir.clone(),
            home_dir,
        })
    }
}
