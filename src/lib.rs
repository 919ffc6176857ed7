//! # cd3-setup
//!
//! Workstation bootstrap for the CD3 Automation Toolkit.
//!
//! The crate detects the operating system, installs the prerequisite tools
//! (Git, Terraform, OCI CLI, Python packages) through the platform's package
//! manager, fetches the toolkit checkout, and verifies the result. Every step
//! is idempotent: re-running skips whatever is already present.
//!
//! ## Features
//!
//! - `OsIdentity` classification and per-OS `PackageStrategy` lookup
//! - `run_step()` for one probe-then-install step with progress callbacks
//! - `run_steps()` for a step list, attempting each package manager once
//! - `Orchestrator` for the full, failure-tolerant sequence
//! - `Shell` / `Probe` traits so the sequence can run against a fake host
//!
//! ## Example
//!
//! ```rust
//! use cd3_setup::{strategy_for, InstallPlan, OsIdentity, PathProbe, Tool};
//!
//! let os = OsIdentity::classify("Windows");
//! let plan = strategy_for(os).unwrap().plan(Tool::Terraform, &PathProbe::new(os, None));
//! assert!(matches!(plan, InstallPlan::Manual { .. }));
//! ```

mod cloud_config;
mod console;
mod detection;
mod errors;
mod host;
mod install;
mod location;
mod options;
mod orchestrator;
mod platform;
mod shell;
mod tool;
mod toolkit;
mod verify;

#[cfg(test)]
mod test_support;

pub use cloud_config::{configure_oci_cli, oci_config_path, OciConfigStatus};
pub use console::Console;
pub use detection::{PathProbe, Probe};
pub use errors::SetupError;
pub use host::SystemHost;
pub use install::{
    run_step, run_steps, strategy_for, InstallPlan, InstallStep, LinuxPackageManager, LinuxStrategy,
    MacOsStrategy, PackageStrategy, StepOutcome, StepProgress, StepReport, WindowsStrategy,
};
pub use location::{choose, InstallLocation, LocationSource, CHECKOUT_DIR_NAME};
pub use options::{RunContext, SetupOptions};
pub use orchestrator::{install_steps, Orchestrator, RunSummary};
pub use platform::OsIdentity;
pub use shell::{quote_arg, CommandResult, Shell, ShellCommand, SystemShell};
pub use tool::Tool;
pub use toolkit::{
    fetch, has_checkout, inspect_layout, install_dependencies, EXPECTED_DIRS, FALLBACK_PACKAGES,
    TOOLKIT_REPO_URL,
};
pub use verify::{verify, ToolStatus, VerificationEntry, VerificationReport, VerifyTarget};
