//! Installer steps and the per-OS strategies behind them.
//!
//! Every installer step follows the same shape: probe for the tool, skip if
//! present, otherwise ask the OS's [`PackageStrategy`] for an
//! [`InstallPlan`] and run it through a [`Shell`](crate::Shell).
//!
//! # Example
//!
//! ```rust
//! use cd3_setup::{strategy_for, OsIdentity, PathProbe, Tool};
//!
//! let strategy = strategy_for(OsIdentity::MacOs).unwrap();
//! let plan = strategy.plan(Tool::Git, &PathProbe::new(OsIdentity::MacOs, None));
//! assert_eq!(plan.command_lines(), vec!["brew install git"]);
//! ```

mod executor;
mod progress;
mod strategy;
mod types;

pub use executor::{run_step, run_steps};
pub use progress::StepProgress;
pub use strategy::{
    strategy_for, LinuxPackageManager, LinuxStrategy, MacOsStrategy, PackageStrategy,
    WindowsStrategy,
};
pub use types::{InstallPlan, InstallStep, StepOutcome, StepReport};
