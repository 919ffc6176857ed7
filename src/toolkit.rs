//! Fetching the toolkit checkout and installing its Python dependencies.
//!
//! Everything after the fetch tolerates a missing checkout: a failed clone
//! degrades to the generic package set and "not found" notes.

use crate::{quote_arg, InstallLocation, RunContext, Shell, ShellCommand};
use std::path::{Path, PathBuf};

/// Upstream repository of the CD3 Automation Toolkit.
pub const TOOLKIT_REPO_URL: &str = "https://github.com/oracle-devrel/cd3-automation-toolkit.git";

/// Packages installed when the checkout has no `requirements.txt`.
pub const FALLBACK_PACKAGES: &[&str] = &[
    "oci",
    "oci-cli",
    "requests",
    "jinja2",
    "pandas",
    "openpyxl",
    "xlrd",
    "configparser",
    "cryptography",
    "PyYAML",
    "python-dateutil",
    "pytz",
    "argparse",
];

/// Directories a complete checkout is expected to contain.
pub const EXPECTED_DIRS: &[&str] = &["user-scripts", "setUpOCI", "cd3_automation_toolkit"];

/// Whether `location` already holds a git checkout.
pub fn has_checkout(location: &InstallLocation) -> bool {
    location.path().join(".git").is_dir()
}

/// Clone the toolkit into `location`, or update the checkout already there.
///
/// The update runs `git pull` with the child's working directory set to
/// the checkout. The clone target is quoted when it needs it. Returns
/// whether the command succeeded; a failure is reported and left for the
/// caller to tolerate.
pub async fn fetch<S: Shell>(ctx: &RunContext, location: &InstallLocation, shell: &S) -> bool {
    if has_checkout(location) {
        println!("CD3 toolkit already exists at: {}", location);
        println!("Updating CD3 toolkit...");
        let result = shell
            .run(&ShellCommand::strict("git pull").in_dir(location.path()))
            .await;
        if !result.succeeded {
            println!("Failed to update repository. Continuing with the existing checkout.");
        }
        return result.succeeded;
    }

    println!("Cloning CD3 toolkit to: {}", location);
    let target = location.to_string();
    let clone = format!("git clone {} {}", TOOLKIT_REPO_URL, quote_arg(ctx.os, &target));
    let result = shell.run(&ShellCommand::strict(clone)).await;
    if result.succeeded {
        println!("✓ CD3 toolkit downloaded successfully");
    } else {
        println!("Failed to clone repository. Please check your internet connection.");
    }
    result.succeeded
}

/// Install the toolkit's Python dependencies.
///
/// Uses `requirements.txt` from the checkout when present, otherwise the
/// [`FALLBACK_PACKAGES`] one by one. Returns whether every pip invocation
/// succeeded.
pub async fn install_dependencies<S: Shell>(
    ctx: &RunContext,
    location: &InstallLocation,
    shell: &S,
) -> bool {
    let requirements = location.path().join("requirements.txt");

    if !location.path().exists() {
        println!("CD3 toolkit not found at {}.", location);
        println!("⚠ Installing common packages instead...");
    } else if requirements.is_file() {
        println!("Found requirements.txt at: {}", requirements.display());
        println!("Installing CD3 toolkit specific dependencies...");
        let manifest = requirements.display().to_string();
        let line = format!(
            "{} -m pip install -r {}",
            ctx.python,
            quote_arg(ctx.os, &manifest)
        );
        let ok = shell.run(&ShellCommand::tolerant(line)).await.succeeded;
        if ok {
            println!("✓ CD3 dependencies installed");
        }
        return ok;
    } else {
        println!("⚠ No requirements.txt found, installing common packages...");
    }

    let mut all_ok = true;
    for package in FALLBACK_PACKAGES {
        println!("\nInstalling {}...", package);
        let line = format!("{} -m pip install --upgrade {}", ctx.python, package);
        all_ok &= shell.run(&ShellCommand::tolerant(line)).await.succeeded;
    }
    if all_ok {
        println!("\n✓ All Python packages installed");
    }
    all_ok
}

/// Check the expected toolkit directories, printing one line per entry.
pub fn inspect_layout(location: &InstallLocation) -> Vec<(PathBuf, bool)> {
    EXPECTED_DIRS
        .iter()
        .map(|name| {
            let dir = location.path().join(name);
            let present = is_dir(&dir);
            if present {
                println!("✓ Directory exists: {}", dir.display());
            } else {
                println!("Note: Directory not found: {}", dir.display());
            }
            (dir, present)
        })
        .collect()
}

fn is_dir(path: &Path) -> bool {
    path.metadata().map(|m| m.is_dir()).unwrap_or(false)
}
