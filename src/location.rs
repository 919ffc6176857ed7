//! Interactive choice of where the toolkit checkout goes.

use crate::{Console, RunContext, SetupError};
use serde::Serialize;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Directory name of the toolkit checkout, under whichever base is chosen.
pub const CHECKOUT_DIR_NAME: &str = "cd3-automation-toolkit";

/// Where the base directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LocationSource {
    /// Option 1: next to the setup script.
    ScriptDirectory,
    /// Option 2: the operator's home directory.
    HomeDirectory,
    /// Option 3: a path typed by the operator.
    Custom,
}

/// The resolved checkout path. Set once, never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallLocation {
    path: PathBuf,
    source: LocationSource,
}

impl InstallLocation {
    /// `base/cd3-automation-toolkit`.
    pub fn under(base: &Path, source: LocationSource) -> Self {
        Self {
            path: base.join(CHECKOUT_DIR_NAME),
            source,
        }
    }

    /// The checkout path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Which option produced it.
    pub fn source(&self) -> LocationSource {
        self.source
    }
}

impl fmt::Display for InstallLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Ask the operator where to install, until a valid answer is given.
///
/// An empty answer selects option 1. Anything outside `1`, `2`, `3`, or an
/// empty custom path, re-prompts.
pub fn choose<R: BufRead, W: Write>(
    ctx: &RunContext,
    console: &mut Console<R, W>,
) -> Result<InstallLocation, SetupError> {
    let script = InstallLocation::under(&ctx.script_dir, LocationSource::ScriptDirectory);
    let home = InstallLocation::under(&ctx.home_dir, LocationSource::HomeDirectory);

    console.say("Where would you like to install CD3 toolkit?")?;
    console.say(&format!("1. Current directory (same as script): {}", script))?;
    console.say(&format!("2. Home directory: {}", home))?;
    console.say("3. Custom location (enter full path)")?;

    let location = loop {
        let answer = console.ask("\nEnter your choice (1/2/3) [default: 1]: ")?;
        match answer.as_str() {
            "" | "1" => break script,
            "2" => break home,
            "3" => {
                let custom = console.ask("Enter full path: ")?;
                if custom.is_empty() {
                    console.say("Invalid path. Please try again.")?;
                    continue;
                }
                break InstallLocation::under(Path::new(&custom), LocationSource::Custom);
            }
            _ => console.say("Invalid choice. Please enter 1, 2, or 3.")?,
        }
    };

    console.say(&format!(
        "\n✓ CD3 toolkit will be installed at: {}",
        location
    ))?;
    tracing::info!(path = %location, source = ?location.source(), "install location chosen");
    Ok(location)
}
