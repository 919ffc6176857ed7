//! Version output parsing with regex extraction.

use regex::Regex;
use semver::Version;
use std::sync::OnceLock;

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)").expect("Invalid regex pattern"))
}

/// Parse a semantic version from tool output.
///
/// Handles the formats printed by the verified tools:
///
/// - `git version 2.39.2` -> 2.39.2
/// - `Python 3.11.4` -> 3.11.4
/// - `pip 23.0.1 from /usr/lib/python3/dist-packages/pip (python 3.11)` -> 23.0.1
/// - `Terraform v1.5.7\non linux_amd64` -> 1.5.7
/// - `3.37.0` -> 3.37.0
///
/// Returns `None` when no `major.minor.patch` triple is present.
pub(crate) fn parse_version(output: &str) -> Option<Version> {
    let caps = version_regex().captures(output)?;
    Version::parse(caps.get(0)?.as_str()).ok()
}
