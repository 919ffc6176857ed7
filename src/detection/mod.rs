//! Tool detection.
//!
//! - `Probe` / `PathProbe`: side-effect-free existence checks
//! - `parse_version`: regex-based version extraction from tool output

mod parser;
mod path_finder;

pub(crate) use parser::parse_version;
pub use path_finder::{PathProbe, Probe};
