//! Filesystem discovery: ignore rules and the repository walker.

mod matcher;
mod walker;

pub use matcher::IgnoreMatcher;
pub use walker::{scan_repo_files, targeted_scan, ScanResult};
