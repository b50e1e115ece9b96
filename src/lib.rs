//! gangway - deterministic repository onboarding analyzer
//!
//! This library scans a repository tree, classifies its documentation,
//! configuration and dependency manifests, extracts runnable commands from
//! Makefiles, shell scripts, tox and package.json, detects surrounding
//! tooling and frameworks, and compiles everything into a byte-stable
//! onboarding document.
//!
//! # Core Concepts
//!
//! - **Scan**: a bounded breadth-first walk honoring gitignore plus a
//!   non-negotiable safety deny-list, unioned with a targeted probe for
//!   critical signal files that repositories often gitignore
//! - **Catalog**: first-match classification of every scanned path into
//!   doc, dependency or config, validated to be disjoint at startup
//! - **Extraction**: evidence-grounded command harvesting; commands are
//!   only ever copied from files, never invented
//! - **Blueprint**: an ordered section registry rendering markdown whose
//!   bytes are a pure function of the analysis record
//!
//! # Example Usage
//!
//! ```ignore
//! use gangway::{compile_blueprint, Analyzer, CommandsOverride};
//! use std::path::Path;
//!
//! fn onboarding_markdown(repo: &Path) -> Result<String, gangway::EngineError> {
//!     let analyzer = Analyzer::new()?;
//!     let analysis = analyzer.analyze(repo);
//!     let blueprint = compile_blueprint(&analysis, &CommandsOverride::default());
//!     Ok(blueprint.render.markdown)
//! }
//! ```

// Public modules
pub mod analysis;
pub mod blueprint;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod describe;
pub mod detect;
pub mod extract;
pub mod priority;
pub mod scan;
pub mod schema;

// Re-export key types for convenient access
pub use analysis::Analyzer;
pub use blueprint::{compile_blueprint, render_markdown, Blueprint, Section};
pub use catalog::{Catalog, EngineError, FileCategory};
pub use extract::ExtractError;
pub use schema::{CommandsOverride, RepoAnalysis};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "gangway");
    }
}
