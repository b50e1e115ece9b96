//! Command and metadata extractors.
//!
//! Every extractor is a pure function over the repo root and previously
//! scanned evidence. Extractors return `Result`; the aggregator logs a
//! failure once and continues with an empty result, so a single malformed
//! file never blocks the rest of the analysis.

mod makefile;
mod node;
mod pyproject;
mod shell;
mod tox;
mod workflows;

pub use makefile::extract_makefile_commands;
pub use node::extract_node_package_json_commands;
pub use pyproject::{
    classify_python_version, extract_pyproject_metadata, load_pyproject, PyprojectMetadata,
};
pub use shell::extract_shell_scripts;
pub use tox::extract_tox_commands;
pub use workflows::detect_workflow_python_versions;

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::config::MAX_READ_BYTES;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

impl ExtractError {
    pub(crate) fn read(path: &str, source: io::Error) -> Self {
        Self::Read {
            path: path.to_string(),
            source,
        }
    }

    pub(crate) fn parse(path: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Size-capped best-effort read. A missing file or one over the cap is
/// "no evidence" (`Ok(None)`); an OS failure is an error for the caller
/// to log.
pub(crate) fn read_text_capped(path: &Path, rel: &str) -> Result<Option<String>, ExtractError> {
    match fs::metadata(path) {
        Ok(meta) if !meta.is_file() => return Ok(None),
        Ok(meta) if meta.len() > MAX_READ_BYTES => return Ok(None),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ExtractError::read(rel, e)),
    }
    match fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) => Err(ExtractError::read(rel, e)),
    }
}

/// Uncapped lossy read for line-oriented files (Makefile, tox.ini,
/// scripts). Invalid UTF-8 degrades to replacement characters.
pub(crate) fn read_text(path: &Path, rel: &str) -> Result<String, ExtractError> {
    match fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => Err(ExtractError::read(rel, e)),
    }
}
