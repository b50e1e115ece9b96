//! tox.ini command extraction.
//!
//! Presence of the file alone evidences `tox`; the only environment ever
//! inferred beyond that is flake8, from a literal substring match. No
//! other environments are invented.

use std::path::Path;

use crate::extract::{read_text, ExtractError};
use crate::schema::{CommandInfo, ScriptGroup};

pub fn extract_tox_commands(root: &Path, tox_rel: &str) -> Result<ScriptGroup, ExtractError> {
    let content = read_text(&root.join(tox_rel), tox_rel)?;

    let mut scripts = ScriptGroup::default();
    scripts
        .test
        .push(CommandInfo::new("tox", tox_rel).with_description("Run tests via tox"));

    if content.contains("flake8") {
        scripts.lint.push(
            CommandInfo::new("tox -e flake8", tox_rel)
                .with_description("Run flake8 linting via tox"),
        );
    }

    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_presence_yields_tox_command() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("tox.ini"), "[tox]\nenvlist = py311\n").unwrap();

        let scripts = extract_tox_commands(tmp.path(), "tox.ini").unwrap();
        assert_eq!(scripts.test[0].command, "tox");
        assert_eq!(scripts.test[0].description.as_deref(), Some("Run tests via tox"));
        assert!(scripts.lint.is_empty());
    }

    #[test]
    fn test_flake8_substring_adds_lint_env() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("tox.ini"),
            "[tox]\nenvlist = py311,flake8\n\n[testenv:flake8]\ndeps = flake8\n",
        )
        .unwrap();

        let scripts = extract_tox_commands(tmp.path(), "tox.ini").unwrap();
        assert_eq!(scripts.lint[0].command, "tox -e flake8");
    }

    #[test]
    fn test_other_envs_never_inferred() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("tox.ini"),
            "[tox]\nenvlist = py311,docs,typecheck\n",
        )
        .unwrap();

        let scripts = extract_tox_commands(tmp.path(), "tox.ini").unwrap();
        assert_eq!(scripts.test.len(), 1);
        assert!(scripts.lint.is_empty());
    }
}
