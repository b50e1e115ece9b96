//! Notebook presence detection and pre-commit hygiene probing.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use crate::extract::read_text_capped;

pub const NOTEBOOK_CENTRIC_NOTE: &str =
    "Notebook-centric repo detected; core logic may reside in Jupyter notebooks.";

pub const NOTEBOOK_HYGIENE_DESC: &str =
    "Pre-commit hooks configuration (includes notebook hygiene hooks).";

const NOTEBOOK_HYGIENE_MARKERS: &[&str] = &["nbstripout", "nb-clean", "jupyter-notebook-cleanup"];

/// Sorted, deduplicated directories containing `*.ipynb` files; the repo
/// root is represented as ".".
pub fn detect_notebook_dirs(all_files: &[String]) -> Vec<String> {
    let mut dirs: BTreeSet<String> = BTreeSet::new();
    for f in all_files {
        let rel = f.replace('\\', "/");
        if !rel.ends_with(".ipynb") {
            continue;
        }
        let dir = match rel.rsplit_once('/') {
            Some((dir, _)) => dir.to_string(),
            None => ".".to_string(),
        };
        dirs.insert(dir);
    }
    dirs.into_iter().collect()
}

/// Case-insensitive substring search for notebook hygiene hooks in a
/// pre-commit config. Size-capped; any read problem means "not found".
pub fn precommit_has_notebook_hygiene(root: &Path, rel: &str) -> bool {
    let text = match read_text_capped(&root.join(rel), rel) {
        Ok(Some(text)) => text.to_lowercase(),
        Ok(None) => return false,
        Err(e) => {
            debug!(file = rel, error = %e, "could not read pre-commit config");
            return false;
        }
    };
    NOTEBOOK_HYGIENE_MARKERS.iter().any(|m| text.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_notebook_dirs_sorted_deduplicated() {
        let files = vec![
            "notebooks/eda.ipynb".to_string(),
            "notebooks/train.ipynb".to_string(),
            "analysis.ipynb".to_string(),
            "src/demo/viz.ipynb".to_string(),
        ];
        assert_eq!(
            detect_notebook_dirs(&files),
            vec![".".to_string(), "notebooks".to_string(), "src/demo".to_string()]
        );
    }

    #[test]
    fn test_no_notebooks() {
        assert!(detect_notebook_dirs(&["main.py".to_string()]).is_empty());
    }

    #[test]
    fn test_hygiene_markers_detected_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".pre-commit-config.yaml"),
            "repos:\n  - repo: https://github.com/kynan/nbstripout\n    hooks:\n      - id: NBStripout\n",
        )
        .unwrap();
        assert!(precommit_has_notebook_hygiene(
            tmp.path(),
            ".pre-commit-config.yaml"
        ));
    }

    #[test]
    fn test_plain_precommit_config_has_no_hygiene() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".pre-commit-config.yaml"),
            "repos:\n  - repo: https://github.com/psf/black\n",
        )
        .unwrap();
        assert!(!precommit_has_notebook_hygiene(
            tmp.path(),
            ".pre-commit-config.yaml"
        ));
    }

    #[test]
    fn test_missing_config_is_false() {
        let tmp = TempDir::new().unwrap();
        assert!(!precommit_has_notebook_hygiene(
            tmp.path(),
            ".pre-commit-config.yaml"
        ));
    }
}
