//! Python version hints from GitHub Actions workflows.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use regex::Regex;
use tracing::debug;

/// Scans `.github/workflows/*.yml` for `PYTHON_VERSION:` and
/// `python-version:` values. CI variable references and anything that is
/// not an exact `X.Y` or `X.Y.Z` literal are discarded; results are
/// sorted and deduplicated.
pub fn detect_workflow_python_versions(root: &Path) -> Vec<String> {
    let workflows = root.join(".github/workflows");
    if !workflows.is_dir() {
        return Vec::new();
    }

    let (key_re, exact_re) = match (
        Regex::new(r#"(?:PYTHON_VERSION|python-version):\s*["']?([\d.]+)"#),
        Regex::new(r"^\d+\.\d+(?:\.\d+)?$"),
    ) {
        (Ok(a), Ok(b)) => (a, b),
        _ => return Vec::new(),
    };

    let entries = match fs::read_dir(&workflows) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %workflows.display(), error = %e, "cannot read workflows dir");
            return Vec::new();
        }
    };

    let mut versions: BTreeSet<String> = BTreeSet::new();
    for entry in entries.flatten() {
        let path = entry.path();
        let is_yml = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);
        if !path.is_file() || !is_yml {
            continue;
        }
        let content = match fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                debug!(file = %path.display(), error = %e, "failed to read workflow");
                continue;
            }
        };
        for captures in key_re.captures_iter(&content) {
            let value = &captures[1];
            if exact_re.is_match(value) {
                versions.insert(value.to_string());
            }
        }
    }

    versions.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo_with_workflow(name: &str, contents: &str) -> TempDir {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".github/workflows");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), contents).unwrap();
        tmp
    }

    #[test]
    fn test_env_and_step_keys_collected() {
        let tmp = repo_with_workflow(
            "ci.yml",
            "env:\n  PYTHON_VERSION: \"3.11\"\njobs:\n  test:\n    steps:\n      - uses: actions/setup-python@v5\n        with:\n          python-version: '3.12.1'\n",
        );
        assert_eq!(
            detect_workflow_python_versions(tmp.path()),
            vec!["3.11".to_string(), "3.12.1".to_string()]
        );
    }

    #[test]
    fn test_variable_references_and_ranges_discarded() {
        let tmp = repo_with_workflow(
            "ci.yml",
            "steps:\n  - with:\n      python-version: ${{ matrix.python }}\n  - with:\n      python-version: '3'\n",
        );
        assert!(detect_workflow_python_versions(tmp.path()).is_empty());
    }

    #[test]
    fn test_duplicates_deduplicated_sorted() {
        let tmp = repo_with_workflow("a.yml", "python-version: '3.11'\n");
        fs::write(
            tmp.path().join(".github/workflows/b.yml"),
            "PYTHON_VERSION: 3.10\npython-version: \"3.11\"\n",
        )
        .unwrap();
        assert_eq!(
            detect_workflow_python_versions(tmp.path()),
            vec!["3.10".to_string(), "3.11".to_string()]
        );
    }

    #[test]
    fn test_no_workflows_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(detect_workflow_python_versions(tmp.path()).is_empty());
    }
}
