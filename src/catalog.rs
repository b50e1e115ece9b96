//! File classification catalog.
//!
//! Pure rules mapping a repo-relative path to a doc/dependency/config
//! category. The canonical config and dependency sets are authoritative and
//! must never overlap: a file appears in exactly one of
//! `configurationFiles` or `python.dependencyFiles`, never both.

use std::collections::BTreeSet;
use thiserror::Error;

/// Engine construction failures. These indicate a data-definition bug, not
/// a bad input repository, and are the only fatal errors in the system.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("config and dependency file sets overlap: {0:?}")]
    CategorySetsOverlap(Vec<String>),
}

/// Classification result for a single path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Doc,
    Dependency,
    Config,
}

const CONFIG_FILE_NAMES: &[&str] = &[
    "makefile",
    "tox.ini",
    "noxfile.py",
    ".pre-commit-config.yaml",
    ".pre-commit-config.yml",
    "pytest.ini",
    "pytest.cfg",
];

const DEPENDENCY_FILE_NAMES: &[&str] = &[
    "requirements.txt",
    "requirements-dev.txt",
    "requirements-server.txt",
    "pyproject.toml",
    "setup.py",
    "setup.cfg",
    "pipfile",
    "environment.yml",
    "environment.yaml",
];

const DOC_NAME_PREFIXES: &[&str] = &["readme", "contributing", "license", "security"];

/// Extensions that disqualify a doc candidate outright (binary assets and
/// web build artifacts that are never human onboarding text).
const BINARY_DOC_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "ico", "bmp", "webp", "zip", "tar", "gz", "tgz", "bz2",
    "xz", "7z", "woff", "woff2", "ttf", "otf", "eot", "mp3", "mp4", "mov", "avi", "webm", "css",
    "js", "map",
];

/// Extensions accepted for files under `docs/`.
const HUMAN_DOC_EXTENSIONS: &[&str] = &["md", "rst", "txt", "adoc"];

/// Classification rule set, built once per engine.
#[derive(Debug)]
pub struct Catalog {
    config_names: BTreeSet<&'static str>,
    dependency_names: BTreeSet<&'static str>,
}

impl Catalog {
    /// Builds the catalog, verifying the config/dependency disjointness
    /// invariant. A violation is fatal: it means the canonical sets were
    /// edited into an ambiguous state.
    pub fn new() -> Result<Self, EngineError> {
        let config_names: BTreeSet<&'static str> = CONFIG_FILE_NAMES.iter().copied().collect();
        let dependency_names: BTreeSet<&'static str> =
            DEPENDENCY_FILE_NAMES.iter().copied().collect();

        let overlap: Vec<String> = config_names
            .intersection(&dependency_names)
            .map(|s| s.to_string())
            .collect();
        if !overlap.is_empty() {
            return Err(EngineError::CategorySetsOverlap(overlap));
        }

        Ok(Self {
            config_names,
            dependency_names,
        })
    }

    /// Classify a repo-relative POSIX path. First match wins: doc rules,
    /// then dependency, then config.
    pub fn classify(&self, path: &str) -> Option<FileCategory> {
        let path = normalize(path);
        let name = basename(&path).to_lowercase();

        if self.is_doc(&path, &name) {
            return Some(FileCategory::Doc);
        }
        if self.is_dependency_name(&name) {
            return Some(FileCategory::Dependency);
        }
        if self.is_config(&path, &name) {
            return Some(FileCategory::Config);
        }
        None
    }

    pub fn is_dependency_file(&self, path: &str) -> bool {
        let path = normalize(path);
        let name = basename(&path).to_lowercase();
        self.is_dependency_name(&name)
    }

    fn is_doc(&self, path: &str, name: &str) -> bool {
        let named_doc = DOC_NAME_PREFIXES.iter().any(|p| name.starts_with(p));
        let under_docs = path.starts_with("docs/");
        if !named_doc && !under_docs {
            return false;
        }

        let is_root = !path.contains('/');
        let always_kept =
            is_root && (name.starts_with("readme") || name.starts_with("contributing"));
        if always_kept {
            return true;
        }

        if let Some(ext) = extension(name) {
            if BINARY_DOC_EXTENSIONS.contains(&ext) {
                return false;
            }
        }

        if under_docs {
            return matches!(extension(name), Some(ext) if HUMAN_DOC_EXTENSIONS.contains(&ext));
        }

        true
    }

    fn is_dependency_name(&self, name: &str) -> bool {
        self.dependency_names.contains(name)
            || (name.starts_with("requirements")
                && (name.ends_with(".txt") || name.ends_with(".in")))
    }

    fn is_config(&self, path: &str, name: &str) -> bool {
        if self.config_names.contains(name) {
            return true;
        }
        path.starts_with(".github/workflows/")
            && (name.ends_with(".yml") || name.ends_with(".yaml"))
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn extension(name: &str) -> Option<&str> {
    // Leading-dot names like ".gitignore" have no extension.
    let trimmed = name.trim_start_matches('.');
    trimmed.rsplit_once('.').map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    fn catalog() -> Catalog {
        Catalog::new().unwrap()
    }

    #[test]
    fn test_sets_are_disjoint() {
        assert!(Catalog::new().is_ok());
    }

    #[parameterized(
        readme = { "README.md" },
        contributing = { "CONTRIBUTING.rst" },
        license = { "LICENSE" },
        security = { "SECURITY.md" },
        docs_child = { "docs/install.md" },
        docs_nested = { "docs/guide/usage.rst" },
    )]
    fn test_doc_classification(path: &str) {
        assert_eq!(catalog().classify(path), Some(FileCategory::Doc));
    }

    #[parameterized(
        requirements = { "requirements.txt" },
        requirements_in = { "requirements-ci.in" },
        pyproject = { "pyproject.toml" },
        setup_py = { "setup.py" },
        pipfile = { "Pipfile" },
        conda_env = { "environment.yml" },
        nested = { "backend/requirements.txt" },
    )]
    fn test_dependency_classification(path: &str) {
        assert_eq!(catalog().classify(path), Some(FileCategory::Dependency));
    }

    #[parameterized(
        makefile = { "Makefile" },
        tox = { "tox.ini" },
        noxfile = { "noxfile.py" },
        precommit = { ".pre-commit-config.yaml" },
        precommit_yml = { ".pre-commit-config.yml" },
        pytest_ini = { "pytest.ini" },
        workflow = { ".github/workflows/ci.yml" },
        workflow_yaml = { ".github/workflows/release.yaml" },
    )]
    fn test_config_classification(path: &str) {
        assert_eq!(catalog().classify(path), Some(FileCategory::Config));
    }

    #[parameterized(
        source = { "src/main.py" },
        workflow_elsewhere = { "ci/pipeline.yml" },
        random = { "data.csv" },
    )]
    fn test_unclassified(path: &str) {
        assert_eq!(catalog().classify(path), None);
    }

    #[test]
    fn test_pyproject_is_dependency_not_config() {
        // Disjointness in action: pyproject.toml must land in exactly one
        // category, and that category is dependency.
        let c = catalog();
        assert_eq!(c.classify("pyproject.toml"), Some(FileCategory::Dependency));
        assert!(c.is_dependency_file("pyproject.toml"));
    }

    #[test]
    fn test_docs_tree_restricted_to_human_extensions() {
        let c = catalog();
        assert_eq!(c.classify("docs/logo.png"), None);
        assert_eq!(c.classify("docs/site.css"), None);
        assert_eq!(c.classify("docs/app.js"), None);
        assert_eq!(c.classify("docs/openapi.json"), None);
        assert_eq!(c.classify("docs/notes.txt"), Some(FileCategory::Doc));
        assert_eq!(c.classify("docs/intro.adoc"), Some(FileCategory::Doc));
    }

    #[test]
    fn test_root_readme_kept_regardless_of_extension() {
        let c = catalog();
        assert_eq!(c.classify("README.png"), Some(FileCategory::Doc));
        // Non-root copies do get the binary filter.
        assert_eq!(c.classify("sub/README.png"), None);
        assert_eq!(c.classify("sub/README.md"), Some(FileCategory::Doc));
    }

    #[test]
    fn test_doc_rule_wins_over_dependency_rule() {
        // A hypothetical docs/requirements.txt is a doc (first match wins).
        assert_eq!(
            catalog().classify("docs/requirements.txt"),
            Some(FileCategory::Doc)
        );
    }
}
