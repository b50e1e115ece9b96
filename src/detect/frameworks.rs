//! Framework detection from dependency manifests.
//!
//! Three detectors run in order: pyproject classifiers, Poetry dependency
//! keys, and explicit package names in requirements files. All are
//! evidence-only; detection never implies a runnable command. Results are
//! merged by framework name (last detector wins) and sorted.

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use toml::Value;
use tracing::debug;

use crate::extract::{load_pyproject, read_text_capped};
use crate::schema::{FrameworkInfo, PythonEnvFile};

trait FrameworkDetector {
    fn detect(
        &self,
        root: &Path,
        dep_files: &[PythonEnvFile],
        pyproject: Option<&Value>,
    ) -> Vec<FrameworkInfo>;
}

struct ClassifierDetector;

/// Trove classifier prefixes mapped to framework names.
const CLASSIFIER_REGISTRY: &[(&str, &str)] =
    &[("Django", "Framework :: Django"), ("Wagtail", "Framework :: Wagtail")];

impl FrameworkDetector for ClassifierDetector {
    fn detect(
        &self,
        _root: &Path,
        _dep_files: &[PythonEnvFile],
        pyproject: Option<&Value>,
    ) -> Vec<FrameworkInfo> {
        let data = match pyproject {
            Some(data) => data,
            None => return Vec::new(),
        };

        let mut classifiers: Vec<&str> = Vec::new();
        for path in [&["project", "classifiers"][..], &["tool", "poetry", "classifiers"][..]] {
            let mut node = Some(data);
            for key in path {
                node = node.and_then(|v| v.get(key));
            }
            if let Some(list) = node.and_then(Value::as_array) {
                classifiers.extend(list.iter().filter_map(Value::as_str));
            }
        }
        if classifiers.is_empty() {
            return Vec::new();
        }

        let mut found = Vec::new();
        for (name, prefix) in CLASSIFIER_REGISTRY {
            let matched = classifiers.iter().any(|c| {
                let c = c.trim();
                c == *prefix || c.starts_with(&format!("{prefix} :: "))
            });
            if matched {
                found.push(FrameworkInfo {
                    name: (*name).to_string(),
                    detection_reason: "Detected via pyproject.toml classifiers".to_string(),
                    key_symbols: vec![(*prefix).to_string()],
                    evidence_path: "pyproject.toml".to_string(),
                });
            }
        }
        found
    }
}

struct PoetryDependencyDetector;

const POETRY_DEP_REGISTRY: &[(&str, &str)] =
    &[("Flask", "flask"), ("Django", "django"), ("FastAPI", "fastapi")];

impl FrameworkDetector for PoetryDependencyDetector {
    fn detect(
        &self,
        _root: &Path,
        _dep_files: &[PythonEnvFile],
        pyproject: Option<&Value>,
    ) -> Vec<FrameworkInfo> {
        let deps = match pyproject
            .and_then(|d| d.get("tool"))
            .and_then(|t| t.get("poetry"))
            .and_then(|p| p.get("dependencies"))
            .and_then(Value::as_table)
        {
            Some(deps) => deps,
            None => return Vec::new(),
        };

        let mut found = Vec::new();
        for (name, key) in POETRY_DEP_REGISTRY {
            let dep = match deps.get(*key) {
                Some(dep) => dep,
                None => continue,
            };
            let optional = dep
                .get("optional")
                .and_then(Value::as_bool)
                .unwrap_or(false);

            let mut reason =
                format!("Detected via pyproject.toml (Poetry) dependency key '{key}'.");
            if optional {
                reason.push_str(" (optional)");
            }
            found.push(FrameworkInfo {
                name: (*name).to_string(),
                detection_reason: reason,
                key_symbols: vec![format!("tool.poetry.dependencies.{key}")],
                evidence_path: "pyproject.toml".to_string(),
            });
        }
        found
    }
}

struct RequirementsDetector;

const REQUIREMENTS_REGISTRY: &[&str] = &["Streamlit", "Gradio", "FastAPI", "Flask", "Django"];

/// Conservative requirement-line parser: comments, includes, options,
/// editable installs and URLs are skipped; only the leading distribution
/// name token is taken, extras stripped.
fn extract_requirement_names(text: &str, name_re: &Regex) -> Vec<String> {
    let mut out = Vec::new();
    for raw in text.lines() {
        let mut line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((head, _)) = line.split_once(" #") {
            line = head.trim();
        }

        let low = line.to_lowercase();
        if low.starts_with("-r ")
            || low.starts_with("--requirement")
            || low.starts_with("-c ")
            || low.starts_with("--constraint")
            || low.starts_with("--")
            || low.starts_with("-e ")
        {
            continue;
        }
        if low.contains("://")
            || low.starts_with("git+")
            || low.starts_with("svn+")
            || low.starts_with("hg+")
            || low.starts_with("bzr+")
        {
            continue;
        }
        if low.starts_with('.') || low.starts_with('/') {
            continue;
        }

        let line = line.split(';').next().unwrap_or(line).trim();
        let name = match name_re.find(line) {
            Some(m) => m.as_str(),
            None => continue,
        };
        let name = name.split('[').next().unwrap_or(name).trim();
        if name.is_empty() {
            continue;
        }
        let normalized = name.to_lowercase().replace(['_', '.'], "-");
        if !out.contains(&normalized) {
            out.push(normalized);
        }
    }
    out
}

impl FrameworkDetector for RequirementsDetector {
    fn detect(
        &self,
        root: &Path,
        dep_files: &[PythonEnvFile],
        _pyproject: Option<&Value>,
    ) -> Vec<FrameworkInfo> {
        let name_re = match Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*") {
            Ok(re) => re,
            Err(_) => return Vec::new(),
        };

        let req_paths: Vec<&str> = dep_files
            .iter()
            .map(|d| d.path.as_str())
            .filter(|p| {
                let name = p.rsplit('/').next().unwrap_or(p).to_lowercase();
                name.starts_with("requirements") && (name.ends_with(".txt") || name.ends_with(".in"))
            })
            .collect();

        let mut found: BTreeMap<&str, FrameworkInfo> = BTreeMap::new();
        for rel in req_paths {
            let text = match read_text_capped(&root.join(rel), rel) {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(e) => {
                    debug!(file = rel, error = %e, "skipping unreadable requirements file");
                    continue;
                }
            };
            let names = extract_requirement_names(&text, &name_re);
            for fw in REQUIREMENTS_REGISTRY {
                let key = fw.to_lowercase();
                if names.iter().any(|n| n == &key) && !found.contains_key(fw) {
                    let basename = rel.rsplit('/').next().unwrap_or(rel);
                    found.insert(
                        fw,
                        FrameworkInfo {
                            name: (*fw).to_string(),
                            detection_reason: format!(
                                "Detected via {basename} dependency '{key}'."
                            ),
                            key_symbols: vec![format!("{basename}:{key}")],
                            evidence_path: rel.to_string(),
                        },
                    );
                }
            }
        }
        found.into_values().collect()
    }
}

/// Runs every registered detector and merges results by framework name,
/// sorted for determinism. Detector failures degrade to no evidence.
pub fn detect_frameworks(root: &Path, dep_files: &[PythonEnvFile]) -> Vec<FrameworkInfo> {
    let pyproject = match load_pyproject(root) {
        Ok(data) => data,
        Err(e) => {
            debug!(error = %e, "pyproject.toml unavailable for framework detection");
            None
        }
    };

    let detectors: [&dyn FrameworkDetector; 3] = [
        &ClassifierDetector,
        &PoetryDependencyDetector,
        &RequirementsDetector,
    ];

    let mut merged: BTreeMap<String, FrameworkInfo> = BTreeMap::new();
    for detector in detectors {
        for fw in detector.detect(root, dep_files, pyproject.as_ref()) {
            merged.insert(fw.name.clone(), fw);
        }
    }
    merged.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn env_file(path: &str) -> PythonEnvFile {
        PythonEnvFile {
            path: path.to_string(),
            file_type: path.rsplit('/').next().unwrap_or(path).to_lowercase(),
            description: None,
        }
    }

    #[test]
    fn test_classifier_detection() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("pyproject.toml"),
            "[project]\nname = \"site\"\nclassifiers = [\"Framework :: Django :: 5.0\"]\n",
        )
        .unwrap();

        let frameworks = detect_frameworks(tmp.path(), &[]);
        assert_eq!(frameworks.len(), 1);
        assert_eq!(frameworks[0].name, "Django");
        assert_eq!(
            frameworks[0].detection_reason,
            "Detected via pyproject.toml classifiers"
        );
        assert_eq!(frameworks[0].evidence_path, "pyproject.toml");
    }

    #[test]
    fn test_poetry_dependency_detection_with_optional() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("pyproject.toml"),
            "[tool.poetry.dependencies]\npython = \"^3.11\"\nflask = { version = \"^3.0\", optional = true }\nfastapi = \"^0.110\"\n",
        )
        .unwrap();

        let frameworks = detect_frameworks(tmp.path(), &[]);
        let names: Vec<&str> = frameworks.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["FastAPI", "Flask"]);
        let flask = frameworks.iter().find(|f| f.name == "Flask").unwrap();
        assert!(flask.detection_reason.ends_with("(optional)"));
    }

    #[test]
    fn test_requirements_detection() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("requirements.txt"),
            "# web\nstreamlit==1.30.0\nrequests>=2.0  # http client\n-r requirements-dev.txt\n",
        )
        .unwrap();

        let frameworks = detect_frameworks(tmp.path(), &[env_file("requirements.txt")]);
        assert_eq!(frameworks.len(), 1);
        assert_eq!(frameworks[0].name, "Streamlit");
        assert_eq!(
            frameworks[0].detection_reason,
            "Detected via requirements.txt dependency 'streamlit'."
        );
        assert_eq!(frameworks[0].key_symbols, vec!["requirements.txt:streamlit"]);
    }

    #[test]
    fn test_requirement_name_parsing_is_conservative() {
        let re = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*").unwrap();
        let names = extract_requirement_names(
            "Django[argon2]>=5.0 ; python_version > '3.10'\ngit+https://github.com/x/y\n-e .\n./local-pkg\nFlask_Login==0.6\n",
            &re,
        );
        assert_eq!(
            names,
            vec!["django".to_string(), "flask-login".to_string()]
        );
    }

    #[test]
    fn test_detectors_merge_by_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("pyproject.toml"),
            "[tool.poetry.dependencies]\ndjango = \"^5.0\"\n",
        )
        .unwrap();
        fs::write(tmp.path().join("requirements.txt"), "django==5.0\n").unwrap();

        let frameworks = detect_frameworks(tmp.path(), &[env_file("requirements.txt")]);
        assert_eq!(frameworks.len(), 1);
        // Later detector (requirements) wins the merge.
        assert_eq!(
            frameworks[0].detection_reason,
            "Detected via requirements.txt dependency 'django'."
        );
    }

    #[test]
    fn test_no_evidence_no_frameworks() {
        let tmp = TempDir::new().unwrap();
        assert!(detect_frameworks(tmp.path(), &[]).is_empty());
    }
}
