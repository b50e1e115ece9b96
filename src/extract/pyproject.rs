//! pyproject.toml metadata extraction and version-hint classification.

use std::path::Path;

use toml::Value;

use crate::extract::{read_text_capped, ExtractError};

/// Tool-table keys that evidence a Python package manager.
const KNOWN_PACKAGE_MANAGERS: &[(&str, &str)] = &[
    ("poetry", "poetry"),
    ("hatch", "hatch"),
    ("pdm", "pdm"),
    ("flit", "flit"),
];

#[derive(Debug, Default)]
pub struct PyprojectMetadata {
    pub python_version: Option<String>,
    pub package_managers: Vec<String>,
    pub build_backend: Option<String>,
}

/// Loads and parses the root pyproject.toml, size-capped. `Ok(None)` when
/// absent or oversized.
pub fn load_pyproject(root: &Path) -> Result<Option<Value>, ExtractError> {
    let rel = "pyproject.toml";
    let raw = match read_text_capped(&root.join(rel), rel)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let value: Value = raw
        .parse()
        .map_err(|e: toml::de::Error| ExtractError::parse(rel, e.to_string()))?;
    Ok(Some(value))
}

/// Pulls `[project].requires-python`, `[build-system].build-backend` and
/// package-manager evidence from `[tool.*]` keys and the backend string.
pub fn extract_pyproject_metadata(data: &Value) -> PyprojectMetadata {
    let mut meta = PyprojectMetadata {
        python_version: data
            .get("project")
            .and_then(|p| p.get("requires-python"))
            .and_then(Value::as_str)
            .map(str::to_string),
        build_backend: data
            .get("build-system")
            .and_then(|b| b.get("build-backend"))
            .and_then(Value::as_str)
            .map(str::to_string),
        package_managers: Vec::new(),
    };

    let tools = data.get("tool").and_then(Value::as_table);
    let backend_lower = meta
        .build_backend
        .as_deref()
        .unwrap_or("")
        .to_lowercase();

    for (key, manager) in KNOWN_PACKAGE_MANAGERS {
        let in_tools = tools.map(|t| t.contains_key(*key)).unwrap_or(false);
        let in_backend = backend_lower.contains(key);
        if (in_tools || in_backend) && !meta.package_managers.iter().any(|m| m == manager) {
            meta.package_managers.push((*manager).to_string());
        }
    }

    meta
}

/// Classifies a `requires-python` style hint as an exact pin or a range.
/// Returns `(pin, comment)`: exactly one side is populated, except for an
/// empty hint which yields only the comment.
pub fn classify_python_version(hint: &str) -> (Option<String>, Option<String>) {
    let hint = hint.trim();
    if hint.is_empty() || hint == "*" {
        return (None, Some("Any Python version".to_string()));
    }

    // Implicit pin, e.g. "3.10".
    if hint.starts_with(|c: char| c.is_ascii_digit()) {
        return (Some(hint.to_string()), None);
    }

    let specs: Option<Vec<(&str, &str)>> = hint
        .split(',')
        .map(|s| split_specifier(s.trim()))
        .collect();
    let specs = match specs {
        Some(specs) => specs,
        None => return (None, Some(format!("Version requirement: {hint}"))),
    };

    if let Some((_, version)) = specs.iter().find(|(op, _)| *op == "==") {
        return (Some((*version).to_string()), None);
    }

    let mut comment = format!("Requires Python {hint}");
    if hint.contains("~=") {
        let base = hint.replace("~=", "");
        let base = base.trim();
        let parts: Vec<&str> = base.split('.').collect();
        if parts.len() >= 2 {
            comment = format!("Compatible with {}.x", parts[..parts.len() - 1].join("."));
        }
    }
    (None, Some(comment))
}

fn split_specifier(spec: &str) -> Option<(&str, &str)> {
    for op in ["===", "==", "~=", "!=", ">=", "<=", ">", "<"] {
        if let Some(rest) = spec.strip_prefix(op) {
            let version = rest.trim();
            if version.is_empty() {
                return None;
            }
            return Some((op, version));
        }
    }
    None
}
