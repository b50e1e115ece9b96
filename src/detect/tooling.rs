//! Non-Python tooling evidence and primary-tooling scoring.
//!
//! Detection is static and presence-based: no file content reads, no
//! subprocesses, and never any runnable-command text in notes.

use std::collections::BTreeMap;

use crate::schema::{Confidence, ToolingInfo};

struct ToolingEvidence {
    name: &'static str,
    files: &'static [&'static str],
    note: &'static str,
}

const TOOLING_EVIDENCE_REGISTRY: &[ToolingEvidence] = &[
    ToolingEvidence {
        name: "Node.js",
        files: &[
            "package.json",
            "package-lock.json",
            "yarn.lock",
            "pnpm-lock.yaml",
            ".nvmrc",
            ".node-version",
            ".npmrc",
        ],
        note: "Node.js tooling detected. See package.json for details.",
    },
    ToolingEvidence {
        name: "Go",
        files: &["go.mod", "go.sum"],
        note: "Go module detected.",
    },
    ToolingEvidence {
        name: "Rust",
        files: &["Cargo.toml", "Cargo.lock"],
        note: "Rust crate detected.",
    },
    ToolingEvidence {
        name: "Ruby",
        files: &["Gemfile", "Gemfile.lock", ".ruby-version"],
        note: "Ruby project detected.",
    },
    ToolingEvidence {
        name: "Java",
        files: &[
            "pom.xml",
            "build.gradle",
            "build.gradle.kts",
            "settings.gradle",
            "settings.gradle.kts",
        ],
        note: "Java/JVM project detected.",
    },
    ToolingEvidence {
        name: "Docker",
        files: &[
            "Dockerfile",
            "docker-compose.yml",
            "docker-compose.yaml",
            "compose.yml",
            "compose.yaml",
        ],
        note: "Docker configuration detected.",
    },
];

/// One record per ecosystem with any evidence, sorted by name. Evidence
/// paths keep the first-occurrence repo path per basename, sorted.
pub fn detect_other_tooling(all_files: &[String]) -> Vec<ToolingInfo> {
    let mut by_lower_name: BTreeMap<String, &String> = BTreeMap::new();
    for f in all_files {
        let name = f.rsplit('/').next().unwrap_or(f).to_lowercase();
        by_lower_name.entry(name).or_insert(f);
    }

    let mut detections: Vec<ToolingInfo> = Vec::new();
    for entry in TOOLING_EVIDENCE_REGISTRY {
        let mut found: Vec<String> = entry
            .files
            .iter()
            .filter_map(|ev| by_lower_name.get(&ev.to_lowercase()).map(|p| (*p).clone()))
            .collect();
        if found.is_empty() {
            continue;
        }
        found.sort();
        detections.push(ToolingInfo {
            name: entry.name.to_string(),
            evidence_files: found,
            confidence: Confidence::Detected,
            note: Some(entry.note.to_string()),
        });
    }

    detections.sort_by(|a, b| a.name.cmp(&b.name));
    detections
}

const NODE_LOCKFILES: &[&str] = &[
    "package-lock.json",
    "npm-shrinkwrap.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
];
const NODE_AUX_FILES: &[&str] = &[".nvmrc", ".node-version", ".npmrc"];

const MANIFEST_WEIGHT: u32 = 3;
const LOCKFILE_WEIGHT: u32 = 2;
const AUX_WEIGHT: u32 = 1;

/// Additive evidence scoring between the Python and Node.js ecosystems.
/// Pure function of the evidence set: strictly higher score wins, exact
/// ties resolve to Python, zero evidence yields "Unknown".
pub fn determine_primary_tooling(
    python_file_count: usize,
    dependency_file_count: usize,
    all_files: &[String],
) -> String {
    let names: Vec<String> = all_files
        .iter()
        .map(|f| f.rsplit('/').next().unwrap_or(f).to_lowercase())
        .collect();
    let has = |name: &str| names.iter().any(|n| n == &name.to_lowercase());

    let mut python = 0;
    if dependency_file_count > 0 {
        python += MANIFEST_WEIGHT;
    }
    if python_file_count > 0 {
        python += AUX_WEIGHT;
    }

    let mut node = 0;
    if has("package.json") {
        node += MANIFEST_WEIGHT;
    }
    for lockfile in NODE_LOCKFILES {
        if has(lockfile) {
            node += LOCKFILE_WEIGHT;
        }
    }
    for aux in NODE_AUX_FILES {
        if has(aux) {
            node += AUX_WEIGHT;
        }
    }

    if python == 0 && node == 0 {
        "Unknown".to_string()
    } else if node > python {
        "Node.js".to_string()
    } else {
        "Python".to_string()
    }
}
