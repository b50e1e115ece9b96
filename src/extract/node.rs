//! Node.js command extraction from package.json plus lockfiles.
//!
//! Package-manager selection: an explicit `packageManager` field wins
//! outright when it names a known tool; otherwise the first matching
//! lockfile in fixed precedence order (pnpm, yarn, bun, npm). Commands
//! are only ever built from scripts literally present in package.json.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::Value;

use crate::extract::{read_text_capped, ExtractError};
use crate::schema::{CommandInfo, Confidence, ScriptBucket, ScriptGroup};

struct PmStrategy {
    name: &'static str,
    lockfiles: &'static [&'static str],
    install_with_lock: &'static str,
    install_without_lock: &'static str,
}

/// Precedence order; npm last as the fallback.
const PM_STRATEGIES: &[PmStrategy] = &[
    PmStrategy {
        name: "pnpm",
        lockfiles: &["pnpm-lock.yaml"],
        install_with_lock: "pnpm install",
        install_without_lock: "pnpm install",
    },
    PmStrategy {
        name: "yarn",
        lockfiles: &["yarn.lock"],
        install_with_lock: "yarn install",
        install_without_lock: "yarn install",
    },
    PmStrategy {
        name: "bun",
        lockfiles: &["bun.lockb"],
        install_with_lock: "bun install",
        install_without_lock: "bun install",
    },
    PmStrategy {
        name: "npm",
        lockfiles: &["package-lock.json", "npm-shrinkwrap.json"],
        install_with_lock: "npm ci",
        install_without_lock: "npm install",
    },
];

impl PmStrategy {
    fn install_command(&self, has_lockfile: bool) -> &'static str {
        if has_lockfile {
            self.install_with_lock
        } else {
            self.install_without_lock
        }
    }

    fn run_command(&self, script: &str) -> String {
        format!("{} run {script}", self.name)
    }

    /// Lockfile next to the active package.json, or anywhere as a
    /// fallback for workspace layouts.
    fn has_lockfile(&self, ctx: &PmContext) -> bool {
        for lockfile in self.lockfiles {
            let expected = if ctx.pkg_dir.is_empty() {
                (*lockfile).to_string()
            } else {
                format!("{}/{lockfile}", ctx.pkg_dir)
            };
            if ctx.all_files.iter().any(|f| f == &expected) {
                return true;
            }
            if ctx.file_names.contains(*lockfile) {
                return true;
            }
        }
        false
    }
}

struct PmContext<'a> {
    all_files: &'a [String],
    file_names: BTreeSet<&'a str>,
    pkg_dir: String,
}

fn select_strategy(ctx: &PmContext, data: &Value) -> Option<(&'static PmStrategy, bool)> {
    if let Some(field) = data.get("packageManager").and_then(Value::as_str) {
        let field = field.trim();
        if !field.is_empty() {
            let name = field.split('@').next().unwrap_or("").trim().to_lowercase();
            if let Some(strategy) = PM_STRATEGIES.iter().find(|s| s.name == name) {
                return Some((strategy, strategy.has_lockfile(ctx)));
            }
        }
    }

    PM_STRATEGIES
        .iter()
        .find(|s| s.has_lockfile(ctx))
        .map(|s| (s, true))
}

const SCRIPT_KEYS: &[(&str, ScriptBucket)] = &[
    ("dev", ScriptBucket::Dev),
    ("start", ScriptBucket::Start),
    ("test", ScriptBucket::Test),
    ("lint", ScriptBucket::Lint),
    ("format", ScriptBucket::Format),
];

pub fn extract_node_package_json_commands(
    root: &Path,
    all_files: &[String],
) -> Result<ScriptGroup, ExtractError> {
    let norm: Vec<String> = all_files
        .iter()
        .map(|p| p.replace('\\', "/").trim_start_matches('/').to_string())
        .collect();
    let names: BTreeSet<&str> = norm
        .iter()
        .map(|p| p.rsplit('/').next().unwrap_or(p))
        .collect();

    let mut candidates: Vec<&String> = norm
        .iter()
        .filter(|p| p.rsplit('/').next() == Some("package.json"))
        .collect();
    if candidates.is_empty() {
        return Ok(ScriptGroup::default());
    }
    candidates.sort();
    // Root package.json preferred, else alphabetically first.
    let pkg_rel = if candidates.iter().any(|p| p.as_str() == "package.json") {
        "package.json".to_string()
    } else {
        candidates[0].clone()
    };
    let pkg_dir = match pkg_rel.rsplit_once('/') {
        Some((dir, _)) => dir.to_string(),
        None => String::new(),
    };

    let raw = match read_text_capped(&root.join(&pkg_rel), &pkg_rel)? {
        Some(raw) => raw,
        None => return Ok(ScriptGroup::default()),
    };
    let data: Value = serde_json::from_str(&raw)
        .map_err(|e| ExtractError::parse(&pkg_rel, e.to_string()))?;
    if !data.is_object() {
        return Ok(ScriptGroup::default());
    }

    let ctx = PmContext {
        all_files: &norm,
        file_names: names,
        pkg_dir,
    };
    let (strategy, has_lockfile) = match select_strategy(&ctx, &data) {
        Some(selected) => selected,
        None => return Ok(ScriptGroup::default()),
    };

    let mut out = ScriptGroup::default();
    out.install.push(
        CommandInfo::new(strategy.install_command(has_lockfile), format!("{pkg_rel}:lockfile"))
            .with_description("Install dependencies using the detected Node.js package manager.")
            .with_confidence(Confidence::Derived),
    );

    let scripts = data.get("scripts").and_then(Value::as_object);
    if let Some(scripts) = scripts {
        for (key, bucket) in SCRIPT_KEYS {
            if scripts.contains_key(*key) {
                out.bucket_mut(*bucket).push(
                    CommandInfo::new(strategy.run_command(key), format!("{pkg_rel}:scripts.{key}"))
                        .with_description(format!("Run the '{key}' script from package.json."))
                        .with_confidence(Confidence::Derived),
                );
            }
        }
    }

    Ok(out)
}
