//! Ranking scores for docs, configuration files and dependency manifests.
//!
//! Scores are used only for sort-then-cap ordering, never for inclusion.
//! The arithmetic is frozen: downstream consumers depend on the exact
//! ranking, including the deprioritized-directory penalty driving some
//! scores negative.

use std::cmp::Reverse;

const CONFIG_EXACT: &[(&str, i32)] = &[
    ("makefile", 300),
    ("justfile", 300),
    ("tox.ini", 200),
    ("noxfile.py", 200),
    (".pre-commit-config.yaml", 200),
    (".pre-commit-config.yml", 200),
    ("pytest.ini", 200),
];

const CONFIG_ROOT_BONUS: i32 = 100;

pub fn config_priority(path: &str) -> i32 {
    let p = norm(path);
    let name = basename(&p).to_lowercase();

    let mut score = 10;
    if p.starts_with(".github/workflows/") {
        score = 150;
    }

    let exact = CONFIG_EXACT
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, s)| *s)
        .unwrap_or(0);
    score = score.max(exact);

    if !p.contains('/') {
        score += CONFIG_ROOT_BONUS;
    }

    score
}

const DOC_ROOT_PREFIXES: &[&str] = &["readme", "contributing", "license", "security"];
const DOC_KEYWORDS: &[&str] = &["quickstart", "install", "setup", "tutorial"];
const DOC_PENALTY_DIRS: &[&str] = &["tests/", "test/", "examples/", "scripts/", "src/"];

pub fn doc_priority(path: &str) -> i32 {
    let p = norm(path);
    let lower = p.to_lowercase();
    let name = basename(&p).to_lowercase();

    let mut score = 50;

    if !p.contains('/') && DOC_ROOT_PREFIXES.iter().any(|pre| name.starts_with(pre)) {
        score = 300;
    }

    if score < 300 {
        if p.starts_with("docs/") && !p[5..].contains('/') {
            score = 250;
        } else if DOC_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            score = 200;
        } else if p.starts_with("docs/") {
            score = 150;
        }
    }

    if lower.contains("admin") {
        score -= 20;
    }

    // Substring match, not segment match: "tests/" anywhere in the path
    // triggers the penalty. Frozen behavior.
    if DOC_PENALTY_DIRS.iter().any(|seg| lower.contains(seg)) {
        score -= 200;
    }

    score
}

const DEP_PENALTY_DIRS: &[&str] = &["tests/", "test/", "examples/", "scripts/"];

pub fn dep_priority(path: &str) -> i32 {
    let p = norm(path);
    let lower = p.to_lowercase();
    let name = basename(&p).to_lowercase();

    let mut score = 100;

    let is_manifest = name == "pyproject.toml" || name.starts_with("requirements");
    if is_manifest {
        score = if p.contains('/') { 150 } else { 300 };
    }

    if DEP_PENALTY_DIRS.iter().any(|seg| lower.contains(seg)) {
        score -= 200;
    }

    score
}

/// Sorts paths by descending score, then ascending path. Stable across
/// runs regardless of input order.
pub fn rank_paths(paths: &mut Vec<String>, score: impl Fn(&str) -> i32) {
    paths.sort_by_key(|p| (Reverse(score(p)), p.clone()));
}

/// Dependency ordering: `requirements.txt` pinned first, then descending
/// dependency score, then path ascending.
pub fn rank_dependency_paths(paths: &mut Vec<String>) {
    paths.sort_by_key(|p| (p != "requirements.txt", Reverse(dep_priority(p)), p.clone()));
}

/// Caps a ranked list, returning a truncation note when entries were
/// dropped.
pub fn cap_with_note<T>(items: &mut Vec<T>, cap: usize, domain: &str) -> Option<String> {
    let total = items.len();
    if total <= cap {
        return None;
    }
    items.truncate(cap);
    Some(format!(
        "{domain} list truncated to {cap} entries (total={total})"
    ))
}

fn norm(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
