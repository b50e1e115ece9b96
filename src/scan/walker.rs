//! Breadth-first repository walk plus the targeted signal-file probe.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::TARGETED_ROOT_FILES;
use crate::scan::IgnoreMatcher;

/// Root-relative paths accepted by the broad scan.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub all_files: Vec<String>,
    pub python_files: Vec<String>,
}

/// Two-phase breadth-first scan. Phase one enumerates the root's direct
/// entries; phase two drains the directory queue in FIFO order. Entries
/// within each directory are processed in name order so the accepted set
/// is stable under the `max_files` cap regardless of filesystem iteration
/// order. OS errors skip the affected subtree and never abort the scan.
pub fn scan_repo_files(root: &Path, ignore: &IgnoreMatcher, max_files: usize) -> ScanResult {
    let mut result = ScanResult::default();

    let entries = match sorted_entries(root) {
        Some(entries) => entries,
        None => return result,
    };

    let mut queue: VecDeque<PathBuf> = VecDeque::new();
    for (path, is_dir) in entries {
        if ignore.should_ignore(&path, is_dir) {
            continue;
        }
        if is_dir {
            queue.push_back(path);
        } else if let Some(name) = path.file_name() {
            accept(&mut result, name.to_string_lossy().into_owned());
        }
    }

    while let Some(current) = queue.pop_front() {
        if result.all_files.len() >= max_files {
            break;
        }
        let entries = match sorted_entries(&current) {
            Some(entries) => entries,
            None => continue,
        };
        for (path, is_dir) in entries {
            if result.all_files.len() >= max_files {
                break;
            }
            if ignore.should_ignore(&path, is_dir) {
                continue;
            }
            if is_dir {
                queue.push_back(path);
            } else {
                match relative_posix(root, &path) {
                    Some(rel) => accept(&mut result, rel),
                    None => debug!(path = %path.display(), "skipping path outside root"),
                }
            }
        }
    }

    result
}

/// Probes a fixed allow-list of signal files, bypassing gitignore but not
/// the safety deny-list. Critical onboarding files must be found even when
/// a repository's own `.gitignore` hides them.
pub fn targeted_scan(root: &Path, ignore: &IgnoreMatcher) -> Vec<String> {
    let mut found = Vec::new();

    for name in TARGETED_ROOT_FILES {
        let path = root.join(name);
        if path.is_file() && !ignore.safety_ignored(&path, false) {
            found.push((*name).to_string());
        }
    }

    if let Some(entries) = sorted_entries(root) {
        for (path, is_dir) in entries {
            if is_dir {
                continue;
            }
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if name.starts_with("requirements")
                && name.ends_with(".txt")
                && !ignore.safety_ignored(&path, false)
            {
                found.push(name);
            }
        }
    }

    let workflows = root.join(".github/workflows");
    if workflows.is_dir() {
        if let Some(entries) = sorted_entries(&workflows) {
            for (path, is_dir) in entries {
                if is_dir {
                    continue;
                }
                let is_yml = path
                    .extension()
                    .map(|e| e.eq_ignore_ascii_case("yml"))
                    .unwrap_or(false);
                if is_yml && !ignore.safety_ignored(&path, false) {
                    if let Some(rel) = relative_posix(root, &path) {
                        found.push(rel);
                    }
                }
            }
        }
    }

    found
}

fn accept(result: &mut ScanResult, rel: String) {
    if rel.ends_with(".py") {
        result.python_files.push(rel.clone());
    }
    result.all_files.push(rel);
}

fn sorted_entries(dir: &Path) -> Option<Vec<(PathBuf, bool)>> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "error scanning directory");
            return None;
        }
    };

    let mut entries: Vec<(PathBuf, bool)> = Vec::new();
    for entry in read {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                let is_dir = path.is_dir();
                entries.push((path, is_dir));
            }
            Err(e) => warn!(dir = %dir.display(), error = %e, "error reading directory entry"),
        }
    }
    entries.sort_by_key(|(path, _)| path.file_name().map(|n| n.to_os_string()));
    Some(entries)
}

fn relative_posix(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    Some(
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
    )
}
