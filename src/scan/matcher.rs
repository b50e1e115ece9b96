//! Two-tier path exclusion.
//!
//! Safety patterns are evaluated first and cannot be overridden by
//! anything in `.gitignore`, including negations. Any path that fails to
//! resolve inside the repository root is treated as ignored.

use std::path::{Path, PathBuf};

use ::ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, warn};

use crate::config::SAFETY_IGNORES;

pub struct IgnoreMatcher {
    root: PathBuf,
    safety: Vec<String>,
    gitignore: Option<Gitignore>,
}

impl IgnoreMatcher {
    /// Builds the matcher for a repository root. Gitignore sources are
    /// `.gitignore` and `.git/info/exclude`; a missing or unreadable file
    /// degrades to no gitignore rules.
    pub fn new(root: &Path) -> Self {
        let root = root.canonicalize().unwrap_or_else(|e| {
            warn!(root = %root.display(), error = %e, "failed to canonicalize repo root");
            root.to_path_buf()
        });

        let safety = SAFETY_IGNORES
            .iter()
            .map(|p| p.trim_end_matches('/').to_string())
            .collect();

        let mut builder = GitignoreBuilder::new(&root);
        let mut any_source = false;
        for source in [root.join(".gitignore"), root.join(".git/info/exclude")] {
            if source.is_file() {
                any_source = true;
                if let Some(e) = builder.add(&source) {
                    warn!(file = %source.display(), error = %e, "failed to read ignore file");
                }
            }
        }
        let gitignore = if any_source {
            match builder.build() {
                Ok(gi) => Some(gi),
                Err(e) => {
                    warn!(error = %e, "failed to compile gitignore rules");
                    None
                }
            }
        } else {
            None
        };

        Self {
            root,
            safety,
            gitignore,
        }
    }

    /// Full exclusion check: safety patterns first, then gitignore.
    pub fn should_ignore(&self, path: &Path, is_dir: bool) -> bool {
        let rel = match self.relative(path, is_dir) {
            Some(rel) => rel,
            // Fail closed: a path that escapes the root (symlink, OS
            // error) must never be scanned.
            None => return true,
        };

        if self.matches_safety(&rel) {
            return true;
        }

        if let Some(gi) = &self.gitignore {
            let bare = rel.trim_end_matches('/');
            return gi
                .matched_path_or_any_parents(Path::new(bare), is_dir)
                .is_ignore();
        }

        false
    }

    /// Safety-only check, used by the targeted scan which deliberately
    /// bypasses gitignore but never the deny-list.
    pub fn safety_ignored(&self, path: &Path, is_dir: bool) -> bool {
        match self.relative(path, is_dir) {
            Some(rel) => self.matches_safety(&rel),
            None => true,
        }
    }

    pub fn should_descend(&self, dir: &Path) -> bool {
        !self.should_ignore(dir, true)
    }

    fn matches_safety(&self, rel: &str) -> bool {
        let slashed = format!("/{rel}");
        for si in &self.safety {
            if slashed.contains(&format!("/{si}/")) {
                return true;
            }
            if rel.starts_with(&format!("{si}/")) || rel == si {
                return true;
            }
        }
        false
    }

    /// Root-relative POSIX string with a trailing `/` for directories, or
    /// `None` when the path cannot be proven to live under the root.
    fn relative(&self, path: &Path, is_dir: bool) -> Option<String> {
        let resolved = match path.canonicalize() {
            Ok(p) => p,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "path resolution failed, ignoring");
                return None;
            }
        };
        let rel = resolved.strip_prefix(&self.root).ok()?;

        let mut out = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if is_dir && !out.ends_with('/') {
            out.push('/');
        }
        Some(out)
    }
}
