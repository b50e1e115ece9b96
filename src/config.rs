//! Analyzer limits and non-negotiable scan constants.

/// Maximum documentation entries kept after prioritization.
pub const MAX_DOCS_CAP: usize = 10;

/// Maximum configuration-file entries kept after prioritization.
pub const MAX_CONFIG_CAP: usize = 15;

/// Default cap on total files accepted by the broad scan.
pub const DEFAULT_MAX_FILES: usize = 5000;

/// Per-file read cap for any single parse (package.json, pyproject.toml,
/// pre-commit config, requirements files).
pub const MAX_READ_BYTES: u64 = 256_000;

/// Evidence files shown per tooling entry in the rendered document.
pub const MAX_EVIDENCE_FILES_DISPLAYED: usize = 3;

/// Notebook directories shown in the rendered document.
pub const MAX_NOTEBOOK_DIRS: usize = 20;

/// Patterns that are always ignored, before and regardless of any gitignore
/// rule (including negations). Trailing slashes are cosmetic; matching is
/// segment-based.
pub const SAFETY_IGNORES: &[&str] = &[
    ".git/",
    ".venv/",
    "venv/",
    "env/",
    "__pycache__/",
    "node_modules/",
    "site-packages/",
    "dist/",
    "build/",
    ".pytest_cache/",
    ".mypy_cache/",
    ".coverage",
    "tests/fixtures/",
    "test/fixtures/",
];

/// Exact filenames probed at the repo root by the targeted scan.
pub const TARGETED_ROOT_FILES: &[&str] = &[
    "pyproject.toml",
    "tox.ini",
    "noxfile.py",
    "setup.py",
    "setup.cfg",
    "Makefile",
    ".pre-commit-config.yaml",
];
