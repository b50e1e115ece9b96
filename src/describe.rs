//! Canned descriptions for known files and commands.
//!
//! Every sentence here flows verbatim into the rendered document, so the
//! tables are data, not logic. Lookup is by lowercase filename (or the
//! `.github/workflows` path prefix) for files, and by exact command or a
//! registered command prefix for commands.

/// Description for a classified file, keyed by lowercase basename with a
/// single path-prefix exception for workflow files.
pub fn describe_file(path: &str) -> Option<&'static str> {
    let normalized = path.replace('\\', "/");
    let p = normalized.trim_start_matches('/');
    if p.starts_with(".github/workflows/") {
        return Some("CI/CD automation workflow.");
    }

    let name = p.rsplit('/').next().unwrap_or(p).to_lowercase();
    match name.as_str() {
        "makefile" => Some("Primary task runner for development and build orchestration."),
        "tox.ini" => Some("Test environment orchestrator (tox)."),
        "noxfile.py" => Some("Test automation sessions (nox)."),
        ".pre-commit-config.yaml" | ".pre-commit-config.yml" => {
            Some("Pre-commit hooks configuration (code quality automation).")
        }
        "setup.py" | "setup.cfg" => Some("Packaging/build configuration (setuptools)."),
        "requirements.txt" => Some("Python dependency manifest."),
        "pyproject.toml" => {
            Some("Project configuration and dependency management (PEP 518/621).")
        }
        _ => None,
    }
}

/// Description for an extracted command. Exact matches first, then the
/// registered prefixes (`tox -e`, `bash scripts/`).
pub fn describe_command(command: &str) -> Option<&'static str> {
    match command {
        "make test" => return Some("Run the test suite via Makefile target."),
        "make format" => return Some("Run formatting via Makefile target."),
        "make run" => return Some("Run the application via Makefile target."),
        "make install" => return Some("Install dependencies via Makefile target."),
        "make lint" => return Some("Run linting via Makefile target."),
        "tox" => return Some("Run tests via tox."),
        _ => {}
    }
    if command.starts_with("tox -e") {
        return Some("Run specific tox environment.");
    }
    if command.starts_with("bash scripts/") {
        return Some("Run repo script entrypoint.");
    }
    None
}
