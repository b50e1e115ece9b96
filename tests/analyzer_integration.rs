//! Integration tests for the repository analyzer
//!
//! These tests build small repositories on disk and verify the complete
//! analysis record: classification, ranking, command extraction, ecosystem
//! detection and the deterministic ordering guarantees.

use gangway::Analyzer;
use std::fs;
use tempfile::TempDir;

fn write(repo: &TempDir, rel: &str, contents: &str) {
    let path = repo.path().join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A realistic Python project: manifests, Makefile, tox, scripts, CI.
fn create_python_project() -> TempDir {
    let repo = TempDir::new().unwrap();
    write(&repo, "README.md", "# Demo\n");
    write(&repo, "CONTRIBUTING.md", "# Contributing\n");
    write(&repo, "docs/install.md", "# Install\n");
    write(&repo, "requirements.txt", "flask==3.0.0\nrequests>=2.0\n");
    write(&repo, "requirements-dev.txt", "pytest\n");
    write(
        &repo,
        "pyproject.toml",
        "[project]\nname = \"demo\"\nrequires-python = \">=3.9\"\n",
    );
    write(
        &repo,
        "Makefile",
        "test:\n\tpytest\ninstall:\n\tpip install -r requirements.txt\nlint:\n\truff check .\n",
    );
    write(&repo, "tox.ini", "[tox]\nenvlist = py311, flake8\n");
    write(
        &repo,
        "scripts/run_tests.sh",
        "#!/bin/bash\n# Run unit test suite\nset -e\npytest\n",
    );
    write(
        &repo,
        ".github/workflows/ci.yml",
        "jobs:\n  test:\n    steps:\n      - uses: actions/setup-python@v5\n        with:\n          python-version: '3.11'\n",
    );
    write(&repo, "src/app.py", "print('hi')\n");
    repo
}

#[test]
fn test_python_project_full_analysis() {
    let repo = create_python_project();
    let analyzer = Analyzer::new().unwrap();
    let analysis = analyzer.analyze(repo.path());

    assert_eq!(analysis.primary_tooling, "Python");

    // Docs ranked: root names (tie broken by path), then docs/ children.
    let doc_paths: Vec<&str> = analysis.docs.iter().map(|d| d.path.as_str()).collect();
    assert_eq!(doc_paths, vec!["CONTRIBUTING.md", "README.md", "docs/install.md"]);

    // Configs ranked: Makefile over tox.ini over workflow.
    let config_paths: Vec<&str> = analysis
        .configuration_files
        .iter()
        .map(|c| c.path.as_str())
        .collect();
    assert_eq!(
        config_paths,
        vec!["Makefile", "tox.ini", ".github/workflows/ci.yml"]
    );

    let python = analysis.python.as_ref().unwrap();
    let dep_paths: Vec<&str> = python
        .dependency_files
        .iter()
        .map(|d| d.path.as_str())
        .collect();
    assert_eq!(
        dep_paths,
        vec!["requirements.txt", "pyproject.toml", "requirements-dev.txt"]
    );
    assert_eq!(
        python.dependency_files[2].description.as_deref(),
        Some("Python dependency manifest.")
    );

    // Workflow pin becomes the version hint; the range becomes a note.
    assert_eq!(python.python_version_hints, vec!["3.11".to_string()]);
    assert!(analysis
        .notes
        .iter()
        .any(|n| n == "Requires Python >=3.9"));
    assert_eq!(python.package_managers, vec!["pip".to_string()]);

    // Makefile first, then shell scripts, then tox.
    let test_cmds: Vec<&str> = analysis
        .scripts
        .test
        .iter()
        .map(|c| c.command.as_str())
        .collect();
    assert_eq!(
        test_cmds,
        vec!["make test", "bash scripts/run_tests.sh", "tox"]
    );

    let lint_cmds: Vec<&str> = analysis
        .scripts
        .lint
        .iter()
        .map(|c| c.command.as_str())
        .collect();
    assert_eq!(lint_cmds, vec!["make lint", "tox -e flake8"]);

    // A literal make install blocks the python install merge entirely.
    let install_cmds: Vec<&str> = analysis
        .scripts
        .install
        .iter()
        .map(|c| c.command.as_str())
        .collect();
    assert_eq!(install_cmds, vec!["make install"]);

    // Flask detected from requirements.
    assert_eq!(analysis.frameworks.len(), 1);
    assert_eq!(analysis.frameworks[0].name, "Flask");
    assert_eq!(
        analysis.frameworks[0].detection_reason,
        "Detected via requirements.txt dependency 'flask'."
    );
}

#[test]
fn test_analysis_is_deterministic() {
    let repo = create_python_project();
    let analyzer = Analyzer::new().unwrap();
    let first = analyzer.analyze(repo.path());
    let second = analyzer.analyze(repo.path());
    assert_eq!(first, second);
}

#[test]
fn test_categories_are_disjoint() {
    let repo = create_python_project();
    let analyzer = Analyzer::new().unwrap();
    let analysis = analyzer.analyze(repo.path());

    let deps: Vec<&str> = analysis
        .python
        .as_ref()
        .unwrap()
        .dependency_files
        .iter()
        .map(|d| d.path.as_str())
        .collect();
    for cfg in &analysis.configuration_files {
        assert!(!deps.contains(&cfg.path.as_str()), "{} in both", cfg.path);
    }
}

#[test]
fn test_mixed_repo_python_primary_no_node_commands() {
    let repo = TempDir::new().unwrap();
    write(&repo, "requirements.txt", "flask\n");
    write(&repo, "app.py", "print('hi')\n");
    write(
        &repo,
        "package.json",
        r#"{"name":"assets","scripts":{"dev":"vite"}}"#,
    );

    let analyzer = Analyzer::new().unwrap();
    let analysis = analyzer.analyze(repo.path());

    // Manifest + .py beats a lone package.json; ties would also go Python.
    assert_eq!(analysis.primary_tooling, "Python");

    // No npm/pnpm/yarn command anywhere in the buckets.
    let all: Vec<&gangway::schema::CommandInfo> = [
        &analysis.scripts.dev,
        &analysis.scripts.start,
        &analysis.scripts.test,
        &analysis.scripts.lint,
        &analysis.scripts.format,
        &analysis.scripts.install,
        &analysis.scripts.other,
    ]
    .into_iter()
    .flatten()
    .collect();
    assert!(all.iter().all(|c| {
        !c.command.starts_with("npm ")
            && !c.command.starts_with("pnpm ")
            && !c.command.starts_with("yarn ")
    }));

    // Node.js still surfaces as evidence-only tooling.
    assert!(analysis.other_tooling.iter().any(|t| t.name == "Node.js"));
}

#[test]
fn test_pnpm_repo_uses_pnpm_commands() {
    let repo = TempDir::new().unwrap();
    write(
        &repo,
        "package.json",
        r#"{"name":"web","scripts":{"dev":"vite","test":"vitest"}}"#,
    );
    write(&repo, "pnpm-lock.yaml", "lockfileVersion: '9.0'\n");

    let analyzer = Analyzer::new().unwrap();
    let analysis = analyzer.analyze(repo.path());

    assert_eq!(analysis.primary_tooling, "Node.js");

    let install: Vec<&str> = analysis
        .scripts
        .install
        .iter()
        .map(|c| c.command.as_str())
        .collect();
    assert_eq!(install, vec!["pnpm install"]);
    assert_eq!(
        analysis.scripts.install[0].source,
        "package.json:lockfile"
    );

    let dev: Vec<&str> = analysis
        .scripts
        .dev
        .iter()
        .map(|c| c.command.as_str())
        .collect();
    assert_eq!(dev, vec!["pnpm run dev"]);
    assert_eq!(
        analysis.scripts.dev[0].source,
        "package.json:scripts.dev"
    );

    let all_cmds: Vec<&str> = [
        &analysis.scripts.dev,
        &analysis.scripts.test,
        &analysis.scripts.install,
    ]
    .into_iter()
    .flatten()
    .map(|c| c.command.as_str())
    .collect();
    assert!(all_cmds
        .iter()
        .all(|c| !c.starts_with("npm ") && !c.starts_with("yarn ")));
}

#[test]
fn test_gitignore_negation_cannot_restore_safety_dirs() {
    let repo = TempDir::new().unwrap();
    write(&repo, ".gitignore", "!node_modules/\n");
    write(&repo, "node_modules/pkg/index.js", "");
    write(&repo, "main.py", "");

    let analyzer = Analyzer::new().unwrap();
    let analysis = analyzer.analyze(repo.path());

    // node_modules content never enters the analysis.
    assert!(analysis
        .other_tooling
        .iter()
        .all(|t| t.evidence_files.iter().all(|f| !f.contains("node_modules"))));
}

#[test]
fn test_targeted_scan_recovers_gitignored_manifests() {
    let repo = TempDir::new().unwrap();
    write(&repo, ".gitignore", "Makefile\npyproject.toml\n");
    write(&repo, "Makefile", "test:\n\tpytest\n");
    write(
        &repo,
        "pyproject.toml",
        "[project]\nname = \"hidden\"\n",
    );

    let analyzer = Analyzer::new().unwrap();
    let analysis = analyzer.analyze(repo.path());

    assert!(analysis
        .configuration_files
        .iter()
        .any(|c| c.path == "Makefile"));
    let python = analysis.python.as_ref().unwrap();
    assert!(python
        .dependency_files
        .iter()
        .any(|d| d.path == "pyproject.toml"));
    assert!(analysis
        .scripts
        .test
        .iter()
        .any(|c| c.command == "make test"));
}

#[test]
fn test_docs_cap_emits_truncation_note() {
    let repo = TempDir::new().unwrap();
    for i in 0..12 {
        write(&repo, &format!("docs/d{i:02}.md"), "# doc\n");
    }

    let analyzer = Analyzer::new().unwrap();
    let analysis = analyzer.analyze(repo.path());

    assert_eq!(analysis.docs.len(), 10);
    assert!(analysis
        .notes
        .iter()
        .any(|n| n == "docs list truncated to 10 entries (total=12)"));
}

#[test]
fn test_notebooks_and_precommit_hygiene() {
    let repo = TempDir::new().unwrap();
    write(&repo, "analysis.ipynb", "{}");
    write(&repo, "notebooks/eda.ipynb", "{}");
    write(
        &repo,
        ".pre-commit-config.yaml",
        "repos:\n  - repo: https://github.com/kynan/nbstripout\n    hooks:\n      - id: nbstripout\n",
    );

    let analyzer = Analyzer::new().unwrap();
    let analysis = analyzer.analyze(repo.path());

    assert_eq!(
        analysis.notebooks,
        vec![".".to_string(), "notebooks".to_string()]
    );
    assert!(analysis.notes.iter().any(
        |n| n == "Notebook-centric repo detected; core logic may reside in Jupyter notebooks."
    ));

    let precommit = analysis
        .configuration_files
        .iter()
        .find(|c| c.path == ".pre-commit-config.yaml")
        .unwrap();
    assert_eq!(
        precommit.description.as_deref(),
        Some("Pre-commit hooks configuration (includes notebook hygiene hooks).")
    );
}

#[test]
fn test_empty_repo_yields_unknown() {
    let repo = TempDir::new().unwrap();
    let analyzer = Analyzer::new().unwrap();
    let analysis = analyzer.analyze(repo.path());

    assert_eq!(analysis.primary_tooling, "Unknown");
    assert!(analysis.python.is_none());
    assert!(analysis.docs.is_empty());
    assert!(analysis.configuration_files.is_empty());
    assert!(analysis.other_tooling.is_empty());
    assert!(analysis.notes.is_empty());
}
