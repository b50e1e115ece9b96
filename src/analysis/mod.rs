//! The analysis pipeline: scan, classify, extract, detect, assemble.

mod install;
mod notebooks;

pub use install::{describe_install_command, merge_install_instructions};
pub use notebooks::{
    detect_notebook_dirs, precommit_has_notebook_hygiene, NOTEBOOK_CENTRIC_NOTE,
    NOTEBOOK_HYGIENE_DESC,
};

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{info, warn};

use crate::catalog::{Catalog, EngineError, FileCategory};
use crate::config::{DEFAULT_MAX_FILES, MAX_CONFIG_CAP, MAX_DOCS_CAP};
use crate::describe::describe_file;
use crate::detect::{detect_frameworks, detect_other_tooling, determine_primary_tooling};
use crate::extract::{
    classify_python_version, detect_workflow_python_versions, extract_makefile_commands,
    extract_node_package_json_commands, extract_pyproject_metadata, extract_shell_scripts,
    extract_tox_commands, load_pyproject, PyprojectMetadata,
};
use crate::priority::{
    cap_with_note, config_priority, doc_priority, rank_dependency_paths, rank_paths,
};
use crate::scan::{scan_repo_files, targeted_scan, IgnoreMatcher};
use crate::schema::{ConfigFileInfo, DocInfo, PythonEnvFile, PythonInfo, RepoAnalysis, ScriptGroup};

/// One engine instance per process. Construction validates the catalog's
/// classification invariants; analysis itself never fails.
pub struct Analyzer {
    catalog: Catalog,
    max_files: usize,
}

impl Analyzer {
    pub fn new() -> Result<Self, EngineError> {
        Self::with_max_files(DEFAULT_MAX_FILES)
    }

    pub fn with_max_files(max_files: usize) -> Result<Self, EngineError> {
        Ok(Self {
            catalog: Catalog::new()?,
            max_files,
        })
    }

    pub fn analyze(&self, repo_path: &Path) -> RepoAnalysis {
        let root = repo_path
            .canonicalize()
            .unwrap_or_else(|_| repo_path.to_path_buf());

        let ignore = IgnoreMatcher::new(&root);
        let targeted = targeted_scan(&root, &ignore);
        let broad = scan_repo_files(&root, &ignore, self.max_files);

        let mut union: BTreeSet<String> = broad.all_files.into_iter().collect();
        union.extend(targeted);
        let all_files: Vec<String> = union.into_iter().collect();

        let (mut doc_paths, mut config_paths, mut dep_paths) = self.categorize(&all_files);

        let mut notes: Vec<String> = Vec::new();
        rank_paths(&mut doc_paths, doc_priority);
        notes.extend(cap_with_note(&mut doc_paths, MAX_DOCS_CAP, "docs"));
        rank_paths(&mut config_paths, config_priority);
        notes.extend(cap_with_note(
            &mut config_paths,
            MAX_CONFIG_CAP,
            "configurationFiles",
        ));
        rank_dependency_paths(&mut dep_paths);

        let docs: Vec<DocInfo> = doc_paths.into_iter().map(DocInfo::new).collect();
        let configuration_files = build_config_records(&root, config_paths);
        let dep_files = build_dependency_records(dep_paths);

        let primary_tooling =
            determine_primary_tooling(broad.python_files.len(), dep_files.len(), &all_files);

        let mut scripts = self.collect_scripts(
            &root,
            &all_files,
            &configuration_files,
            &primary_tooling,
        );

        let metadata = match load_pyproject(&root) {
            Ok(Some(data)) => extract_pyproject_metadata(&data),
            Ok(None) => PyprojectMetadata::default(),
            Err(e) => {
                warn!(error = %e, "failed to parse pyproject.toml");
                PyprojectMetadata::default()
            }
        };

        let (python, version_note) =
            infer_python_environment(&root, &broad.python_files, dep_files, &metadata);
        notes.extend(version_note);

        merge_install_instructions(&mut scripts, python.as_ref());

        let notebooks = detect_notebook_dirs(&all_files);
        if !notebooks.is_empty() && !notes.iter().any(|n| n == NOTEBOOK_CENTRIC_NOTE) {
            notes.push(NOTEBOOK_CENTRIC_NOTE.to_string());
        }

        let frameworks = detect_frameworks(
            &root,
            python
                .as_ref()
                .map(|p| p.dependency_files.as_slice())
                .unwrap_or(&[]),
        );
        let other_tooling = detect_other_tooling(&all_files);

        info!(
            repo = %root.display(),
            files = all_files.len(),
            primary = %primary_tooling,
            "analyzed repository"
        );

        RepoAnalysis {
            repo_path: root.display().to_string(),
            primary_tooling,
            docs,
            configuration_files,
            python,
            scripts,
            frameworks,
            notes,
            notebooks,
            other_tooling,
        }
    }

    fn categorize(&self, all_files: &[String]) -> (Vec<String>, Vec<String>, Vec<String>) {
        let mut docs = Vec::new();
        let mut configs = Vec::new();
        let mut deps = Vec::new();
        for path in all_files {
            match self.catalog.classify(path) {
                Some(FileCategory::Doc) => docs.push(path.clone()),
                Some(FileCategory::Config) => configs.push(path.clone()),
                Some(FileCategory::Dependency) => deps.push(path.clone()),
                None => {}
            }
        }
        (docs, configs, deps)
    }

    fn collect_scripts(
        &self,
        root: &Path,
        all_files: &[String],
        configs: &[ConfigFileInfo],
        primary_tooling: &str,
    ) -> ScriptGroup {
        let mut scripts = ScriptGroup::default();

        let find_config = |name: &str| {
            configs
                .iter()
                .map(|c| c.path.as_str())
                .find(|&p| p.rsplit('/').next().unwrap_or(p).eq_ignore_ascii_case(name))
        };

        if let Some(makefile) = find_config("makefile") {
            match extract_makefile_commands(root, makefile) {
                Ok(mk) => merge_groups(&mut scripts, mk),
                Err(e) => warn!(error = %e, "makefile extraction failed"),
            }
        }

        let sh = extract_shell_scripts(root, all_files);
        scripts.dev.extend(sh.dev);
        scripts.test.extend(sh.test);

        if let Some(tox) = find_config("tox.ini") {
            match extract_tox_commands(root, tox) {
                Ok(tx) => {
                    scripts.test.extend(tx.test);
                    scripts.lint.extend(tx.lint);
                }
                Err(e) => warn!(error = %e, "tox extraction failed"),
            }
        }

        // Non-primary ecosystems never contribute commands.
        if primary_tooling == "Node.js" {
            match extract_node_package_json_commands(root, all_files) {
                Ok(node) => merge_groups(&mut scripts, node),
                Err(e) => warn!(error = %e, "package.json extraction failed"),
            }
        }

        scripts
    }
}

fn merge_groups(into: &mut ScriptGroup, from: ScriptGroup) {
    into.dev.extend(from.dev);
    into.start.extend(from.start);
    into.test.extend(from.test);
    into.lint.extend(from.lint);
    into.format.extend(from.format);
    into.install.extend(from.install);
    into.other.extend(from.other);
}

fn build_config_records(root: &Path, paths: Vec<String>) -> Vec<ConfigFileInfo> {
    paths
        .into_iter()
        .map(|path| {
            let name = path.rsplit('/').next().unwrap_or(&path).to_lowercase();
            let mut description = describe_file(&path).map(str::to_string);
            if (name == ".pre-commit-config.yaml" || name == ".pre-commit-config.yml")
                && precommit_has_notebook_hygiene(root, &path)
            {
                description = Some(NOTEBOOK_HYGIENE_DESC.to_string());
            }
            ConfigFileInfo {
                path,
                file_type: name,
                description,
            }
        })
        .collect()
}

fn build_dependency_records(paths: Vec<String>) -> Vec<PythonEnvFile> {
    paths
        .into_iter()
        .map(|path| {
            let name = path.rsplit('/').next().unwrap_or(&path).to_lowercase();
            let description = if name.starts_with("requirements") {
                describe_file("requirements.txt")
            } else {
                describe_file(&path)
            };
            PythonEnvFile {
                path,
                file_type: name,
                description: description.map(str::to_string),
            }
        })
        .collect()
}

/// Python ecosystem inference. Returns the record plus an optional
/// analyzer note when `requires-python` expresses a range rather than an
/// exact pin.
fn infer_python_environment(
    root: &Path,
    python_files: &[String],
    dep_files: Vec<PythonEnvFile>,
    metadata: &PyprojectMetadata,
) -> (Option<PythonInfo>, Option<String>) {
    let workflow_versions = detect_workflow_python_versions(root);

    if python_files.is_empty() && dep_files.is_empty() && workflow_versions.is_empty() {
        return (None, None);
    }

    let basename = |p: &str| p.rsplit('/').next().unwrap_or(p).to_lowercase();

    let mut package_managers: Vec<String> = Vec::new();
    let pip_evidence = dep_files.iter().any(|d| d.path.starts_with("requirements"))
        || dep_files.iter().any(|d| {
            matches!(
                basename(&d.path).as_str(),
                "setup.py" | "setup.cfg" | "pyproject.toml"
            )
        });
    if pip_evidence {
        package_managers.push("pip".to_string());
    }
    for manager in &metadata.package_managers {
        if !package_managers.contains(manager) {
            package_managers.push(manager.clone());
        }
    }

    let mut install_instructions: Vec<String> = Vec::new();
    if pip_evidence {
        let reqs: Vec<&str> = dep_files
            .iter()
            .map(|d| d.path.as_str())
            .filter(|p| p.starts_with("requirements"))
            .collect();
        if !reqs.is_empty() {
            let main = reqs
                .iter()
                .find(|r| **r == "requirements.txt")
                .unwrap_or(&reqs[0]);
            install_instructions.push(format!("pip install -r {main}"));
        }
    }
    if dep_files.iter().any(|d| basename(&d.path) == "setup.py") {
        install_instructions.push("pip install -e .".to_string());
    } else if dep_files.iter().any(|d| basename(&d.path) == "pyproject.toml") {
        install_instructions.push("pip install .".to_string());
    }

    // Workflow pins take the first-line slot; a requires-python exact pin
    // is appended after them, a range becomes a note instead.
    let mut hints = workflow_versions;
    let mut version_note = None;
    if let Some(requirement) = &metadata.python_version {
        let (pin, comment) = classify_python_version(requirement);
        if let Some(pin) = pin {
            if !hints.contains(&pin) {
                hints.push(pin);
            }
        } else if let Some(comment) = comment {
            version_note = Some(comment);
        }
    }

    let python = PythonInfo {
        python_version_hints: hints,
        package_managers,
        dependency_files: dep_files,
        env_setup_instructions: Vec::new(),
        install_instructions,
    };
    (Some(python), version_note)
}
