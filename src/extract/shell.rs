//! Shell-script discovery under `scripts/`.
//!
//! Only the leading comment block of each script is read. Header comments
//! are used as descriptions only when they pass the safety filter; helper
//! scripts always get a fixed neutral description since they are not
//! direct entrypoints.

use std::path::Path;

use tracing::debug;

use crate::extract::read_text;
use crate::schema::{CommandInfo, Confidence, ScriptGroup};

const HELPER_SCRIPT_DESC: &str = "Helper script used by other repo scripts.";
const FALLBACK_SCRIPT_DESC: &str = "Run repo script entrypoint.";

const NON_DESCRIPTIVE_KEYWORDS: &[&str] =
    &["CONFIG", "SETUP", "MAIN", "TEST", "BUILD", "START", "END"];

fn is_safe_description(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return false;
    }
    if line.contains("export") || line.contains('=') {
        return false;
    }
    if line.starts_with("cd ")
        || line.starts_with("bash ")
        || line.starts_with("python ")
        || line.starts_with("make ")
    {
        return false;
    }

    // Decorative divider lines are mostly separator characters.
    let separators = [' ', '-', '_', '=', '#'];
    let separator_count = line.chars().filter(|c| separators.contains(c)).count();
    let total = line.chars().count();
    if total > 4 && separator_count * 2 > total {
        return false;
    }

    if line.split_whitespace().count() < 2
        && NON_DESCRIPTIVE_KEYWORDS.contains(&line.to_uppercase().as_str())
    {
        return false;
    }

    true
}

fn is_helper_script(rel_path: &str) -> bool {
    let name = rel_path
        .rsplit('/')
        .next()
        .unwrap_or(rel_path)
        .to_lowercase();

    let prefixes = ["helper", "helpers", "util", "utils", "common", "shared"];
    prefixes.iter().any(|p| name.starts_with(p)) || name.contains("helpers") || name.contains("utils")
}

fn header_description(root: &Path, script: &str) -> Option<String> {
    let content = match read_text(&root.join(script), script) {
        Ok(c) => c,
        Err(e) => {
            debug!(script, error = %e, "could not read script header");
            return None;
        }
    };

    for raw in content.lines() {
        let line = raw.trim();
        if !line.starts_with('#') && !line.is_empty() {
            break;
        }
        if line.starts_with('#') && !line.starts_with("#!") {
            let candidate = line.trim_start_matches('#').trim();
            if is_safe_description(candidate) {
                return Some(candidate.to_string());
            }
        }
    }
    None
}

/// Builds `bash <script>` commands for every `scripts/*.sh` in the scanned
/// file list. Bucketing is by filename: anything containing "test" is a
/// test command, everything else is a dev command.
pub fn extract_shell_scripts(root: &Path, all_files: &[String]) -> ScriptGroup {
    let mut scripts = ScriptGroup::default();

    for file in all_files {
        let rel = file.replace('\\', "/");
        if !rel.starts_with("scripts/") || !rel.ends_with(".sh") {
            continue;
        }
        let name = rel.rsplit('/').next().unwrap_or(&rel).to_string();

        let description = if is_helper_script(&rel) {
            HELPER_SCRIPT_DESC.to_string()
        } else {
            header_description(root, &rel)
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_SCRIPT_DESC.to_string())
        };

        let cmd = CommandInfo::new(format!("bash {rel}"), rel.clone())
            .with_name(name.clone())
            .with_description(description)
            .with_confidence(Confidence::Derived);

        if name.contains("test") {
            scripts.test.push(cmd);
        } else {
            scripts.dev.push(cmd);
        }
    }

    scripts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use yare::parameterized;

    fn run(files: &[(&str, &str)]) -> ScriptGroup {
        let tmp = TempDir::new().unwrap();
        let mut all = Vec::new();
        for (path, contents) in files {
            let full = tmp.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, contents).unwrap();
            all.push(path.to_string());
        }
        extract_shell_scripts(tmp.path(), &all)
    }

    #[test]
    fn test_header_comment_becomes_description() {
        let scripts = run(&[(
            "scripts/deploy.sh",
            "#!/bin/bash\n# Deploy the application to staging\nset -e\n",
        )]);
        assert_eq!(scripts.dev[0].command, "bash scripts/deploy.sh");
        assert_eq!(
            scripts.dev[0].description.as_deref(),
            Some("Deploy the application to staging")
        );
        assert_eq!(scripts.dev[0].confidence, Some(Confidence::Derived));
    }

    #[parameterized(
        assignment = { "# RETRIES=3" },
        export = { "# export PATH" },
        command_verb = { "# cd /app and run" },
        divider = { "# ----------------" },
        keyword = { "# SETUP" },
    )]
    fn test_unsafe_headers_fall_back(header: &str) {
        let contents = format!("#!/bin/bash\n{header}\necho hi\n");
        let scripts = run(&[("scripts/go.sh", contents.as_str())]);
        assert_eq!(
            scripts.dev[0].description.as_deref(),
            Some("Run repo script entrypoint.")
        );
    }

    #[test]
    fn test_scan_stops_at_first_code_line() {
        // The descriptive comment after real code is never used.
        let scripts = run(&[(
            "scripts/build.sh",
            "#!/bin/bash\nset -e\n# Build all artifacts cleanly\n",
        )]);
        assert_eq!(
            scripts.dev[0].description.as_deref(),
            Some("Run repo script entrypoint.")
        );
    }

    #[test]
    fn test_helper_scripts_get_neutral_description() {
        let scripts = run(&[(
            "scripts/helpers.sh",
            "#!/bin/bash\n# Provides shared colour output functions\n",
        )]);
        assert_eq!(
            scripts.dev[0].description.as_deref(),
            Some("Helper script used by other repo scripts.")
        );
    }

    #[test]
    fn test_test_scripts_land_in_test_bucket() {
        let scripts = run(&[("scripts/run_tests.sh", "#!/bin/bash\npytest\n")]);
        assert!(scripts.dev.is_empty());
        assert_eq!(scripts.test[0].command, "bash scripts/run_tests.sh");
    }

    #[test]
    fn test_only_scripts_dir_is_considered() {
        let scripts = run(&[("tools/setup.sh", "#!/bin/bash\n")]);
        assert_eq!(scripts, ScriptGroup::default());
    }
}
