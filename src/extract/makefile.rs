//! Makefile target extraction.

use std::path::Path;

use regex::Regex;

use crate::describe::describe_command;
use crate::extract::{read_text, ExtractError};
use crate::schema::{CommandInfo, ScriptBucket, ScriptGroup};

/// Targets we map into onboarding buckets. Anything else in the Makefile
/// is deliberately not surfaced.
const TARGET_BUCKETS: &[(&str, ScriptBucket)] = &[
    ("test", ScriptBucket::Test),
    ("lint", ScriptBucket::Lint),
    ("format", ScriptBucket::Format),
    ("dev", ScriptBucket::Dev),
    ("install", ScriptBucket::Install),
    ("run", ScriptBucket::Start),
    ("start", ScriptBucket::Start),
    ("check", ScriptBucket::Test),
];

fn fallback_description(target: &str) -> String {
    match target {
        "install" => "Install dependencies via Makefile target.".to_string(),
        "test" => "Run the test suite via Makefile target.".to_string(),
        "lint" => "Run linting via Makefile target.".to_string(),
        "format" => "Run formatting via Makefile target.".to_string(),
        "run" | "start" => "Run the application via Makefile target.".to_string(),
        other => format!("Run Makefile target '{other}'."),
    }
}

/// Matches `target:` (or `a b c:`) rule lines at column zero. Indented
/// recipe lines never match, so shell internals cannot leak out as
/// commands.
pub fn extract_makefile_commands(
    root: &Path,
    makefile_rel: &str,
) -> Result<ScriptGroup, ExtractError> {
    let content = read_text(&root.join(makefile_rel), makefile_rel)?;

    // Compile failure is impossible for this literal pattern; degrade to
    // an empty result rather than panic.
    let target_re = match Regex::new(r"^([a-zA-Z0-9_-]+(?:\s+[a-zA-Z0-9_-]+)*):") {
        Ok(re) => re,
        Err(e) => return Err(ExtractError::parse(makefile_rel, e.to_string())),
    };

    let mut scripts = ScriptGroup::default();
    for line in content.lines() {
        let captures = match target_re.captures(line) {
            Some(c) => c,
            None => continue,
        };
        for target in captures[1].split_whitespace() {
            let bucket = match TARGET_BUCKETS.iter().find(|(name, _)| *name == target) {
                Some((_, bucket)) => *bucket,
                None => continue,
            };
            let command = format!("make {target}");
            let description = describe_command(&command)
                .map(str::to_string)
                .unwrap_or_else(|| fallback_description(target));
            let cmd = CommandInfo::new(command, format!("{makefile_rel}:{target}"))
                .with_description(description);
            scripts.bucket_mut(bucket).push(cmd);
        }
    }

    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn extract(contents: &str) -> ScriptGroup {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Makefile"), contents).unwrap();
        extract_makefile_commands(tmp.path(), "Makefile").unwrap()
    }

    #[test]
    fn test_targets_map_to_buckets() {
        let scripts = extract("install:\n\tpip install -e .\n\ntest:\n\tpytest\n\nlint:\n\truff check .\n");
        assert_eq!(scripts.install[0].command, "make install");
        assert_eq!(scripts.test[0].command, "make test");
        assert_eq!(scripts.lint[0].command, "make lint");
        assert_eq!(
            scripts.install[0].description.as_deref(),
            Some("Install dependencies via Makefile target.")
        );
    }

    #[test]
    fn test_recipe_lines_never_become_commands() {
        let scripts = extract("test:\n\tpython -m pytest\n\tmake coverage\n");
        assert_eq!(scripts.test.len(), 1);
        assert_eq!(scripts.test[0].command, "make test");
        let all: Vec<&CommandInfo> = scripts
            .test
            .iter()
            .chain(&scripts.dev)
            .chain(&scripts.other)
            .collect();
        assert!(all.iter().all(|c| !c.command.contains("pytest")));
    }

    #[test]
    fn test_multi_target_rule_line() {
        let scripts = extract("lint format:\n\truff check --fix .\n");
        assert_eq!(scripts.lint[0].command, "make lint");
        assert_eq!(scripts.format[0].command, "make format");
    }

    #[test]
    fn test_check_maps_to_test_with_generic_fallback() {
        let scripts = extract("check:\n\tcargo check\n");
        assert_eq!(scripts.test[0].command, "make check");
        assert_eq!(
            scripts.test[0].description.as_deref(),
            Some("Run Makefile target 'check'.")
        );
    }

    #[test]
    fn test_run_and_start_land_in_start_bucket() {
        let scripts = extract("run:\n\t./app\nstart:\n\t./app --daemon\n");
        assert_eq!(scripts.start.len(), 2);
        assert_eq!(scripts.start[0].command, "make run");
        assert_eq!(
            scripts.start[0].description.as_deref(),
            Some("Run the application via Makefile target.")
        );
    }

    #[test]
    fn test_unknown_targets_skipped() {
        let scripts = extract("docs:\n\tmkdocs build\nclean:\n\trm -rf dist\n");
        assert_eq!(scripts, ScriptGroup::default());
    }

    #[test]
    fn test_missing_makefile_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(extract_makefile_commands(tmp.path(), "Makefile").is_err());
    }
}
