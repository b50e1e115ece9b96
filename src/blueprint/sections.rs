//! Section builders for the onboarding document.
//!
//! Every builder is a pure function of the analysis record and the
//! caller-supplied command overrides. Output line content is part of the
//! external contract: wording, punctuation and ordering are all frozen.

use crate::analysis::NOTEBOOK_CENTRIC_NOTE;
use crate::config::{MAX_EVIDENCE_FILES_DISPLAYED, MAX_NOTEBOOK_DIRS};
use crate::schema::{CommandInfo, CommandsOverride, RepoAnalysis};

use super::sanitize::{sanitize_description, sanitize_note};

pub(crate) const BULLET: &str = "* ";

const NO_COMMANDS: &str = "No explicit commands detected.";
const NO_DEPS: &str = "No dependency files detected.";
const NO_CONFIG: &str = "No useful configuration files detected.";
const NO_DOCS: &str = "No useful docs detected.";
const NO_DESCRIPTION: &str = "No description provided by analyzer.";

const NO_PYTHON_PIN: &str = "No Python version pin detected.";
const NO_ANY_PIN: &str = "No Python/Node.js version pin detected.";

const PYTHON_ONLY_SCOPE_NOTE: &str =
    "Python tooling not detected; this release generates Python-focused onboarding only.";

const GENERIC_LABEL: &str = "(Generic suggestion)";
const VENV_MARKERS: [&str; 2] = ["python -m venv .venv", "python3 -m venv .venv"];

/// Compilation context: the analysis record plus caller overrides.
pub struct Context<'a> {
    pub analysis: &'a RepoAnalysis,
    pub commands: &'a CommandsOverride,
}

pub(crate) struct SectionSpec {
    pub id: &'static str,
    pub heading: &'static str,
    pub build: fn(&Context) -> Vec<String>,
    /// Conditional sections are dropped entirely when they have no lines;
    /// unconditional sections render a sentinel line instead.
    pub skip_when_empty: bool,
}

/// The full document, in rendering order.
pub(crate) fn section_registry() -> [SectionSpec; 12] {
    [
        SectionSpec {
            id: "title",
            heading: "# ONBOARDING.md",
            build: |_| Vec::new(),
            skip_when_empty: false,
        },
        SectionSpec {
            id: "overview",
            heading: "## Overview",
            build: overview_lines,
            skip_when_empty: false,
        },
        SectionSpec {
            id: "env_setup",
            heading: "## Environment setup",
            build: env_setup_lines,
            skip_when_empty: false,
        },
        SectionSpec {
            id: "install",
            heading: "## Install dependencies",
            build: install_lines,
            skip_when_empty: false,
        },
        SectionSpec {
            id: "run_local",
            heading: "## Run / develop locally",
            build: dev_lines,
            skip_when_empty: false,
        },
        SectionSpec {
            id: "run_tests",
            heading: "## Run tests",
            build: test_lines,
            skip_when_empty: false,
        },
        SectionSpec {
            id: "lint_format",
            heading: "## Lint / format",
            build: lint_format_lines,
            skip_when_empty: false,
        },
        SectionSpec {
            id: "other_tooling",
            heading: "## Other tooling detected",
            build: other_tooling_lines,
            skip_when_empty: true,
        },
        SectionSpec {
            id: "analyzer_notes",
            heading: "## Analyzer notes",
            build: analyzer_notes_lines,
            skip_when_empty: true,
        },
        SectionSpec {
            id: "deps",
            heading: "## Dependency files detected",
            build: dep_lines,
            skip_when_empty: false,
        },
        SectionSpec {
            id: "config",
            heading: "## Useful configuration files",
            build: config_lines,
            skip_when_empty: false,
        },
        SectionSpec {
            id: "docs",
            heading: "## Useful docs",
            build: docs_lines,
            skip_when_empty: false,
        },
    ]
}

fn primary_tooling<'a>(ctx: &Context<'a>) -> Option<&'a str> {
    let pt = ctx.analysis.primary_tooling.trim();
    if pt.is_empty() {
        None
    } else {
        Some(pt)
    }
}

fn python_evidence_present(ctx: &Context) -> bool {
    ctx.analysis
        .python
        .as_ref()
        .map(|p| p.has_evidence())
        .unwrap_or(false)
}

fn basename(path: &str) -> String {
    let p = path.replace('\\', "/");
    let p = p.trim_start_matches('/');
    p.rsplit('/').next().unwrap_or(p).to_string()
}

/// A command candidate stripped down to what rendering needs.
#[derive(Clone)]
struct Candidate {
    command: String,
    description: Option<String>,
}

fn candidates(cmds: &[CommandInfo]) -> Vec<Candidate> {
    cmds.iter()
        .filter(|c| !c.command.trim().is_empty())
        .map(|c| Candidate {
            command: c.command.trim().to_string(),
            description: c.description.clone(),
        })
        .collect()
}

fn dedupe(cands: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for c in cands {
        if seen.iter().any(|s| *s == c.command) {
            continue;
        }
        seen.push(c.command.clone());
        out.push(c);
    }
    out
}

fn format_cmd(c: &Candidate) -> String {
    let desc = c
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION);
    let clean = sanitize_description(desc);
    let clean = if clean.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        clean
    };
    format!("{BULLET}`{}` ({clean})", c.command)
}

fn command_lines_or_sentinel(cands: Vec<Candidate>) -> Vec<String> {
    let cands = dedupe(cands);
    if cands.is_empty() {
        vec![NO_COMMANDS.to_string()]
    } else {
        cands.iter().map(format_cmd).collect()
    }
}

fn overview_lines(ctx: &Context) -> Vec<String> {
    let rp = ctx.analysis.repo_path.trim();
    let rp = if rp.is_empty() { "." } else { rp };
    vec![format!("Repo path: {rp}")]
}

/// Version hints are hardened so the rendered first line can never be the
/// no-pin sentence wearing a `Python version:` prefix.
fn hardened_hints(ctx: &Context) -> Vec<String> {
    let raw = match ctx.analysis.python.as_ref() {
        Some(py) => &py.python_version_hints,
        None => return Vec::new(),
    };

    let mut out = Vec::new();
    for h in raw {
        let mut hint = h.trim().to_string();
        if hint.is_empty() || hint.eq_ignore_ascii_case(NO_PYTHON_PIN) {
            continue;
        }
        if hint.to_lowercase().starts_with("python version:") {
            hint = hint
                .splitn(2, ':')
                .nth(1)
                .unwrap_or("")
                .trim()
                .to_string();
            if hint.is_empty() || hint.eq_ignore_ascii_case(NO_PYTHON_PIN) {
                continue;
            }
        }
        out.push(hint);
    }
    out
}

/// Evidence-only Node pin messaging, grounded in the presence of
/// `.nvmrc` / `.node-version` in the Node.js tooling evidence.
fn node_version_pin_line(ctx: &Context) -> String {
    let basenames: Vec<String> = ctx
        .analysis
        .other_tooling
        .iter()
        .filter(|t| t.name.trim() == "Node.js")
        .flat_map(|t| t.evidence_files.iter())
        .filter(|p| !p.trim().is_empty())
        .map(|p| basename(p.trim()))
        .collect();

    let mut pins: Vec<&str> = Vec::new();
    if basenames.iter().any(|b| b == ".nvmrc") {
        pins.push(".nvmrc");
    }
    if basenames.iter().any(|b| b == ".node-version") {
        pins.push(".node-version");
    }

    if pins.is_empty() {
        "No Node.js version pin file detected.".to_string()
    } else {
        format!("Node version pin file detected: {}.", pins.join(", "))
    }
}

fn normalize_env_instruction(s: &str) -> String {
    let mut st = s.trim();
    if let Some(rest) = st.strip_prefix("* ").or_else(|| st.strip_prefix("- ")) {
        st = rest.trim();
    }
    if st.starts_with('`') && st.ends_with('`') && st.len() > 1 {
        st.to_string()
    } else {
        format!("`{st}`")
    }
}

fn env_setup_lines(ctx: &Context) -> Vec<String> {
    let python_detected = ctx.analysis.python.is_some();
    let hints = hardened_hints(ctx);
    let env_instr: Vec<&str> = ctx
        .analysis
        .python
        .as_ref()
        .map(|p| {
            p.env_setup_instructions
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let mut lines: Vec<String> = Vec::new();

    if let Some(first) = hints.first() {
        lines.push(format!("Python version: {first}"));
    } else if primary_tooling(ctx) == Some("Node.js") {
        lines.push(node_version_pin_line(ctx));
    } else if python_detected {
        lines.push(NO_PYTHON_PIN.to_string());
    } else {
        lines.push(NO_ANY_PIN.to_string());
    }

    if !env_instr.is_empty() {
        let mut bullets: Vec<String> = env_instr
            .iter()
            .map(|s| format!("{BULLET}{}", normalize_env_instruction(s)))
            .collect();
        let first_venv = bullets
            .iter()
            .position(|b| VENV_MARKERS.iter().any(|m| b.contains(m)));
        if let Some(idx) = first_venv {
            bullets.insert(idx, GENERIC_LABEL.to_string());
        }
        lines.extend(bullets);
        return lines;
    }

    if hints.is_empty() {
        if !python_detected {
            return lines;
        }
        if let Some(pt) = primary_tooling(ctx) {
            if pt != "Python" && !python_evidence_present(ctx) {
                return lines;
            }
        }
        lines.push(GENERIC_LABEL.to_string());
        lines.push(format!(
            "{BULLET}`python3 -m venv .venv` (Create virtual environment.)"
        ));
        lines.push(format!(
            "{BULLET}`source .venv/bin/activate` (Activate virtual environment.)"
        ));
    }

    lines
}

fn install_lines(ctx: &Context) -> Vec<String> {
    let mut cands = candidates(&ctx.analysis.scripts.install);
    if let Some(py) = ctx.analysis.python.as_ref() {
        for s in &py.install_instructions {
            let cmd = s.trim();
            if !cmd.is_empty() {
                cands.push(Candidate {
                    command: cmd.to_string(),
                    description: None,
                });
            }
        }
    }

    if cands.iter().any(|c| c.command == "make install") {
        let description = cands
            .iter()
            .find(|c| {
                c.command == "make install"
                    && c.description
                        .as_deref()
                        .map(|d| !d.trim().is_empty())
                        .unwrap_or(false)
            })
            .and_then(|c| c.description.clone());
        return vec![format_cmd(&Candidate {
            command: "make install".to_string(),
            description,
        })];
    }

    // At most one `pip install -r` survives, first occurrence wins.
    let mut filtered = Vec::new();
    let mut pip_r_seen = false;
    for c in cands {
        if c.command.contains("pip install -r") {
            if pip_r_seen {
                continue;
            }
            pip_r_seen = true;
        }
        filtered.push(c);
    }

    command_lines_or_sentinel(filtered)
}

fn dev_lines(ctx: &Context) -> Vec<String> {
    let mut cands = candidates(&ctx.analysis.scripts.dev);
    cands.extend(candidates(&ctx.analysis.scripts.start));
    cands.extend(candidates(&ctx.commands.dev_commands));
    command_lines_or_sentinel(cands)
}

fn test_lines(ctx: &Context) -> Vec<String> {
    let mut cands = candidates(&ctx.analysis.scripts.test);
    cands.extend(candidates(&ctx.commands.test_commands));
    command_lines_or_sentinel(cands)
}

fn lint_format_lines(ctx: &Context) -> Vec<String> {
    let mut cands = candidates(&ctx.analysis.scripts.lint);
    cands.extend(candidates(&ctx.analysis.scripts.format));
    command_lines_or_sentinel(cands)
}

/// Evidence-only, sorted, truncated; the primary ecosystem never repeats
/// here.
fn other_tooling_lines(ctx: &Context) -> Vec<String> {
    let primary = primary_tooling(ctx);

    let mut items: Vec<_> = ctx
        .analysis
        .other_tooling
        .iter()
        .filter(|t| !t.name.trim().is_empty())
        .filter(|t| primary != Some(t.name.as_str()))
        .collect();
    items.sort_by(|a, b| a.name.cmp(&b.name));

    let mut lines = Vec::new();
    for t in items {
        if t.evidence_files.is_empty() {
            lines.push(format!("{BULLET}{}", t.name));
            continue;
        }
        let mut evidence = t.evidence_files.clone();
        evidence.sort();
        let shown = &evidence[..evidence.len().min(MAX_EVIDENCE_FILES_DISPLAYED)];
        let mut files = shown.join(", ");
        if evidence.len() > MAX_EVIDENCE_FILES_DISPLAYED {
            files.push_str(&format!(
                "; truncated to {MAX_EVIDENCE_FILES_DISPLAYED} of {}",
                evidence.len()
            ));
        }
        lines.push(format!("{BULLET}{} ({files})", t.name));
    }
    lines
}

fn python_evidence_summary(ctx: &Context) -> Option<String> {
    let dep_files = &ctx.analysis.python.as_ref()?.dependency_files;
    if dep_files.is_empty() {
        return None;
    }

    let basenames: Vec<String> = dep_files
        .iter()
        .map(|f| basename(f.path.trim()))
        .filter(|b| !b.is_empty())
        .collect();
    if basenames.is_empty() {
        return None;
    }

    const PREFER: [&str; 6] = [
        "pyproject.toml",
        "poetry.lock",
        "uv.lock",
        "requirements.txt",
        "setup.py",
        "setup.cfg",
    ];
    let mut chosen: Vec<String> = PREFER
        .iter()
        .filter(|p| basenames.iter().any(|b| b == *p))
        .map(|p| p.to_string())
        .collect();
    if chosen.is_empty() {
        chosen = basenames;
        chosen.sort();
        chosen.dedup();
    }
    chosen.truncate(2);
    Some(format!("{} present", chosen.join(", ")))
}

fn node_evidence_summary(ctx: &Context) -> Option<String> {
    let mut basenames: Vec<String> = ctx
        .analysis
        .other_tooling
        .iter()
        .filter(|t| {
            matches!(
                t.name.trim().to_lowercase().as_str(),
                "node.js" | "nodejs" | "node"
            )
        })
        .flat_map(|t| t.evidence_files.iter())
        .filter(|p| !p.trim().is_empty())
        .map(|p| basename(p.trim()))
        .collect();
    if basenames.is_empty() {
        return None;
    }
    basenames.sort();
    basenames.dedup();

    const PREFER: [&str; 8] = [
        "package.json",
        "pnpm-lock.yaml",
        "yarn.lock",
        "package-lock.json",
        "npm-shrinkwrap.json",
        "bun.lockb",
        ".nvmrc",
        ".node-version",
    ];
    let mut chosen: Vec<String> = PREFER
        .iter()
        .filter(|p| basenames.iter().any(|b| b == *p))
        .map(|p| p.to_string())
        .collect();
    if chosen.is_empty() {
        chosen = basenames;
    }
    chosen.truncate(2);
    Some(format!("{} present", chosen.join(", ")))
}

fn primary_tooling_note(ctx: &Context) -> Option<String> {
    let tool = primary_tooling(ctx)?;
    if tool == "Unknown" {
        return None;
    }
    let summary = match tool {
        "Python" => python_evidence_summary(ctx),
        "Node.js" => node_evidence_summary(ctx),
        _ => None,
    };
    match summary {
        Some(s) => Some(format!("Primary tooling: {tool} ({s}).")),
        None => Some(format!("Primary tooling: {tool}.")),
    }
}

fn analyzer_notes_lines(ctx: &Context) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    let pt = primary_tooling(ctx);
    if !python_evidence_present(ctx)
        && pt != Some("Node.js")
        && !ctx.analysis.other_tooling.is_empty()
    {
        out.push(format!("{BULLET}{PYTHON_ONLY_SCOPE_NOTE}"));
    }

    if let Some(line) = primary_tooling_note(ctx) {
        out.push(format!("{BULLET}{line}"));
    }

    let mut note_strs: Vec<String> = Vec::new();
    for n in &ctx.analysis.notes {
        let raw = n.trim();
        if raw.is_empty() {
            continue;
        }
        note_strs.push(raw.to_string());
        if let Some(cleaned) = sanitize_note(raw) {
            out.push(format!("{BULLET}{cleaned}"));
        }
    }

    let nb_dirs: Vec<String> = ctx
        .analysis
        .notebooks
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .map(|d| {
            if d == "." {
                "./".to_string()
            } else if d.ends_with('/') {
                d.to_string()
            } else {
                format!("{d}/")
            }
        })
        .collect();

    if !nb_dirs.is_empty() {
        if !note_strs.iter().any(|n| n == NOTEBOOK_CENTRIC_NOTE) {
            out.push(format!("{BULLET}{NOTEBOOK_CENTRIC_NOTE}"));
        }
        let total = nb_dirs.len();
        if total > MAX_NOTEBOOK_DIRS {
            out.push(format!(
                "{BULLET}notebooks list truncated to {MAX_NOTEBOOK_DIRS} entries (total={total})"
            ));
        }
        let shown = &nb_dirs[..total.min(MAX_NOTEBOOK_DIRS)];
        out.push(format!("{BULLET}Notebooks found in: {}", shown.join(", ")));
    }

    let frameworks: Vec<_> = ctx
        .analysis
        .frameworks
        .iter()
        .filter(|f| !f.name.trim().is_empty())
        .collect();
    if !frameworks.is_empty() {
        let names = frameworks
            .iter()
            .map(|f| f.name.trim())
            .collect::<Vec<_>>()
            .join(", ");
        let reasons: Vec<&str> = frameworks
            .iter()
            .map(|f| f.detection_reason.trim())
            .filter(|r| !r.is_empty())
            .collect();
        let mut line = format!("{BULLET}Frameworks detected (from analyzer): {names}.");

        let shared_reason = match reasons.as_slice() {
            [] => None,
            [only] if frameworks.len() == 1 => Some(*only),
            all if frameworks.len() > 1 && all.iter().all(|r| *r == all[0]) => Some(all[0]),
            _ => None,
        };
        if let Some(reason) = shared_reason {
            let clean = sanitize_description(reason);
            if !clean.is_empty() {
                line.push_str(&format!(" ({clean})"));
            }
        }
        out.push(line);
    }

    out
}

fn described_path_lines(items: Vec<(String, Option<String>)>, sentinel: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    for (path, description) in items {
        let p = path.trim().to_string();
        if p.is_empty() || seen.iter().any(|s| *s == p) {
            continue;
        }
        seen.push(p.clone());

        match description.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(desc) => {
                let clean = sanitize_description(desc);
                if clean.is_empty() {
                    lines.push(format!("{BULLET}{p}"));
                } else {
                    lines.push(format!("{BULLET}{p} ({clean})"));
                }
            }
            None => lines.push(format!("{BULLET}{p}")),
        }
    }
    if lines.is_empty() {
        vec![sentinel.to_string()]
    } else {
        lines
    }
}

fn dep_lines(ctx: &Context) -> Vec<String> {
    let items = ctx
        .analysis
        .python
        .as_ref()
        .map(|py| {
            py.dependency_files
                .iter()
                .map(|f| (f.path.clone(), f.description.clone()))
                .collect()
        })
        .unwrap_or_default();
    described_path_lines(items, NO_DEPS)
}

fn config_lines(ctx: &Context) -> Vec<String> {
    let items = ctx
        .analysis
        .configuration_files
        .iter()
        .map(|f| (f.path.clone(), f.description.clone()))
        .collect();
    described_path_lines(items, NO_CONFIG)
}

fn docs_lines(ctx: &Context) -> Vec<String> {
    let items = ctx
        .analysis
        .docs
        .iter()
        .map(|d| (d.path.clone(), None))
        .collect();
    described_path_lines(items, NO_DOCS)
}
