//! Install-command descriptions and the install merge rules.

use crate::schema::{CommandInfo, PythonInfo, ScriptGroup};

/// Deterministic, grounded description for an install command string.
/// Never invents commands; only describes the literal string it is given.
pub fn describe_install_command(command: &str) -> String {
    let cmd = command.split_whitespace().collect::<Vec<_>>().join(" ");
    if cmd.is_empty() {
        return "Install dependencies (from analyzer).".to_string();
    }

    let low = cmd.to_lowercase();

    if low == "make install" {
        return "Install dependencies via Makefile target.".to_string();
    }

    if low == "uv sync" || low.starts_with("uv sync ") {
        return "Install dependencies using uv.".to_string();
    }
    if low == "poetry install" || low.starts_with("poetry install ") {
        return "Install dependencies using Poetry.".to_string();
    }
    if low == "pdm install" || low.starts_with("pdm install ") {
        return "Install dependencies using PDM.".to_string();
    }
    if low == "pipenv install" || low.starts_with("pipenv install ") {
        return "Install dependencies using Pipenv.".to_string();
    }

    let tokens: Vec<&str> = cmd.split_whitespace().collect();
    if let Some(pip_tokens) = normalize_to_pip_tokens(&tokens) {
        return describe_pip_command(&pip_tokens);
    }

    if low == "npm install" || low == "npm ci" || low.starts_with("npm install ") {
        return "Install dependencies using npm.".to_string();
    }
    if low == "yarn install" || low.starts_with("yarn install ") {
        return "Install dependencies using Yarn.".to_string();
    }
    if low == "pnpm install" || low.starts_with("pnpm install ") {
        return "Install dependencies using pnpm.".to_string();
    }

    "Install dependencies (from analyzer).".to_string()
}

/// Rewrites `python -m pip ...` to plain pip tokens; returns `None` for
/// anything that is not pip-like.
fn normalize_to_pip_tokens<'a>(tokens: &[&'a str]) -> Option<Vec<&'a str>> {
    let first = tokens.first()?.to_lowercase();
    if first == "pip" || first == "pip3" {
        return Some(tokens.to_vec());
    }
    if tokens.len() >= 3
        && (first == "python" || first == "python3")
        && tokens[1] == "-m"
        && tokens[2].eq_ignore_ascii_case("pip")
    {
        let mut out = vec!["pip"];
        out.extend_from_slice(&tokens[3..]);
        return Some(out);
    }
    None
}

fn describe_pip_command(pip_tokens: &[&str]) -> String {
    let verb = match pip_tokens.get(1) {
        Some(v) => v.to_lowercase(),
        None => return "Install Python packages via pip.".to_string(),
    };

    if verb != "install" {
        return match verb.as_str() {
            "freeze" | "list" | "show" => format!("Inspect installed packages via pip ({verb})."),
            "download" => "Download Python packages via pip.".to_string(),
            _ => "Manage Python packages via pip.".to_string(),
        };
    }

    let args = &pip_tokens[2..];

    if has_flag(args, "-u") || has_flag(args, "-U") || has_flag(args, "--upgrade") {
        if args.iter().any(|a| a.eq_ignore_ascii_case("pip")) {
            return "Upgrade pip.".to_string();
        }
        return "Upgrade Python package(s) via pip.".to_string();
    }

    if has_flag(args, "-e") || has_flag(args, "--editable") {
        if args.contains(&".") {
            return "Install the project in editable mode.".to_string();
        }
        return "Install package(s) in editable mode via pip.".to_string();
    }

    if let Some(req) = flag_value(args, "-r").or_else(|| flag_value(args, "--requirement")) {
        return format!("Install dependencies from {req}.");
    }

    if let Some(first) = args.first() {
        if *first == "." {
            return "Install the project package.".to_string();
        }
        if first.starts_with(".[") && first.ends_with(']') {
            return "Install the project package with extras.".to_string();
        }
    }

    if args.iter().any(|a| !a.is_empty() && !a.starts_with('-')) {
        return "Install Python package(s) via pip.".to_string();
    }

    "Install Python packages via pip.".to_string()
}

fn has_flag(args: &[&str], flag: &str) -> bool {
    args.contains(&flag)
}

fn flag_value<'a>(args: &[&'a str], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| *a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn ensure_period(s: &str) -> String {
    let s = s.trim();
    if s.is_empty() {
        return String::new();
    }
    let trimmed = s.trim_end_matches('.').trim_end();
    format!("{trimmed}.")
}

/// Mirrors `python.installInstructions` into `scripts.install`.
///
/// Guards: a pre-existing literal `make install` makes the Makefile
/// target the sole install command; at most one `pip install -r` survives
/// across the merged list; exact command strings are deduplicated.
pub fn merge_install_instructions(scripts: &mut ScriptGroup, python: Option<&PythonInfo>) {
    let instructions = match python {
        Some(py) if !py.install_instructions.is_empty() => &py.install_instructions,
        _ => return,
    };

    let mut existing: Vec<String> = scripts
        .install
        .iter()
        .map(|c| c.command.trim().to_string())
        .collect();

    if existing.iter().any(|c| c == "make install") {
        return;
    }

    let mut pip_r_seen = existing.iter().any(|c| c.contains("pip install -r"));

    for raw in instructions {
        let cmd = raw.trim();
        if cmd.is_empty() || existing.iter().any(|c| c == cmd) {
            continue;
        }
        if cmd.contains("pip install -r") {
            if pip_r_seen {
                continue;
            }
            pip_r_seen = true;
        }

        let desc = ensure_period(&describe_install_command(cmd));
        scripts.install.push(
            CommandInfo::new(cmd, "python.installInstructions").with_description(desc),
        );
        existing.push(cmd.to_string());
    }
}
