//! Subcommand handlers. Each handler maps its result onto a process exit
//! code; errors are reported on stderr.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::error;

use crate::analysis::Analyzer;
use crate::blueprint::compile_blueprint;
use crate::cli::commands::{AnalyzeArgs, RenderArgs, RenderFormatArg};
use crate::schema::CommandsOverride;

pub fn handle_analyze(args: &AnalyzeArgs) -> i32 {
    match run_analyze(args) {
        Ok(()) => 0,
        Err(e) => {
            error!("analyze failed: {e:#}");
            eprintln!("Error: {e:#}");
            1
        }
    }
}

pub fn handle_render(args: &RenderArgs) -> i32 {
    match run_render(args) {
        Ok(()) => 0,
        Err(e) => {
            error!("render failed: {e:#}");
            eprintln!("Error: {e:#}");
            1
        }
    }
}

fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let repo = resolve_repo_path(args.repository_path.as_deref())?;
    let analyzer = Analyzer::with_max_files(args.max_files)?;
    let analysis = analyzer.analyze(&repo);

    let mut out = serde_json::to_string_pretty(&analysis).context("serializing analysis")?;
    out.push('\n');
    write_output(args.output.as_deref(), &out)
}

fn run_render(args: &RenderArgs) -> Result<()> {
    let repo = resolve_repo_path(args.repository_path.as_deref())?;
    let analyzer = Analyzer::with_max_files(args.max_files)?;
    let analysis = analyzer.analyze(&repo);

    let commands = match &args.commands {
        Some(path) => load_commands_override(path)?,
        None => CommandsOverride::default(),
    };

    let blueprint = compile_blueprint(&analysis, &commands);
    let out = match args.format {
        RenderFormatArg::Markdown => blueprint.render.markdown,
        RenderFormatArg::Json => {
            let mut json =
                serde_json::to_string_pretty(&blueprint).context("serializing blueprint")?;
            json.push('\n');
            json
        }
    };
    write_output(args.output.as_deref(), &out)
}

fn resolve_repo_path(path: Option<&Path>) -> Result<PathBuf> {
    let repo = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    if !repo.is_dir() {
        bail!("repository path {} is not a directory", repo.display());
    }
    Ok(repo)
}

fn load_commands_override(path: &Path) -> Result<CommandsOverride> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading commands file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing commands file {}", path.display()))
}

fn write_output(target: Option<&Path>, content: &str) -> Result<()> {
    match target {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("writing output to {}", path.display())),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}
