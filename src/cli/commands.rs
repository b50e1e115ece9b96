use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::DEFAULT_MAX_FILES;

/// Deterministic repository onboarding analyzer
#[derive(Parser, Debug)]
#[command(
    name = "gangway",
    about = "Deterministic repository onboarding analyzer",
    version,
    author,
    long_about = "gangway scans a repository, classifies its docs, configuration and \
                  dependency manifests, extracts runnable commands from Makefiles, \
                  scripts, tox and package.json, and renders a byte-stable \
                  ONBOARDING.md document from the findings."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Increase verbosity")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Analyze a repository and emit the analysis record as JSON",
        long_about = "Scans the repository tree, classifies files and extracts command \
                      evidence, then prints the full analysis record as JSON.\n\n\
                      Examples:\n  \
                      gangway analyze\n  \
                      gangway analyze /path/to/repo\n  \
                      gangway analyze --max-files 1000 -o analysis.json"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Analyze a repository and render the onboarding document",
        long_about = "Runs the analysis and compiles it into the onboarding blueprint.\n\n\
                      Examples:\n  \
                      gangway render\n  \
                      gangway render /path/to/repo --format json\n  \
                      gangway render --commands extra-commands.json -o ONBOARDING.md"
    )]
    Render(RenderArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,

    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_MAX_FILES,
        help = "Maximum number of files accepted by the scan"
    )]
    pub max_files: usize,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to repository (defaults to current directory)"
    )]
    pub repository_path: Option<PathBuf>,

    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_MAX_FILES,
        help = "Maximum number of files accepted by the scan"
    )]
    pub max_files: usize,

    #[arg(
        long,
        value_name = "FILE",
        help = "JSON file with extra dev/test commands to merge into the document"
    )]
    pub commands: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "markdown",
        help = "Output format"
    )]
    pub format: RenderFormatArg,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormatArg {
    /// Rendered markdown document
    Markdown,
    /// Full blueprint structure as JSON
    Json,
}
