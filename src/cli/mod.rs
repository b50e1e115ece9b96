pub mod commands;
pub mod handlers;

pub use commands::{AnalyzeArgs, CliArgs, Commands, RenderArgs, RenderFormatArg};
pub use handlers::{handle_analyze, handle_render};
