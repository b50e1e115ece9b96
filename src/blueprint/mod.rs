//! Compiles an analysis record into the onboarding blueprint: a list of
//! sections plus pre-rendered markdown. The markdown is byte-stable for a
//! given analysis and is intended to be written out verbatim.

mod sanitize;
mod sections;

pub use sections::Context;

use serde::{Deserialize, Serialize};

use crate::schema::{CommandsOverride, RepoAnalysis};

pub const BLUEPRINT_FORMAT: &str = "onboarding_blueprint_v2";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub heading: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderInfo {
    pub mode: String,
    pub markdown: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    pub format: String,
    pub render: RenderInfo,
    pub sections: Vec<Section>,
}

/// Builds every section in registry order, dropping conditional sections
/// with no lines, then renders the markdown once.
pub fn compile_blueprint(analysis: &RepoAnalysis, commands: &CommandsOverride) -> Blueprint {
    let ctx = Context { analysis, commands };

    let mut built: Vec<Section> = Vec::new();
    for spec in sections::section_registry() {
        let lines = (spec.build)(&ctx);
        if spec.skip_when_empty && lines.is_empty() {
            continue;
        }
        built.push(Section {
            id: spec.id.to_string(),
            heading: spec.heading.to_string(),
            lines,
        });
    }

    let markdown = render_markdown(&built);
    Blueprint {
        format: BLUEPRINT_FORMAT.to_string(),
        render: RenderInfo {
            mode: "verbatim".to_string(),
            markdown,
        },
        sections: built,
    }
}

/// Pure join of sections: heading, newline, lines; blocks separated by a
/// single blank line; exactly one trailing newline when non-empty.
pub fn render_markdown(sections: &[Section]) -> String {
    let mut blocks: Vec<String> = Vec::new();
    for sec in sections {
        let heading = sec.heading.trim_end();
        if heading.is_empty() {
            continue;
        }
        let mut block = heading.to_string();
        if !sec.lines.is_empty() {
            let body: Vec<&str> = sec.lines.iter().map(|l| l.trim_end()).collect();
            block.push('\n');
            block.push_str(&body.join("\n"));
        }
        blocks.push(block);
    }

    let out = blocks.join("\n\n").trim_end().to_string();
    if out.is_empty() {
        out
    } else {
        out + "\n"
    }
}
