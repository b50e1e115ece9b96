//! External data contracts for the analyzer and the blueprint.
//!
//! Field names are a stable JSON contract (camelCase), consumed by the
//! blueprint compiler and by external callers verbatim. All records are
//! plain immutable values produced once per `analyze` invocation.

use serde::{Deserialize, Serialize};

/// How directly a command was evidenced versus inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Detected,
    Derived,
    Heuristic,
}

/// A runnable command candidate with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandInfo {
    pub command: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl CommandInfo {
    pub fn new(command: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            source: source.into(),
            name: None,
            description: None,
            confidence: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// A documentation file candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocInfo {
    pub path: String,
    #[serde(rename = "type")]
    pub doc_type: String,
}

impl DocInfo {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            doc_type: "doc".to_string(),
        }
    }
}

/// A configuration file with an optional canned description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFileInfo {
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A Python dependency manifest (requirements, pyproject, setup, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonEnvFile {
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Python ecosystem evidence aggregated for the repo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PythonInfo {
    #[serde(default)]
    pub python_version_hints: Vec<String>,
    #[serde(default)]
    pub package_managers: Vec<String>,
    #[serde(default)]
    pub dependency_files: Vec<PythonEnvFile>,
    #[serde(default)]
    pub env_setup_instructions: Vec<String>,
    #[serde(default)]
    pub install_instructions: Vec<String>,
}

impl PythonInfo {
    /// True when any list carries actual evidence. An all-empty record is
    /// treated as "Python not meaningfully detected" by the renderer.
    pub fn has_evidence(&self) -> bool {
        !self.python_version_hints.is_empty()
            || !self.package_managers.is_empty()
            || !self.dependency_files.is_empty()
            || !self.env_setup_instructions.is_empty()
            || !self.install_instructions.is_empty()
    }
}

/// A detected web framework. Evidence only; never implies commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkInfo {
    pub name: String,
    pub detection_reason: String,
    #[serde(default)]
    pub key_symbols: Vec<String>,
    pub evidence_path: String,
}

/// Non-primary ecosystem evidence. Must never carry command text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolingInfo {
    pub name: String,
    #[serde(default)]
    pub evidence_files: Vec<String>,
    pub confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Commands grouped by onboarding purpose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptGroup {
    #[serde(default)]
    pub dev: Vec<CommandInfo>,
    #[serde(default)]
    pub start: Vec<CommandInfo>,
    #[serde(default)]
    pub test: Vec<CommandInfo>,
    #[serde(default)]
    pub lint: Vec<CommandInfo>,
    #[serde(default)]
    pub format: Vec<CommandInfo>,
    #[serde(default)]
    pub install: Vec<CommandInfo>,
    #[serde(default)]
    pub other: Vec<CommandInfo>,
}

/// Command bucket names used by extractors when routing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptBucket {
    Dev,
    Start,
    Test,
    Lint,
    Format,
    Install,
    Other,
}

impl ScriptGroup {
    pub fn bucket_mut(&mut self, bucket: ScriptBucket) -> &mut Vec<CommandInfo> {
        match bucket {
            ScriptBucket::Dev => &mut self.dev,
            ScriptBucket::Start => &mut self.start,
            ScriptBucket::Test => &mut self.test,
            ScriptBucket::Lint => &mut self.lint,
            ScriptBucket::Format => &mut self.format,
            ScriptBucket::Install => &mut self.install,
            ScriptBucket::Other => &mut self.other,
        }
    }

    pub fn extend_bucket(&mut self, bucket: ScriptBucket, commands: Vec<CommandInfo>) {
        self.bucket_mut(bucket).extend(commands);
    }
}

/// Root analysis record: the sole hand-off artifact to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoAnalysis {
    pub repo_path: String,
    pub primary_tooling: String,
    #[serde(default)]
    pub docs: Vec<DocInfo>,
    #[serde(default)]
    pub configuration_files: Vec<ConfigFileInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<PythonInfo>,
    #[serde(default)]
    pub scripts: ScriptGroup,
    #[serde(default)]
    pub frameworks: Vec<FrameworkInfo>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub notebooks: Vec<String>,
    #[serde(default)]
    pub other_tooling: Vec<ToolingInfo>,
}

/// Caller-supplied extra commands, merged into the rendered Run/Test
/// sections alongside extractor output. `buildCommands` is accepted for
/// contract compatibility but no section consumes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandsOverride {
    #[serde(default)]
    pub dev_commands: Vec<CommandInfo>,
    #[serde(default)]
    pub test_commands: Vec<CommandInfo>,
    #[serde(default)]
    pub build_commands: Vec<CommandInfo>,
}
