use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Which card generation pipeline to run
    #[serde(default)]
    pub mode: GenerationMode,

    /// Poem pipeline settings
    #[serde(default)]
    pub poem: PoemConfig,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Escaping policy for the poem pipeline
    #[serde(default)]
    pub escaping: EscapingPolicy,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Card generation mode
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Sliding-window context cards over poem lines
    #[default]
    Poem,
    /// Relational cards over an enumerated sequence
    Sequence,
}

impl GenerationMode {
    /// Number of header lines the mode consumes before content starts
    pub fn header_lines(&self) -> usize {
        match self {
            Self::Poem => 2,     // title + author
            Self::Sequence => 1, // title only
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Poem => "Poem",
            Self::Sequence => "Sequence",
        }
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Poem => write!(f, "poem"),
            Self::Sequence => write!(f, "sequence"),
        }
    }
}

impl std::str::FromStr for GenerationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "poem" => Ok(Self::Poem),
            "sequence" => Ok(Self::Sequence),
            _ => Err(anyhow!("Invalid generation mode: {}", s)),
        }
    }
}

/// How input lines are decoded and escaped before card generation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EscapingPolicy {
    /// Drop undecodable bytes, pass markup characters through verbatim
    #[default]
    Tolerant,
    /// Drop undecodable bytes, then HTML-escape each line
    Strict,
}

impl EscapingPolicy {
    /// Whether lines get HTML-escaped under this policy
    pub fn escapes_html(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Poem pipeline configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PoemConfig {
    /// Number of context lines shown on the front of each card
    #[serde(default = "default_question_lines")]
    pub question_lines: usize,

    /// Number of lines per answer. Parsed and validated but not consulted
    /// by the generation algorithm; kept for forward compatibility.
    #[serde(default = "default_answer_lines")]
    pub answer_lines: usize,
}

impl Default for PoemConfig {
    fn default() -> Self {
        Self {
            question_lines: default_question_lines(),
            answer_lines: default_answer_lines(),
        }
    }
}

/// Output file configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Path of the CSV deck file, overwritten on every run
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Whether to prefix the file with a UTF-8 byte-order mark.
    /// Anki's import dialog uses it to auto-detect the encoding.
    #[serde(default = "default_true")]
    pub write_bom: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            write_bom: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_question_lines() -> usize {
    2
}

fn default_answer_lines() -> usize {
    1
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output.csv")
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.poem.question_lines < 1 {
            return Err(anyhow!("question_lines must be at least 1"));
        }

        if self.poem.answer_lines < 1 {
            return Err(anyhow!("answer_lines must be at least 1"));
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(anyhow!("output path must not be empty"));
        }

        Ok(())
    }

    /// Escaping policy effectively applied for the configured mode.
    /// The sequence pipeline always escapes; only the poem pipeline
    /// honors the configured policy.
    pub fn effective_escaping(&self) -> EscapingPolicy {
        match self.mode {
            GenerationMode::Poem => self.escaping,
            GenerationMode::Sequence => EscapingPolicy::Strict,
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            mode: GenerationMode::default(),
            poem: PoemConfig::default(),
            output: OutputConfig::default(),
            escaping: EscapingPolicy::default(),
            log_level: LogLevel::default(),
        }
    }
}
