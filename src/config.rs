use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".autoimport";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub indexer: IndexerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What to do when a source file fails to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseErrorPolicy {
    /// Record a diagnostic and leave the file out of the index
    #[default]
    Skip,
    /// Fail the whole indexing pass
    Abort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// File extensions treated as Python sources
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory or file names to skip (in addition to .gitignore)
    ///
    /// Defaults to caches and virtualenvs; symbols defined only under these
    /// directories never show up in suggestions. Set to `[]` to scan them.
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    /// Honour .gitignore, .ignore and git exclude files
    ///
    /// Ignored Python files are not indexed while this is on.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Descend into hidden files and directories
    ///
    /// Off by default, so modules under e.g. `.venv/` or `.tox/` are not indexed.
    #[serde(default)]
    pub include_hidden: bool,

    /// Behaviour on syntax errors: "skip" (default) or "abort"
    #[serde(default)]
    pub on_parse_error: ParseErrorPolicy,

    /// Parse files on a rayon pool
    #[serde(default)]
    pub parallel: bool,

    /// Number of parallel threads for indexing (None = auto-detect)
    #[serde(default)]
    pub parallel_threads: Option<usize>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            ignore_patterns: default_ignore_patterns(),
            respect_gitignore: true,
            include_hidden: false,
            on_parse_error: ParseErrorPolicy::default(),
            parallel: false,
            parallel_threads: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    vec!["py".to_string()]
}

fn default_ignore_patterns() -> Vec<String> {
    vec![
        "__pycache__".to_string(),
        ".git".to_string(),
        ".venv".to_string(),
        "venv".to_string(),
        ".tox".to_string(),
        "node_modules".to_string(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to rotating files
    #[serde(default)]
    pub enabled: bool,

    /// Write logs to stderr
    #[serde(default = "default_true")]
    pub stderr: bool,

    /// Level for the file log
    #[serde(default = "default_level")]
    pub level: String,

    /// Level for stderr output (RUST_LOG takes precedence)
    #[serde(default = "default_stderr_level")]
    pub stderr_level: String,

    /// Log directory, relative paths resolve against the project root
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// "hourly", "daily", "minutely" or "never"
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: true,
            level: default_level(),
            stderr_level: default_stderr_level(),
            directory: default_log_directory(),
            file_prefix: default_file_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_level() -> String {
    "debug".to_string()
}

fn default_stderr_level() -> String {
    "warn".to_string()
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(CONFIG_DIR).join("logs")
}

fn default_file_prefix() -> String {
    "autoimport.log".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Config {
    /// Load configuration from the .autoimport directory
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = Self::config_dir(root).join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;

            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            Ok(Config::default())
        }
    }

    /// Get the path to the .autoimport directory
    pub fn config_dir(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR)
    }
}
