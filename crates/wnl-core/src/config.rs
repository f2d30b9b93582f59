//! WNL Configuration Management
//!
//! Handles configuration from config files, environment variables,
//! and command-line arguments with sensible defaults for local runs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Lexical graph source
    pub graph: GraphConfig,

    /// Output location for generated lists
    pub output: OutputConfig,

    /// Tokenizer settings
    pub tokenizer: TokenizerConfig,

    /// List builder defaults
    pub lists: ListsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_override()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError { path, message },
            other => other,
        })
    }

    /// Parse a TOML document; missing sections fall back to defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the process environment in production)
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Graph
        if let Some(path) = lookup("WNL_GRAPH_PATH") {
            self.graph.path = PathBuf::from(path);
        }
        if let Some(format) = lookup("WNL_GRAPH_FORMAT") {
            self.graph.format = format.parse()?;
        }

        // Output
        if let Some(dir) = lookup("WNL_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }

        // Tokenizer
        if let Some(language) = lookup("WNL_LANGUAGE") {
            self.tokenizer.language = language;
        }

        // Lists
        if let Some(root) = lookup("WNL_ROOT") {
            if root.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "WNL_ROOT".to_string(),
                    value: root,
                });
            }
            self.lists.default_root = root;
        }

        // Logging
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.json_format = match format.to_lowercase().as_str() {
                "json" => true,
                "text" | "pretty" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "LOG_FORMAT".to_string(),
                        value: format,
                    })
                }
            };
        }

        Ok(self)
    }
}

/// Lexical graph source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// JSON snapshot file or WordNet database directory
    pub path: PathBuf,

    /// Source format
    pub format: GraphFormat,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("wordnet.json"),
            format: GraphFormat::Auto,
        }
    }
}

/// Supported graph source formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    /// Directory means WordNet database, anything else a JSON snapshot
    #[default]
    Auto,
    Json,
    #[serde(alias = "wordnet")]
    Wndb,
}

impl std::str::FromStr for GraphFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "json" => Ok(Self::Json),
            "wndb" | "wordnet" => Ok(Self::Wndb),
            _ => Err(ConfigError::InvalidValue {
                key: "WNL_GRAPH_FORMAT".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory generated lists are written to (must exist)
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

/// Tokenizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Stopword language
    pub language: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            language: "english".to_string(),
        }
    }
}

/// List builder defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListsConfig {
    /// Root concept when none is given
    pub default_root: String,

    /// Expand the root into its ranked hyponym closure
    pub expanded: bool,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            default_root: "entity.n.01".to_string(),
            expanded: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
