//! Effective configuration with provenance
//!
//! The effective config captures the merged configuration plus information
//! about where each layer came from.

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use super::defaults::BuiltinDefaults;
use super::merge::merge_layers;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = ".xdocs-extract.toml";

/// Origin of a configuration source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Cli,
}

/// A contributing config source with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Settings for the merged all-in-one document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllInOneConfig {
    pub enabled: bool,
    pub file_name: String,
}

/// Typed extractor settings, deserialized from the merged layers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractorConfig {
    /// Base for every relative path below
    pub project_root: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Template file; the bundled TreeWalker template when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,

    pub placeholder: String,
    pub base_indent: String,
    pub output_suffix: String,
    pub fixture_pattern: String,
    pub all_in_one: AllInOneConfig,
    pub sort_output: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        let defaults = BuiltinDefaults::default();
        Self {
            project_root: PathBuf::from(defaults.project_root),
            input_dir: None,
            output_dir: None,
            template: None,
            placeholder: defaults.placeholder,
            base_indent: defaults.base_indent,
            output_suffix: defaults.output_suffix,
            fixture_pattern: defaults.fixture_pattern,
            all_in_one: AllInOneConfig {
                enabled: defaults.all_in_one_enabled,
                file_name: defaults.all_in_one_file_name,
            },
            sort_output: defaults.sort_output,
        }
    }
}

impl ExtractorConfig {
    /// Resolve a path against the project root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.placeholder.is_empty() {
            return Err(ConfigError::ValidationError(
                "placeholder must not be empty".to_string(),
            ));
        }

        if !self.base_indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ConfigError::ValidationError(
                "base_indent must contain only spaces and tabs".to_string(),
            ));
        }

        if self.output_suffix.is_empty() {
            return Err(ConfigError::ValidationError(
                "output_suffix must not be empty".to_string(),
            ));
        }

        if let Err(e) = Regex::new(&self.fixture_pattern) {
            return Err(ConfigError::ValidationError(format!(
                "fixture_pattern is not a valid regex: {}",
                e
            )));
        }

        let file_name = &self.all_in_one.file_name;
        if file_name.is_empty() || file_name.contains('/') || file_name.contains('\\') {
            return Err(ConfigError::ValidationError(
                "all_in_one.file_name must be a plain file name".to_string(),
            ));
        }

        Ok(())
    }
}

/// Effective configuration with full provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    /// When this config was computed
    pub created_at: DateTime<Utc>,

    /// The merged configuration object
    pub config: Value,

    /// Contributing sources in precedence order
    pub sources: Vec<ConfigSource>,
}

impl EffectiveConfig {
    /// Build effective config from layers
    pub fn build(
        config_path: Option<&Path>,
        cli_overrides: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Layer 1: Built-in defaults
        layers.push(BuiltinDefaults::default().to_value());
        sources.push(ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        });

        // Layer 2: Config file
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::IoError(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            let (value, digest) = Self::load_toml_file(path)?;
            log::debug!("Loaded config file {} ({})", path.display(), digest);
            layers.push(value);
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        // Layer 3: CLI overrides
        if let Some(cli) = cli_overrides {
            layers.push(cli);
            sources.push(ConfigSource {
                origin: ConfigOrigin::Cli,
                path: None,
                digest: None,
            });
        }

        let merged = merge_layers(layers);

        let effective = Self {
            created_at: Utc::now(),
            config: merged,
            sources,
        };
        effective.extractor_config()?.validate()?;
        Ok(effective)
    }

    /// Load and parse a TOML file, returning the value and digest
    fn load_toml_file(path: &Path) -> Result<(Value, String), ConfigError> {
        let bytes = fs::read(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let contents = String::from_utf8(bytes)
            .map_err(|e| ConfigError::ParseError(format!("Invalid UTF-8: {}", e)))?;

        let toml_value: toml::Value = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        Ok((Self::toml_to_json(toml_value), digest))
    }

    /// Convert TOML Value to JSON Value
    fn toml_to_json(toml: toml::Value) -> Value {
        match toml {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Number(i.into()),
            toml::Value::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Self::toml_to_json).collect())
            }
            toml::Value::Table(table) => Value::Object(
                table
                    .into_iter()
                    .map(|(k, v)| (k, Self::toml_to_json(v)))
                    .collect(),
            ),
        }
    }

    /// Typed view of the merged configuration
    pub fn extractor_config(&self) -> Result<ExtractorConfig, ConfigError> {
        serde_json::from_value(self.config.clone())
            .map_err(|e| ConfigError::ParseError(format!("invalid configuration: {}", e)))
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Get a merged config value by path (dot-separated)
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.config;
        for part in path.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
