//! Built-in extractor defaults (layer 1)
//!
//! Hardcoded defaults for all configuration values.

use serde::{Deserialize, Serialize};

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Directory relative paths are resolved against (default: ".")
    pub project_root: String,

    /// Template placeholder token (default: "{{PLACEHOLDER}}")
    pub placeholder: String,

    /// Indentation of top-level modules inside the template (default: 8 spaces)
    pub base_indent: String,

    /// Suffix replacing the fixture extension in output names (default: "-config.xml")
    pub output_suffix: String,

    /// File name pattern for fixture discovery
    pub fixture_pattern: String,

    /// Write a merged document for the whole batch (default: false)
    pub all_in_one_enabled: bool,

    /// Merged document file name (default: "all-examples-config.xml")
    pub all_in_one_file_name: String,

    /// Run the post-hoc property sorter on written documents (default: false)
    pub sort_output: bool,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            project_root: ".".to_string(),
            placeholder: config_tree::DEFAULT_PLACEHOLDER.to_string(),
            base_indent: " ".repeat(8),
            output_suffix: "-config.xml".to_string(),
            fixture_pattern: r"^Example\d+\.(java|txt)$".to_string(),
            all_in_one_enabled: false,
            all_in_one_file_name: "all-examples-config.xml".to_string(),
            sort_output: false,
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "project_root": self.project_root,
            "placeholder": self.placeholder,
            "base_indent": self.base_indent,
            "output_suffix": self.output_suffix,
            "fixture_pattern": self.fixture_pattern,
            "all_in_one": {
                "enabled": self.all_in_one_enabled,
                "file_name": self.all_in_one_file_name
            },
            "sort_output": self.sort_output
        })
    }
}
