//! Layered extractor configuration
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. Config file (`--config`, or `.xdocs-extract.toml` when present)
//! 3. CLI flags

mod defaults;
mod effective;
mod merge;

pub use defaults::BuiltinDefaults;
pub use effective::{
    AllInOneConfig, ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig, ExtractorConfig,
    DEFAULT_CONFIG_FILE,
};
pub use merge::{deep_merge, merge_layers};
