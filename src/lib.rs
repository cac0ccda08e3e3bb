//! xdocs config extractor
//!
//! Turns documentation example fixtures (`Example<N>.java` / `Example<N>.txt`
//! with an embedded `/*xml` configuration block) into standalone XML
//! configuration files, one per fixture or merged into a single document.

pub mod config;
pub mod extract;
pub mod logging;
pub mod serializer;

pub use config::{ConfigError, EffectiveConfig, ExtractorConfig};
pub use extract::{ExtractError, ExtractReport, Extractor};
pub use serializer::{load_template, ConfigSerializer, SerializeError};
