//! Batch extraction over a fixture directory
//!
//! Walks the input tree for `Example<N>.java` / `Example<N>.txt` fixtures and
//! writes one configuration document per fixture:
//!
//! ```text
//! <output>/<stem>/<stem>-config.xml
//! ```
//!
//! A failing fixture is logged and recorded in the report; the rest of the
//! batch still runs.

mod report;

pub use report::{ExtractReport, FixtureOutcome, Outcome};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use config_tree::sort_properties;
use regex_lite::Regex;
use walkdir::WalkDir;

use crate::config::ExtractorConfig;
use crate::serializer::{load_template, ConfigSerializer, SerializeError};

/// Errors that stop a batch before any fixture is processed
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no input directory configured")]
    MissingInput,

    #[error("no output directory configured")]
    MissingOutput,

    #[error("input directory does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("invalid fixture pattern: {0}")]
    Pattern(String),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Template error: {0}")]
    Template(#[from] SerializeError),
}

/// Fixture discovery and per-fixture serialization
#[derive(Debug)]
pub struct Extractor {
    config: ExtractorConfig,
    serializer: ConfigSerializer,
    pattern: Regex,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractError> {
        let pattern =
            Regex::new(&config.fixture_pattern).map_err(|e| ExtractError::Pattern(e.to_string()))?;
        let serializer = ConfigSerializer::from_config(&config);
        Ok(Self {
            config,
            serializer,
            pattern,
        })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Whether a file name looks like a fixture
    pub fn is_fixture(&self, file_name: &str) -> bool {
        self.pattern.is_match(file_name)
    }

    /// Recursively collect fixture files under `input`, sorted by path
    pub fn discover(&self, input: &Path) -> Result<Vec<PathBuf>, ExtractError> {
        if !input.is_dir() {
            return Err(ExtractError::InputNotFound(input.to_path_buf()));
        }

        let mut fixtures = Vec::new();
        for entry in WalkDir::new(input)
            .follow_links(false)
            .sort_by(|a, b| a.file_name().cmp(b.file_name()))
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.file_name().to_str().is_some_and(|n| self.is_fixture(n)) {
                fixtures.push(entry.into_path());
            }
        }

        log::info!(
            "Found {} fixture files under {}",
            fixtures.len(),
            input.display()
        );
        Ok(fixtures)
    }

    /// Run over the configured input and output directories
    pub fn run(&self) -> Result<ExtractReport, ExtractError> {
        let input = self
            .config
            .input_dir
            .as_deref()
            .ok_or(ExtractError::MissingInput)?;
        let output = self
            .config
            .output_dir
            .as_deref()
            .ok_or(ExtractError::MissingOutput)?;
        self.process_files(&self.config.resolve(input), &self.config.resolve(output))
    }

    /// Process every fixture under `input`, writing documents below `output`
    pub fn process_files(&self, input: &Path, output: &Path) -> Result<ExtractReport, ExtractError> {
        let template_path = self.config.template.as_deref().map(|p| self.config.resolve(p));
        let template = load_template(template_path.as_deref())?;
        let fixtures = self.discover(input)?;

        if output.exists() {
            log::debug!("Output directory already exists: {}", output.display());
        } else {
            log::info!("Creating output directory {}", output.display());
            fs::create_dir_all(output).map_err(|source| ExtractError::Io {
                path: output.to_path_buf(),
                source,
            })?;
        }

        let mut report = ExtractReport::new(input.to_path_buf(), output.to_path_buf());

        for fixture in &fixtures {
            let outcome = match self.process_file(fixture, output, &template) {
                Ok(written) => {
                    log::info!("Wrote {}", written.display());
                    Outcome::Written { output: written }
                }
                Err(e) => {
                    log::error!("Failed to process file {}: {}", fixture.display(), e);
                    Outcome::Failed {
                        error: e.to_string(),
                    }
                }
            };
            report.fixtures.push(FixtureOutcome {
                fixture: fixture.clone(),
                outcome,
            });
        }

        if self.config.all_in_one.enabled {
            let target = output.join(&self.config.all_in_one.file_name);
            report.all_in_one = Some(match self.write_all_in_one(&fixtures, &template, &target) {
                Ok(()) => Outcome::Written { output: target },
                Err(e) => {
                    log::error!("Failed to generate all-in-one configuration: {}", e);
                    Outcome::Failed {
                        error: e.to_string(),
                    }
                }
            });
        }

        Ok(report)
    }

    fn process_file(
        &self,
        fixture: &Path,
        output_root: &Path,
        template: &str,
    ) -> Result<PathBuf, SerializeError> {
        log::debug!("Processing file {}", fixture.display());
        let stem = fixture_stem(fixture);
        let subfolder = output_root.join(&stem);
        fs::create_dir_all(&subfolder).map_err(|source| SerializeError::Io {
            path: subfolder.clone(),
            source,
        })?;

        let document = self.serializer.render_single(fixture, template)?;
        let target = subfolder.join(format!("{}{}", stem, self.config.output_suffix));
        self.write_document(&target, document)?;
        Ok(target)
    }

    fn write_all_in_one(
        &self,
        fixtures: &[PathBuf],
        template: &str,
        target: &Path,
    ) -> Result<(), SerializeError> {
        log::info!("Generating all-in-one configuration from {} fixtures", fixtures.len());
        let document = self.serializer.render_merged(fixtures, template)?;
        self.write_document(target, document)
    }

    fn write_document(&self, target: &Path, document: String) -> Result<(), SerializeError> {
        let document = if self.config.sort_output {
            sort_properties(&document)
        } else {
            document
        };
        fs::write(target, document).map_err(|source| SerializeError::Io {
            path: target.to_path_buf(),
            source,
        })
    }
}

/// Fixture file name without its extension
pub fn fixture_stem(fixture: &Path) -> String {
    fixture
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}
