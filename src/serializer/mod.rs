//! Fixture-to-XML serialization pipelines
//!
//! Two entry points share one renderer:
//! - single: one fixture's `TreeWalker` checks into one document
//! - merged: the checks of many fixtures into one document, every module
//!   tagged with the `id` of the fixture it came from

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use config_tree::{
    compose, example_label, render_modules, tag, ConfigNode, Configuration, FixtureParser,
    InlineConfigParser, ParseError, TaggedModule, DEFAULT_PLACEHOLDER,
};

use crate::config::ExtractorConfig;

/// Template used when no template file is configured
pub const BUNDLED_TEMPLATE: &str = include_str!("../../resources/config-template-treewalker.xml");

/// Indentation of top-level modules in the bundled template
pub const DEFAULT_BASE_INDENT: &str = "        ";

/// Errors from the serialization pipelines
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SerializeError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a template file, or fall back to the bundled template
pub fn load_template(path: Option<&Path>) -> Result<String, SerializeError> {
    match path {
        Some(path) => {
            log::debug!("Template file path: {}", path.display());
            fs::read_to_string(path).map_err(|e| SerializeError::io(path, e))
        }
        None => Ok(BUNDLED_TEMPLATE.to_string()),
    }
}

/// Renders fixture configurations into template documents
#[derive(Debug, Clone)]
pub struct ConfigSerializer<P = InlineConfigParser> {
    parser: P,
    placeholder: String,
    base_indent: String,
}

impl Default for ConfigSerializer<InlineConfigParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSerializer<InlineConfigParser> {
    /// Serializer reading `/*xml` blocks, with default placeholder and indent
    pub fn new() -> Self {
        Self::with_parser(InlineConfigParser::new())
    }

    /// Serializer using the placeholder and indent from `config`
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new()
            .with_placeholder(config.placeholder.clone())
            .with_base_indent(config.base_indent.clone())
    }
}

impl<P: FixtureParser> ConfigSerializer<P> {
    /// Serializer backed by a custom fixture parser
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            base_indent: DEFAULT_BASE_INDENT.to_string(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_base_indent(mut self, indent: impl Into<String>) -> Self {
        self.base_indent = indent.into();
        self
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    fn load(&self, fixture: &Path) -> Result<ConfigNode, SerializeError> {
        self.parser
            .parse(fixture)
            .map_err(|source| SerializeError::Parse {
                path: fixture.to_path_buf(),
                source,
            })
    }

    /// Rendered modules of a parsed fixture; empty without a `TreeWalker`
    pub fn module_content(&self, root: &ConfigNode) -> String {
        match root.tree_walker() {
            Some(walker) => render_modules(walker.children(), &self.base_indent),
            None => {
                log::debug!("No TreeWalker module under '{}'", root.name());
                String::new()
            }
        }
    }

    /// Render one fixture into the template
    pub fn render_single(&self, fixture: &Path, template: &str) -> Result<String, SerializeError> {
        log::debug!("Loading configuration from example file {}", fixture.display());
        let root = self.load(fixture)?;
        let content = self.module_content(&root);
        Ok(compose(template, &self.placeholder, &content))
    }

    /// Render the `TreeWalker` checks of all fixtures into one template
    ///
    /// Modules are emitted in fixture order, each tagged with
    /// `id="example<N>"` where N is the 1-based position of its fixture.
    pub fn render_merged<Q: AsRef<Path>>(
        &self,
        fixtures: &[Q],
        template: &str,
    ) -> Result<String, SerializeError> {
        let roots = fixtures
            .iter()
            .map(|fixture| {
                log::debug!(
                    "Loading configuration from example file {}",
                    fixture.as_ref().display()
                );
                self.load(fixture.as_ref())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let content = render_modules(&tag_children(&roots), &self.base_indent);
        Ok(compose(template, &self.placeholder, &content))
    }

    /// Render one fixture and write the document to `output`
    pub fn serialize_config(
        &self,
        fixture: &Path,
        template: &str,
        output: &Path,
    ) -> Result<(), SerializeError> {
        let document = self.render_single(fixture, template)?;
        fs::write(output, document).map_err(|e| SerializeError::io(output, e))
    }

    /// Render many fixtures into one document and write it to `output`
    pub fn serialize_all_in_one<Q: AsRef<Path>>(
        &self,
        fixtures: &[Q],
        template: &str,
        output: &Path,
    ) -> Result<(), SerializeError> {
        log::info!("Generating all-in-one configuration from {} fixtures", fixtures.len());
        let document = self.render_merged(fixtures, template)?;
        fs::write(output, document).map_err(|e| SerializeError::io(output, e))
    }
}

/// Tag the `TreeWalker` children of every root with its 1-based position
pub fn tag_children(roots: &[ConfigNode]) -> Vec<TaggedModule<'_>> {
    let mut combined = Vec::new();
    for (index, root) in roots.iter().enumerate() {
        let label = example_label(index + 1);
        match root.tree_walker() {
            Some(walker) => {
                combined.extend(walker.children().iter().map(|child| tag(child, label.clone())));
            }
            None => log::debug!("Fixture {} has no TreeWalker module", label),
        }
    }
    combined
}
