//! Module configuration trees and their XML rendering.
//!
//! A fixture's inline configuration is parsed into a [`ConfigNode`] tree.
//! The checks under its `TreeWalker` container are rendered back into
//! sorted, indented `<module>`/`<property>` XML and substituted into a
//! configuration template.

mod node;
mod parser;
mod render;
mod sort;
mod tagged;
mod template;

pub use node::{ConfigNode, Configuration, PropertyError, TREE_WALKER};
pub use parser::{extract_block, parse_xml, unescape, FixtureParser, InlineConfigParser, ParseError};
pub use render::{escape_attribute, render_module, render_modules, render_properties, INDENT_UNIT};
pub use sort::sort_properties;
pub use tagged::{tag, TaggedModule, ID_PROPERTY};
pub use template::{compose, DEFAULT_PLACEHOLDER};

/// Label attached to every module contributed by the fixture at `index`
/// (1-based) of a merged document.
pub fn example_label(index: usize) -> String {
    format!("example{}", index)
}
