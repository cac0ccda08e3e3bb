//! Configuration tree model.
//!
//! A module is a named configuration unit with string properties and an
//! ordered list of child modules. Trees are immutable once built.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Name of the container whose children are the rendered checks.
pub const TREE_WALKER: &str = "TreeWalker";

/// Failure to read a property value from a module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    #[error("property '{property}' not found in module '{module}'")]
    NotFound { module: String, property: String },

    #[error("property '{property}' of module '{module}' is unreadable: {reason}")]
    Unreadable {
        module: String,
        property: String,
        reason: String,
    },
}

/// Read-only view of one module.
///
/// Implemented by owned trees ([`ConfigNode`]) and by derived views such as
/// [`TaggedModule`](crate::TaggedModule). Renderers only ever go through this
/// trait.
pub trait Configuration {
    /// Module kind, e.g. `"SummaryJavadoc"`.
    fn name(&self) -> &str;

    /// Names of all properties. Order is unspecified.
    fn property_names(&self) -> Vec<&str>;

    /// Value of a property, or [`PropertyError::NotFound`] for unknown names.
    fn property(&self, name: &str) -> Result<Cow<'_, str>, PropertyError>;

    /// Child modules in declaration order.
    fn children(&self) -> &[ConfigNode];
}

/// Owned module configuration node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigNode {
    name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<ConfigNode>,
}

impl ConfigNode {
    /// Create a module with no properties and no children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Add or replace a property.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Append a child module.
    pub fn with_child(mut self, child: ConfigNode) -> Self {
        self.children.push(child);
        self
    }

    /// Insert a property, returning the previous value if one existed.
    pub fn insert_property(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.properties.insert(name.into(), value.into())
    }

    /// Append a child module in place.
    pub fn push_child(&mut self, child: ConfigNode) {
        self.children.push(child);
    }

    /// All properties, keyed by name.
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// First direct child with exactly this name.
    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// The `TreeWalker` container, if this module has one.
    pub fn tree_walker(&self) -> Option<&ConfigNode> {
        self.child(TREE_WALKER)
    }
}

impl Configuration for ConfigNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn property_names(&self) -> Vec<&str> {
        self.properties.keys().map(String::as_str).collect()
    }

    fn property(&self, name: &str) -> Result<Cow<'_, str>, PropertyError> {
        self.properties
            .get(name)
            .map(|v| Cow::Borrowed(v.as_str()))
            .ok_or_else(|| PropertyError::NotFound {
                module: self.name.clone(),
                property: name.to_string(),
            })
    }

    fn children(&self) -> &[ConfigNode] {
        &self.children
    }
}
