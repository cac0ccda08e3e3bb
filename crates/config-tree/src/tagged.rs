//! Identifier injection for merged documents.

use std::borrow::Cow;

use crate::node::{ConfigNode, Configuration, PropertyError};

/// Name of the synthetic property added by [`TaggedModule`].
pub const ID_PROPERTY: &str = "id";

/// A module seen through an extra `id` property.
///
/// Borrows the original node; name, children and every other property are
/// read through to it. The `id` property always resolves to the label, even
/// when the original declares its own `id`.
#[derive(Debug)]
pub struct TaggedModule<'a, C: Configuration + ?Sized = ConfigNode> {
    inner: &'a C,
    label: String,
}

impl<'a, C: Configuration + ?Sized> TaggedModule<'a, C> {
    pub fn new(inner: &'a C, label: impl Into<String>) -> Self {
        Self {
            inner,
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn inner(&self) -> &C {
        self.inner
    }
}

/// Tag a module with an `id` label.
pub fn tag<'a, C: Configuration + ?Sized>(
    node: &'a C,
    label: impl Into<String>,
) -> TaggedModule<'a, C> {
    TaggedModule::new(node, label)
}

impl<C: Configuration + ?Sized> Configuration for TaggedModule<'_, C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .inner
            .property_names()
            .into_iter()
            .filter(|n| *n != ID_PROPERTY)
            .collect();
        names.push(ID_PROPERTY);
        names
    }

    fn property(&self, name: &str) -> Result<Cow<'_, str>, PropertyError> {
        if name == ID_PROPERTY {
            return Ok(Cow::Borrowed(&self.label));
        }
        self.inner.property(name)
    }

    fn children(&self) -> &[ConfigNode] {
        self.inner.children()
    }
}
