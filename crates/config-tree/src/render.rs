//! XML rendering of module trees.
//!
//! Output follows the configuration-file conventions:
//!
//! ```text
//! <module name="NAME">
//!     <property name="NAME" value="VALUE"/>
//! </module>
//! ```
//!
//! Properties are always sorted by name. A module without properties is
//! written self-closing; nested modules only appear inside the open form.
//! Sibling modules are separated by one blank line. Names and values are
//! attribute-escaped.

use crate::node::Configuration;

/// One level of indentation.
pub const INDENT_UNIT: &str = "    ";

/// Render the properties of a module, one `<property .../>` element per line.
///
/// Lines are sorted by property name and joined with `\n`, no trailing
/// newline. A property whose value cannot be read is logged and left out.
pub fn render_properties<C: Configuration + ?Sized>(config: &C, indent: &str) -> String {
    let mut names = config.property_names();
    names.sort_unstable();
    names.dedup();

    names
        .into_iter()
        .filter_map(|name| match config.property(name) {
            Ok(value) => Some(format!(
                "{}<property name=\"{}\" value=\"{}\"/>",
                indent,
                escape_attribute(name),
                escape_attribute(&value)
            )),
            Err(e) => {
                log::warn!("Error retrieving property: {}", e);
                None
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a single module and, recursively, its children.
///
/// The form depends on the rendered properties alone: an empty property
/// block gives a self-closing element, which cannot carry children.
pub fn render_module<C: Configuration + ?Sized>(config: &C, indent: &str) -> String {
    let name = escape_attribute(config.name());
    let inner_indent = format!("{}{}", indent, INDENT_UNIT);
    let properties = render_properties(config, &inner_indent);

    if properties.is_empty() {
        if !config.children().is_empty() {
            log::warn!(
                "Module '{}' has no properties; dropping {} nested module(s)",
                config.name(),
                config.children().len()
            );
        }
        return format!("{}<module name=\"{}\"/>", indent, name);
    }

    let children = render_siblings(config.children(), &inner_indent);
    let body = if children.is_empty() {
        properties
    } else {
        format!("{}\n{}", properties, children)
    };

    format!(
        "{indent}<module name=\"{name}\">\n{body}\n{indent}</module>",
        indent = indent,
        name = name,
        body = body,
    )
}

/// Render a list of sibling modules as a top-level block.
///
/// Each module is followed by a blank line and the whole block is trimmed,
/// so the first line carries no indentation and nothing trails the last
/// module. The surrounding template supplies the first line's indentation.
pub fn render_modules<C: Configuration>(modules: &[C], indent: &str) -> String {
    render_siblings(modules, indent).trim().to_string()
}

fn render_siblings<C: Configuration>(modules: &[C], indent: &str) -> String {
    modules
        .iter()
        .map(|m| render_module(m, indent))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Escape characters that cannot appear literally in a double-quoted
/// attribute value.
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
