//! Template composition.

/// Placeholder recognised in templates unless configured otherwise.
pub const DEFAULT_PLACEHOLDER: &str = "{{PLACEHOLDER}}";

/// Substitute rendered module content into a template.
///
/// Only the first occurrence of `placeholder` is replaced; the rest of the
/// template is returned as is. A template without the placeholder comes back
/// unchanged.
pub fn compose(template: &str, placeholder: &str, module_content: &str) -> String {
    if placeholder.is_empty() || !template.contains(placeholder) {
        log::debug!("Template has no '{}' placeholder", placeholder);
        return template.to_string();
    }
    template.replacen(placeholder, module_content, 1)
}
