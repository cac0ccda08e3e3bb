//! Inline configuration parser.
//!
//! Fixture files embed their configuration in a comment block:
//!
//! ```text
//! /*xml
//! <module name="Checker">
//!   <module name="TreeWalker">
//!     <module name="SummaryJavadoc">
//!       <property name="period" value="!"/>
//!     </module>
//!   </module>
//! </module>
//! */
//! ```
//!
//! Only the module/property schema is understood. `<message>` elements,
//! comments, XML declarations and doctypes are skipped.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex_lite::Regex;

use crate::node::{ConfigNode, Configuration};

const BLOCK_START: &str = "/*xml";
const BLOCK_END: &str = "*/";

const MODULE: &str = "module";
const PROPERTY: &str = "property";
const MESSAGE: &str = "message";

/// Errors produced while turning a fixture into a configuration tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no '/*xml' configuration block found")]
    MissingBlock,

    #[error("configuration block starting at line {line} is not terminated")]
    UnterminatedBlock { line: usize },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: unexpected <{element}> element")]
    UnexpectedElement { line: usize, element: String },

    #[error("line {line}: <{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        line: usize,
        element: String,
        attribute: String,
    },

    #[error("line {line}: property '{property}' declared twice in module '{module}'")]
    DuplicateProperty {
        line: usize,
        module: String,
        property: String,
    },

    #[error("line {line}: expected </{expected}>, found </{found}>")]
    UnbalancedTag {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("module '{name}' opened at line {line} is never closed")]
    UnclosedModule { name: String, line: usize },

    #[error("line {line}: more than one root module")]
    MultipleRoots { line: usize },

    #[error("configuration block contains no module")]
    NoRootModule,
}

/// Source of configuration trees for fixture files.
pub trait FixtureParser {
    /// Parse the fixture at `path` into its root module.
    fn parse(&self, path: &Path) -> Result<ConfigNode, ParseError>;
}

/// Parser for `/*xml ... */` blocks embedded in fixture sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineConfigParser;

impl InlineConfigParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse fixture text that has already been read.
    pub fn parse_str(&self, content: &str) -> Result<ConfigNode, ParseError> {
        let (xml, first_line) = extract_block(content)?;
        parse_xml(xml, first_line)
    }
}

impl FixtureParser for InlineConfigParser {
    fn parse(&self, path: &Path) -> Result<ConfigNode, ParseError> {
        let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_str(&content)
    }
}

/// Locate the configuration block, returning its body and the line number
/// (1-based) of the body's first line.
pub fn extract_block(content: &str) -> Result<(&str, usize), ParseError> {
    let mut offset = 0;
    let mut start: Option<(usize, usize)> = None;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        match start {
            None if trimmed == BLOCK_START => {
                start = Some((offset + line.len(), line_no + 1));
            }
            Some((body_start, body_line)) if trimmed.starts_with(BLOCK_END) => {
                return Ok((&content[body_start..offset], body_line));
            }
            _ => {}
        }
        offset += line.len();
    }

    match start {
        Some((_, body_line)) => Err(ParseError::UnterminatedBlock {
            line: body_line - 1,
        }),
        None => Err(ParseError::MissingBlock),
    }
}

fn tag_regex() -> &'static Regex {
    static TAG: OnceLock<Regex> = OnceLock::new();
    TAG.get_or_init(|| {
        Regex::new(r#"^<(/?)([A-Za-z_][\w.-]*)((?:\s+[\w.:-]+\s*=\s*(?:"[^"]*"|'[^']*'))*)\s*(/?)>"#)
            .expect("tag pattern is valid")
    })
}

fn attribute_regex() -> &'static Regex {
    static ATTR: OnceLock<Regex> = OnceLock::new();
    ATTR.get_or_init(|| {
        Regex::new(r#"([\w.:-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("attribute pattern is valid")
    })
}

/// An element that is open while its body is being read.
enum Frame {
    Module { node: ConfigNode, line: usize },
    Leaf { element: String },
}

struct TreeBuilder {
    stack: Vec<Frame>,
    root: Option<ConfigNode>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            root: None,
        }
    }

    fn current_module(&mut self) -> Option<&mut ConfigNode> {
        match self.stack.last_mut() {
            Some(Frame::Module { node, .. }) => Some(node),
            _ => None,
        }
    }

    fn finish_module(&mut self, node: ConfigNode, line: usize) -> Result<(), ParseError> {
        if let Some(parent) = self.current_module() {
            parent.push_child(node);
            return Ok(());
        }
        if self.root.is_some() {
            return Err(ParseError::MultipleRoots { line });
        }
        self.root = Some(node);
        Ok(())
    }

    fn open(
        &mut self,
        element: &str,
        attributes: Vec<(String, String)>,
        self_closing: bool,
        line: usize,
    ) -> Result<(), ParseError> {
        match element {
            MODULE => {
                if matches!(self.stack.last(), Some(Frame::Leaf { .. })) {
                    return Err(unexpected(element, line));
                }
                let name = required(&attributes, element, "name", line)?;
                if name.is_empty() {
                    return Err(ParseError::Syntax {
                        line,
                        message: "module name is empty".to_string(),
                    });
                }
                let node = ConfigNode::new(name);
                if self_closing {
                    self.finish_module(node, line)
                } else {
                    self.stack.push(Frame::Module { node, line });
                    Ok(())
                }
            }
            PROPERTY => {
                let name = required(&attributes, element, "name", line)?;
                let value = required(&attributes, element, "value", line)?;
                let module = self
                    .current_module()
                    .ok_or_else(|| unexpected(element, line))?;
                if module.properties().contains_key(&name) {
                    return Err(ParseError::DuplicateProperty {
                        line,
                        module: module.name().to_string(),
                        property: name,
                    });
                }
                module.insert_property(name, value);
                self.open_leaf(element, self_closing);
                Ok(())
            }
            MESSAGE => {
                if self.current_module().is_none() {
                    return Err(unexpected(element, line));
                }
                log::debug!("line {}: ignoring <message> element", line);
                self.open_leaf(element, self_closing);
                Ok(())
            }
            _ => Err(unexpected(element, line)),
        }
    }

    fn open_leaf(&mut self, element: &str, self_closing: bool) {
        if !self_closing {
            self.stack.push(Frame::Leaf {
                element: element.to_string(),
            });
        }
    }

    fn close(&mut self, element: &str, line: usize) -> Result<(), ParseError> {
        let expected = match self.stack.last() {
            Some(Frame::Module { .. }) => MODULE.to_string(),
            Some(Frame::Leaf { element }) => element.clone(),
            None => return Err(unexpected(&format!("/{}", element), line)),
        };
        if expected != element {
            return Err(ParseError::UnbalancedTag {
                line,
                expected,
                found: element.to_string(),
            });
        }
        match self.stack.pop() {
            Some(Frame::Module { node, .. }) => self.finish_module(node, line),
            _ => Ok(()),
        }
    }

    fn finish(mut self) -> Result<ConfigNode, ParseError> {
        while let Some(frame) = self.stack.pop() {
            if let Frame::Module { node, line } = frame {
                return Err(ParseError::UnclosedModule {
                    name: node.name().to_string(),
                    line,
                });
            }
        }
        self.root.ok_or(ParseError::NoRootModule)
    }
}

fn unexpected(element: &str, line: usize) -> ParseError {
    ParseError::UnexpectedElement {
        line,
        element: element.to_string(),
    }
}

fn required(
    attributes: &[(String, String)],
    element: &str,
    attribute: &str,
    line: usize,
) -> Result<String, ParseError> {
    attributes
        .iter()
        .find(|(k, _)| k == attribute)
        .map(|(_, v)| v.clone())
        .ok_or_else(|| ParseError::MissingAttribute {
            line,
            element: element.to_string(),
            attribute: attribute.to_string(),
        })
}

fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    attribute_regex()
        .captures_iter(raw)
        .map(|caps| {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            (caps[1].to_string(), unescape(value))
        })
        .collect()
}

/// Replace the predefined XML entities and numeric character references.
pub fn unescape(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let c = match entity {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                    .and_then(char::from_u32),
            };
            c.map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Parse the XML body of a configuration block.
///
/// `first_line` is the line number of the body within its file, used only
/// for error messages.
pub fn parse_xml(xml: &str, first_line: usize) -> Result<ConfigNode, ParseError> {
    let line_at = |pos: usize| first_line + xml[..pos].matches('\n').count();
    let mut builder = TreeBuilder::new();
    let mut pos = 0;

    while let Some(lt) = xml[pos..].find('<') {
        let text = &xml[pos..pos + lt];
        if !text.trim().is_empty() {
            return Err(ParseError::Syntax {
                line: line_at(pos),
                message: format!("unexpected text '{}'", text.trim()),
            });
        }
        pos += lt;
        let rest = &xml[pos..];
        let line = line_at(pos);

        let skip_to = move |terminator: &str| {
            rest.find(terminator)
                .map(|end| pos + end + terminator.len())
                .ok_or_else(|| ParseError::Syntax {
                    line,
                    message: format!("missing '{}'", terminator),
                })
        };

        if rest.starts_with("<!--") {
            pos = skip_to("-->")?;
            continue;
        }
        if rest.starts_with("<?") {
            pos = skip_to("?>")?;
            continue;
        }
        if rest.starts_with("<!") {
            pos = skip_to(">")?;
            continue;
        }

        let caps = tag_regex().captures(rest).ok_or_else(|| ParseError::Syntax {
            line,
            message: "malformed tag".to_string(),
        })?;
        let closing = !caps[1].is_empty();
        let element = &caps[2];
        let self_closing = !caps[4].is_empty();

        if closing {
            if self_closing || !caps[3].trim().is_empty() {
                return Err(ParseError::Syntax {
                    line,
                    message: format!("malformed closing tag </{}>", element),
                });
            }
            builder.close(element, line)?;
        } else {
            builder.open(element, parse_attributes(&caps[3]), self_closing, line)?;
        }
        pos += caps[0].len();
    }

    let trailing = &xml[pos..];
    if !trailing.trim().is_empty() {
        return Err(ParseError::Syntax {
            line: line_at(pos),
            message: format!("unexpected text '{}'", trailing.trim()),
        });
    }

    builder.finish()
}
