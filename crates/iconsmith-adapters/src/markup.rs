//! Element tree parser for normalized icon markup.
//!
//! Recognizes one shape only: a root element with `key="value"` attributes
//! and nested elements or text. Every emitter walks the tree produced here.

use regex::Regex;
use std::sync::LazyLock;

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A parsed element.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Tag name (e.g., "path")
    pub tag: String,

    /// Attributes in source order
    pub attributes: Vec<(String, String)>,

    /// Child nodes in source order
    pub children: Vec<Node>,

    /// Whether the element had no body in the source
    pub self_closing: bool,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            self_closing: true,
            ..Self::default()
        }
    }

    /// Value of an attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrite an attribute in place, or append it if absent.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Insert a child before all others.
    pub fn prepend_child(&mut self, child: Node) {
        self.children.insert(0, child);
        self.self_closing = false;
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|c| match c {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }
}

/// Errors that can occur when parsing markup.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MarkupError {
    #[error("no root element found")]
    NoRootElement,

    #[error("unexpected content: {0}")]
    Unexpected(String),
}

static OPEN_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Tag name, then the raw attribute string up to the first unquoted `>`
    Regex::new(r#"^<([A-Za-z][\w:.-]*)((?:[^>"]|"[^"]*")*)>"#).expect("Invalid open tag regex")
});

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s="/]+)\s*=\s*"([^"]*)""#).expect("Invalid attribute regex")
});

/// Parse markup into its root element.
pub fn parse_element(markup: &str) -> Result<Element, MarkupError> {
    match parse_node(markup.trim())? {
        Some((Node::Element(element), _)) => Ok(element),
        _ => Err(MarkupError::NoRootElement),
    }
}

/// Parse `key="value"` pairs from a raw attribute string.
pub fn parse_attributes(raw: &str) -> Vec<(String, String)> {
    ATTRIBUTE_RE
        .captures_iter(raw)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Parse the element at the front of `source`.
///
/// Returns the element and the number of bytes it spans, or `None` if
/// `source` does not start with an opening tag.
fn parse_node(source: &str) -> Result<Option<(Node, usize)>, MarkupError> {
    let Some(caps) = OPEN_TAG_RE.captures(source) else {
        return Ok(None);
    };
    let tag = caps[1].to_string();
    let raw_attributes = caps[2].trim_end();
    let open_len = caps[0].len();

    let mut self_closing = raw_attributes.ends_with('/')
        || source == &caps[0]
        || is_bodiless(source, &tag);

    let mut close = None;
    if !self_closing {
        close = find_matching_close_tag(source, &tag, open_len);
        // An unterminated element is treated as having no body.
        self_closing = close.is_none();
    }

    let mut element = Element {
        tag,
        attributes: parse_attributes(raw_attributes.trim_end_matches('/')),
        children: Vec::new(),
        self_closing,
    };

    let consumed = match close {
        Some((close_start, close_end)) => {
            element.children = parse_children(&source[open_len..close_start])?;
            close_end
        }
        None => open_len,
    };

    Ok(Some((Node::Element(element), consumed)))
}

/// Whether `source` is exactly one element of `tag` closed with `/>`.
fn is_bodiless(source: &str, tag: &str) -> bool {
    let pattern = format!(r#"^<{}(?:\s(?:[^>"]|"[^"]*")*)?/>$"#, regex::escape(tag));
    Regex::new(&pattern).is_ok_and(|re| re.is_match(source))
}

/// Find the close tag matching an open tag of `tag` ending at `start_pos`.
///
/// Nested opening tags of the same name raise the depth; self-closing ones
/// do not. Returns the start and end offsets of the matching close tag.
fn find_matching_close_tag(source: &str, tag: &str, start_pos: usize) -> Option<(usize, usize)> {
    let pattern = format!(r#"<(/?){}(\s(?:[^>"]|"[^"]*")*|/)?>"#, regex::escape(tag));
    let re = Regex::new(&pattern).ok()?;

    let mut depth = 0usize;
    for caps in re.captures_iter(&source[start_pos..]) {
        let whole = caps.get(0)?;
        let closing = !caps[1].is_empty();

        if closing {
            if depth == 0 {
                return Some((start_pos + whole.start(), start_pos + whole.end()));
            }
            depth -= 1;
        } else {
            let attrs = caps.get(2).map_or("", |m| m.as_str()).trim_end();
            if !attrs.ends_with('/') {
                depth += 1;
            }
        }
    }

    None
}

/// Parse a children region into sibling nodes.
fn parse_children(region: &str) -> Result<Vec<Node>, MarkupError> {
    let mut nodes = Vec::new();
    let mut rest = region.trim_start();

    while !rest.is_empty() {
        if rest.starts_with('<') {
            let Some((node, consumed)) = parse_node(rest)? else {
                return Err(MarkupError::Unexpected(snippet(rest)));
            };
            nodes.push(node);
            rest = rest[consumed..].trim_start();
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            let text = rest[..end].trim_end();
            nodes.push(Node::Text(text.to_string()));
            rest = &rest[end..];
        }
    }

    Ok(nodes)
}

fn snippet(s: &str) -> String {
    s.chars().take(24).collect()
}
