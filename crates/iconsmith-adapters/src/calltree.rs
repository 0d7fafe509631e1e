//! Call-tree emission for targets without template syntax.
//!
//! Turns the element tree into nested constructor calls such as
//! `h("svg", { viewBox: "0 0 24 24" }, [h("path", { d: "M1" })])`.

use crate::markup::{parse_element, Element, MarkupError, Node};

/// An element tree prepared for call emission.
#[derive(Debug, Clone, PartialEq)]
pub struct CallTree {
    /// Root element
    pub root: Element,

    /// Identifier spread last into the root attributes (e.g., "props")
    pub spread: Option<String>,
}

impl CallTree {
    /// Parse markup into a call tree.
    pub fn parse(markup: &str) -> Result<Self, MarkupError> {
        Ok(Self {
            root: parse_element(markup)?,
            spread: None,
        })
    }

    /// Merge extra attributes into the root. Existing keys keep their position.
    pub fn merge_root_attributes(&mut self, extras: &[(String, String)]) {
        for (key, value) in extras {
            self.root.set_attribute(key.as_str(), value.as_str());
        }
    }

    /// Spread `ident` after every named root attribute.
    pub fn spread_props(&mut self, ident: &str) {
        self.spread = Some(ident.to_string());
    }

    /// Make a `title` call the first child of the root.
    pub fn prepend_title(&mut self, text: &str) {
        let mut title = Element::new("title");
        title.children.push(Node::Text(text.to_string()));
        title.self_closing = false;
        self.root.prepend_child(Node::Element(title));
    }

    /// Emit the tree as nested calls of `ctor`.
    pub fn emit(&self, ctor: &str) -> String {
        emit_element(&self.root, ctor, self.spread.as_deref())
    }
}

/// Convert markup straight into a call expression.
pub fn svg_to_calls(markup: &str, ctor: &str) -> Result<String, MarkupError> {
    Ok(CallTree::parse(markup)?.emit(ctor))
}

/// Emit one node as an argument expression.
pub fn emit_node(node: &Node, ctor: &str) -> String {
    match node {
        Node::Element(element) => emit_element(element, ctor, None),
        Node::Text(text) => js_string(&decode_entities(text)),
    }
}

fn emit_element(element: &Element, ctor: &str, spread: Option<&str>) -> String {
    let tag = js_string(&element.tag);
    let attrs = attributes_object(&element.attributes, spread);

    if element.children.is_empty() {
        return format!("{ctor}({tag}, {attrs})");
    }

    let children: Vec<String> = element
        .children
        .iter()
        .map(|child| emit_node(child, ctor))
        .collect();
    format!("{ctor}({tag}, {attrs}, [{}])", children.join(", "))
}

/// Format attributes as an object literal, with an optional trailing spread.
fn attributes_object(attributes: &[(String, String)], spread: Option<&str>) -> String {
    let mut entries: Vec<String> = attributes
        .iter()
        .map(|(key, value)| {
            format!("{}: {}", object_key(key), js_string(&decode_entities(value)))
        })
        .collect();

    if let Some(ident) = spread {
        entries.push(format!("...{ident}"));
    }

    if entries.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", entries.join(", "))
    }
}

/// Quote keys that are not plain identifiers (`stroke-width`, `xlink:href`).
fn object_key(key: &str) -> String {
    if key.contains('-') || key.contains(':') {
        js_string(key)
    } else {
        key.to_string()
    }
}

/// Double-quoted JavaScript string literal.
pub(crate) fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Decode the XML entities that commonly appear in icon markup.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn emits_two_argument_call_for_leaf() {
        assert_eq!(
            svg_to_calls(r#"<svg viewBox="0 0 24 24"/>"#, "h").unwrap(),
            r#"h("svg", { viewBox: "0 0 24 24" })"#
        );
    }

    #[test]
    fn emits_three_argument_call_with_children() {
        assert_eq!(
            svg_to_calls(r#"<svg><path d="M1"/><g><circle r="2"/></g></svg>"#, "h").unwrap(),
            r#"h("svg", {}, [h("path", { d: "M1" }), h("g", {}, [h("circle", { r: "2" })])])"#
        );
    }

    #[test]
    fn quotes_hyphen_and_colon_keys() {
        assert_eq!(
            svg_to_calls(r##"<use xlink:href="#a" stroke-width="2" fill="none"/>"##, "h").unwrap(),
            r##"h("use", { "xlink:href": "#a", "stroke-width": "2", fill: "none" })"##
        );
    }

    #[test]
    fn root_gets_extras_then_spread() {
        let mut tree = CallTree::parse(r#"<svg fill="none"><path d="M1"/></svg>"#).unwrap();
        tree.merge_root_attributes(&[("aria-hidden".to_string(), "true".to_string())]);
        tree.spread_props("props");

        assert_eq!(
            tree.emit("h"),
            r#"h("svg", { fill: "none", "aria-hidden": "true", ...props }, [h("path", { d: "M1" })])"#
        );
    }

    #[test]
    fn title_creates_children_when_absent() {
        let mut tree = CallTree::parse(r#"<svg viewBox="0 0 24 24"/>"#).unwrap();
        tree.prepend_title("Home");

        assert_eq!(
            tree.emit("h"),
            r#"h("svg", { viewBox: "0 0 24 24" }, [h("title", {}, ["Home"])])"#
        );
    }

    #[test]
    fn title_is_prepended_to_existing_children() {
        let mut tree = CallTree::parse(r#"<svg><path d="M1"/></svg>"#).unwrap();
        tree.prepend_title("Home");

        assert_eq!(
            tree.emit("m"),
            r#"m("svg", {}, [m("title", {}, ["Home"]), m("path", { d: "M1" })])"#
        );
    }

    #[test]
    fn decodes_entities_in_strings() {
        assert_eq!(
            svg_to_calls(r#"<svg><text x="1">a &amp; &quot;b&quot;</text></svg>"#, "h").unwrap(),
            r#"h("svg", {}, [h("text", { x: "1" }, ["a & \"b\""])])"#
        );
    }

    #[test]
    fn unmatched_root_is_an_error() {
        assert_eq!(svg_to_calls("no markup", "h"), Err(MarkupError::NoRootElement));
    }
}
