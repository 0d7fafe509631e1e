//! JSX emission for template-syntax targets.

use crate::calltree::js_string;
use crate::markup::{Element, Node};

/// How attribute names are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeCase {
    /// DOM property names: `strokeWidth`, `className`, `xlinkHref`
    Camel,
    /// Native attribute names, verbatim: `stroke-width`, `class`
    Kebab,
}

/// Extra attributes written on the root after its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct RootProps<'a> {
    /// Identifier bound to `ref`, when forwarding refs
    pub ref_ident: Option<&'a str>,

    /// Identifier spread last (e.g., "props")
    pub spread: Option<&'a str>,
}

/// Render an element tree as JSX.
pub fn render_jsx(root: &Element, case: AttributeCase, props: RootProps<'_>) -> String {
    let mut out = String::new();
    write_element(&mut out, root, case, Some(props));
    out
}

fn write_element(out: &mut String, element: &Element, case: AttributeCase, root: Option<RootProps<'_>>) {
    out.push('<');
    out.push_str(&element.tag);

    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(&attribute(key, value, case));
    }

    if let Some(props) = root {
        if let Some(ident) = props.ref_ident {
            out.push_str(&format!(" ref={{{ident}}}"));
        }
        if let Some(ident) = props.spread {
            out.push_str(&format!(" {{...{ident}}}"));
        }
    }

    if element.children.is_empty() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(out, e, case, None),
            Node::Text(text) => out.push_str(&text_child(text)),
        }
    }
    out.push_str("</");
    out.push_str(&element.tag);
    out.push('>');
}

fn attribute(key: &str, value: &str, case: AttributeCase) -> String {
    match case {
        AttributeCase::Kebab => format!(r#"{key}="{value}""#),
        AttributeCase::Camel if key == "style" => {
            format!("style={{{}}}", style_object(value))
        }
        AttributeCase::Camel => format!(r#"{}="{value}""#, camel_attribute(key)),
    }
}

/// Map a markup attribute name to its JSX property name.
///
/// `aria-*` and `data-*` stay as they are.
pub fn camel_attribute(key: &str) -> String {
    if key.starts_with("aria-") || key.starts_with("data-") {
        return key.to_string();
    }
    if key == "class" {
        return "className".to_string();
    }

    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '-' || c == ':' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert an inline style declaration list into an object literal.
fn style_object(style: &str) -> String {
    let entries: Vec<String> = style
        .split(';')
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let (prop, value) = (prop.trim(), value.trim());
            if prop.is_empty() {
                return None;
            }
            let key = if prop.starts_with("--") {
                js_string(prop)
            } else {
                camel_attribute(prop)
            };
            Some(format!("{key}: {}", js_string(value)))
        })
        .collect();

    if entries.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", entries.join(", "))
    }
}

/// Text content, wrapped in an expression when it holds JSX syntax characters.
fn text_child(text: &str) -> String {
    if text.contains(['{', '}', '<', '>']) {
        format!("{{{}}}", js_string(text))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::parse_element;
    use pretty_assertions::assert_eq;

    fn render(markup: &str, case: AttributeCase) -> String {
        let spread = RootProps {
            ref_ident: None,
            spread: Some("props"),
        };
        render_jsx(&parse_element(markup).unwrap(), case, spread)
    }

    #[test]
    fn camel_cases_presentation_attributes() {
        assert_eq!(
            render(
                r##"<svg class="i" stroke-width="2" aria-hidden="true"><use xlink:href="#a"/></svg>"##,
                AttributeCase::Camel,
            ),
            r##"<svg className="i" strokeWidth="2" aria-hidden="true" {...props}><use xlinkHref="#a" /></svg>"##
        );
    }

    #[test]
    fn keeps_kebab_case_verbatim() {
        assert_eq!(
            render(r#"<svg class="i" stroke-width="2"/>"#, AttributeCase::Kebab),
            r#"<svg class="i" stroke-width="2" {...props} />"#
        );
    }

    #[test]
    fn converts_style_to_object() {
        assert_eq!(
            render(
                r#"<svg><path style="fill-rule: evenodd; --c: red;" d="M1"/></svg>"#,
                AttributeCase::Camel,
            ),
            r#"<svg {...props}><path style={{ fillRule: "evenodd", "--c": "red" }} d="M1" /></svg>"#
        );
    }

    #[test]
    fn ref_comes_before_spread() {
        let root = parse_element("<svg/>").unwrap();
        let props = RootProps {
            ref_ident: Some("ref"),
            spread: Some("props"),
        };

        assert_eq!(
            render_jsx(&root, AttributeCase::Camel, props),
            "<svg ref={ref} {...props} />"
        );
    }

    #[test]
    fn escapes_braces_in_text() {
        assert_eq!(
            render("<svg><title>a {b}</title></svg>", AttributeCase::Kebab),
            r#"<svg {...props}><title>{"a {b}"}</title></svg>"#
        );
    }
}
