//! SVG normalization: accessibility and source-tracking attributes.

use regex::Regex;
use std::sync::LazyLock;

use crate::markup::parse_attributes;
use crate::optimize::Optimizer;
use crate::traits::{A11yStrategy, ComponentSpec, TransformError};

static ROOT_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Optimized markup is trimmed, so the root must open at offset 0
    Regex::new(r#"^<svg(\s(?:[^>"]|"[^"]*")*|/)?>"#).expect("Invalid root tag regex")
});

/// Turn a component name into words: `ArrowUpRight` -> `Arrow Up Right`.
///
/// A space goes before every uppercase letter that follows a lowercase
/// letter or a digit.
pub fn readable_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }

    out
}

/// Attributes added to the root element for `spec`, in emission order.
pub fn extra_attributes(spec: &ComponentSpec) -> Vec<(String, String)> {
    let mut attrs = Vec::new();

    match spec.a11y {
        A11yStrategy::Hidden => attrs.push(("aria-hidden".to_string(), "true".to_string())),
        A11yStrategy::Img => {
            attrs.push(("role".to_string(), "img".to_string()));
            attrs.push((
                "aria-label".to_string(),
                readable_name(&spec.component_name),
            ));
        }
        A11yStrategy::Presentation => {
            attrs.push(("role".to_string(), "presentation".to_string()))
        }
        A11yStrategy::Title | A11yStrategy::None => {}
    }

    if spec.track_source && !spec.icon_name.is_empty() {
        attrs.push(("data-icon".to_string(), spec.icon_name.clone()));
    }

    attrs
}

/// Text of the injected `<title>`, when the strategy asks for one.
pub fn title_text(spec: &ComponentSpec) -> Option<String> {
    (spec.a11y == A11yStrategy::Title).then(|| readable_name(&spec.component_name))
}

/// Optimize `markup` and inject the attributes and title `spec` calls for.
///
/// The result is still plain markup.
pub fn normalize(
    markup: &str,
    spec: &ComponentSpec,
    optimizer: &dyn Optimizer,
) -> Result<String, TransformError> {
    let optimized = optimizer.optimize(markup)?;
    if !ROOT_OPEN_RE.is_match(&optimized) {
        return Err(TransformError::MissingRoot(spec.label().to_string()));
    }

    let extras = extra_attributes(spec);
    let mut out = if extras.is_empty() {
        optimized
    } else {
        inject_attributes(&optimized, &extras)
    };

    if let Some(title) = title_text(spec) {
        out = inject_title(&out, &title);
    }

    tracing::debug!("normalized {} with {} extra attributes", spec.label(), extras.len());
    Ok(out)
}

/// Rewrite the root opening tag with `extras` merged into its attributes.
fn inject_attributes(markup: &str, extras: &[(String, String)]) -> String {
    let Some(caps) = ROOT_OPEN_RE.captures(markup) else {
        return markup.to_string();
    };
    let whole = caps.get(0).map_or(0..0, |m| m.range());
    let raw = caps.get(1).map_or("", |m| m.as_str()).trim_end();
    let self_closing = raw.ends_with('/');

    let mut attrs = parse_attributes(raw.trim_end_matches('/'));
    for (key, value) in extras {
        let value = escape_attribute(value);
        match attrs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => attrs.push((key.clone(), value)),
        }
    }

    let rendered: String = attrs
        .iter()
        .map(|(k, v)| format!(r#" {k}="{v}""#))
        .collect();
    let close = if self_closing { "/>" } else { ">" };

    format!(
        "{}<svg{rendered}{close}{}",
        &markup[..whole.start],
        &markup[whole.end..]
    )
}

/// Insert `<title>` as the first child of the root element.
fn inject_title(markup: &str, title: &str) -> String {
    let Some(open) = ROOT_OPEN_RE.find(markup) else {
        return markup.to_string();
    };
    let element = format!("<title>{}</title>", escape_text(title));

    if open.as_str().ends_with("/>") {
        // Childless root: turn `<svg .../>` into `<svg ...><title/></svg>`
        let head = open.as_str().trim_end_matches("/>").trim_end();
        format!(
            "{}{head}>{element}</svg>{}",
            &markup[..open.start()],
            &markup[open.end()..]
        )
    } else {
        // Root with a body: the title goes right after the opening tag
        format!(
            "{}{element}{}",
            &markup[..open.end()],
            &markup[open.end()..]
        )
    }
}

fn escape_attribute(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimize::BasicOptimizer;
    use pretty_assertions::assert_eq;

    fn spec(a11y: A11yStrategy) -> ComponentSpec {
        ComponentSpec {
            a11y,
            ..ComponentSpec::new("ArrowUpRight", "arrow-up-right")
        }
    }

    fn run(markup: &str, spec: &ComponentSpec) -> String {
        normalize(markup, spec, &BasicOptimizer).unwrap()
    }

    #[test]
    fn readable_name_splits_words() {
        assert_eq!(readable_name("ArrowUpRight"), "Arrow Up Right");
        assert_eq!(readable_name("Home"), "Home");
        assert_eq!(readable_name("Grid3X3"), "Grid3 X3");
        assert_eq!(readable_name("HTMLIcon"), "HTMLIcon");
    }

    #[test]
    fn hidden_adds_aria_hidden() {
        let out = run(r#"<svg viewBox="0 0 24 24"><path d="M1"/></svg>"#, &spec(A11yStrategy::Hidden));

        assert_eq!(
            out,
            r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M1"/></svg>"#
        );
    }

    #[test]
    fn img_adds_role_and_label() {
        let out = run("<svg><path d=\"M1\"/></svg>", &spec(A11yStrategy::Img));

        assert_eq!(
            out,
            r#"<svg role="img" aria-label="Arrow Up Right"><path d="M1"/></svg>"#
        );
    }

    #[test]
    fn presentation_and_none() {
        let markup = "<svg><path d=\"M1\"/></svg>";

        assert_eq!(
            run(markup, &spec(A11yStrategy::Presentation)),
            r#"<svg role="presentation"><path d="M1"/></svg>"#
        );
        assert_eq!(run(markup, &spec(A11yStrategy::None)), markup);
    }

    #[test]
    fn tracks_source_after_a11y_attributes() {
        let spec = ComponentSpec {
            track_source: true,
            ..spec(A11yStrategy::Hidden)
        };
        let out = run("<svg/>", &spec);

        assert_eq!(out, r#"<svg aria-hidden="true" data-icon="arrow-up-right"/>"#);
    }

    #[test]
    fn overrides_existing_attribute_in_place() {
        let out = run(
            r#"<svg aria-hidden="false" fill="none"/>"#,
            &spec(A11yStrategy::Hidden),
        );

        assert_eq!(out, r#"<svg aria-hidden="true" fill="none"/>"#);
    }

    #[test]
    fn title_goes_first_in_root_with_children() {
        let out = run(
            r#"<svg viewBox="0 0 24 24"><path d="M1"/></svg>"#,
            &spec(A11yStrategy::Title),
        );

        assert_eq!(
            out,
            r#"<svg viewBox="0 0 24 24"><title>Arrow Up Right</title><path d="M1"/></svg>"#
        );
    }

    #[test]
    fn title_expands_childless_root() {
        let out = run(r#"<svg viewBox="0 0 24 24"/>"#, &spec(A11yStrategy::Title));

        assert_eq!(
            out,
            r#"<svg viewBox="0 0 24 24"><title>Arrow Up Right</title></svg>"#
        );
    }

    #[test]
    fn missing_root_names_the_icon() {
        let result = normalize("<div/>", &spec(A11yStrategy::Hidden), &BasicOptimizer);

        match result {
            Err(TransformError::MissingRoot(name)) => assert_eq!(name, "arrow-up-right"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn nested_svg_is_not_a_root() {
        let result = normalize(
            "<div><svg/></div>",
            &spec(A11yStrategy::Hidden),
            &BasicOptimizer,
        );

        assert!(matches!(result, Err(TransformError::MissingRoot(_))));
    }

    #[test]
    fn root_after_prolog_and_comments_is_found() {
        let out = run(
            "<?xml version=\"1.0\"?>\n<!-- icon -->\n<svg/>",
            &spec(A11yStrategy::Hidden),
        );

        assert_eq!(out, r#"<svg aria-hidden="true"/>"#);
    }
}
