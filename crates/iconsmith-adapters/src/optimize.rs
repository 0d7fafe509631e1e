//! Markup optimization applied before normalization.

use regex::Regex;
use std::fmt::Debug;
use std::sync::LazyLock;

use crate::traits::TransformError;

/// Canonicalizes raw markup.
///
/// Implementations may rewrite whitespace and drop non-rendering nodes but
/// must keep every attribute, since normalization and emission rely on them.
pub trait Optimizer: Debug + Send + Sync {
    fn optimize(&self, markup: &str) -> Result<String, TransformError>;
}

/// Whitespace and comment cleanup without touching attributes.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicOptimizer;

static PROLOG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<\?.*?\?>").expect("Invalid prolog regex"));

static DOCTYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<!DOCTYPE[^>]*>").expect("Invalid doctype regex"));

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("Invalid comment regex"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    // A tag, allowing `>` inside quoted attribute values
    Regex::new(r#"<(?:[^>"']|"[^"]*"|'[^']*')+>"#).expect("Invalid tag regex")
});

static ATTRIBUTE_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Double-quoted values are matched too so nothing inside them is rewritten
    Regex::new(r#"(\s[^\s="'/>]+)\s*=\s*(?:'([^']*)'|"[^"]*")"#)
        .expect("Invalid attribute value regex")
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static BETWEEN_TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s+<").expect("Invalid between-tags regex"));

impl Optimizer for BasicOptimizer {
    fn optimize(&self, markup: &str) -> Result<String, TransformError> {
        let out = PROLOG_RE.replace_all(markup, "");
        let out = DOCTYPE_RE.replace_all(&out, "");
        let out = COMMENT_RE.replace_all(&out, "");
        let out = BETWEEN_TAGS_RE.replace_all(&out, "><");
        let out = TAG_RE.replace_all(&out, |caps: &regex::Captures| canonical_tag(&caps[0]));

        let out = out.trim();
        if out.is_empty() {
            return Err(TransformError::Optimize("markup is empty".to_string()));
        }

        Ok(out.to_string())
    }
}

/// Collapse whitespace inside one tag and use double quotes throughout.
fn canonical_tag(tag: &str) -> String {
    let tag = ATTRIBUTE_VALUE_RE.replace_all(tag, |caps: &regex::Captures| match caps.get(2) {
        Some(value) => format!(r#"{}="{}""#, &caps[1], value.as_str().replace('"', "&quot;")),
        None => caps[0].to_string(),
    });
    let tag = WHITESPACE_RE.replace_all(&tag, " ");
    tag.replace(" />", "/>").replace(" >", ">")
}
