//! Tag grammar: tag lines, argument shapes and example fences.

use crate::model::{Param, Returns};
use regex::Regex;
use std::sync::LazyLock;

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*@([A-Za-z][A-Za-z0-9_.]*)(?:[[:blank:]]+(.*))?$").unwrap());

static RE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*(`{3,}|~{3,})(.*)$").unwrap());

/// Split a tag comment into `(name, arguments)`. Arguments are trimmed.
pub(crate) fn parse_tag(text: &str) -> Option<(&str, &str)> {
    let caps = RE_TAG.captures(text)?;
    let name = caps.get(1)?.as_str();
    let args = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
    Some((name, args))
}

/// `@doc.init` and its short alias `@doc`.
pub(crate) fn is_init(name: &str) -> bool {
    name == "doc.init" || name == "doc"
}

/// First whitespace-delimited token and the trimmed remainder.
pub(crate) fn split_first_token(text: &str) -> (&str, &str) {
    let text = text.trim();
    match text.find(char::is_whitespace) {
        Some(pos) => (&text[..pos], text[pos..].trim()),
        None => (text, ""),
    }
}

/// `<name> <type> <description>`. Returns the problem, if any, alongside
/// the entry so the caller can keep it.
pub(crate) fn parse_param(args: &str) -> (Param, Option<String>) {
    let (name, rest) = split_first_token(args);
    let (ty, description) = split_first_token(rest);
    let param = Param {
        name: name.to_string(),
        ty: ty.to_string(),
        description: description.to_string(),
    };
    let problem = if name.is_empty() {
        Some("@param expects a name, a type and a description".to_string())
    } else if ty.is_empty() {
        Some(format!("@param `{}` is missing its type", name))
    } else {
        None
    };
    (param, problem)
}

/// `<type> <description>`.
pub(crate) fn parse_returns(args: &str) -> (Returns, Option<String>) {
    let (ty, description) = split_first_token(args);
    let returns = Returns {
        ty: ty.to_string(),
        description: description.to_string(),
    };
    let problem = ty
        .is_empty()
        .then(|| "@returns expects a type and a description".to_string());
    (returns, problem)
}

/// An opening fence: its character, its length and the language tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fence {
    pub ch: char,
    pub len: usize,
    pub lang: Option<String>,
}

pub(crate) fn opening_fence(text: &str) -> Option<Fence> {
    let caps = RE_FENCE.captures(text)?;
    let marker = caps.get(1)?.as_str();
    let info = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    let ch = marker.chars().next()?;
    // Backtick info strings cannot contain backticks (that would be inline code).
    if ch == '`' && info.contains('`') {
        return None;
    }
    Some(Fence {
        ch,
        len: marker.chars().count(),
        lang: info.split_whitespace().next().map(str::to_string),
    })
}

/// Same fence character, at least as long as the opening, nothing else.
pub(crate) fn is_closing_fence(text: &str, fence: &Fence) -> bool {
    let text = text.trim();
    text.chars().count() >= fence.len && text.chars().all(|c| c == fence.ch)
}
