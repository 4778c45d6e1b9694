//! Line classification: blank, comment or code.

use crate::parser::tags;
use crate::syntax::CommentSyntax;
use regex::Regex;
use std::sync::LazyLock;

// Decorators (`@staticmethod`), Rust attributes (`#[..]`, `#![..]`),
// C++ attributes (`[[nodiscard]]`) and C# attributes (`[Obsolete]`).
static RE_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#!?\[|\[\[|@[A-Za-z_]|\[[A-Z][^\]]*\]$)").unwrap()
});

// Objective-C declarations share the decorator's `@` shape.
static RE_OBJC_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@(interface|implementation|protocol)\b").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Blank,
    /// Comment text with the marker removed.
    Comment(&'a str),
    /// Trimmed code text.
    Code(&'a str),
}

impl<'a> Line<'a> {
    /// Tag name and argument text if this is a tag comment.
    pub(crate) fn tag(&self) -> Option<(&'a str, &'a str)> {
        match *self {
            Line::Comment(text) => tags::parse_tag(text),
            _ => None,
        }
    }

    pub(crate) fn is_attribute(&self) -> bool {
        matches!(*self, Line::Code(text)
            if RE_ATTRIBUTE.is_match(text) && !RE_OBJC_DECLARATION.is_match(text))
    }

    /// Code that can be the target of a DocBlock.
    pub(crate) fn is_declaration(&self) -> bool {
        matches!(*self, Line::Code(_)) && !self.is_attribute()
    }
}

pub(crate) fn classify<'a>(source: &'a str, syntax: &CommentSyntax) -> Vec<Line<'a>> {
    source
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                Line::Blank
            } else if let Some(text) = syntax.strip(line) {
                Line::Comment(text)
            } else {
                Line::Code(line.trim())
            }
        })
        .collect()
}
