//! Tag-comment extractor.
//!
//! [`Scanner`] classifies the input once, then [`Records`] walks it lazily:
//! each step collects one block ([`block`]) and binds it to the next
//! declaration ([`bind`]). Scanning never fails; problems become
//! diagnostics on the affected record.

mod bind;
mod block;
mod lines;
mod tags;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Document, Record};
use crate::syntax::{self, CommentSyntax};
use lines::Line;
use std::path::Path;

/// Classified source, ready to be walked any number of times.
#[derive(Debug)]
pub struct Scanner<'a> {
    lines: Vec<Line<'a>>,
    /// Index of the next tag comment at or after each line (length n + 1).
    next_tag: Vec<Option<usize>>,
    /// Index of the next declaration line at or after each line (length n + 1).
    next_decl: Vec<Option<usize>>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, syntax: &CommentSyntax) -> Self {
        let lines = lines::classify(source, syntax);
        let n = lines.len();
        let mut next_tag = vec![None; n + 1];
        let mut next_decl = vec![None; n + 1];
        for i in (0..n).rev() {
            next_tag[i] = if lines[i].tag().is_some() {
                Some(i)
            } else {
                next_tag[i + 1]
            };
            next_decl[i] = if lines[i].is_declaration() {
                Some(i)
            } else {
                next_decl[i + 1]
            };
        }
        Self {
            lines,
            next_tag,
            next_decl,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// A fresh pass over the records, in source order.
    pub fn records(&self) -> Records<'_, 'a> {
        Records {
            scanner: self,
            cursor: 0,
        }
    }
}

/// Lazy record sequence produced by [`Scanner::records`].
#[derive(Debug, Clone)]
pub struct Records<'s, 'a> {
    scanner: &'s Scanner<'a>,
    cursor: usize,
}

impl Iterator for Records<'_, '_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let start = self.scanner.next_tag.get(self.cursor).copied().flatten()?;
        let raw = block::collect(&self.scanner.lines, start);
        self.cursor = raw.end + 1;
        Some(bind::bind(self.scanner, raw))
    }
}

/// Scan source text with the given comment syntax.
pub fn scan(source: &str, syntax: &CommentSyntax) -> Vec<Record> {
    Scanner::new(source, syntax).records().collect()
}

/// Scan a file's contents, picking the comment syntax from its extension.
pub fn scan_file(path: &Path, content: &str, config: &Config) -> Result<Document> {
    let syntax = config
        .syntax_for(path)
        .ok_or_else(|| Error::UnsupportedFileType(path.display().to_string()))?;
    let records = scan(content, &syntax);
    tracing::debug!(
        file = %path.display(),
        records = records.len(),
        "scanned"
    );
    Ok(Document {
        source: Some(path.to_string_lossy().to_string()),
        lang: path
            .extension()
            .and_then(|e| e.to_str())
            .map(syntax::lang_hint),
        records,
    })
}
