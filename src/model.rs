//! Data model for extracted documentation, independent of the output format.
//!
//! All line numbers are 1-based, as shown in editors.

use serde::Serialize;
use std::fmt;

/// Every record extracted from a single source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Path of the scanned file, if the input came from one.
    pub source: Option<String>,
    /// Language hint used for fenced signature blocks (e.g. "cpp", "python").
    pub lang: Option<String>,
    pub records: Vec<Record>,
}

impl Document {
    /// Total number of diagnostics across all records.
    pub fn diagnostic_count(&self) -> usize {
        self.records.iter().map(|r| r.diagnostics.len()).sum()
    }
}

/// One DocBlock bound to the declaration that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub block: DocBlock,
    /// `None` when the block is orphaned.
    pub declaration: Option<Declaration>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Record {
    /// Heading used by renderers: the `@doc.init` title, then its id,
    /// then the declaration signature.
    pub fn display_name(&self) -> String {
        if let Some(title) = self.block.title().filter(|t| !t.is_empty()) {
            return title.to_string();
        }
        if let Some(id) = self.block.id().filter(|i| !i.is_empty()) {
            return id.to_string();
        }
        match self.declaration {
            Some(ref decl) => decl.signature.clone(),
            None => format!("line {}", self.block.start),
        }
    }

    pub fn is_orphaned(&self) -> bool {
        self.declaration.is_none()
    }
}

/// Tagged entries collected from one contiguous comment run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocBlock {
    /// First comment line of the block.
    pub start: usize,
    /// Last comment line of the block.
    pub end: usize,
    pub entries: Vec<Entry>,
}

impl DocBlock {
    pub fn init(&self) -> Option<(&str, &str)> {
        self.entries.iter().find_map(|e| match e.tag {
            Tag::Init { ref id, ref title } => Some((id.as_str(), title.as_str())),
            _ => None,
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.init().map(|(id, _)| id)
    }

    pub fn title(&self) -> Option<&str> {
        self.init().map(|(_, title)| title)
    }

    /// All `@description` texts joined by a blank line.
    pub fn description(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .entries
            .iter()
            .filter_map(|e| match e.tag {
                Tag::Description { ref text } if !text.is_empty() => Some(text.as_str()),
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }

    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.entries.iter().filter_map(|e| match e.tag {
            Tag::Param(ref p) => Some(p),
            _ => None,
        })
    }

    pub fn returns(&self) -> Option<&Returns> {
        self.entries.iter().find_map(|e| match e.tag {
            Tag::Returns(ref r) => Some(r),
            _ => None,
        })
    }

    pub fn examples(&self) -> impl Iterator<Item = &ExampleBlock> {
        self.entries.iter().filter_map(|e| match e.tag {
            Tag::Example(ref ex) => Some(ex),
            _ => None,
        })
    }
}

/// A single tag line plus its continuation text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Line of the tag itself.
    pub line: usize,
    #[serde(flatten)]
    pub tag: Tag,
}

/// The closed tag vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum Tag {
    /// `@doc.init <id> <display-name>`
    Init { id: String, title: String },
    /// `@description <text>`
    Description { text: String },
    /// `@param <name> <type> <description>`
    Param(Param),
    /// `@returns <type> <description>`
    Returns(Returns),
    /// `@example` followed by a fenced block
    Example(ExampleBlock),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    /// Empty when the type token is missing.
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Returns {
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
}

/// Example code stored exactly as written between the fences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExampleBlock {
    /// Language from the opening fence info string.
    pub lang: Option<String>,
    /// Text after `@example` on the tag line plus any text after the closing fence.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
    /// Opening fence line, e.g. "```cpp". `None` for unfenced examples.
    pub opening: Option<String>,
    /// Closing fence line. `None` when unfenced or never closed.
    pub closing: Option<String>,
    pub lines: Vec<String>,
}

impl ExampleBlock {
    pub fn code(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_closed(&self) -> bool {
        self.opening.is_none() || self.closing.is_some()
    }

    /// Re-serialize as a fenced block. Fenced examples come back exactly as
    /// they were written; unfenced ones get a plain backtick fence.
    pub fn to_fenced(&self) -> String {
        let (opening, closing) = match self.opening {
            Some(ref open) => (open.clone(), self.closing.clone()),
            None => {
                let fence = "```".to_string();
                (fence.clone(), Some(fence))
            }
        };
        let mut out = opening;
        out.push('\n');
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        if let Some(close) = closing {
            out.push_str(&close);
            out.push('\n');
        }
        out
    }
}

/// The construct a DocBlock documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub line: usize,
    /// Trimmed text of the declaration line.
    pub signature: String,
    /// Decorator/attribute lines skipped between the block and the signature.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: usize,
    /// Index into `DocBlock::entries` when the diagnostic belongs to an entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<usize>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    MalformedTag,
    OrphanedBlock,
    UnclosedExample,
    UnrecognizedTag,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::MalformedTag => "MALFORMED_TAG",
            DiagnosticKind::OrphanedBlock => "ORPHANED_BLOCK",
            DiagnosticKind::UnclosedExample => "UNCLOSED_EXAMPLE",
            DiagnosticKind::UnrecognizedTag => "UNRECOGNIZED_TAG",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
