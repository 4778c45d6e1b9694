//! First pass: collect one DocBlock from a run of comment lines.
//!
//! A block starts on a tag comment and extends over the following comment
//! lines. It stops at the first blank or code line, or when a second
//! `@doc.init` shows up outside an example fence.

use crate::model::*;
use crate::parser::lines::Line;
use crate::parser::tags::{self, Fence};

/// A block before it is bound to a declaration. Line indices are 0-based.
#[derive(Debug)]
pub(crate) struct RawBlock {
    pub start: usize,
    pub end: usize,
    pub entries: Vec<Entry>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Collect the block whose first tag line is `lines[start]`.
pub(crate) fn collect(lines: &[Line<'_>], start: usize) -> RawBlock {
    let mut builder = BlockBuilder::default();
    let mut end = start;

    for (idx, line) in lines.iter().enumerate().skip(start) {
        let Line::Comment(text) = *line else { break };
        if idx > start && builder.starts_new_block(text) {
            break;
        }
        builder.push(idx, text);
        end = idx;
    }

    builder.finish(start, end)
}

#[derive(Debug, Clone, Copy, Default)]
enum Mode {
    /// After an unrecognized tag: continuation text is dropped.
    #[default]
    Idle,
    /// Continuation text goes to this entry.
    Entry(usize),
    /// `@example` seen, waiting for the opening fence.
    AwaitFence(usize),
    /// Inside a fence; lines are stored verbatim.
    Fenced(usize),
    /// `@example` without a fence; lines are stored verbatim until the next tag.
    Unfenced(usize),
}

#[derive(Debug, Default)]
struct BlockBuilder {
    entries: Vec<Entry>,
    diagnostics: Vec<Diagnostic>,
    mode: Mode,
    fence: Option<Fence>,
    has_init: bool,
}

impl BlockBuilder {
    fn starts_new_block(&self, text: &str) -> bool {
        if matches!(self.mode, Mode::Fenced(_)) {
            return false;
        }
        self.has_init && tags::parse_tag(text).is_some_and(|(name, _)| tags::is_init(name))
    }

    fn push(&mut self, idx: usize, text: &str) {
        match self.mode {
            Mode::Fenced(entry) => {
                let closes = self
                    .fence
                    .as_ref()
                    .is_some_and(|fence| tags::is_closing_fence(text, fence));
                if let Some(ex) = self.example_mut(entry) {
                    if closes {
                        ex.closing = Some(text.to_string());
                    } else {
                        ex.lines.push(text.to_string());
                    }
                }
                if closes {
                    self.fence = None;
                    self.mode = Mode::Entry(entry);
                }
                return;
            }
            Mode::AwaitFence(entry) => {
                if let Some(fence) = tags::opening_fence(text) {
                    if let Some(ex) = self.example_mut(entry) {
                        ex.opening = Some(text.to_string());
                        ex.lang = fence.lang.clone();
                    }
                    self.fence = Some(fence);
                    self.mode = Mode::Fenced(entry);
                    return;
                }
                if text.trim().is_empty() {
                    return;
                }
                if tags::parse_tag(text).is_none() {
                    if let Some(ex) = self.example_mut(entry) {
                        ex.lines.push(text.to_string());
                    }
                    self.mode = Mode::Unfenced(entry);
                    return;
                }
            }
            Mode::Unfenced(entry) => {
                if tags::parse_tag(text).is_none() {
                    if let Some(ex) = self.example_mut(entry) {
                        ex.lines.push(text.to_string());
                    }
                    return;
                }
            }
            Mode::Idle | Mode::Entry(_) => {}
        }

        match tags::parse_tag(text) {
            Some((name, args)) => self.open_entry(idx, name, args),
            None => {
                if let Mode::Entry(entry) = self.mode {
                    self.append(entry, text);
                }
            }
        }
    }

    fn open_entry(&mut self, idx: usize, name: &str, args: &str) {
        let line = idx + 1;
        let entry_idx = self.entries.len();

        let tag = match name {
            n if tags::is_init(n) => {
                self.has_init = true;
                let (id, title) = tags::split_first_token(args);
                Tag::Init {
                    id: id.to_string(),
                    title: title.to_string(),
                }
            }
            "description" => Tag::Description {
                text: args.to_string(),
            },
            "param" => {
                let (param, problem) = tags::parse_param(args);
                if let Some(message) = problem {
                    self.malformed(line, entry_idx, message);
                }
                Tag::Param(param)
            }
            "returns" => {
                let (returns, problem) = tags::parse_returns(args);
                if let Some(message) = problem {
                    self.malformed(line, entry_idx, message);
                }
                Tag::Returns(returns)
            }
            "example" => {
                self.entries.push(Entry {
                    line,
                    tag: Tag::Example(ExampleBlock {
                        note: args.to_string(),
                        ..Default::default()
                    }),
                });
                self.mode = Mode::AwaitFence(entry_idx);
                return;
            }
            other => {
                self.diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::UnrecognizedTag,
                    line,
                    entry: None,
                    message: format!("unrecognized tag `@{}`", other),
                });
                self.mode = Mode::Idle;
                return;
            }
        };

        self.entries.push(Entry { line, tag });
        self.mode = Mode::Entry(entry_idx);
    }

    /// Continuation text. Descriptions and example notes keep line breaks;
    /// one-line fields are joined with a space.
    fn append(&mut self, entry: usize, text: &str) {
        let Some(e) = self.entries.get_mut(entry) else {
            return;
        };
        match e.tag {
            Tag::Description { text: ref mut dest } => push_line(dest, text),
            Tag::Example(ref mut ex) => push_line(&mut ex.note, text),
            Tag::Init { ref mut title, .. } => push_words(title, text),
            Tag::Param(ref mut param) => push_words(&mut param.description, text),
            Tag::Returns(ref mut returns) => push_words(&mut returns.description, text),
        }
    }

    fn example_mut(&mut self, entry: usize) -> Option<&mut ExampleBlock> {
        match self.entries.get_mut(entry).map(|e| &mut e.tag) {
            Some(Tag::Example(ex)) => Some(ex),
            _ => None,
        }
    }

    fn malformed(&mut self, line: usize, entry: usize, message: String) {
        self.diagnostics.push(Diagnostic {
            kind: DiagnosticKind::MalformedTag,
            line,
            entry: Some(entry),
            message,
        });
    }

    fn finish(mut self, start: usize, end: usize) -> RawBlock {
        if let Mode::Fenced(entry) = self.mode {
            let line = self.entries.get(entry).map(|e| e.line).unwrap_or(start + 1);
            self.diagnostics.push(Diagnostic {
                kind: DiagnosticKind::UnclosedExample,
                line,
                entry: Some(entry),
                message: "example fence is never closed; remaining lines kept as the example body"
                    .to_string(),
            });
        }

        let mut problems = Vec::new();
        for (idx, entry) in self.entries.iter_mut().enumerate() {
            match entry.tag {
                Tag::Init { ref id, ref title } if id.is_empty() || title.is_empty() => {
                    problems.push((entry.line, idx, "@doc.init expects an id and a display name".to_string()));
                }
                Tag::Description { ref mut text } => {
                    *text = text.trim().to_string();
                    if text.is_empty() {
                        problems.push((entry.line, idx, "@description has no text".to_string()));
                    }
                }
                Tag::Example(ref mut ex) => {
                    ex.note = ex.note.trim().to_string();
                    if ex.opening.is_none() {
                        while ex.lines.last().is_some_and(|l| l.trim().is_empty()) {
                            ex.lines.pop();
                        }
                    }
                    if ex.opening.is_none() && ex.lines.is_empty() {
                        problems.push((entry.line, idx, "@example has no code".to_string()));
                    }
                }
                _ => {}
            }
        }
        for (line, idx, message) in problems {
            self.malformed(line, idx, message);
        }

        RawBlock {
            start,
            end,
            entries: self.entries,
            diagnostics: self.diagnostics,
        }
    }
}

fn push_line(dest: &mut String, text: &str) {
    let text = text.trim();
    if dest.is_empty() {
        if !text.is_empty() {
            dest.push_str(text);
        }
        return;
    }
    dest.push('\n');
    dest.push_str(text);
}

fn push_words(dest: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !dest.is_empty() {
        dest.push(' ');
    }
    dest.push_str(text);
}
