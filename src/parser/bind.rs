//! Second pass: bind a collected block to the declaration that follows it.
//!
//! Binding is by index. The scanner precomputes, for every line, the index of
//! the next declaration line and of the next tag comment; a block binds to
//! the next declaration unless another block starts first.

use crate::model::*;
use crate::parser::block::RawBlock;
use crate::parser::lines::Line;
use crate::parser::Scanner;

pub(crate) fn bind(scanner: &Scanner<'_>, raw: RawBlock) -> Record {
    let RawBlock {
        start,
        end,
        mut entries,
        mut diagnostics,
    } = raw;
    let after = end + 1;
    let next_decl = scanner.next_decl.get(after).copied().flatten();
    let next_tag = scanner.next_tag.get(after).copied().flatten();

    let declaration = match (next_decl, next_tag) {
        (Some(decl), Some(tag)) if tag < decl => {
            diagnostics.push(orphaned(start, superseded(tag)));
            None
        }
        (Some(decl), _) => Some(declaration_at(&scanner.lines, after, decl)),
        (None, Some(tag)) => {
            diagnostics.push(orphaned(start, superseded(tag)));
            None
        }
        (None, None) => {
            diagnostics.push(orphaned(
                start,
                "no declaration follows before end of input".to_string(),
            ));
            None
        }
    };

    if let Some(ref decl) = declaration {
        check_param_types(&mut entries, &decl.signature, &mut diagnostics);
    }
    diagnostics.sort_by_key(|d| d.line);

    Record {
        block: DocBlock {
            start: start + 1,
            end: end + 1,
            entries,
        },
        declaration,
        diagnostics,
    }
}

fn superseded(tag: usize) -> String {
    format!(
        "no declaration before the next block (line {}) replaces it",
        tag + 1
    )
}

fn orphaned(start: usize, message: String) -> Diagnostic {
    Diagnostic {
        kind: DiagnosticKind::OrphanedBlock,
        line: start + 1,
        entry: None,
        message,
    }
}

fn declaration_at(lines: &[Line<'_>], from: usize, decl: usize) -> Declaration {
    let attributes = lines[from..decl]
        .iter()
        .filter_map(|line| match *line {
            Line::Code(text) if line.is_attribute() => Some(text.to_string()),
            _ => None,
        })
        .collect();
    let signature = match lines[decl] {
        Line::Code(text) => text.to_string(),
        _ => String::new(),
    };
    Declaration {
        line: decl + 1,
        signature,
        attributes,
    }
}

/// A documented type that contradicts the declared one is treated as a
/// missing type token: the word moves back into the description.
fn check_param_types(entries: &mut [Entry], signature: &str, diagnostics: &mut Vec<Diagnostic>) {
    let declared = declared_params(signature);
    if declared.is_empty() {
        return;
    }

    for (idx, entry) in entries.iter_mut().enumerate() {
        let line = entry.line;
        let Tag::Param(ref mut param) = entry.tag else {
            continue;
        };
        if param.ty.is_empty() {
            continue;
        }
        let Some((_, declared_ty)) = declared.iter().find(|(name, _)| *name == param.name) else {
            continue;
        };
        if declared_ty.is_empty() || type_matches(declared_ty, &param.ty) {
            continue;
        }

        diagnostics.push(Diagnostic {
            kind: DiagnosticKind::MalformedTag,
            line,
            entry: Some(idx),
            message: format!(
                "@param `{}` is missing its type (`{}` does not match declared `{}`)",
                param.name, param.ty, declared_ty
            ),
        });
        let word = std::mem::take(&mut param.ty);
        param.description = if param.description.is_empty() {
            word
        } else {
            format!("{} {}", word, param.description)
        };
    }
}

// Spellings of the same type across languages.
const TYPE_ALIASES: &[&[&str]] = &[
    &["string", "str", "char", "wstring", "text"],
    &["int", "integer", "i32", "i64", "isize", "long", "size_t", "usize", "u32", "u64"],
    &["float", "double", "f32", "f64", "number", "real"],
    &["bool", "boolean"],
];

/// Whether a documented type names the declared one. Qualifiers, pointers,
/// references and lifetimes are ignored; the documented word must then match
/// one of the declared identifiers, directly or through an alias.
fn type_matches(declared: &str, documented: &str) -> bool {
    let declared = core_type(declared);
    let documented = core_type(documented);
    if declared.is_empty() || documented.is_empty() || declared.contains(&documented) {
        return true;
    }
    let Some(head) = identifiers(&documented).next() else {
        return true;
    };
    let matched = identifiers(&declared).any(|ident| ident == head || are_aliases(ident, head));
    matched
}

/// Lowercased type text without `&`, `*`, `const`, `mut`, lifetimes or a
/// `std::` prefix: `const std::string&` → `string`, `&'a mut str` → `str`.
fn core_type(ty: &str) -> String {
    let ty = ty.to_lowercase().replace(['&', '*'], " ").replace("std::", "");
    ty.split_whitespace()
        .filter(|word| !matches!(*word, "const" | "mut" | "volatile" | "dyn" | "impl" | "struct"))
        .filter(|word| !word.starts_with('\''))
        .collect::<Vec<_>>()
        .join(" ")
}

fn identifiers(ty: &str) -> impl Iterator<Item = &str> {
    ty.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
}

fn are_aliases(a: &str, b: &str) -> bool {
    TYPE_ALIASES
        .iter()
        .any(|group| group.contains(&a) && group.contains(&b))
}

/// `(name, type)` pairs from the first parameter list of a signature.
/// Handles `name: Type` (Rust, Python, TypeScript) and `Type name` (C family).
fn declared_params(signature: &str) -> Vec<(String, String)> {
    let Some(list) = parameter_list(signature) else {
        return Vec::new();
    };
    split_top_level(list)
        .into_iter()
        .filter_map(declared_param)
        .collect()
}

fn parameter_list(signature: &str) -> Option<&str> {
    let open = signature.find('(')?;
    let mut depth = 0usize;
    let mut prev = '\0';
    for (i, c) in signature[open..].char_indices() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return (c == ')').then(|| &signature[open + 1..open + i]);
                }
            }
            '>' if prev != '-' && prev != '=' => depth = depth.saturating_sub(1),
            _ => {}
        }
        prev = c;
    }
    None
}

fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut prev = '\0';
    let mut last = 0;
    for (i, c) in list.char_indices() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '>' if prev != '-' && prev != '=' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&list[last..i]);
                last = i + 1;
            }
            _ => {}
        }
        prev = c;
    }
    parts.push(&list[last..]);
    parts
}

fn declared_param(segment: &str) -> Option<(String, String)> {
    let segment = segment.split('=').next().unwrap_or("").trim();
    if segment.is_empty() {
        return None;
    }

    let (name, ty) = match single_colon(segment) {
        Some(pos) => (&segment[..pos], segment[pos + 1..].trim()),
        None => match segment.rfind(char::is_whitespace) {
            Some(pos) => (&segment[pos..], segment[..pos].trim()),
            None => (segment, ""),
        },
    };

    let name = clean_name(name);
    if name.is_empty() {
        return None;
    }
    Some((name, ty.to_string()))
}

/// Position of a `:` that is not part of `::`.
fn single_colon(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    (0..bytes.len()).find(|&i| {
        bytes[i] == b':'
            && bytes.get(i + 1) != Some(&b':')
            && (i == 0 || bytes[i - 1] != b':')
    })
}

fn clean_name(raw: &str) -> String {
    let name = raw.trim();
    let name = name.strip_prefix("mut ").unwrap_or(name);
    name.trim_start_matches(['*', '&', '$', '.'])
        .trim_end_matches(['?', '[', ']'])
        .trim()
        .to_string()
}
