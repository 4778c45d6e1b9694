//! GitHub-flavored markdown renderer.

use crate::error::Result;
use crate::model::*;
use crate::render::Renderer;
use crate::toc::{self, Anchors};

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        if let Some(name) = doc.source.as_deref().map(file_name) {
            output.push_str(&format!("# {}\n\n", name));
        }

        let mut anchors = Anchors::default();
        let names: Vec<String> = doc.records.iter().map(Record::display_name).collect();

        if !names.is_empty() {
            output.push_str("## Index\n\n");
            for name in &names {
                output.push_str(&toc::render_toc_item(name, &anchors.next(name)));
                output.push('\n');
            }
            output.push('\n');
        }

        for (record, name) in doc.records.iter().zip(&names) {
            output.push_str(&render_record(record, name, doc.lang.as_deref()));
            output.push('\n');
        }

        let mut output = output.trim_end().to_string();
        output.push('\n');
        Ok(output)
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Render a single record's documentation block.
fn render_record(record: &Record, name: &str, lang: Option<&str>) -> String {
    let mut lines: Vec<String> = Vec::new();
    let block = &record.block;

    lines.push(format!("### {}\n", name));

    if let Some(id) = block.id().filter(|id| !id.is_empty()) {
        lines.push(format!("> `{}`", id));
        lines.push(String::new());
    }

    if let Some(ref decl) = record.declaration {
        lines.push(format!("```{}", lang.unwrap_or("")));
        lines.extend(decl.attributes.iter().cloned());
        lines.push(decl.signature.clone());
        lines.push("```".to_string());
        lines.push(String::new());
    }

    if let Some(desc) = block.description() {
        lines.push(desc);
        lines.push(String::new());
    }

    let params: Vec<&Param> = block.params().collect();
    if !params.is_empty() {
        lines.push("#### Parameters\n".to_string());
        for param in params {
            lines.push(format!("* {}", render_param(param)));
        }
        lines.push(String::new());
    }

    if let Some(returns) = block.returns() {
        lines.push("#### Returns\n".to_string());
        lines.push(format!("* {}", render_returns(returns)));
        lines.push(String::new());
    }

    let examples: Vec<&ExampleBlock> = block.examples().collect();
    if !examples.is_empty() {
        lines.push("#### Example\n".to_string());
        for example in examples {
            if !example.note.is_empty() {
                lines.push(example.note.clone());
                lines.push(String::new());
            }
            lines.push(fenced_example(example));
            lines.push(String::new());
        }
    }

    if !record.diagnostics.is_empty() {
        lines.push("#### Diagnostics\n".to_string());
        for diagnostic in &record.diagnostics {
            lines.push(format!("* {}", diagnostic));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}

/// The example as a fenced block. An unclosed fence gets a matching
/// closing fence so it cannot swallow the rest of the document.
fn fenced_example(example: &ExampleBlock) -> String {
    let mut out = example.to_fenced().trim_end_matches('\n').to_string();
    if let (Some(opening), None) = (example.opening.as_deref(), example.closing.as_deref()) {
        let opening = opening.trim_start();
        let ch = opening.chars().next().unwrap_or('`');
        let len = opening.chars().take_while(|&c| c == ch).count().max(3);
        out.push('\n');
        out.push_str(&ch.to_string().repeat(len));
    }
    out
}

/// `a Vector3 Premier vecteur` → `**a** (Vector3): Premier vecteur`
fn render_param(param: &Param) -> String {
    let mut out = format!("**{}**", param.name);
    if !param.ty.is_empty() {
        out.push_str(&format!(" ({})", param.ty));
    }
    if !param.description.is_empty() {
        out.push_str(&format!(": {}", param.description));
    }
    out
}

/// `float Le produit scalaire` → `**float**: Le produit scalaire`
fn render_returns(returns: &Returns) -> String {
    match (returns.ty.is_empty(), returns.description.is_empty()) {
        (false, false) => format!("**{}**: {}", returns.ty, returns.description),
        (false, true) => format!("**{}**", returns.ty),
        (true, _) => returns.description.clone(),
    }
}

fn file_name(source: &str) -> &str {
    source.rsplit(['/', '\\']).next().unwrap_or(source)
}
