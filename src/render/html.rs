//! HTML renderer: standalone HTML page with semantic markup.

use crate::error::Result;
use crate::model::*;
use crate::render::Renderer;
use crate::toc::Anchors;

pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        if let Some(ref source) = doc.source {
            out.push_str(&format!("<title>{}</title>\n", html_escape(source)));
        }
        out.push_str("<style>\n");
        out.push_str("body { font-family: system-ui, sans-serif; max-width: 48em; margin: 2em auto; padding: 0 1em; }\n");
        out.push_str("code { background: #f4f4f4; padding: 0.15em 0.3em; border-radius: 3px; }\n");
        out.push_str("pre { background: #f4f4f4; padding: 1em; border-radius: 5px; overflow-x: auto; }\n");
        out.push_str("dt { font-weight: bold; margin-top: 0.5em; }\n");
        out.push_str("dd { margin-left: 1.5em; }\n");
        out.push_str(".id { font-size: 0.75em; color: #666; margin-left: 0.5em; }\n");
        out.push_str(".diagnostics { color: #a33; }\n");
        out.push_str("</style>\n");
        out.push_str("</head>\n<body>\n");

        if let Some(ref source) = doc.source {
            out.push_str(&format!("<h1>{}</h1>\n", html_escape(source)));
        }

        let mut anchors = Anchors::default();
        let entries: Vec<(String, String)> = doc
            .records
            .iter()
            .map(|r| {
                let name = r.display_name();
                let anchor = anchors.next(&name);
                (name, anchor)
            })
            .collect();

        // Index
        if !entries.is_empty() {
            out.push_str("<h2>Index</h2>\n<ul>\n");
            for (name, anchor) in &entries {
                out.push_str(&format!(
                    "  <li><a href=\"#{}\">{}</a></li>\n",
                    html_escape(anchor),
                    html_escape(name)
                ));
            }
            out.push_str("</ul>\n");
        }

        for (record, (name, anchor)) in doc.records.iter().zip(&entries) {
            out.push_str(&render_record_html(record, name, anchor, doc.lang.as_deref()));
        }

        out.push_str("</body>\n</html>\n");
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn render_record_html(record: &Record, name: &str, anchor: &str, lang: Option<&str>) -> String {
    let mut out = String::new();
    let block = &record.block;

    out.push_str(&format!("<h3 id=\"{}\">{}", html_escape(anchor), html_escape(name)));
    if let Some(id) = block.id().filter(|id| !id.is_empty()) {
        out.push_str(&format!(" <span class=\"id\">{}</span>", html_escape(id)));
    }
    out.push_str("</h3>\n");

    if let Some(ref decl) = record.declaration {
        let mut text = decl.attributes.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&decl.signature);
        out.push_str(&format!(
            "<pre><code{}>{}</code></pre>\n",
            lang_class(lang),
            html_escape(&text)
        ));
    }

    if let Some(desc) = block.description() {
        for paragraph in desc.split("\n\n") {
            out.push_str(&format!("<p>{}</p>\n", html_escape(paragraph)));
        }
    }

    let params: Vec<&Param> = block.params().collect();
    if !params.is_empty() {
        out.push_str("<h4>Parameters</h4>\n<dl>\n");
        for param in params {
            let ty = if param.ty.is_empty() {
                String::new()
            } else {
                format!(" <code>{}</code>", html_escape(&param.ty))
            };
            out.push_str(&format!(
                "  <dt>{}{}</dt>\n  <dd>{}</dd>\n",
                html_escape(&param.name),
                ty,
                html_escape(&param.description)
            ));
        }
        out.push_str("</dl>\n");
    }

    if let Some(returns) = block.returns() {
        out.push_str(&format!(
            "<h4>Returns</h4>\n<p><code>{}</code> {}</p>\n",
            html_escape(&returns.ty),
            html_escape(&returns.description)
        ));
    }

    let examples: Vec<&ExampleBlock> = block.examples().collect();
    if !examples.is_empty() {
        out.push_str("<h4>Example</h4>\n");
        for example in examples {
            if !example.note.is_empty() {
                out.push_str(&format!("<p>{}</p>\n", html_escape(&example.note)));
            }
            out.push_str(&format!(
                "<pre><code{}>{}</code></pre>\n",
                lang_class(example.lang.as_deref()),
                html_escape(&example.code())
            ));
        }
    }

    if !record.diagnostics.is_empty() {
        out.push_str("<h4>Diagnostics</h4>\n<ul class=\"diagnostics\">\n");
        for diagnostic in &record.diagnostics {
            out.push_str(&format!("  <li>{}</li>\n", html_escape(&diagnostic.to_string())));
        }
        out.push_str("</ul>\n");
    }

    out
}

fn lang_class(lang: Option<&str>) -> String {
    match lang {
        Some(lang) if !lang.is_empty() => format!(" class=\"language-{}\"", html_escape(lang)),
        _ => String::new(),
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
