//! JSON renderer: structured output for tooling integration.
//!
//! Serializes the Document model directly. Useful for custom rendering
//! pipelines and IDE integration.

use crate::error::Result;
use crate::model::Document;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, doc: &Document) -> Result<String> {
        let mut out = serde_json::to_string_pretty(doc)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
