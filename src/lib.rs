//! tagdoc: extract `@tag` documentation blocks from source comments.
//!
//! ```text
//! // @doc.init vector3_dot dot
//! // @description Dot product of two vectors
//! // @param a Vector3 First vector
//! // @param b Vector3 Second vector
//! // @returns float The dot product
//! // @example
//! // ```cpp
//! // float r = Vector3::dot(v1, v2);
//! // ```
//! static float dot(const Vector3& a, const Vector3& b) {
//! ```
//!
//! Each tagged comment block becomes a [`Record`] bound to the declaration
//! right after it. Scanning is a pure function of the text; reading files
//! and writing output are left to the caller (see the `tagdoc` binary).

pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod syntax;
mod toc;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{
    Declaration, Diagnostic, DiagnosticKind, DocBlock, Document, Entry, ExampleBlock, Param,
    Record, Returns, Tag,
};
pub use parser::{scan, scan_file, Records, Scanner};
pub use syntax::CommentSyntax;
