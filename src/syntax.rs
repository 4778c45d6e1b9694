//! Line-comment syntax per source language.
//!
//! Only line comments are recognized. Block comments (`/* */`, docstrings)
//! are treated as code.

use std::path::Path;

const SLASH_MARKERS: &[&str] = &["///", "//!", "//"];
const HASH_MARKERS: &[&str] = &["#"];
const DASH_MARKERS: &[&str] = &["--"];

const SLASH_EXTENSIONS: &[&str] = &[
    "c", "h", "cc", "cpp", "cxx", "hh", "hpp", "hxx", "rs", "go", "java", "js", "jsx", "mjs", "ts",
    "tsx", "cs", "swift", "kt", "kts", "scala", "dart", "zig",
];

const HASH_EXTENSIONS: &[&str] = &[
    "py", "pyi", "sh", "bash", "zsh", "bats", "rb", "pl", "pm", "r", "toml", "yaml", "yml", "cmake",
    "ps1", "nim", "ex", "exs", "jl",
];

const DASH_EXTENSIONS: &[&str] = &["sql", "lua", "hs", "elm", "ada"];

/// Set of line-comment markers, matched longest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSyntax {
    markers: Vec<String>,
}

impl CommentSyntax {
    /// Build from arbitrary markers. Empty markers are dropped; returns
    /// `None` if nothing usable remains.
    pub fn new<I, S>(markers: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut markers: Vec<String> = markers
            .into_iter()
            .map(Into::into)
            .map(|m: String| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        if markers.is_empty() {
            return None;
        }
        markers.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        markers.dedup();
        Some(Self { markers })
    }

    fn from_static(markers: &[&[&str]]) -> Self {
        let mut all: Vec<String> = markers
            .iter()
            .flat_map(|group| group.iter().map(|m| m.to_string()))
            .collect();
        all.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        all.dedup();
        Self { markers: all }
    }

    /// `//`, `///` and `//!` (C family, Rust, Go, JS, ...).
    pub fn slashes() -> Self {
        Self::from_static(&[SLASH_MARKERS])
    }

    /// `#` (Python, shell, Ruby, TOML, ...).
    pub fn hash() -> Self {
        Self::from_static(&[HASH_MARKERS])
    }

    /// `--` (SQL, Lua, Haskell).
    pub fn dashes() -> Self {
        Self::from_static(&[DASH_MARKERS])
    }

    /// Every known marker. Used when the language is unknown (stdin).
    pub fn any() -> Self {
        Self::from_static(&[SLASH_MARKERS, HASH_MARKERS, DASH_MARKERS])
    }

    /// Built-in syntax for a file extension (without the dot).
    pub fn for_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        let ext = ext.as_str();
        if ext == "php" {
            return Some(Self::from_static(&[SLASH_MARKERS, HASH_MARKERS]));
        }
        if SLASH_EXTENSIONS.contains(&ext) {
            Some(Self::slashes())
        } else if HASH_EXTENSIONS.contains(&ext) {
            Some(Self::hash())
        } else if DASH_EXTENSIONS.contains(&ext) {
            Some(Self::dashes())
        } else {
            None
        }
    }

    pub fn for_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::for_extension)
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Comment text of `line`, or `None` if it is not a line comment.
    ///
    /// Leading whitespace, the marker and at most one following space are
    /// removed; everything after that is returned untouched. `#[` and `#!`
    /// are Rust attributes and shebangs, never comments. When `//` is also a
    /// marker, `#` directly followed by a letter is a C preprocessor line
    /// (`#include`, `#define`).
    pub fn strip<'a>(&self, line: &'a str) -> Option<&'a str> {
        let trimmed = line.trim_start();
        for marker in &self.markers {
            if let Some(rest) = trimmed.strip_prefix(marker.as_str()) {
                if marker == "#" && (rest.starts_with('[') || rest.starts_with('!')) {
                    return None;
                }
                if marker == "#"
                    && self.has_slashes()
                    && rest.starts_with(|c: char| c.is_ascii_alphabetic())
                {
                    return None;
                }
                return Some(rest.strip_prefix(' ').unwrap_or(rest));
            }
        }
        None
    }

    fn has_slashes(&self) -> bool {
        self.markers.iter().any(|m| m.starts_with("//"))
    }
}

/// Extensions with built-in comment syntax.
pub fn known_extensions() -> impl Iterator<Item = &'static str> {
    SLASH_EXTENSIONS
        .iter()
        .chain(HASH_EXTENSIONS)
        .chain(DASH_EXTENSIONS)
        .chain(&["php"])
        .copied()
}

/// Info-string language for fenced signature blocks.
pub fn lang_hint(ext: &str) -> String {
    match ext.to_ascii_lowercase().as_str() {
        "cc" | "cxx" | "hh" | "hpp" | "hxx" => "cpp".to_string(),
        "rs" => "rust".to_string(),
        "py" | "pyi" => "python".to_string(),
        "sh" | "bash" | "zsh" | "bats" => "bash".to_string(),
        "js" | "mjs" => "javascript".to_string(),
        "ts" => "typescript".to_string(),
        "rb" => "ruby".to_string(),
        "yml" => "yaml".to_string(),
        "cs" => "csharp".to_string(),
        "kt" | "kts" => "kotlin".to_string(),
        "hs" => "haskell".to_string(),
        other => other.to_string(),
    }
}
