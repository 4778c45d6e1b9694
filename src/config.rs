//! Configuration loading from `tagdoc.toml`.
//!
//! ## Example
//!
//! ```toml
//! format = "json"
//! strict = true
//!
//! [languages]
//! # extension = [comment markers]
//! vue = ["//"]
//! nix = ["#"]
//! ```

use crate::error::{Error, Result};
use crate::syntax::{self, CommentSyntax};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "tagdoc.toml";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File this config was read from, for display.
    pub source: Option<PathBuf>,
    /// Default output format when `--format` is not given.
    pub format: Option<String>,
    /// Fail when any diagnostic is reported.
    pub strict: bool,
    /// Extra or overriding extension → comment syntax mappings.
    languages: BTreeMap<String, CommentSyntax>,
}

/// Raw config as deserialized from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    format: Option<String>,
    strict: Option<bool>,
    languages: Option<BTreeMap<String, Vec<String>>>,
}

impl Config {
    /// Read a config file. Missing or malformed files are errors.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let raw: RawConfig = toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_raw(raw, path.to_path_buf())
    }

    /// `tagdoc.toml` in `directory` if present, defaults otherwise.
    pub fn discover(directory: &Path) -> Result<Self> {
        let candidate = directory.join(CONFIG_FILE);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn from_raw(raw: RawConfig, source: PathBuf) -> Result<Self> {
        let mut languages = BTreeMap::new();
        for (ext, markers) in raw.languages.unwrap_or_default() {
            let ext = ext.trim_start_matches('.').to_ascii_lowercase();
            let syntax =
                CommentSyntax::new(markers).ok_or_else(|| Error::InvalidMarkers(ext.clone()))?;
            languages.insert(ext, syntax);
        }
        Ok(Self {
            source: Some(source),
            format: raw.format,
            strict: raw.strict.unwrap_or(false),
            languages,
        })
    }

    /// Comment syntax for a file: configured override first, then built-in.
    pub fn syntax_for(&self, path: &Path) -> Option<CommentSyntax> {
        let ext = path.extension().and_then(|e| e.to_str())?.to_ascii_lowercase();
        self.languages
            .get(&ext)
            .cloned()
            .or_else(|| CommentSyntax::for_extension(&ext))
    }

    /// Whether a file extension can be scanned.
    pub fn supports(&self, path: &Path) -> bool {
        self.syntax_for(path).is_some()
    }

    /// Every extension that can be scanned, sorted.
    pub fn extensions(&self) -> Vec<String> {
        let mut all: Vec<String> = syntax::known_extensions()
            .map(str::to_string)
            .chain(self.languages.keys().cloned())
            .collect();
        all.sort();
        all.dedup();
        all
    }

    /// One-line summary for verbose logging.
    pub fn display_summary(&self) -> String {
        match self.source {
            Some(ref source) => format!(
                "config: {} ({} custom language(s))",
                source.display(),
                self.languages.len()
            ),
            None => "config: (defaults)".to_string(),
        }
    }
}
