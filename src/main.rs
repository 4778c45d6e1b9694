//! tagdoc: generate documentation from `@tag` comment blocks.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `tagdoc < file.cpp` (any known comment marker, or `--lang cpp`)
//! - **file mode**: `tagdoc -o docs/api src/*.cpp lib/*.py`

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashSet;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tagdoc::model::Document;
use tagdoc::{parser, render, CommentSyntax, Config};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tagdoc",
    about = "Generate documentation from @tag comment blocks in source files"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: markdown (default), html, json
    #[arg(short = 'f', long)]
    format: Option<String>,

    /// Source language extension for stdin input (e.g. cpp, py). Defaults to
    /// accepting every known comment marker.
    #[arg(short = 'l', long)]
    lang: Option<String>,

    /// Config file. Defaults to ./tagdoc.toml when present.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Leave diagnostics out of the rendered output (they are still logged)
    #[arg(long)]
    no_diagnostics: bool,

    /// Exit with an error if any diagnostic is reported
    #[arg(long)]
    strict: bool,

    /// Print every supported file extension with its comment markers and exit
    #[arg(long)]
    list_languages: bool,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::discover(Path::new(".")).context("failed to load tagdoc.toml")?,
    };
    tracing::debug!("{}", config.display_summary());

    if cli.list_languages {
        print!("{}", language_table(&config));
        return Ok(());
    }

    let diagnostics = if cli.files.is_empty() {
        stdin_mode(&cli, &config)?
    } else {
        file_mode(&cli, &config)?
    };

    if (cli.strict || config.strict) && diagnostics > 0 {
        anyhow::bail!("{} diagnostic(s) reported", diagnostics);
    }
    Ok(())
}

/// Logs go to stderr; `TAGDOC_LOG` (or `RUST_LOG`) sets the filter, default `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("TAGDOC_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

/// stdin mode: read from stdin, write the rendered document to stdout.
/// Returns the number of diagnostics.
fn stdin_mode(cli: &Cli, config: &Config) -> Result<usize> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let (syntax, lang) = match cli.lang {
        Some(ref lang) => {
            let sample_path = PathBuf::from(format!("stdin.{}", lang));
            let syntax = config
                .syntax_for(&sample_path)
                .with_context(|| format!("unsupported language: {}", lang))?;
            (syntax, Some(tagdoc::syntax::lang_hint(lang)))
        }
        None => (CommentSyntax::any(), None),
    };

    let mut doc = Document {
        source: None,
        lang,
        records: parser::scan(&input, &syntax),
    };
    let count = report_diagnostics("<stdin>", &doc);
    if cli.no_diagnostics {
        strip_diagnostics(&mut doc);
    }

    let renderer = render::create_renderer(&output_format(cli, config))?;
    print!("{}", renderer.render(&doc)?);
    Ok(count)
}

/// file mode: process multiple files, write one output per documented file.
/// Returns the number of diagnostics.
fn file_mode(cli: &Cli, config: &Config) -> Result<usize> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    let renderer = render::create_renderer(&output_format(cli, config))?;
    let ext = renderer.file_extension();

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let input_files = expand_globs(&cli.files, config)?;

    let mut count = 0;
    let mut used_names: HashSet<String> = HashSet::new();
    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut doc = match parser::scan_file(path, &content, config) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        count += report_diagnostics(&path.display().to_string(), &doc);

        // Skip files without any tagged block
        if doc.records.is_empty() {
            continue;
        }
        if cli.no_diagnostics {
            strip_diagnostics(&mut doc);
        }

        let name = derive_output_name(path, &mut used_names);
        let out_path = output_dir.join(format!("{}.{}", name, ext));
        fs::write(&out_path, renderer.render(&doc)?)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        tracing::info!(
            "{} -> {} ({} record(s))",
            path.display(),
            out_path.display(),
            doc.records.len()
        );
    }

    Ok(count)
}

/// One `ext: markers` line per supported extension.
fn language_table(config: &Config) -> String {
    let mut out = String::new();
    for ext in config.extensions() {
        let sample_path = PathBuf::from(format!("x.{}", ext));
        if let Some(syntax) = config.syntax_for(&sample_path) {
            out.push_str(&format!("{}: {}\n", ext, syntax.markers().join(" ")));
        }
    }
    out
}

fn output_format(cli: &Cli, config: &Config) -> String {
    cli.format
        .clone()
        .or_else(|| config.format.clone())
        .unwrap_or_else(|| "markdown".to_string())
}

/// Log every diagnostic as a warning and return how many there were.
fn report_diagnostics(source: &str, doc: &Document) -> usize {
    for diagnostic in doc.records.iter().flat_map(|r| &r.diagnostics) {
        tracing::warn!(
            "{}:{}: {}: {}",
            source,
            diagnostic.line,
            diagnostic.kind,
            diagnostic.message
        );
    }
    doc.diagnostic_count()
}

fn strip_diagnostics(doc: &mut Document) {
    for record in &mut doc.records {
        record.diagnostics.clear();
    }
}

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for supported file types.
fn expand_globs(patterns: &[String], config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // If it's a directory, scan for supported extensions (non-recursive)
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && config.supports(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        // Try as glob
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Output file name (without extension): the file stem, or the full file
/// name when another input already claimed that stem.
/// "src/vector3.cpp" → "vector3", then "lib/vector3.py" → "vector3.py"
fn derive_output_name(path: &Path, used: &mut HashSet<String>) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "index".to_string());
    if used.insert(stem.clone()) {
        return stem;
    }
    let file_name = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| stem.clone());
    let mut name = file_name.clone();
    let mut n = 1;
    while !used.insert(name.clone()) {
        name = format!("{}-{}", file_name, n);
        n += 1;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_from_stem() {
        let mut used = HashSet::new();
        assert_eq!(derive_output_name(Path::new("src/vector3.cpp"), &mut used), "vector3");
        assert_eq!(derive_output_name(Path::new("math_utils.py"), &mut used), "math_utils");
    }

    #[test]
    fn output_name_collision() {
        let mut used = HashSet::new();
        assert_eq!(derive_output_name(Path::new("a/vector3.cpp"), &mut used), "vector3");
        assert_eq!(derive_output_name(Path::new("b/vector3.py"), &mut used), "vector3.py");
        assert_eq!(derive_output_name(Path::new("c/vector3.py"), &mut used), "vector3.py-1");
    }

    #[test]
    fn language_table_lists_builtin_and_custom() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(
            dir.path().join("tagdoc.toml"),
            "[languages]\nvue = [\"//\"]\n",
        )
        .unwrap();
        let config = Config::discover(dir.path()).unwrap();
        let table = language_table(&config);
        assert!(table.contains("cpp: //! /// //\n"));
        assert!(table.contains("py: #\n"));
        assert!(table.contains("vue: //\n"));
    }

    #[test]
    fn output_name_no_extension() {
        let mut used = HashSet::new();
        assert_eq!(derive_output_name(Path::new("Makefile"), &mut used), "Makefile");
    }
}
