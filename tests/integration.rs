use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::{NamedTempFile, TempDir};

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_tagdoc")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn read_output(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name)).unwrap()
}

// -- stdin mode --

#[test]
fn stdin_mode_produces_markdown() {
    let input = std::fs::read_to_string(fixture_path("vector3.cpp")).unwrap();
    let expected = std::fs::read_to_string(fixture_path("vector3.expected.md")).unwrap();
    // No file name header on stdin
    let expected = expected.strip_prefix("# vector3.cpp\n\n").unwrap();

    let assert = cmd()
        .args(["--lang", "cpp"])
        .write_stdin(input)
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output, expected);
}

#[test]
fn stdin_mode_accepts_any_marker() {
    let input = "# @doc.init gcd gcd\n# @description Greatest common divisor\n@staticmethod\ndef gcd(a: int, b: int) -> int:\n";

    let assert = cmd().write_stdin(input).assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(output.contains("### gcd"));
    assert!(output.contains("```\n@staticmethod\ndef gcd(a: int, b: int) -> int:\n```"));
    assert!(output.contains("Greatest common divisor"));
}

#[test]
fn stdin_mode_preprocessor_line_is_declaration() {
    let input = "// @doc.init max MAX\n// @description Upper bound\n#define MAX 10\n";

    cmd()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("```\n#define MAX 10\n```"))
        .stdout(predicate::str::contains("define MAX 10\n\n").not())
        .stderr(predicate::str::contains("ORPHANED_BLOCK").not());
}

#[test]
fn stdin_mode_unknown_lang_fails() {
    cmd()
        .args(["--lang", "brainfuck"])
        .write_stdin("// @doc.init a A\nint a;\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported language: brainfuck"));
}

#[test]
fn stdin_mode_without_blocks() {
    cmd()
        .write_stdin("int main() { return 0; }\n")
        .assert()
        .success()
        .stdout("\n");
}

// -- file mode --

#[test]
fn file_mode_creates_output() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("vector3.cpp"))
        .assert()
        .success();

    let expected = std::fs::read_to_string(fixture_path("vector3.expected.md")).unwrap();
    assert_eq!(read_output(&dir, "vector3.md"), expected);
}

#[test]
fn file_mode_multiple_files() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("vector3.cpp"))
        .arg(fixture_path("math_utils.py"))
        .arg(fixture_path("calculator.rs"))
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN").not());

    assert!(dir.path().join("vector3.md").exists());
    assert!(dir.path().join("math_utils.md").exists());
    assert!(dir.path().join("calculator.md").exists());
}

#[test]
fn file_mode_python_decorators_and_blank_lines() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("math_utils.py"))
        .assert()
        .success();

    let output = read_output(&dir, "math_utils.md");
    assert!(output.contains("* [MathUtils](#mathutils)\n* [factorial](#factorial)\n* [gcd](#gcd)\n"));
    assert!(output.contains("```python\nclass MathUtils:\n```"));
    assert!(output.contains("```python\n@staticmethod\ndef factorial(n: int) -> int:\n```"));
    assert!(output.contains("* **int**: The greatest common divisor of a and b"));
    assert!(output.contains("```python\nresult = MathUtils.factorial(5)  # 120\n```"));
}

#[test]
fn file_mode_rust_doc_alias() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("calculator.rs"))
        .assert()
        .success();

    let output = read_output(&dir, "calculator.md");
    assert!(output.starts_with("# calculator.rs\n"));
    assert!(output.contains("### subtract\n\n> `calculator_subtract`"));
    assert!(output.contains("```rust\npub fn add(&self, a: i32, b: i32) -> i32 {\n```"));
    assert!(output.contains("* **Calculator**: A new instance"));
}

#[test]
fn file_mode_directory_input() {
    let dir = TempDir::new().unwrap();
    let src = TempDir::new().unwrap();
    std::fs::copy(fixture_path("vector3.cpp"), src.path().join("vector3.cpp")).unwrap();
    std::fs::write(src.path().join("notes.txt"), "// @doc.init n N\nnot source\n").unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(src.path().to_str().unwrap())
        .assert()
        .success();

    assert!(dir.path().join("vector3.md").exists());
    assert!(!dir.path().join("notes.md").exists());
}

#[test]
fn file_mode_glob_input() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("*.py"))
        .assert()
        .success();

    assert!(dir.path().join("math_utils.md").exists());
    assert!(dir.path().join("broken.md").exists());
    assert!(!dir.path().join("vector3.md").exists());
}

#[test]
fn file_mode_no_match_warns() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("*.nothing"))
        .assert()
        .success()
        .stderr(predicate::str::contains("no files matched"));
}

#[test]
fn file_mode_skips_files_without_blocks() {
    let dir = TempDir::new().unwrap();
    let mut input = NamedTempFile::with_suffix(".cpp").unwrap();
    input.write_all(b"// plain comment\nint main() {}\n").unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(input.path().to_str().unwrap())
        .assert()
        .success();

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert!(entries.is_empty(), "Should not write output for a file without blocks");
}

#[test]
fn file_mode_unsupported_extension_is_skipped() {
    let dir = TempDir::new().unwrap();
    let mut input = NamedTempFile::with_suffix(".xyz").unwrap();
    input.write_all(b"// @doc.init a A\nint a;\n").unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(input.path().to_str().unwrap())
        .assert()
        .success()
        .stderr(predicate::str::contains("unsupported file type"));
}

#[test]
fn file_mode_requires_output() {
    cmd()
        .arg(fixture_path("vector3.cpp"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output is required"));
}

// -- diagnostics --

#[test]
fn diagnostics_are_logged_and_rendered() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("broken.py"))
        .assert()
        .success()
        .stderr(predicate::str::contains("broken.py:2: MALFORMED_TAG"))
        .stderr(predicate::str::contains("broken.py:7: ORPHANED_BLOCK"));

    let output = read_output(&dir, "broken.md");
    assert!(output.contains("* **r**: Rayon du cercle"));
    assert!(output.contains("#### Diagnostics"));
    assert!(output.contains("* line 7: ORPHANED_BLOCK: no declaration follows before end of input"));
}

#[test]
fn strict_mode_fails_on_diagnostics() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg("--strict")
        .arg(fixture_path("broken.py"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 diagnostic(s) reported"));

    // Output is still written before failing
    assert!(dir.path().join("broken.md").exists());
}

#[test]
fn strict_mode_passes_clean_input() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg("--strict")
        .arg(fixture_path("vector3.cpp"))
        .assert()
        .success();
}

#[test]
fn no_diagnostics_flag() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg("--no-diagnostics")
        .arg(fixture_path("broken.py"))
        .assert()
        .success()
        .stderr(predicate::str::contains("MALFORMED_TAG"));

    let output = read_output(&dir, "broken.md");
    assert!(!output.contains("#### Diagnostics"));
    assert!(output.contains("### Dangling"));
}

// -- output formats --

#[test]
fn file_mode_html_format() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-f", "html"])
        .arg(fixture_path("vector3.cpp"))
        .assert()
        .success();

    let output_path = dir.path().join("vector3.html");
    assert!(output_path.exists(), "Should create .html file");
    let output = std::fs::read_to_string(output_path).unwrap();
    assert!(output.contains("<!DOCTYPE html>"));
    assert!(output.contains("<span class=\"id\">vector3_dot</span>"));
}

#[test]
fn file_mode_json_format() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-f", "json"])
        .arg(fixture_path("vector3.cpp"))
        .assert()
        .success();

    let output_path = dir.path().join("vector3.json");
    assert!(output_path.exists(), "Should create .json file");
    let output = std::fs::read_to_string(output_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["lang"], "cpp");
    assert_eq!(value["records"].as_array().unwrap().len(), 2);
    assert_eq!(value["records"][1]["declaration"]["line"], 23);
    assert_eq!(value["records"][1]["block"]["entries"][0]["id"], "vector3_dot");
}

#[test]
fn invalid_format_fails() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-f", "xml"])
        .arg(fixture_path("vector3.cpp"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn stdin_html_format() {
    let input = "// @doc.init a A\n// @description An int\nint a;\n";

    let assert = cmd()
        .args(["-f", "html"])
        .write_stdin(input)
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(output.contains("<!DOCTYPE html>"));
    assert!(output.contains("<p>An int</p>"));
}

#[test]
fn stdin_json_format() {
    let input = "// @doc.init a A\n// @description An int\nint a;\n";

    let assert = cmd()
        .args(["-f", "json"])
        .write_stdin(input)
        .assert()
        .success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(output.contains("\"records\""));
    assert!(output.contains("\"signature\": \"int a;\""));
}

// -- config --

#[test]
fn list_languages_includes_config_extensions() {
    let work = TempDir::new().unwrap();
    std::fs::write(work.path().join("tagdoc.toml"), "[languages]\nnix = [\"#\"]\n").unwrap();

    cmd()
        .current_dir(work.path())
        .arg("--list-languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("nix: #\n"))
        .stdout(predicate::str::contains("lua: --\n"));
}

#[test]
fn config_file_sets_format_and_languages() {
    let dir = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    std::fs::write(
        work.path().join("tagdoc.toml"),
        "format = \"json\"\n\n[languages]\nvue = [\"//\"]\n",
    )
    .unwrap();
    std::fs::write(
        work.path().join("widget.vue"),
        "// @doc.init mount mount\n// @description Mounts the widget\nfunction mount(el) {\n",
    )
    .unwrap();

    cmd()
        .current_dir(work.path())
        .args(["-o", dir.path().to_str().unwrap()])
        .arg("widget.vue")
        .assert()
        .success();

    let output = read_output(&dir, "widget.json");
    assert!(output.contains("\"signature\": \"function mount(el) {\""));
}

#[test]
fn explicit_config_enables_strict() {
    let dir = TempDir::new().unwrap();
    let mut config = NamedTempFile::with_suffix(".toml").unwrap();
    config.write_all(b"strict = true\n").unwrap();

    cmd()
        .args(["-c", config.path().to_str().unwrap()])
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("broken.py"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("diagnostic(s) reported"));
}

#[test]
fn malformed_config_fails() {
    let mut config = NamedTempFile::with_suffix(".toml").unwrap();
    config.write_all(b"colour = \"blue\"\n").unwrap();

    cmd()
        .args(["-c", config.path().to_str().unwrap()])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}
