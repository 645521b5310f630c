//! Integration tests for the gridview binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

struct TempDir(PathBuf);

impl TempDir {
    fn new(label: &str) -> TempDir {
        let path = std::env::temp_dir().join(format!(
            "gridview_cli_{}_{}_{}",
            label,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos(),
        ));
        fs::create_dir_all(&path).unwrap();
        TempDir(path)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("crates/gridview-core/tests/fixtures")
        .join(name)
}

fn run_gridview(dir: &Path, args: &[&str]) -> (String, String, i32) {
    // Tests must not depend on a user's ~/.config/gridview/config.toml.
    let config = dir.join("config.toml");
    fs::write(&config, "").unwrap();

    let output = Command::new("cargo")
        .arg("run")
        .arg("-q")
        .arg("--")
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_writes_every_sheet() {
    let tmp = TempDir::new("all");
    let out = tmp.0.join("site");
    let workbook = fixture("budget.json");
    let (stdout, _, code) = run_gridview(
        &tmp.0,
        &["-o", out.to_str().unwrap(), workbook.to_str().unwrap()],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("Inputs.html"));
    assert!(stdout.contains("Outputs.html"));

    let page = fs::read_to_string(out.join("Outputs.html")).unwrap();
    assert!(page.contains("<h1>Budget</h1>"));
    assert!(page.contains("Inputs.html#B1"));
}

#[test]
fn test_title_and_dimensions_flags() {
    let tmp = TempDir::new("flags");
    let workbook = fixture("budget.json");
    let dims = fixture("budget.dimensions.tsv");
    let (_, _, code) = run_gridview(
        &tmp.0,
        &[
            "-o",
            tmp.0.to_str().unwrap(),
            "-d",
            dims.to_str().unwrap(),
            "-t",
            "Forecast",
            "-s",
            "Inputs",
            workbook.to_str().unwrap(),
        ],
    );
    assert_eq!(code, 0);
    assert!(!tmp.0.join("Outputs.html").exists());

    let page = fs::read_to_string(tmp.0.join("Inputs.html")).unwrap();
    assert!(page.contains("<h1>Forecast</h1>"));
    let outputs_link = page.find("<a href='Outputs.html'>").unwrap();
    let inputs_link = page.find("<a href='Inputs.html'>").unwrap();
    assert!(outputs_link < inputs_link);
}

#[test]
fn test_unknown_sheet_fails() {
    let tmp = TempDir::new("unknown");
    let workbook = fixture("budget.json");
    let (_, stderr, code) = run_gridview(
        &tmp.0,
        &["-o", tmp.0.to_str().unwrap(), "-s", "Nope", workbook.to_str().unwrap()],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown sheet: Nope"));
}

#[test]
fn test_malformed_reference_fails() {
    let tmp = TempDir::new("badref");
    let workbook = tmp.0.join("bad.json");
    fs::write(
        &workbook,
        r#"{"sheets": {"S": {"values": {"A1": ["number", 1], "12B": ["number", 2]}}}}"#,
    )
    .unwrap();
    let (_, stderr, code) = run_gridview(
        &tmp.0,
        &["-o", tmp.0.to_str().unwrap(), workbook.to_str().unwrap()],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Bad cell reference in sheet 'S'"));
}

#[test]
fn test_missing_workbook_fails() {
    let tmp = TempDir::new("missing");
    let (_, stderr, code) = run_gridview(&tmp.0, &[tmp.0.join("nope.json").to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Error: Failed to load workbook"));
}
