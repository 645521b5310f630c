//! End-to-end report generation over the fixture workbook.

use chrono::DateTime;
use gridview_core::storage::{parse_dimensions, parse_workbook};
use gridview_core::{HtmlReport, ReportConfig};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn fixed_time() -> DateTime<chrono::FixedOffset> {
    DateTime::parse_from_rfc3339("2026-10-18T09:30:00+00:00").unwrap()
}

#[test]
fn outputs_sheet_matches_expected_page() {
    let workbook = parse_workbook(&fixture("budget.json")).unwrap();
    let dimensions = parse_dimensions(&fixture("budget.dimensions.tsv")).unwrap();
    let report = HtmlReport::new(&workbook, ReportConfig::default())
        .with_dimensions(dimensions)
        .with_timestamp(fixed_time());

    let mut out = Vec::new();
    report.compile_sheet("Outputs", &mut out).unwrap();

    let actual = String::from_utf8(out).unwrap();
    let expected = fs::read_to_string(fixture("outputs.expected.html")).unwrap();
    let normalize = |text: String| text.replace("\r\n", "\n");
    assert_eq!(normalize(actual), normalize(expected));
}

#[test]
fn stale_dimension_hint_keeps_all_cells() {
    // The dimensions file records Inputs as A1:B1, but B2 holds a value.
    let workbook = parse_workbook(&fixture("budget.json")).unwrap();
    let dimensions = parse_dimensions(&fixture("budget.dimensions.tsv")).unwrap();
    let report = HtmlReport::new(&workbook, ReportConfig::default()).with_dimensions(dimensions);

    let mut out = Vec::new();
    report.compile_sheet("Inputs", &mut out).unwrap();
    let html = String::from_utf8(out).unwrap();

    assert!(html.contains("<td id='cB2' class='cB2' data-formula='&nbsp;'>40</td>"));
    assert!(html.contains("<td id='cB1' class='cB1' data-formula='&nbsp;'>0</td>"));
}

#[test]
fn write_reports_creates_one_page_per_sheet() {
    let output_dir = std::env::temp_dir().join(format!(
        "gridview_report_export_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos(),
    ));
    struct Cleanup(PathBuf);
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }
    let _cleanup = Cleanup(output_dir.clone());

    let workbook = parse_workbook(&fixture("budget.json")).unwrap();
    let config = ReportConfig {
        attribution_url: Some("https://example.com/gridview".to_string()),
        ..ReportConfig::default()
    };
    let report = HtmlReport::new(&workbook, config).with_title("Quarterly");

    let written = report.write_reports(&output_dir, &[]).unwrap();
    assert_eq!(
        written,
        vec![output_dir.join("Inputs.html"), output_dir.join("Outputs.html")]
    );

    let inputs = fs::read_to_string(output_dir.join("Inputs.html")).unwrap();
    assert!(inputs.contains("<h1>Quarterly</h1>"));
    assert!(inputs.contains("by <a href='https://example.com/gridview'>gridview</a></p>"));
    assert!(inputs.contains("<td class='current'><a href='Inputs.html'>Inputs</a></td>"));

    let only = report
        .write_reports(&output_dir, &["Outputs".to_string()])
        .unwrap();
    assert_eq!(only, vec![output_dir.join("Outputs.html")]);

    assert!(report
        .write_reports(&output_dir, &["Missing".to_string()])
        .is_err());
}
