//! Report rendering and writing for a real analysis run

use codequal::cli::commands::write_dot;
use codequal::models::issue::Severity;
use codequal::output::{create_formatter, create_writer};
use codequal::{AnalysisResult, OutputFormat, ProjectAnalyzer, Settings};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn create_project(root: &Path) {
    let write = |rel: &str, content: &str| {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    };
    write(
        "app/Orders.java",
        "package app;\n\nimport java.util.List;\n\npublic class Orders {\n    private List<String> ids;\n    public void add(int a, int b, int c, int d, int e, int f) {}\n}\n",
    );
    write("app/Broken.java", "package app;\nclass Broken {\n");
}

fn run(root: &Path, tweak: impl FnOnce(&mut Settings)) -> (Settings, AnalysisResult) {
    let mut settings = Settings {
        scan_path: root.to_path_buf(),
        show_progress: false,
        use_colors: false,
        ..Default::default()
    };
    tweak(&mut settings);
    let result = ProjectAnalyzer::new(settings.clone()).analyze().unwrap();
    (settings, result)
}

#[test]
fn test_text_report() {
    let dir = tempdir().unwrap();
    create_project(dir.path());
    let (settings, result) = run(dir.path(), |_| {});

    let report = create_formatter(&settings).format(&result).unwrap();
    assert!(report.contains("Files analyzed: 2"));
    assert!(report.contains("Parse failures: 1"));
    assert!(report.contains("TOO_MANY_PARAMETERS app/Orders.java:7"));
    assert!(report.contains("UNUSED_PUBLIC_CLASS"));
    assert!(report.contains(&format!("Quality score: {}/100", result.metrics.score)));
    assert!(!report.contains("\u{1b}["));
}

#[test]
fn test_min_severity_hides_lower_issues() {
    let dir = tempdir().unwrap();
    create_project(dir.path());
    let (settings, result) = run(dir.path(), |s| s.min_severity = Severity::Warning);

    let report = create_formatter(&settings).format(&result).unwrap();
    assert!(!report.contains("TOO_MANY_PARAMETERS"));
    assert!(!report.contains("UNUSED_PUBLIC_CLASS"));
    assert!(report.contains("No issues at or above WARNING"));
}

#[test]
fn test_json_report_to_file() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("project");
    create_project(&project);
    let report_path = dir.path().join("report.json");
    let (settings, result) = run(&project, |s| {
        s.output_format = OutputFormat::Json;
        s.output_file = Some(report_path.clone());
    });

    let report = create_formatter(&settings).format(&result).unwrap();
    create_writer(settings.output_file.as_ref()).write(&report).unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(parsed["metrics"]["total_files"], 2);
    assert_eq!(parsed["metrics"]["parse_failures"], 1);
    assert_eq!(parsed["files"][0]["path"], "app/Broken.java");
    assert_eq!(parsed["files"][0]["parsed"], false);
    assert_eq!(parsed["files"][1]["issues"][0]["code"], "TOO_MANY_PARAMETERS");
    assert_eq!(parsed["project_issues"][0]["code"], "UNUSED_PUBLIC_CLASS");
}

#[test]
fn test_csv_report_rows() {
    let dir = tempdir().unwrap();
    create_project(dir.path());
    let (settings, result) = run(dir.path(), |s| s.output_format = OutputFormat::Csv);

    let report = create_formatter(&settings).format(&result).unwrap();
    let mut reader = csv::Reader::from_reader(report.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["scope", "severity", "code", "location", "line", "message"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "file");
    assert_eq!(&rows[0][2], "TOO_MANY_PARAMETERS");
    assert_eq!(&rows[0][4], "7");
    assert_eq!(&rows[1][0], "project");
    assert_eq!(&rows[1][3], "app/Orders.java");
    assert_eq!(&rows[1][4], "");
}

#[test]
fn test_dot_export() {
    let dir = tempdir().unwrap();
    create_project(dir.path());
    let (_, result) = run(dir.path(), |_| {});

    let dot_path = dir.path().join("deps.dot");
    write_dot(&result, &dot_path).unwrap();
    let dot = fs::read_to_string(&dot_path).unwrap();
    assert!(dot.contains("\"app.Orders\" -> \"java.util.List\""));
    assert!(dot.contains("\"java.util.List\" [label=\"List\", style=dashed];"));
}
