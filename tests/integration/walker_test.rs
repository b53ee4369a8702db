//! Source-tree walking against real directory layouts

use codequal::core::SourceWalker;
use codequal::error::CodequalError;
use codequal::models::config::Settings;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_class(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let name = path.file_stem().unwrap().to_string_lossy().to_string();
    fs::write(&path, format!("public class {} {{}}\n", name)).unwrap();
}

#[test]
fn test_build_output_and_hidden_dirs_contribute_nothing() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_class(root, "src/main/java/com/acme/App.java");
    write_class(root, "build/generated/Gen.java");
    write_class(root, "target/classes/Gen.java");
    write_class(root, "node_modules/pkg/Gen.java");
    write_class(root, ".hidden/Gen.java");
    write_class(root, "src/.cache/Gen.java");
    write_class(root, "out/Gen.java");
    write_class(root, ".gradle/Gen.java");

    let outcome = SourceWalker::new(root).walk().unwrap();
    assert_eq!(
        outcome.files,
        vec![PathBuf::from("src/main/java/com/acme/App.java")]
    );
    assert!(outcome.skipped.is_empty());
}

#[test]
fn test_test_sources_are_skipped() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_class(root, "src/main/java/App.java");
    write_class(root, "src/test/java/AppTest.java");
    write_class(root, "tests/Fixture.java");

    let outcome = SourceWalker::new(root).walk().unwrap();
    assert_eq!(outcome.files, vec![PathBuf::from("src/main/java/App.java")]);
}

#[test]
fn test_only_java_files_in_sorted_order() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_class(root, "z/Last.java");
    write_class(root, "a/First.java");
    write_class(root, "m/Middle.java");
    fs::write(root.join("a/notes.txt"), "not java").unwrap();
    fs::write(root.join("a/First.class"), [0xca, 0xfe]).unwrap();

    let outcome = SourceWalker::new(root).walk().unwrap();
    assert_eq!(
        outcome.files,
        vec![
            PathBuf::from("a/First.java"),
            PathBuf::from("m/Middle.java"),
            PathBuf::from("z/Last.java"),
        ]
    );
}

#[test]
fn test_custom_exclusions_and_depth() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_class(root, "Top.java");
    write_class(root, "gen/Generated.java");
    write_class(root, "a/b/c/Deep.java");
    write_class(root, "legacy/Old.java");

    let settings = Settings {
        scan_path: root.to_path_buf(),
        excluded_dirs: vec!["gen".to_string()],
        exclude_patterns: vec!["legacy/**".to_string()],
        max_depth: Some(2),
        ..Default::default()
    };
    let outcome = SourceWalker::from_settings(&settings).unwrap().walk().unwrap();
    assert_eq!(outcome.files, vec![PathBuf::from("Top.java")]);
}

#[test]
fn test_missing_root_is_critical() {
    let dir = tempdir().unwrap();
    let err = SourceWalker::new(dir.path().join("absent")).walk().unwrap_err();
    assert!(matches!(err, CodequalError::InvalidPath { .. }));
    assert!(err.is_critical());
}
