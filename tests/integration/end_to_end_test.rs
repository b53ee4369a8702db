//! Full analysis runs over small but realistic projects

use codequal::core::aggregator::quality_score;
use codequal::core::CancellationToken;
use codequal::models::issue::{IssueCode, Severity, SeverityCounts};
use codequal::{CodequalError, ProjectAnalyzer, Settings};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_source(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn settings_for(root: &Path) -> Settings {
    Settings {
        scan_path: root.to_path_buf(),
        show_progress: false,
        ..Default::default()
    }
}

/// A small service with one overly complex method, one swallowed exception and a cycle
fn create_service_project(root: &Path) {
    write_source(
        root,
        "src/main/java/com/shop/ShopApplication.java",
        r#"package com.shop;

import com.shop.order.OrderService;

public class ShopApplication {
    public static void main(String[] args) {
        new OrderService().place(args.length);
    }
}
"#,
    );
    write_source(
        root,
        "src/main/java/com/shop/order/OrderService.java",
        r#"package com.shop.order;

import com.shop.stock.Inventory;

public class OrderService {
    private final Inventory inventory = new Inventory();

    public int place(int quantity) {
        int total = 0;
        for (int i = 0; i < quantity; i++) {
            if (i % 2 == 0 && quantity > 3) {
                total += 2;
            } else if (i % 3 == 0 || quantity > 10) {
                total += 3;
            } else {
                total += 1;
            }
            while (total > 100) {
                total -= 10;
            }
            total = total > 50 ? total - 1 : total + 1;
            if (quantity == 7) {
                total++;
            }
        }
        do {
            total--;
        } while (total > 200);
        try {
            inventory.reserve(total);
        } catch (IllegalStateException e) {
        }
        return total;
    }
}
"#,
    );
    write_source(
        root,
        "src/main/java/com/shop/stock/Inventory.java",
        r#"package com.shop.stock;

import com.shop.order.OrderService;

public class Inventory {
    private OrderService owner;

    public void reserve(int amount) {
        if (amount < 0) {
            throw new IllegalArgumentException("negative");
        }
    }
}
"#,
    );
    write_source(
        root,
        "src/test/java/com/shop/OrderServiceTest.java",
        "package com.shop;\npublic class OrderServiceTest {}\n",
    );
    write_source(root, "build/generated/Stale.java", "this is not java");
}

#[test]
fn test_service_project_end_to_end() {
    let dir = tempdir().unwrap();
    create_service_project(dir.path());

    let result = ProjectAnalyzer::new(settings_for(dir.path())).analyze().unwrap();
    let metrics = &result.metrics;

    assert_eq!(metrics.total_files, 3);
    assert_eq!(metrics.successfully_parsed, 3);
    assert_eq!(metrics.parse_failures, 0);
    assert_eq!(metrics.total_classes, 3);
    assert_eq!(metrics.total_packages, 3);
    assert_eq!(metrics.total_methods, 3);

    let place = result
        .files
        .iter()
        .find(|f| f.path.ends_with("OrderService.java"))
        .unwrap();
    let codes: Vec<IssueCode> = place.issues.iter().map(|i| i.code).collect();
    assert!(codes.contains(&IssueCode::HighComplexity));
    assert!(codes.contains(&IssueCode::EmptyCatchBlock));

    assert!(result
        .project_issues
        .iter()
        .any(|i| i.code == IssueCode::CircularDependency));
    // entry point and cycle members are all in use or exempt
    assert!(!result
        .project_issues
        .iter()
        .any(|i| i.code == IssueCode::UnusedPublicClass));

    assert_eq!(metrics.score, quality_score(&metrics.issue_counts));
    assert!(metrics.score < 100);
}

#[test]
fn test_parse_failures_are_counted_not_fatal() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_source(root, "app/Good.java", "package app;\nclass Good {}\n");
    write_source(root, "app/AlsoGood.java", "package app;\nclass AlsoGood { void run() {} }\n");
    write_source(root, "app/Broken.java", "package app;\nclass Broken { void run( }\n");
    write_source(root, "app/Garbage.java", "%%% not even close %%%\n");
    fs::write(root.join("app/Binary.java"), [0xc3, 0x28, 0xa0, 0xa1]).unwrap();

    let result = ProjectAnalyzer::new(settings_for(root)).analyze().unwrap();
    let metrics = &result.metrics;
    assert_eq!(metrics.total_files, 5);
    assert_eq!(metrics.parse_failures, 3);
    assert_eq!(metrics.successfully_parsed, 2);
    assert_eq!(metrics.total_classes, 2);

    let failed: Vec<PathBuf> = result.failed_files().map(|f| f.path.clone()).collect();
    assert_eq!(
        failed,
        vec![
            PathBuf::from("app/Binary.java"),
            PathBuf::from("app/Broken.java"),
            PathBuf::from("app/Garbage.java"),
        ]
    );
    assert!(result.failed_files().all(|f| f.failure_reason.is_some()));
}

#[test]
fn test_rerun_is_deterministic() {
    let dir = tempdir().unwrap();
    create_service_project(dir.path());

    let first = ProjectAnalyzer::new(settings_for(dir.path())).analyze().unwrap();
    let second = ProjectAnalyzer::new(settings_for(dir.path())).analyze().unwrap();
    let sequential = ProjectAnalyzer::new(Settings {
        parallel: false,
        ..settings_for(dir.path())
    })
    .analyze()
    .unwrap();
    let pooled = ProjectAnalyzer::new(Settings {
        threads: Some(2),
        ..settings_for(dir.path())
    })
    .analyze()
    .unwrap();

    for other in [&second, &sequential, &pooled] {
        assert_eq!(first.project_issues, other.project_issues);
        assert_eq!(first.metrics, other.metrics);
        assert_eq!(first.graph_statistics, other.graph_statistics);
        let first_files: Vec<_> = first.files.iter().map(|f| (&f.path, &f.issues)).collect();
        let other_files: Vec<_> = other.files.iter().map(|f| (&f.path, &f.issues)).collect();
        assert_eq!(first_files, other_files);
    }
}

#[test]
fn test_empty_project_scores_full_marks() {
    let dir = tempdir().unwrap();
    let result = ProjectAnalyzer::new(settings_for(dir.path())).analyze().unwrap();

    assert_eq!(result.metrics.total_files, 0);
    assert_eq!(result.metrics.score, 100);
    assert!(result.project_issues.is_empty());
}

#[test]
fn test_score_weights() {
    let mut counts = SeverityCounts::default();
    for severity in [
        Severity::Critical,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Warning,
        Severity::Warning,
        Severity::Info,
        Severity::Info,
        Severity::Info,
        Severity::Info,
        Severity::Info,
    ] {
        counts.bump(severity);
    }
    assert_eq!(quality_score(&counts), 36);
}

#[test]
fn test_duplicate_types_are_recorded() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_source(root, "a/Widget.java", "package app;\nclass Widget {}\n");
    write_source(root, "b/Widget.java", "package app;\nclass Widget { int size; }\n");

    let result = ProjectAnalyzer::new(settings_for(root)).analyze().unwrap();
    assert_eq!(result.metrics.total_classes, 2);
    assert_eq!(result.duplicate_types.len(), 1);
    let duplicate = &result.duplicate_types[0];
    assert_eq!(duplicate.fqn, "app.Widget");
    // merged in path order, so the later path wins
    assert_eq!(duplicate.replaced_file, PathBuf::from("a/Widget.java"));
    assert_eq!(duplicate.winning_file, PathBuf::from("b/Widget.java"));
}

#[test]
fn test_invalid_root_and_cancellation() {
    let dir = tempdir().unwrap();
    let err = ProjectAnalyzer::new(settings_for(&dir.path().join("missing")))
        .analyze()
        .unwrap_err();
    assert!(matches!(err, CodequalError::InvalidPath { .. }));

    create_service_project(dir.path());
    let token = CancellationToken::new();
    token.cancel();
    let err = ProjectAnalyzer::new(settings_for(dir.path()))
        .with_cancellation(token)
        .analyze()
        .unwrap_err();
    assert!(matches!(err, CodequalError::Interrupted));
}
