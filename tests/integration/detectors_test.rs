//! Project detectors run end to end over real Java sources

use codequal::models::issue::{IssueCode, ProjectIssue, Severity};
use codequal::{AnalysisResult, ProjectAnalyzer, Settings};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_source(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn analyze(root: &Path) -> AnalysisResult {
    analyze_with(root, |_| {})
}

fn analyze_with(root: &Path, tweak: impl FnOnce(&mut Settings)) -> AnalysisResult {
    let mut settings = Settings {
        scan_path: root.to_path_buf(),
        show_progress: false,
        ..Default::default()
    };
    tweak(&mut settings);
    ProjectAnalyzer::new(settings).analyze().unwrap()
}

fn issues_with(result: &AnalysisResult, code: IssueCode) -> Vec<&ProjectIssue> {
    result
        .project_issues
        .iter()
        .filter(|issue| issue.code == code)
        .collect()
}

/// True when `chain` ("X -> Y -> Z -> X") walks the names in `order`, starting anywhere
fn is_rotation_of(chain: &str, order: &[&str]) -> bool {
    let names: Vec<&str> = chain.split(" -> ").collect();
    if names.len() != order.len() + 1 || names.first() != names.last() {
        return false;
    }
    let cycle = &names[..order.len()];
    (0..order.len()).any(|shift| (0..order.len()).all(|i| cycle[i] == order[(i + shift) % order.len()]))
}

#[test]
fn test_three_type_cycle_is_reported() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_source(root, "app/A.java", "package app;\npublic class A { private B next; }\n");
    write_source(root, "app/B.java", "package app;\npublic class B { private C next; }\n");
    write_source(root, "app/C.java", "package app;\npublic class C { private A next; }\n");

    let result = analyze(root);
    let cycles = issues_with(&result, IssueCode::CircularDependency);
    assert!(!cycles.is_empty());
    for issue in &cycles {
        assert_eq!(issue.severity, Severity::Warning);
        let chain = issue.message.trim_start_matches("Circular dependency: ");
        assert!(is_rotation_of(chain, &["A", "B", "C"]), "{}", chain);
    }

    // every member is used by another, so nothing is unused
    assert!(issues_with(&result, IssueCode::UnusedPublicClass).is_empty());
}

#[test]
fn test_cycle_rotations_can_be_deduplicated() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_source(root, "app/A.java", "package app;\npublic class A { private B next; }\n");
    write_source(root, "app/B.java", "package app;\npublic class B { private C next; }\n");
    write_source(root, "app/C.java", "package app;\npublic class C { private A next; }\n");

    let result = analyze_with(root, |s| s.dedupe_cycles = true);
    assert_eq!(issues_with(&result, IssueCode::CircularDependency).len(), 1);
}

#[test]
fn test_cross_package_cycle_through_imports() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_source(
        root,
        "com/acme/order/Order.java",
        "package com.acme.order;\n\nimport com.acme.billing.Invoice;\n\npublic class Order {\n    private Invoice invoice;\n}\n",
    );
    write_source(
        root,
        "com/acme/billing/Invoice.java",
        "package com.acme.billing;\n\nimport com.acme.order.Order;\n\npublic class Invoice {\n    private Order order;\n}\n",
    );

    let result = analyze(root);
    assert!(result
        .dependency_graph
        .has_edge("com.acme.order.Order", "com.acme.billing.Invoice"));
    let cycles = issues_with(&result, IssueCode::CircularDependency);
    assert!(!cycles.is_empty());
    assert!(is_rotation_of(
        cycles[0].message.trim_start_matches("Circular dependency: "),
        &["Invoice", "Order"]
    ));
}

#[test]
fn test_layered_graph_has_no_cycles() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_source(
        root,
        "app/web/Controller.java",
        "package app.web;\n\nimport app.service.Service;\n\npublic class Controller {\n    private Service service;\n}\n",
    );
    write_source(
        root,
        "app/service/Service.java",
        "package app.service;\n\nimport app.data.Repository;\n\npublic class Service {\n    private Repository repository;\n}\n",
    );
    write_source(
        root,
        "app/data/Repository.java",
        "package app.data;\n\nimport app.model.Entity;\n\npublic class Repository {\n    Entity load() { return null; }\n}\n",
    );
    write_source(root, "app/model/Entity.java", "package app.model;\n\npublic class Entity {}\n");

    let result = analyze(root);
    assert!(issues_with(&result, IssueCode::CircularDependency).is_empty());
    assert_eq!(result.graph_statistics.total_edges, 3);
}

#[test]
fn test_self_referencing_type_is_unused() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_source(
        root,
        "app/Node.java",
        "package app;\n\npublic class Node {\n    private Node next;\n    public Node link(Node other) { return other; }\n}\n",
    );

    let result = analyze(root);
    assert!(result.dependency_graph.has_edge("app.Node", "app.Node"));

    let unused = issues_with(&result, IssueCode::UnusedPublicClass);
    assert_eq!(unused.len(), 1);
    assert_eq!(unused[0].severity, Severity::Info);
    assert!(unused[0].message.contains("'Node'"));
    assert!(issues_with(&result, IssueCode::CircularDependency).is_empty());
}

#[test]
fn test_entry_points_interfaces_and_nested_types_are_never_unused() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_source(root, "app/ServerApplication.java", "package app;\npublic class ServerApplication {}\n");
    write_source(root, "app/Main.java", "package app;\npublic class Main {}\n");
    write_source(root, "app/Listener.java", "package app;\npublic interface Listener { void fire(); }\n");
    write_source(
        root,
        "app/Helper.java",
        "package app;\nclass Helper { public static class Inner {} }\n",
    );
    write_source(root, "app/Launcher.java", "package app;\npublic class Launcher {}\n");

    let result = analyze(root);
    let unused = issues_with(&result, IssueCode::UnusedPublicClass);
    assert_eq!(unused.len(), 1);
    assert!(unused[0].message.contains("'Launcher'"));

    let result = analyze_with(root, |s| s.entry_point_suffixes.push("Launcher".to_string()));
    assert!(issues_with(&result, IssueCode::UnusedPublicClass).is_empty());
}

fn write_package(root: &Path, package: &str, count: usize) {
    let dir = package.replace('.', "/");
    for i in 0..count {
        write_source(
            root,
            &format!("{}/Type{}.java", dir, i),
            &format!("package {};\nclass Type{} {{}}\n", package, i),
        );
    }
}

#[test]
fn test_god_package_threshold() {
    let dir = tempdir().unwrap();
    write_package(dir.path(), "app.fifteen", 15);
    let result = analyze(dir.path());
    assert!(issues_with(&result, IssueCode::GodPackage).is_empty());

    let dir = tempdir().unwrap();
    write_package(dir.path(), "app.sixteen", 16);
    let result = analyze(dir.path());
    let god = issues_with(&result, IssueCode::GodPackage);
    assert_eq!(god.len(), 1);
    assert_eq!(god[0].severity, Severity::Warning);
    assert!(god[0].message.contains("app.sixteen"));
    assert_eq!(god[0].location, "app.sixteen");
}

#[test]
fn test_deep_package_threshold() {
    let dir = tempdir().unwrap();
    write_package(dir.path(), "a.b.c.d.e.f", 1);
    let result = analyze(dir.path());
    assert!(issues_with(&result, IssueCode::DeepPackage).is_empty());

    let dir = tempdir().unwrap();
    write_package(dir.path(), "a.b.c.d.e.f.g", 1);
    let result = analyze(dir.path());
    let deep = issues_with(&result, IssueCode::DeepPackage);
    assert_eq!(deep.len(), 1);
    assert_eq!(deep[0].severity, Severity::Info);
    assert!(deep[0].message.contains("a.b.c.d.e.f.g"));
}

#[test]
fn test_detector_output_order() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_package(root, "a.b.c.d.e.f.g", 1);
    write_source(root, "app/A.java", "package app;\npublic class A { B b; }\n");
    write_source(root, "app/B.java", "package app;\npublic class B { A a; }\n");
    write_source(root, "app/Lonely.java", "package app;\npublic class Lonely {}\n");

    let result = analyze(root);
    let codes: Vec<IssueCode> = result.project_issues.iter().map(|i| i.code).collect();
    let first_cycle = codes.iter().position(|c| *c == IssueCode::CircularDependency).unwrap();
    let last_unused = codes.iter().rposition(|c| *c == IssueCode::UnusedPublicClass).unwrap();
    let deep = codes.iter().position(|c| *c == IssueCode::DeepPackage).unwrap();
    assert!(last_unused < first_cycle);
    assert!(first_cycle < deep);
}
