//! Tests for namespace scanning and scan roots

use crate::test_utils::{GREETER_APP, greeter_source};
use svcreg_discovery::{MemorySource, NamespaceScanner, ScanRoots};
use svcreg_domain::{ContractIdentity, Error, Namespace};

fn layered_source() -> MemorySource {
    MemorySource::new()
        .with_artifact("app.rs", "com::example::app", GREETER_APP)
        .with_artifact(
            "app_svc.rs",
            "com::example::app::svc",
            "pub trait Billing { fn charge(&self, cents: u64); }",
        )
        .with_artifact(
            "application.rs",
            "com::example::application",
            "pub trait Outsider { fn call(&self); }",
        )
        .with_artifact("other.rs", "org::other", "pub struct Elsewhere;")
}

fn scanned_names(source: &MemorySource, roots: &ScanRoots) -> Vec<String> {
    NamespaceScanner::new(source)
        .scan(roots)
        .unwrap()
        .map(|d| d.unwrap().identity.to_string())
        .collect()
}

#[test]
fn test_scan_roots_drop_blank_entries() {
    let roots = ScanRoots::new(["com.example.app", "", "   ", "com::example::app"]);

    assert_eq!(roots.iter().count(), 1);
    assert!(roots.covers(&Namespace::parse("com::example::app::svc")));
}

#[test]
fn test_scan_roots_from_blank_list_are_empty() {
    let roots = ScanRoots::new([""]);
    assert!(roots.is_empty());
}

#[test]
fn test_scan_roots_inferred_from_entry_point() {
    let entry = ContractIdentity::new("com::example::app::App");

    let inferred = ScanRoots::explicit_or_inferred(&[""], &entry);
    assert_eq!(inferred, ScanRoots::new(["com::example::app"]));

    let explicit = ScanRoots::explicit_or_inferred(&["org.other"], &entry);
    assert_eq!(explicit, ScanRoots::new(["org::other"]));
}

#[test]
fn test_scan_roots_match_whole_segments() {
    let roots = ScanRoots::new(["com.example.app"]);

    assert!(roots.covers(&Namespace::parse("com::example::app")));
    assert!(roots.covers(&Namespace::parse("com::example::app::svc")));
    assert!(!roots.covers(&Namespace::parse("com::example::application")));
    assert!(!roots.covers(&Namespace::parse("com::example")));
}

#[test]
fn test_scan_roots_display() {
    let roots = ScanRoots::new(["a.b", "c"]);
    assert_eq!(roots.to_string(), "[a::b, c]");
}

#[test]
fn test_scan_yields_types_under_root_only() {
    let names = scanned_names(&layered_source(), &ScanRoots::new(["com.example.app"]));

    assert!(names.contains(&"com::example::app::Greeter".to_string()));
    assert!(names.contains(&"com::example::app::svc::Billing".to_string()));
    assert!(!names.iter().any(|n| n.starts_with("com::example::application")));
    assert!(!names.iter().any(|n| n.starts_with("org::")));
}

#[test]
fn test_scan_root_matching_nothing_is_empty() {
    let names = scanned_names(&layered_source(), &ScanRoots::new(["net::nowhere"]));
    assert!(names.is_empty());
}

#[test]
fn test_scan_all_covers_every_namespace() {
    let source = layered_source();
    let names: Vec<String> = NamespaceScanner::new(&source)
        .scan_all()
        .unwrap()
        .map(|d| d.unwrap().identity.to_string())
        .collect();

    assert!(names.contains(&"org::other::Elsewhere".to_string()));
    assert!(names.contains(&"com::example::application::Outsider".to_string()));
}

#[test]
fn test_scan_order_is_stable() {
    let source = layered_source();
    let roots = ScanRoots::new(["com"]);

    assert_eq!(scanned_names(&source, &roots), scanned_names(&source, &roots));
}

#[test]
fn test_inline_module_below_root_is_found_from_parent_artifact() {
    let source = MemorySource::new().with_artifact(
        "lib.rs",
        "shop",
        "pub mod api { pub trait Catalog { fn list(&self); } } pub struct Outside;",
    );
    let names = scanned_names(&source, &ScanRoots::new(["shop::api"]));

    assert_eq!(names, vec!["shop::api::Catalog".to_string()]);
}

#[test]
fn test_unreadable_artifacts_are_skipped() {
    let source = greeter_source()
        .with_unreadable("corrupt.rs", "com::example::app::corrupt")
        .with_artifact("broken.rs", "com::example::app::broken", "pub trait {");

    let scanner = NamespaceScanner::new(&source);
    let mut scan = scanner.scan(&ScanRoots::new(["com.example.app"])).unwrap();
    let found: Vec<_> = scan.by_ref().collect::<Result<Vec<_>, Error>>().unwrap();

    assert_eq!(scan.skipped(), 2);
    assert!(found.iter().any(|d| d.identity.as_str() == "com::example::app::Greeter"));
}

#[test]
fn test_scan_is_lazy() {
    // The unreadable artifact sorts last; taking the first type never reaches it.
    let source = MemorySource::new()
        .with_artifact("a.rs", "app::a", "pub trait First { fn go(&self); }")
        .with_unreadable("z.rs", "app::z");

    let scanner = NamespaceScanner::new(&source);
    let mut scan = scanner.scan(&ScanRoots::new(["app"])).unwrap();
    let first = scan.next().unwrap().unwrap();

    assert_eq!(first.identity.as_str(), "app::a::First");
    assert_eq!(scan.skipped(), 0);
}
