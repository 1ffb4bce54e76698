//! Tests for artifact sources

use std::fs;
use std::path::Path;
use svcreg_discovery::{FileSystemSource, MemorySource};
use svcreg_domain::{ArtifactRef, ArtifactSource, Error, Namespace};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_namespace_follows_file_layout() {
    let source = FileSystemSource::new("/unused", "my-app");

    assert_eq!(source.crate_root(), Namespace::parse("my_app"));
    assert_eq!(source.namespace_for(Path::new("lib.rs")), Namespace::parse("my_app"));
    assert_eq!(source.namespace_for(Path::new("main.rs")), Namespace::parse("my_app"));
    assert_eq!(
        source.namespace_for(Path::new("service/mod.rs")),
        Namespace::parse("my_app::service")
    );
    assert_eq!(
        source.namespace_for(Path::new("service/greeter.rs")),
        Namespace::parse("my_app::service::greeter")
    );
}

#[test]
fn test_list_returns_sorted_rust_files() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "lib.rs", b"pub mod b;");
    write(temp.path(), "b.rs", b"");
    write(temp.path(), "a/mod.rs", b"");
    write(temp.path(), "notes.txt", b"not rust");

    let source = FileSystemSource::new(temp.path(), "app");
    let listed = source.list().unwrap();
    let namespaces: Vec<String> = listed.iter().map(|a| a.namespace.to_string()).collect();

    assert_eq!(listed.len(), 3);
    assert!(namespaces.contains(&"app::a".to_string()));
    assert!(namespaces.contains(&"app::b".to_string()));
    assert!(namespaces.contains(&"app".to_string()));

    let mut sorted = listed.clone();
    sorted.sort();
    assert_eq!(listed, sorted);
}

#[test]
fn test_excluded_files_are_not_listed() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "lib.rs", b"");
    write(temp.path(), "generated/bindings.rs", b"");

    let source = FileSystemSource::new(temp.path(), "app")
        .with_excludes(["generated/**"])
        .unwrap();
    let listed = source.list().unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].namespace, Namespace::parse("app"));
}

#[test]
fn test_invalid_exclude_pattern_is_config_error() {
    let result = FileSystemSource::new("/unused", "app").with_excludes(["a[b"]);
    assert!(matches!(result, Err(Error::Config { .. })));
}

#[test]
fn test_missing_root_is_config_error() {
    let temp = TempDir::new().unwrap();
    let source = FileSystemSource::new(temp.path().join("absent"), "app");

    assert!(matches!(source.list(), Err(Error::Config { .. })));
}

#[test]
fn test_non_utf8_file_is_unreadable() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "lib.rs", &[0xff, 0xfe, 0x00]);

    let source = FileSystemSource::new(temp.path(), "app");
    let artifact = source.list().unwrap().remove(0);

    match source.read(&artifact) {
        Err(Error::UnreadableArtifact { artifact: location, .. }) => {
            assert!(location.ends_with("lib.rs"));
        }
        other => panic!("Expected UnreadableArtifact, got {other:?}"),
    }
}

#[test]
fn test_memory_source_reads_back_content() {
    let source = MemorySource::new()
        .with_crate_root("shop")
        .with_artifact("a.rs", "shop::a", "pub struct A;")
        .with_unreadable("b.rs", "shop::b");

    assert_eq!(source.crate_root(), Namespace::parse("shop"));
    let listed = source.list().unwrap();
    assert_eq!(listed.len(), 2);

    assert_eq!(source.read(&listed[0]).unwrap(), "pub struct A;");
    assert!(matches!(
        source.read(&listed[1]),
        Err(Error::UnreadableArtifact { .. })
    ));

    let missing = ArtifactRef::new("c.rs", Namespace::parse("shop::c"));
    assert!(source.read(&missing).is_err());
}
