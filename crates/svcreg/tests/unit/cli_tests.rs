//! Tests for the `svcreg` command

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use svcreg::cli::{CallArgs, Cli, Command, DiscoveryArgs, ScanArgs, call, scan};
use svcreg::domain::constants::STUB_INVOCATION_RESULT;
use svcreg::infrastructure::AppConfig;
use svcreg::Error;
use tempfile::TempDir;

const LIB_RS: &str = r#"
use svcreg::enable_contracts;

#[enable_contracts]
pub struct App;
"#;

const API_RS: &str = r#"
use svcreg::contract;

#[contract]
pub trait Greeter: Send + Sync {
    fn greet(&self, name: &str) -> String;
}

pub trait Clock {
    fn now(&self) -> u64;
}
"#;

const CLIENT_RS: &str = r#"
use crate::api::{Clock, Greeter};
use std::sync::Arc;

pub struct ClientImpl {
    #[inject]
    greeter: Arc<dyn Greeter>,
    #[inject]
    clock: Arc<dyn Clock>,
    label: String,
}
"#;

fn write_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (path, content) in files {
        let path = dir.path().join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn app_tree() -> TempDir {
    write_tree(&[
        ("lib.rs", LIB_RS),
        ("api.rs", API_RS),
        ("client.rs", CLIENT_RS),
    ])
}

fn scan_args(root: &Path, json: bool) -> ScanArgs {
    ScanArgs {
        discovery: DiscoveryArgs::default(),
        json,
        source_root: Some(root.to_path_buf()),
    }
}

fn call_args(root: &Path, contract: &str, method: &str, args: &[&str]) -> CallArgs {
    CallArgs {
        discovery: DiscoveryArgs::default(),
        source: Some(root.to_path_buf()),
        contract: contract.to_string(),
        method: method.to_string(),
        args: args.iter().map(|a| (*a).to_string()).collect(),
    }
}

fn output(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

#[test]
fn test_parse_scan_command() {
    let cli = Cli::try_parse_from([
        "svcreg",
        "--config",
        "custom.toml",
        "scan",
        "--root",
        "app::api",
        "--root",
        "app::client",
        "--json",
        "app/src",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    let Command::Scan(args) = cli.command else {
        panic!("Expected scan");
    };
    assert_eq!(args.discovery.roots, vec!["app::api", "app::client"]);
    assert!(args.json);
    assert_eq!(args.source_root, Some(PathBuf::from("app/src")));
}

#[test]
fn test_parse_call_command() {
    let cli = Cli::try_parse_from([
        "svcreg",
        "call",
        "--source",
        "src",
        "--crate-name",
        "shop",
        "Greeter",
        "greet",
        "\"Alice\"",
        "42",
    ])
    .unwrap();

    let Command::Call(args) = cli.command else {
        panic!("Expected call");
    };
    assert_eq!(args.source, Some(PathBuf::from("src")));
    assert_eq!(args.discovery.crate_name.as_deref(), Some("shop"));
    assert_eq!(args.contract, "Greeter");
    assert_eq!(args.method, "greet");
    assert_eq!(args.args, vec!["\"Alice\"", "42"]);
}

#[test]
fn test_call_requires_contract_and_method() {
    assert!(Cli::try_parse_from(["svcreg", "call", "Greeter"]).is_err());
}

#[test]
fn test_scan_prints_table() {
    let tree = app_tree();
    let mut out = Vec::new();

    scan(&AppConfig::default(), &scan_args(tree.path(), false), &mut out).unwrap();

    let text = output(out);
    assert!(text.contains("crate::api::Greeter"));
    assert!(text.contains("crate::api::Clock"));
    assert!(text.contains("greeter"));
    assert!(text.contains("contract-marker, injection-point"));
    assert!(text.contains("2 contract(s)"));
}

#[test]
fn test_scan_prints_json_report() {
    let tree = app_tree();
    let mut out = Vec::new();

    scan(&AppConfig::default(), &scan_args(tree.path(), true), &mut out).unwrap();

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(report["generated_at"].is_string());
    assert_eq!(report["summary"]["contracts_registered"], 2);
    assert_eq!(report["summary"]["injection_points"], 2);

    let records = report["records"].as_array().unwrap();
    let greeter = records
        .iter()
        .find(|r| r["contract"] == "crate::api::Greeter")
        .unwrap();
    assert_eq!(greeter["name"], "greeter");
    assert_eq!(greeter["scope"], "singleton");
    assert_eq!(greeter["construction"], "lazy_factory");
    assert_eq!(greeter["injection"], "by_type");
    assert_eq!(greeter["methods"], serde_json::json!(["greet"]));
}

#[test]
fn test_scan_respects_explicit_roots() {
    let tree = app_tree();
    let mut args = scan_args(tree.path(), true);
    args.discovery.roots = vec!["crate::api".to_string()];
    let mut out = Vec::new();

    scan(&AppConfig::default(), &args, &mut out).unwrap();

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    // Clock is only reached through ClientImpl, which lies outside the root
    assert_eq!(report["summary"]["contracts_registered"], 1);
    assert_eq!(report["records"][0]["contract"], "crate::api::Greeter");
}

#[test]
fn test_scan_uses_crate_name() {
    let tree = app_tree();
    let mut args = scan_args(tree.path(), false);
    args.discovery.crate_name = Some("shop".to_string());
    let mut out = Vec::new();

    scan(&AppConfig::default(), &args, &mut out).unwrap();

    assert!(output(out).contains("shop::api::Greeter"));
}

#[test]
fn test_scan_fails_on_misplaced_contract_marker() {
    let tree = write_tree(&[
        ("lib.rs", LIB_RS),
        ("bad.rs", "#[contract]\npub struct BadContract;\n"),
    ]);
    let mut out = Vec::new();

    let result = scan(&AppConfig::default(), &scan_args(tree.path(), false), &mut out);

    assert!(matches!(result, Err(Error::InvalidContractShape { .. })));
    assert!(out.is_empty());
}

#[test]
fn test_scan_without_roots_or_entry_point_fails() {
    let tree = write_tree(&[("api.rs", API_RS)]);
    let mut out = Vec::new();

    let result = scan(&AppConfig::default(), &scan_args(tree.path(), false), &mut out);

    assert!(matches!(result, Err(Error::Config { .. })));
}

#[test]
fn test_call_by_simple_name_prints_sentinel() {
    let tree = app_tree();
    let mut out = Vec::new();

    call(
        &AppConfig::default(),
        &call_args(tree.path(), "Greeter", "greet", &["Alice"]),
        &mut out,
    )
    .unwrap();

    assert_eq!(output(out).trim_end(), STUB_INVOCATION_RESULT);
}

#[test]
fn test_call_result_ignores_arguments() {
    let tree = app_tree();
    let mut first = Vec::new();
    let mut second = Vec::new();

    call(
        &AppConfig::default(),
        &call_args(tree.path(), "crate::api::Greeter", "greet", &["\"Alice\""]),
        &mut first,
    )
    .unwrap();
    call(
        &AppConfig::default(),
        &call_args(tree.path(), "crate.api.Greeter", "greet", &["{\"x\": [1, 2]}"]),
        &mut second,
    )
    .unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_call_unknown_contract_fails() {
    let tree = app_tree();
    let mut out = Vec::new();

    let result = call(
        &AppConfig::default(),
        &call_args(tree.path(), "Missing", "greet", &[]),
        &mut out,
    );

    assert!(matches!(result, Err(Error::NotRegistered { .. })));
}

#[test]
fn test_call_unknown_method_fails() {
    let tree = app_tree();
    let mut out = Vec::new();

    let result = call(
        &AppConfig::default(),
        &call_args(tree.path(), "Greeter", "wave", &[]),
        &mut out,
    );

    assert!(matches!(result, Err(Error::UnknownMethod { .. })));
}

#[test]
fn test_call_ambiguous_simple_name_fails() {
    let tree = write_tree(&[
        ("lib.rs", LIB_RS),
        ("a.rs", "#[contract]\npub trait Greeter { fn greet(&self); }\n"),
        ("b.rs", "#[contract]\npub trait Greeter { fn greet(&self); }\n"),
    ]);
    let mut out = Vec::new();

    let result = call(
        &AppConfig::default(),
        &call_args(tree.path(), "Greeter", "greet", &[]),
        &mut out,
    );

    assert!(matches!(result, Err(Error::Config { .. })));
}

#[test]
fn test_config_excludes_skip_files() {
    let tree = write_tree(&[
        ("lib.rs", LIB_RS),
        ("api.rs", API_RS),
        ("legacy/bad.rs", "#[contract]\npub struct BadContract;\n"),
    ]);
    let mut config = AppConfig::default();
    config.discovery.exclude = vec!["legacy/**".to_string()];
    let mut out = Vec::new();

    scan(&config, &scan_args(tree.path(), false), &mut out).unwrap();

    assert!(output(out).contains("crate::api::Greeter"));
}
