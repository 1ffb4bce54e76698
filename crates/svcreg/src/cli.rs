//! The `svcreg` command
//!
//! | Command | Description |
//! |---------|-------------|
//! | `svcreg scan [SOURCE_ROOT]` | Discover contracts and print their registration records |
//! | `svcreg call <CONTRACT> <METHOD> [ARGS]...` | Discover, resolve one contract and call a method on its proxy |
//!
//! Scan roots come from `--root`, else the configuration file, else the
//! `#[enable_contracts]` entry point found in the source.

use crate::{lifecycle_state, publish_registry};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use svcreg_discovery::{Discovery, DiscoveryReport, DiscoverySummary, FileSystemSource, ScanRoots};
use svcreg_domain::{
    ContractContainer, ContractIdentity, Error, RegistrationRecord, RegistryEntry, Result,
};
use svcreg_infrastructure::{
    AppConfig, ConfigLoader, DiscoveryConfig, ErrorContext, ProxyContainer, ResolutionEmitter,
    StubProxyFactory, init_logging,
};
use tracing::debug;

/// Command line interface for svcreg
#[derive(Parser, Debug)]
#[command(name = "svcreg")]
#[command(about = "Discover contract traits and resolve them to stub proxies")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Discover contracts and print their registration records
    Scan(ScanArgs),
    /// Resolve a contract and call one of its methods
    Call(CallArgs),
}

/// Options shared by every command that runs discovery
#[derive(Args, Debug, Default)]
pub struct DiscoveryArgs {
    /// Root namespace to scan (repeatable)
    #[arg(long = "root", value_name = "NS")]
    pub roots: Vec<String>,

    /// Crate name the source root's modules live under
    #[arg(long)]
    pub crate_name: Option<String>,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Print a JSON report instead of a table
    #[arg(long)]
    pub json: bool,

    /// Directory holding the crate's `.rs` files
    pub source_root: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CallArgs {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,

    /// Directory holding the crate's `.rs` files
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Contract to resolve, qualified or by unique simple name
    pub contract: String,

    /// Method to invoke
    pub method: String,

    /// Arguments, as JSON values or plain strings
    pub args: Vec<String>,
}

/// JSON output of `svcreg scan --json`
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub generated_at: DateTime<Utc>,
    pub roots: ScanRoots,
    pub summary: DiscoverySummary,
    pub records: Vec<RegistrationRecord>,
}

/// Load configuration, set up logging and run the command
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;

    match cli.command {
        Command::Scan(args) => scan(&config, &args, out),
        Command::Call(args) => call(&config, &args, out),
    }
}

/// Run discovery and print the registration records
pub fn scan<W: Write>(config: &AppConfig, args: &ScanArgs, out: &mut W) -> Result<()> {
    let report = discover(&config.discovery, &args.discovery, args.source_root.clone())?;

    let entries = report.registry.entries();
    let factory = StubProxyFactory::from_entries(entries.iter().copied());
    let records = ResolutionEmitter::new(std::sync::Arc::new(factory)).emit(entries.iter().copied());

    if args.json {
        let scan_report = ScanReport {
            generated_at: Utc::now(),
            roots: report.roots.clone(),
            summary: report.summary.clone(),
            records,
        };
        serde_json::to_writer_pretty(&mut *out, &scan_report)?;
        writeln!(out).io_context("Failed to write report")?;
    } else {
        write_table(out, &report, &entries).io_context("Failed to write report")?;
    }
    Ok(())
}

/// Run discovery, publish every contract and call `args.method` on one proxy
pub fn call<W: Write>(config: &AppConfig, args: &CallArgs, out: &mut W) -> Result<()> {
    let report = discover(&config.discovery, &args.discovery, args.source.clone())?;
    let container = ProxyContainer::new();
    publish_registry(&report.registry, &container)?;

    let contract = find_contract(&container, &args.contract)?;
    let values: Vec<serde_json::Value> = args.args.iter().map(|arg| parse_argument(arg)).collect();
    let proxy = container.resolve(&contract)?;
    debug!(
        contract = %contract,
        state = ?lifecycle_state(&report.registry, &container, &contract),
        "Contract resolved"
    );
    let result = proxy.invoke(&args.method, &values)?;

    writeln!(out, "{result}").io_context("Failed to write result")?;
    Ok(())
}

fn discover(
    config: &DiscoveryConfig,
    args: &DiscoveryArgs,
    source_root: Option<PathBuf>,
) -> Result<DiscoveryReport> {
    let source_root = source_root.unwrap_or_else(|| config.source_root.clone());
    let crate_name = args.crate_name.as_deref().unwrap_or(&config.crate_name);
    let source = FileSystemSource::new(source_root, crate_name).with_excludes(&config.exclude)?;

    let roots = if args.roots.is_empty() {
        config.scan_roots()
    } else {
        ScanRoots::new(&args.roots)
    };
    debug!(roots = %roots, "Starting discovery");

    Discovery::new(&source)
        .with_markers(config.markers.clone())
        .run(&roots)
}

/// Exact identity, else the one registered contract with that simple name
fn find_contract(container: &ProxyContainer, requested: &str) -> Result<ContractIdentity> {
    let identity = ContractIdentity::new(requested);
    if container.contains(&identity) {
        return Ok(identity);
    }
    let mut candidates = container
        .contracts()
        .into_iter()
        .filter(|c| c.simple_name() == requested);
    match (candidates.next(), candidates.next()) {
        (Some(found), None) => Ok(found),
        (Some(_), Some(_)) => Err(Error::config(format!(
            "contract name {requested} is ambiguous, use its qualified name"
        ))),
        _ => Err(Error::not_registered(requested)),
    }
}

fn parse_argument(arg: &str) -> serde_json::Value {
    serde_json::from_str(arg).unwrap_or_else(|_| serde_json::Value::String(arg.to_string()))
}

fn write_table<W: Write>(
    out: &mut W,
    report: &DiscoveryReport,
    entries: &[&RegistryEntry],
) -> std::io::Result<()> {
    writeln!(out, "{:<48} {:<24} {:>7}  ORIGINS", "CONTRACT", "NAME", "METHODS")?;
    for entry in entries {
        let origins: Vec<String> = entry.origins.iter().map(ToString::to_string).collect();
        writeln!(
            out,
            "{:<48} {:<24} {:>7}  {}",
            entry.contract,
            entry.contract.registration_name(),
            entry.surface.methods.len(),
            origins.join(", ")
        )?;
    }
    writeln!(
        out,
        "{} contract(s) from {} type(s) under {}, {} artifact(s) skipped",
        report.summary.contracts_registered,
        report.summary.types_scanned,
        report.roots,
        report.summary.artifacts_skipped
    )
}
