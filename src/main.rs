//! APK-Sieve main entry point
//!
//! This is the command-line interface for the APK-Sieve endpoint discoverer.

use anyhow::Context;
use apk_sieve::archive::{analyze_package_async, Discovery};
use apk_sieve::capture::load_har;
use apk_sieve::config::{load_config_with_hash, Config};
use apk_sieve::output::{
    build_request_collection, build_url_collection, generate_markdown_report, print_statistics,
    to_json, write_collection,
};
use apk_sieve::url::CandidateFilter;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// APK-Sieve: static API endpoint discovery for Android packages
///
/// APK-Sieve scans APK/XAPK files (including nested split APKs) for
/// URL-like strings, filters out trackers and static assets, and exports
/// the remaining endpoints as an importable request collection.
#[derive(Parser, Debug)]
#[command(name = "apk-sieve")]
#[command(version = "1.0.0")]
#[command(about = "Static API endpoint discovery for Android packages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to TOML configuration file
    #[arg(long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the sorted, de-duplicated URLs found in a package
    Scan {
        /// Path to the APK/XAPK
        package: PathBuf,

        /// Write a markdown discovery report to this path
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,

        /// Print walk statistics after the URL list
        #[arg(long)]
        stats: bool,
    },

    /// Export a package's URLs as a categorized request collection
    Export {
        /// Path to the APK/XAPK
        package: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Collection name (defaults to the config value, then the package name)
        #[arg(long)]
        name: Option<String>,

        /// Write a markdown discovery report to this path
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },

    /// Export requests captured in a HAR file as a request collection
    Har {
        /// Path to the HAR capture
        har: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Collection name (defaults to the config value, then the HAR file name)
        #[arg(long)]
        name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    match cli.command {
        Command::Scan {
            package,
            report,
            stats,
        } => handle_scan(&config, package, report, stats).await,
        Command::Export {
            package,
            output,
            name,
            report,
        } => handle_export(&config, package, output, name, report).await,
        Command::Har { har, output, name } => handle_har(&config, &har, output, name),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("apk_sieve=info,warn"),
            1 => EnvFilter::new("apk_sieve=debug,info"),
            2 => EnvFilter::new("apk_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so URL lists and JSON on stdout stay pipeable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Runs the discovery walk for a package
async fn discover(config: &Config, package: PathBuf) -> anyhow::Result<Discovery> {
    tracing::info!("Analyzing package: {}", package.display());
    let filter = CandidateFilter::from_config(&config.filter);

    analyze_package_async(package.clone(), filter, config.archive.clone())
        .await
        .with_context(|| format!("analysis of {} failed", package.display()))
}

/// Handles `scan`: prints one URL per line
async fn handle_scan(
    config: &Config,
    package: PathBuf,
    report: Option<PathBuf>,
    stats: bool,
) -> anyhow::Result<()> {
    let discovery = discover(config, package.clone()).await?;

    for url in &discovery.urls {
        println!("{}", url);
    }

    if stats {
        println!();
        print_statistics(&discovery.stats);
    }

    write_report(&package, &discovery, report.as_deref())
}

/// Handles `export`: classifies discovered URLs into a collection
async fn handle_export(
    config: &Config,
    package: PathBuf,
    output: Option<PathBuf>,
    name: Option<String>,
    report: Option<PathBuf>,
) -> anyhow::Result<()> {
    let discovery = discover(config, package.clone()).await?;
    let name = collection_name(name, config, &package);

    let document = build_url_collection(&name, &discovery.urls);
    emit_document(&document, output.as_deref())?;

    write_report(&package, &discovery, report.as_deref())
}

/// Handles `har`: exports captured requests as a flat collection
fn handle_har(
    config: &Config,
    har: &Path,
    output: Option<PathBuf>,
    name: Option<String>,
) -> anyhow::Result<()> {
    let requests =
        load_har(har).with_context(|| format!("failed to import {}", har.display()))?;
    tracing::info!("Loaded {} captured requests", requests.len());

    let name = collection_name(name, config, har);
    let document = build_request_collection(&name, &requests);
    emit_document(&document, output.as_deref())
}

/// Picks the collection name: CLI flag, then config, then the input file stem
fn collection_name(cli_name: Option<String>, config: &Config, input: &Path) -> String {
    cli_name
        .or_else(|| config.export.collection_name.clone())
        .unwrap_or_else(|| {
            input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "apk-sieve".to_string())
        })
}

/// Writes the document to a file, or prints it to stdout
fn emit_document(
    document: &apk_sieve::CollectionDocument,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    match output {
        Some(path) => write_collection(document, path)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", to_json(document)?),
    }
    Ok(())
}

/// Writes the markdown report if one was requested
fn write_report(
    package: &Path,
    discovery: &Discovery,
    report: Option<&Path>,
) -> anyhow::Result<()> {
    if let Some(path) = report {
        let title = package
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| package.display().to_string());
        generate_markdown_report(&title, discovery, path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        tracing::info!("Report written to: {}", path.display());
    }
    Ok(())
}
