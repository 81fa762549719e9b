//! kb-harvest main entry point
//!
//! This is the command-line interface for the kb-harvest content extractor.

use anyhow::Context;
use clap::Parser;
use kb_harvest::config::{load_config_with_hash, Config};
use kb_harvest::crawler::{seed_tasks, Coordinator};
use kb_harvest::output::print_report;
use kb_harvest::validate_task_url;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// kb-harvest: knowledge-base and forum content extractor
///
/// kb-harvest crawls knowledge-base tables of contents and solved forum
/// listings breadth-first and writes every article and thread it finds as a
/// markdown document with a JSON metadata sidecar.
#[derive(Parser, Debug)]
#[command(name = "kb-harvest")]
#[command(version)]
#[command(about = "Knowledge-base and forum content extractor", long_about = None)]
struct Cli {
    /// Path to JSON configuration file
    #[arg(value_name = "CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// File that receives a copy of the log
    #[arg(long, value_name = "PATH", default_value = "extractor.log")]
    log_file: PathBuf,

    /// Validate config and show the seed tasks without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet, &cli.log_file)?;
    tracing::info!("Starting data extractor...");

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e).context("could not open config file");
        }
    };
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(ExitCode::SUCCESS);
    }

    handle_crawl(config).await
}

/// Sets up logging to stdout, duplicated into `log_file`
fn setup_logging(verbose: u8, quiet: bool, log_file: &Path) -> anyhow::Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kb_harvest=info,warn"),
            1 => EnvFilter::new("kb_harvest=debug,info"),
            2 => EnvFilter::new("kb_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let file = File::create(log_file)
        .with_context(|| format!("could not open log file {}", log_file.display()))?;

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(())
}

/// Handles the --dry-run mode: shows what the first round would admit
fn handle_dry_run(config: &Config) {
    println!("=== kb-harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.base_url);
    println!("  Storage path: {}", config.html_storage_path);
    println!("  Max tasks per round: {}", config.crawler.max_concurrent);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nSelectors:");
    for (name, selector) in config.selectors.entries() {
        println!("  {}: {}", name, selector);
    }

    let seeds = seed_tasks(config);
    println!("\nSeed Tasks ({}):", seeds.len());
    for task in &seeds {
        match validate_task_url(&task.url, &config.base_url) {
            Ok(url) => println!("  - [{}] {}", task.task_type(), url),
            Err(e) => println!("  - [{}] rejected: {}", task.task_type(), e),
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<ExitCode> {
    tracing::info!(
        "KB entry points: {}, forum entry points: {}",
        config.kb_entry_points.len(),
        config.forum_entry_points.len()
    );

    let coordinator = Coordinator::new(config).context("could not start crawl")?;
    let report = coordinator.run().await;

    print_report(&report);

    if report.is_complete() {
        tracing::info!("Process complete! Exiting...");
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!(
            "Process complete with {} failed task(s)",
            report.tasks_failed
        );
        Ok(ExitCode::from(2))
    }
}
