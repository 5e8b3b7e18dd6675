//! Mail-Ripple main entry point
//!
//! This is the command-line interface for the Mail-Ripple email finder.

use anyhow::Context;
use clap::Parser;
use mail_ripple::config::{load_config_or_default, validate, Config};
use mail_ripple::crawler::find_email_addresses;
use mail_ripple::output::write_email_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Mail-Ripple: find the email addresses published on a website
///
/// Mail-Ripple fetches the given domain, follows every link that stays under
/// the first page's URL, and prints each distinct address it finds.
#[derive(Parser, Debug)]
#[command(name = "mail-ripple")]
#[command(version = "1.0.0")]
#[command(about = "Find the email addresses published on a website", long_about = None)]
struct Cli {
    /// Domain or URL to crawl (e.g. example.com)
    #[arg(value_name = "DOMAIN")]
    domain: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum number of pages fetched at once
    #[arg(long, value_name = "N")]
    concurrency: Option<u32>,

    /// Stop the crawl after this many seconds and report what was found
    #[arg(long, value_name = "SECS")]
    deadline: Option<u64>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;
    tracing::debug!("Effective configuration: {:?}", config);

    let report = find_email_addresses(&cli.domain, &config)
        .await
        .context("Failed to start crawl")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_email_report(&mut out, &report.emails).context("Failed to write report")?;

    Ok(())
}

/// Loads the configuration file (if any) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }

    let mut config = load_config_or_default(cli.config.as_deref()).with_context(|| {
        format!(
            "Failed to load configuration from {}",
            cli.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        )
    })?;

    if let Some(concurrency) = cli.concurrency {
        config.crawler.max_concurrent_fetches = concurrency;
    }
    if let Some(deadline) = cli.deadline {
        config.crawler.crawl_deadline_secs = Some(deadline);
    }

    validate(&config).context("Invalid command-line override")?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the email report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("mail_ripple=info,warn"),
            1 => EnvFilter::new("mail_ripple=debug,info"),
            2 => EnvFilter::new("mail_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
