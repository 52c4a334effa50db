//! Game review crawler CLI
//!
//! Local execution entry point.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use review_crawler::{
    error::Result,
    models::Config,
    pipeline,
    storage::{JsonLinesSink, local::load_stats},
    utils::report,
};

/// review-crawler - Game review listing crawler
#[derive(Parser, Debug)]
#[command(
    name = "review-crawler",
    version,
    about = "Crawls game review listings into JSON Lines records"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "storage/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl every listing page and write records
    Crawl {
        /// Output directory (overrides output.dir)
        #[arg(short, long)]
        output: Option<String>,

        /// Visit at most this many listing pages
        #[arg(long)]
        max_pages: Option<usize>,
    },

    /// Validate configuration and selectors
    Validate,

    /// Show statistics of the last crawl
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Crawl { output, max_pages } => {
            if let Some(dir) = output {
                config.output.dir = dir;
            }
            if max_pages.is_some() {
                config.crawler.max_pages = max_pages;
            }
            config.validate()?;

            let config = Arc::new(config);
            let mut sink = JsonLinesSink::create(&config.output).await?;
            let stats = pipeline::run_crawler(Arc::clone(&config), &mut sink).await?;

            log::info!(
                "Wrote {} records to {}",
                stats.records_written,
                sink.records_path().display()
            );
        }

        Command::Validate => {
            pipeline::run_validate(&config)?;
            log::info!("All validations passed!");
        }

        Command::Info => {
            let stats_path = config.output.stats_path();
            match load_stats(&stats_path).await? {
                Some(stats) => {
                    log::info!("Last crawl started {}", stats.start_time);
                    report::crawl_summary(&stats);
                }
                None => log::info!("No crawl statistics at {}", stats_path.display()),
            }
        }
    }

    Ok(())
}
