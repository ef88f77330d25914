// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments (and environment overrides) using clap
// 2. Set up logging and validate the configuration
// 3. Run the crawl loop, printing one "Fetch <N> urls" line per round
// 4. Exit with proper code (0 = finished, 1 = a fetch failed, 2 = bad config)
//
// Rust concepts used:
// - async/await: every wave is a batch of concurrent network requests
// - Result<T, E>: for error handling
// - downcast_ref: to get our typed error back out of anyhow::Error
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - validated settings
mod crawl;    // src/crawl/ - waves, frontier cap, round loop
mod error;    // src/error.rs - CrawlError
mod fetch;    // src/fetch/ - HTTP session and client
mod logging;  // src/logging.rs - tracing setup

use anyhow::Result;
use clap::Parser; // Parser trait enables the parse() method
use tracing::info;

use cli::Cli;
use config::CrawlConfig;
use crawl::Crawler;
use error::CrawlError;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns Ok(()) once the crawl loop has terminated normally
async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let config = CrawlConfig::from_cli(cli)?;
    info!(
        seed = %config.seed_url,
        max_rounds = config.crawl.max_rounds,
        max_wave_size = config.crawl.max_wave_size,
        session_scope = ?config.crawl.session_scope,
        on_error = ?config.crawl.on_error,
        "starting crawl"
    );

    // Progress lines go straight to stdout, one per round
    let crawler = Crawler::new(config.session, config.crawl, std::io::stdout());
    crawler.run(config.seed_url).await?;

    Ok(())
}

// Maps an error to the process exit code
//   1 = the crawl started but a fetch failed
//   2 = configuration or setup problem
fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CrawlError>() {
        Some(crawl_err) if crawl_err.is_configuration() => 2,
        Some(_) => 1,
        None => 2,
    }
}
