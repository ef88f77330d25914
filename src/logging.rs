// src/logging.rs
// =============================================================================
// Sets up tracing for the whole program.
//
// Logs go to stderr; stdout is reserved for the "Fetch <N> urls" lines.
// When RUST_LOG is set it decides everything. Otherwise we log warnings from
// dependencies and info (or debug with -v) from our own crate.
// =============================================================================

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the logging system
pub fn init_logging(verbose: bool) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let env_filter = build_filter(verbose, rust_log.as_deref())?;

    let fmt_layer = fmt::layer()
        .with_target(verbose)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

// User directives replace the defaults entirely: mixing them would let a
// default directive for the same target overwrite the user's one.
fn build_filter(verbose: bool, rust_log: Option<&str>) -> Result<EnvFilter> {
    match rust_log.map(str::trim).filter(|directives| !directives.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives).with_context(|| {
            format!("invalid {} value '{}'", EnvFilter::DEFAULT_ENV, directives)
        }),
        None => {
            let level = if verbose { "debug" } else { "info" };
            Ok(EnvFilter::try_new(format!("warn,frontier_crawl={level}"))?)
        }
    }
}
