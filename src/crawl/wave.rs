// src/crawl/wave.rs
// =============================================================================
// The wave executor: fetch every URL of a wave at the same time.
//
// How it works:
// 1. Build one future per URL (nothing is sent yet)
// 2. join_all polls them all together, so every request is in flight at once
// 3. Once the last one has settled, walk the results in input order and
//    concatenate the children
//
// Because step 3 follows the input order, the output is the same no matter
// which server answer arrives first.
//
// Rust concepts:
// - Futures are lazy: they only run when polled
// - join_all keeps results in the same order as its input
// =============================================================================

use clap::ValueEnum;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::error::CrawlError;
use crate::fetch::Fetcher;

/// What to do when some fetches of a wave fail
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FailurePolicy {
    /// Any failure fails the whole wave (and the run)
    #[default]
    FailFast,
    /// Log the failure, drop that URL's children, keep going
    Skip,
}

/// Flattened children of a wave, plus how many URLs were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaveOutcome {
    pub children: Vec<String>,
    pub failed: usize,
}

/// Fetches every URL of `wave` concurrently and concatenates their children.
///
/// With `FailFast`, the error of the first failing URL (in wave order) is
/// returned once every fetch has settled.
pub async fn run_wave<F>(
    fetcher: &F,
    wave: &[String],
    policy: FailurePolicy,
) -> Result<WaveOutcome, CrawlError>
where
    F: Fetcher + ?Sized,
{
    if wave.is_empty() {
        return Ok(WaveOutcome::default());
    }

    let results = join_all(wave.iter().map(|url| fetcher.fetch(url))).await;

    let mut outcome = WaveOutcome::default();
    for result in results {
        match result {
            Ok(children) => outcome.children.extend(children),
            Err(err) => match policy {
                FailurePolicy::FailFast => return Err(err),
                FailurePolicy::Skip => {
                    warn!(url = err.url().unwrap_or("?"), error = %err, "skipping failed fetch");
                    outcome.failed += 1;
                }
            },
        }
    }

    debug!(
        wave = wave.len(),
        children = outcome.children.len(),
        failed = outcome.failed,
        "wave settled"
    );
    Ok(outcome)
}
