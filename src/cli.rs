// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every option can also come from an environment variable (the `env = ...`
// attributes), so the crawler can be configured the same way in a shell, a
// container or a CI job. Command-line flags win over the environment.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the parsing code
// - Option<T>: for settings that may be absent (the proxy)
// =============================================================================

use clap::Parser;

use crate::crawl::{FailurePolicy, SessionScope};

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "frontier-crawl",
    version,
    about = "Crawl a tree-shaped JSON API one concurrent wave at a time",
    long_about = "frontier-crawl starts from a seed URL, fetches every URL of the current wave \
                  at once, and turns the children it finds into the next wave. The wave is capped \
                  before each round and the crawl stops after a fixed number of rounds."
)]
pub struct Cli {
    /// URL the crawl starts from
    ///
    /// This is a positional argument
    #[arg(env = "CRAWL_SEED_URL", default_value = "http://localhost:3000/crawl/")]
    pub seed_url: String,

    /// Maximum number of rounds (waves) to run
    #[arg(long, env = "CRAWL_MAX_ROUNDS", default_value_t = 10_000)]
    pub max_rounds: usize,

    /// Maximum number of URLs in one wave
    ///
    /// The children found in a round are cut down to this many before the
    /// next round starts. This is also the peak number of requests in flight.
    #[arg(long, env = "MAX_PARALLEL", default_value_t = 10_000)]
    pub max_wave_size: usize,

    /// Who we are: sent with every request in the identity header
    #[arg(long, env = "USER", default_value = "anonymous")]
    pub user: String,

    /// Name of the identity header
    #[arg(long, env = "CRAWL_IDENTITY_HEADER", default_value = "X-User")]
    pub identity_header: String,

    /// Outbound proxy for every request (e.g. http://localhost:3128)
    #[arg(long, env = "CRAWL_PROXY")]
    pub proxy: Option<String>,

    /// Per-request timeout, in seconds
    #[arg(long, env = "CRAWL_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Share one HTTP session across the whole run, or open one per round
    #[arg(long, value_enum, env = "CRAWL_SESSION_SCOPE", default_value_t = SessionScope::Run)]
    pub session_scope: SessionScope,

    /// Abort on the first failed fetch, or skip failed URLs and keep going
    #[arg(long, value_enum, env = "CRAWL_ON_ERROR", default_value_t = FailurePolicy::FailFast)]
    pub on_error: FailurePolicy,

    /// Show debug logs on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
