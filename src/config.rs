// src/config.rs
// =============================================================================
// Turns the parsed command line into a validated crawl configuration.
//
// Everything that can be checked before the first request is checked here,
// so a typo fails fast with exit code 2 instead of half-way through a run.
// =============================================================================

use std::time::Duration;

use url::Url;

use crate::cli::Cli;
use crate::crawl::CrawlSettings;
use crate::error::CrawlError;
use crate::fetch::SessionConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    pub seed_url: String,
    pub crawl: CrawlSettings,
    pub session: SessionConfig,
}

impl CrawlConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, CrawlError> {
        let config = Self {
            seed_url: cli.seed_url,
            crawl: CrawlSettings {
                max_rounds: cli.max_rounds,
                max_wave_size: cli.max_wave_size,
                session_scope: cli.session_scope,
                on_error: cli.on_error,
            },
            session: SessionConfig {
                identity_header: cli.identity_header,
                identity: cli.user,
                proxy: cli.proxy,
                timeout: Duration::from_secs(cli.timeout_secs),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CrawlError> {
        let seed = Url::parse(&self.seed_url).map_err(|e| {
            CrawlError::configuration(format!("invalid seed URL '{}': {}", self.seed_url, e))
        })?;
        if !matches!(seed.scheme(), "http" | "https") {
            return Err(CrawlError::configuration(format!(
                "seed URL must be http or https, got '{}'",
                self.seed_url
            )));
        }

        if self.crawl.max_rounds == 0 {
            return Err(CrawlError::configuration("max rounds must be at least 1"));
        }
        if self.crawl.max_wave_size == 0 {
            return Err(CrawlError::configuration("max wave size must be at least 1"));
        }
        if self.session.timeout.is_zero() {
            return Err(CrawlError::configuration("timeout must be at least 1 second"));
        }
        if self.session.identity.trim().is_empty() {
            return Err(CrawlError::configuration("user identity must not be empty"));
        }

        Ok(())
    }
}
