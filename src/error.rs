// src/error.rs
// =============================================================================
// Every way a crawl can go wrong, as one typed enum.
//
// The crawl modules return CrawlError so callers can tell a configuration
// mistake (exit code 2) from a failed fetch (exit code 1). main.rs wraps it
// in anyhow at the very edge of the program.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// Connection refused, DNS failure, proxy failure, timeout, or the body
    /// could not be read
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a 2xx status
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not JSON, or had no `children[].url` list
    #[error("could not decode the answer from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The progress line could not be written
    #[error("could not write progress: {0}")]
    Progress(#[from] std::io::Error),

    /// Bad seed URL, zero limits, unusable header or proxy
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl CrawlError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// The URL whose fetch failed, if this error came from a fetch
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Transport { url, .. } | Self::Status { url, .. } | Self::Decode { url, .. } => {
                Some(url)
            }
            Self::Progress(_) | Self::Configuration(_) => None,
        }
    }
}
