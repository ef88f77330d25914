// src/fetch/session.rs
// =============================================================================
// The Session is the shared HTTP transport for a crawl.
//
// It holds one reqwest::Client, which owns a connection pool and carries the
// headers and proxy every request needs. The client is built once and never
// changed afterwards; each fetch borrows it.
//
// Rust concepts:
// - Builder pattern: Client::builder() ... .build()
// - Associated types: Connector::Session names what connect() produces
// =============================================================================

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Proxy};
use tracing::debug;

use super::Fetcher;
use crate::error::CrawlError;

/// Everything needed to open a Session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Name of the header that identifies us to the server (e.g. X-User)
    pub identity_header: String,
    /// Value sent in that header with every request
    pub identity: String,
    /// Optional outbound proxy, e.g. http://localhost:3128
    pub proxy: Option<String>,
    /// Whole-request timeout applied by the transport
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            identity_header: "X-User".to_string(),
            identity: "anonymous".to_string(),
            proxy: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// A pooled HTTP client with our headers baked in
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
}

impl Session {
    // Builds the client. Every failure here is a configuration problem:
    // nothing has been sent over the network yet.
    pub fn open(config: &SessionConfig) -> Result<Self, CrawlError> {
        let name = HeaderName::from_bytes(config.identity_header.as_bytes()).map_err(|e| {
            CrawlError::configuration(format!(
                "invalid identity header name '{}': {}",
                config.identity_header, e
            ))
        })?;
        let value = HeaderValue::from_str(&config.identity).map_err(|e| {
            CrawlError::configuration(format!(
                "invalid identity header value '{}': {}",
                config.identity, e
            ))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(name, value);

        let builder = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout);

        // Without an explicit proxy we ignore HTTP_PROXY & co, so a run only
        // goes through a proxy when it was asked to.
        let builder = match &config.proxy {
            Some(address) => {
                let proxy = Proxy::all(address).map_err(|e| {
                    CrawlError::configuration(format!("invalid proxy '{}': {}", address, e))
                })?;
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };

        let client = builder.build().map_err(|e| {
            CrawlError::configuration(format!("could not build the HTTP client: {}", e))
        })?;

        debug!(
            header = %config.identity_header,
            proxy = config.proxy.as_deref().unwrap_or("none"),
            timeout_secs = config.timeout.as_secs(),
            "opened HTTP session"
        );

        Ok(Self { client })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Opens sessions for the crawl loop.
///
/// The loop asks for a session once per run or once per round depending on
/// its scope; see `crawl::SessionScope`.
pub trait Connector {
    type Session: Fetcher;

    fn connect(&self) -> Result<Self::Session, CrawlError>;
}

impl<C: Connector + ?Sized> Connector for &C {
    type Session = C::Session;

    fn connect(&self) -> Result<Self::Session, CrawlError> {
        (**self).connect()
    }
}

impl Connector for SessionConfig {
    type Session = Session;

    fn connect(&self) -> Result<Session, CrawlError> {
        Session::open(self)
    }
}
