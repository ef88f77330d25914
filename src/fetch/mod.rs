// src/fetch/mod.rs
// =============================================================================
// This module talks to the crawl API.
//
// Submodules:
// - session: builds the shared HTTP client (headers, proxy, timeout)
// - client: one GET per URL, decoded into the list of child URLs
//
// The rest of the program never touches reqwest directly. It only sees the
// Fetcher trait below, so the wave executor and the crawl loop can be driven
// by the real HTTP session or by an in-memory API in tests.
// =============================================================================

mod client;
mod session;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;

use crate::error::CrawlError;

pub use session::{Connector, Session, SessionConfig};

/// Anything that can turn one URL into the ordered list of its children.
///
/// Implementations are shared by reference between every in-flight fetch of
/// a wave, so `fetch` takes `&self` and must not need exclusive access.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<String>, CrawlError>;
}

// Lets tests hand the same FakeApi to every session they open
#[cfg(test)]
#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for std::sync::Arc<F> {
    async fn fetch(&self, url: &str) -> Result<Vec<String>, CrawlError> {
        (**self).fetch(url).await
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait here?
//    - A trait is a contract: "give me a URL, I give you its children"
//    - The crawl code is written against the contract, not against HTTP
//    - Tests plug in a fake that answers from a HashMap and can add delays
//
// 2. What is #[async_trait]?
//    - Plain traits can't easily return futures that are Send
//    - The async-trait macro rewrites `async fn` into a boxed future
//    - The cost is one small allocation per call, which is nothing next to
//      a network round trip
//
// 3. Why is the Arc<F> impl test-only?
//    - The real crawl borrows its Session, so it never needs shared ownership
//    - Tests keep an Arc<FakeApi> so they can inspect the calls afterwards
// -----------------------------------------------------------------------------
