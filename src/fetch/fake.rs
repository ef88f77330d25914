// src/fetch/fake.rs
// =============================================================================
// In-memory crawl API used by the crawl tests.
//
// FakeApi answers from a URL -> children map, can delay or fail chosen URLs,
// and records every call plus the peak number of fetches in flight.
// =============================================================================

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{Connector, Fetcher};
use crate::error::CrawlError;

/// Answers from a fixed URL -> children map. Unknown URLs have no children.
#[derive(Default)]
pub struct FakeApi {
    tree: HashMap<String, Vec<String>>,
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(mut self, url: &str, children: &[&str]) -> Self {
        self.tree.insert(
            url.to_string(),
            children.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn with_delay(mut self, url: &str, millis: u64) -> Self {
        self.delays
            .insert(url.to_string(), Duration::from_millis(millis));
        self
    }

    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for FakeApi {
    async fn fetch(&self, url: &str) -> Result<Vec<String>, CrawlError> {
        self.calls.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        // Always suspend at least once, like a real request would
        let delay = self
            .delays
            .get(url)
            .copied()
            .unwrap_or(Duration::from_millis(1));
        tokio::time::sleep(delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(url) {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status: 500,
            });
        }
        Ok(self.tree.get(url).cloned().unwrap_or_default())
    }
}

/// Hands out the same FakeApi on every connect and counts the connects.
pub struct FakeConnector {
    pub api: Arc<FakeApi>,
    opened: AtomicUsize,
}

impl FakeConnector {
    pub fn new(api: FakeApi) -> Self {
        Self {
            api: Arc::new(api),
            opened: AtomicUsize::new(0),
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl Connector for FakeConnector {
    type Session = Arc<FakeApi>;

    fn connect(&self) -> Result<Arc<FakeApi>, CrawlError> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&self.api))
    }
}
