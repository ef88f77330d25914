// src/crawl/mod.rs
// =============================================================================
// This module runs the crawl, one wave at a time.
//
// Features:
// - Level-by-level crawling: every URL of a round is fetched at once
// - Deterministic flattening of the children, whatever order answers arrive in
// - A cap on the size of the next wave
// - A fixed round budget, with early exit on an empty frontier
//
// Submodules:
// - wave: fetch a whole wave concurrently and flatten the children
// - frontier: cap the flattened children
// - runner: the round loop itself
// =============================================================================

mod frontier;
mod runner;
mod wave;

pub use runner::{CrawlSettings, Crawler, SessionScope};
pub use wave::FailurePolicy;
