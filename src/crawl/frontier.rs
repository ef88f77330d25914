// src/crawl/frontier.rs
// =============================================================================
// Caps the frontier between two rounds.
//
// Every page has several children, so without a cap the next wave would grow
// exponentially. We keep the first `limit` URLs in the order the wave
// executor produced them: no sampling, no priorities.
// =============================================================================

/// Keeps the first `limit` children. Shorter lists come back untouched.
pub fn cap(mut children: Vec<String>, limit: usize) -> Vec<String> {
    children.truncate(limit);
    children
}
