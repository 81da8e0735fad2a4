// src/config/consts.rs

// Net config
pub const HOST: &str = "stake.com";
pub const PREFIX: &str = "/pt/";

// Pagination loop
pub const MAX_PAGES: usize = 50;
pub const LOOKBACK_DAYS: u64 = 6;

// Navigation: bounded wait for new content after requesting the next page.
// The site renders asynchronously with no completion signal, so the source
// polls for a content change and gives up after NAV_POLL_TRIES.
pub const NAV_POLL_TRIES: usize = 10;
pub const NAV_POLL_MS: u64 = 250;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite

// Controller: upper bound on waiting for the extractor's reply
pub const REPLY_TIMEOUT_MS: u64 = 10 * 60 * 1000;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const EXPORT_DELIM: char = ';';
