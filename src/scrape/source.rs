// src/scrape/source.rs
use std::error::Error;
use std::sync::Arc;

/// The text fields lifted off one rendered bet block, untouched.
/// Ephemeral: lives for one page visit, then either becomes an export row
/// or is dropped.
#[derive(Clone, Debug, Default)]
pub struct RawEntry {
    pub status_text: String,
    pub status_class: String,
    pub date_text: Option<String>,
    pub event: String,
    pub detail: String,
    pub pick: String,
    pub stake: String,
    pub odds: String,
    pub link: String,
}

/// What the pagination loop needs from a bet-history page, and nothing
/// else. The live page implements this against real markup; tests feed the
/// loop synthetic pages.
pub trait PageSource {
    /// All bet entries currently rendered, in page order (newest first).
    /// Errors only when the page structure is entirely absent.
    fn entries(&mut self) -> Result<Vec<RawEntry>, Box<dyn Error>>;

    /// Whether a usable "next page" control is present.
    fn has_next_page(&self) -> bool;

    /// Trigger the next-page control and wait (bounded) for new content.
    /// `Ok(false)` when the control is absent/disabled or no new content
    /// showed up within the bound.
    fn advance_page(&mut self) -> Result<bool, Box<dyn Error>>;
}

/// One fresh source per extraction invocation.
pub type SourceFactory =
    Arc<dyn Fn() -> Result<Box<dyn PageSource>, Box<dyn Error>> + Send + Sync>;
