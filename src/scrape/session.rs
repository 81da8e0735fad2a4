// src/scrape/session.rs
//
// The pagination/extraction loop. One Session per invocation: walk the
// history newest-first, keep rows inside the window, stop once the page's
// oldest entry falls behind the lookback boundary, and never visit more
// than MAX_PAGES pages.

use std::collections::HashSet;
use std::error::Error;
use std::path::PathBuf;

use chrono::{Days, NaiveDate};

use crate::config::consts::{LOOKBACK_DAYS, MAX_PAGES};
use crate::config::options::ExportOptions;
use crate::file;
use crate::progress::Progress;
use crate::specs::BetPageSpec;

use super::record;
use super::source::PageSource;

/// Inclusive extraction window plus the early-stop boundary.
///
/// The boundary sits LOOKBACK_DAYS before the window start: pages are
/// ordered newest-first, so once a page's oldest entry predates the
/// boundary no later page can hold anything relevant. The slack covers
/// entries that settle out of strict date order near the window edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn lookback_boundary(&self) -> NaiveDate {
        self.start
            .checked_sub_days(Days::new(LOOKBACK_DAYS))
            .unwrap_or(self.start)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Done,
    Failed,
}

/// Accumulated result of one finished loop. Consumed exactly once: the
/// delivered flag keeps a retried success path from writing twice.
pub struct Extraction {
    pub rows: Vec<Vec<String>>,
    pub pages: usize,
    delivered: bool,
}

impl Extraction {
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the artifact. Returns the path on first delivery, None on any
    /// repeat call.
    pub fn export(
        &mut self,
        export: &ExportOptions,
        window: &DateWindow,
    ) -> Result<Option<PathBuf>, Box<dyn Error>> {
        if self.delivered {
            logd!("Export: suppressed repeat delivery");
            return Ok(None);
        }
        let path = file::write_export(export, window.start, window.end, &self.rows)?;
        self.delivered = true;
        Ok(Some(path))
    }
}

pub struct Session {
    phase: Phase,
    rows: Vec<Vec<String>>,
    seen: HashSet<String>,
    pages: usize,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            rows: Vec::new(),
            seen: HashSet::new(),
            pages: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Drive the loop to completion. A Session runs once; the worker holds
    /// the cross-invocation guard, this check is the local backstop.
    pub fn run(
        &mut self,
        source: &mut dyn PageSource,
        window: &DateWindow,
        spec: &BetPageSpec,
        progress: Option<&mut dyn Progress>,
    ) -> Result<Extraction, Box<dyn Error>> {
        if self.phase != Phase::Idle {
            return Err(format!("session already used ({:?})", self.phase).into());
        }
        self.phase = Phase::Running;

        let result = self.drive(source, window, spec, progress);
        match &result {
            Ok(_) => self.phase = Phase::Done,
            Err(_) => self.phase = Phase::Failed,
        }
        result
    }

    fn drive(
        &mut self,
        source: &mut dyn PageSource,
        window: &DateWindow,
        spec: &BetPageSpec,
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<Extraction, Box<dyn Error>> {
        let boundary = window.lookback_boundary();
        logf!(
            "Extract: window {}..{} boundary {}",
            window.start, window.end, boundary
        );

        if let Some(p) = progress.as_deref_mut() {
            p.begin(MAX_PAGES);
        }

        loop {
            if self.pages >= MAX_PAGES {
                logf!("Extract: page cap reached ({MAX_PAGES})");
                break;
            }

            let entries = source.entries()?;
            self.pages += 1;

            if entries.is_empty() {
                logd!("Extract: page {} empty, stopping", self.pages);
                break;
            }

            let mut matched = 0usize;
            // Oldest parseable date on the page; entries run newest-first.
            let mut oldest = None;

            for entry in &entries {
                let parsed = entry.date_text.as_deref().and_then(record::parse_entry_date);
                let Some(dt) = parsed else {
                    logd!("Extract: unparseable date {:?}, skipping entry", entry.date_text);
                    continue;
                };
                oldest = Some(dt.date());

                if record::is_void(entry, spec) {
                    continue;
                }
                if !window.contains(dt.date()) {
                    continue;
                }

                let row = record::normalize(entry, spec);
                let key = row.join("\u{1f}");
                if self.seen.insert(key) {
                    self.rows.push(row);
                    matched += 1;
                }
            }

            if let Some(p) = progress.as_deref_mut() {
                p.page_done(self.pages, matched, entries.len());
            }

            match oldest {
                Some(date) if date >= boundary => {
                    if !source.advance_page()? {
                        logd!("Extract: no next page after page {}", self.pages);
                        break;
                    }
                }
                _ => {
                    // Oldest entry already behind the boundary (or the page
                    // had no parseable date to judge by).
                    logd!("Extract: boundary passed on page {}", self.pages);
                    break;
                }
            }
        }

        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        logf!("Extract: {} rows across {} pages", self.rows.len(), self.pages);

        Ok(Extraction {
            rows: std::mem::take(&mut self.rows),
            pages: self.pages,
            delivered: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn window_rejects_inverted_range() {
        assert!(DateWindow::new(d("2024-01-07"), d("2024-01-05")).is_none());
        let w = DateWindow::new(d("2024-01-05"), d("2024-01-07")).unwrap();
        assert!(w.contains(d("2024-01-05")));
        assert!(w.contains(d("2024-01-07")));
        assert!(!w.contains(d("2024-01-08")));
    }

    #[test]
    fn lookback_boundary_sits_before_start() {
        let w = DateWindow::new(d("2024-01-10"), d("2024-01-12")).unwrap();
        assert_eq!(w.lookback_boundary(), d("2024-01-04"));
    }
}
