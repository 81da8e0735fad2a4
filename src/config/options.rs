// src/config/options.rs
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use super::consts::{DEFAULT_OUT_DIR, EXPORT_DELIM};
use crate::core::sanitize::sanitize_file_name;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            scrape: ScrapeOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

/// The requested extraction window. Both ends inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self { start_date: today, end_date: today }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    out_dir: PathBuf,
    /// File stem override. None → derived from the date range.
    file_stem: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: None,
        }
    }
}

impl ExportOptions {
    /// Parse user text into dir + stem. A trailing separator or an existing
    /// directory means "directory only"; the stem stays derived. A pasted
    /// extension is ignored; the format controls it.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() {
            *self = Self::default();
            return;
        }
        let p = Path::new(s);
        if s.ends_with('/') || s.ends_with('\\') || p.is_dir() {
            self.out_dir = p.to_path_buf();
            self.file_stem = None;
            return;
        }
        self.out_dir = p.parent().map(Path::to_path_buf).unwrap_or_default();
        self.file_stem = p.file_stem().map(|st| st.to_string_lossy().into_owned());
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Full output path for one extraction window. Deterministic: the stem
    /// comes from the window unless the user pinned one.
    pub fn out_path(&self, start: NaiveDate, end: NaiveDate) -> PathBuf {
        let stem = match &self.file_stem {
            Some(st) => st.clone(),
            None => format!("bets_{}_{}", start, end),
        };
        self.out_dir.join(sanitize_file_name(&join!(stem, ".", self.ext())))
    }

    pub fn ext(&self) -> &'static str {
        "csv"
    }

    pub fn delimiter(&self) -> char {
        EXPORT_DELIM
    }
}
