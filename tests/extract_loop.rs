// tests/extract_loop.rs
//
// Drives the pagination/extraction loop with synthetic page sequences.
//
use std::error::Error;

use bet_scrape::config::consts::MAX_PAGES;
use bet_scrape::scrape::{DateWindow, PageSource, Phase, RawEntry, Session};
use bet_scrape::specs::STAKE_ESPORTS;
use chrono::NaiveDate;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn window(start: &str, end: &str) -> DateWindow {
    DateWindow::new(d(start), d(end)).unwrap()
}

/// One synthetic bet. `date` is page-format text, e.g. "14:30 05/01/2024".
fn bet(date: &str, event: &str, status: &str) -> RawEntry {
    RawEntry {
        status_text: status.to_string(),
        status_class: "badge".to_string(),
        date_text: Some(date.to_string()),
        event: event.to_string(),
        detail: "Vencedor da partida".to_string(),
        pick: "Alpha".to_string(),
        stake: "R$ 10,00".to_string(),
        odds: "1,50".to_string(),
        link: "/pt/esports/csgo/m1".to_string(),
    }
}

struct FixtureSource {
    pages: Vec<Vec<RawEntry>>,
    ix: usize,
    advances: usize,
    /// Endless mode: advance always succeeds and re-serves the same page.
    endless: bool,
    fail_entries: bool,
}

impl FixtureSource {
    fn new(pages: Vec<Vec<RawEntry>>) -> Self {
        Self { pages, ix: 0, advances: 0, endless: false, fail_entries: false }
    }
}

impl PageSource for FixtureSource {
    fn entries(&mut self) -> Result<Vec<RawEntry>, Box<dyn Error>> {
        if self.fail_entries {
            return Err("bet list container not found".into());
        }
        Ok(self.pages.get(self.ix).cloned().unwrap_or_default())
    }

    fn has_next_page(&self) -> bool {
        self.endless || self.ix + 1 < self.pages.len()
    }

    fn advance_page(&mut self) -> Result<bool, Box<dyn Error>> {
        if !self.has_next_page() {
            return Ok(false);
        }
        self.advances += 1;
        if !self.endless {
            self.ix += 1;
        }
        Ok(true)
    }
}

#[test]
fn window_filtering_voids_and_order() {
    let pages = vec![
        vec![
            bet("18:00 07/01/2024", "Too new", "Vitória"),
            bet("15:00 06/01/2024", "Kept first", "Vitória"),
            bet("14:00 06/01/2024", "Voided", "Cancelado"),
            bet("12:00 05/01/2024", "Kept second", "Derrota"),
        ],
        vec![
            bet("10:00 05/01/2024", "Kept third", "Vitória"),
            bet("09:00 04/01/2024", "Too old", "Vitória"),
        ],
    ];
    let mut src = FixtureSource::new(pages);
    let mut session = Session::new();
    let w = window("2024-01-05", "2024-01-06");

    let extraction = session
        .run(&mut src, &w, &STAKE_ESPORTS, None)
        .unwrap();

    let labels: Vec<&str> = extraction
        .rows
        .iter()
        .map(|r| r[3].split(" - ").next().unwrap())
        .collect();
    assert_eq!(labels, vec!["Kept first", "Kept second", "Kept third"]);
    assert_eq!(session.phase(), Phase::Done);
}

#[test]
fn duplicate_rows_across_pages_appear_once() {
    let twin = bet("15:00 05/01/2024", "Same bet", "Vitória");
    let pages = vec![
        vec![twin.clone(), bet("14:00 05/01/2024", "Other", "Vitória")],
        vec![twin.clone()],
    ];
    let mut src = FixtureSource::new(pages);
    let mut session = Session::new();
    let w = window("2024-01-05", "2024-01-05");

    let extraction = session.run(&mut src, &w, &STAKE_ESPORTS, None).unwrap();
    assert_eq!(extraction.count(), 2);
}

#[test]
fn stops_when_oldest_entry_passes_lookback_boundary() {
    // Window starts 2024-01-10 → boundary 2024-01-04. The first page
    // already bottoms out at 2024-01-03, so page 2 must never be asked for.
    let pages = vec![
        vec![
            bet("15:00 10/01/2024", "In window", "Vitória"),
            bet("09:00 03/01/2024", "Behind boundary", "Vitória"),
        ],
        vec![bet("08:00 02/01/2024", "Never visited", "Vitória")],
    ];
    let mut src = FixtureSource::new(pages);
    let mut session = Session::new();
    let w = window("2024-01-10", "2024-01-12");

    let extraction = session.run(&mut src, &w, &STAKE_ESPORTS, None).unwrap();
    assert_eq!(extraction.count(), 1);
    assert_eq!(extraction.pages, 1);
    assert_eq!(src.advances, 0);
}

#[test]
fn continues_while_oldest_entry_is_on_boundary() {
    let pages = vec![
        vec![bet("15:00 05/01/2024", "Boundary day", "Vitória")],
        vec![bet("09:00 01/01/2024", "Past it", "Vitória")],
    ];
    let mut src = FixtureSource::new(pages);
    let mut session = Session::new();
    // boundary = 2024-01-05 - 6d = 2023-12-30; page 1's oldest (01-05) is
    // after it, so the loop advances once and stops on page 2.
    let w = window("2024-01-05", "2024-01-06");

    let extraction = session.run(&mut src, &w, &STAKE_ESPORTS, None).unwrap();
    assert_eq!(extraction.pages, 2);
    assert_eq!(src.advances, 1);
    assert_eq!(extraction.count(), 1);
}

#[test]
fn page_cap_bounds_a_loop_that_never_stops() {
    let mut src = FixtureSource::new(vec![vec![bet(
        "15:00 05/01/2024",
        "Evergreen",
        "Vitória",
    )]]);
    src.endless = true;

    let mut session = Session::new();
    let w = window("2024-01-05", "2024-01-05");

    let extraction = session.run(&mut src, &w, &STAKE_ESPORTS, None).unwrap();
    assert_eq!(extraction.pages, MAX_PAGES);
    assert_eq!(src.advances, MAX_PAGES - 1);
    // same row served every time → deduped to one
    assert_eq!(extraction.count(), 1);
}

#[test]
fn empty_page_ends_the_loop_cleanly() {
    let mut src = FixtureSource::new(vec![Vec::new(), vec![bet(
        "15:00 05/01/2024",
        "Unreached",
        "Vitória",
    )]]);
    let mut session = Session::new();
    let w = window("2024-01-05", "2024-01-05");

    let extraction = session.run(&mut src, &w, &STAKE_ESPORTS, None).unwrap();
    assert!(extraction.is_empty());
    assert_eq!(extraction.pages, 1);
    assert_eq!(src.advances, 0);
}

#[test]
fn unparseable_dates_skip_the_entry_not_the_loop() {
    let mut broken = bet("not a date", "Broken", "Vitória");
    broken.date_text = Some("not a date".to_string());
    let pages = vec![vec![
        broken,
        bet("15:00 05/01/2024", "Fine", "Vitória"),
    ]];
    let mut src = FixtureSource::new(pages);
    let mut session = Session::new();
    let w = window("2024-01-05", "2024-01-05");

    let extraction = session.run(&mut src, &w, &STAKE_ESPORTS, None).unwrap();
    assert_eq!(extraction.count(), 1);
}

#[test]
fn missing_page_structure_fails_the_session() {
    let mut src = FixtureSource::new(Vec::new());
    src.fail_entries = true;

    let mut session = Session::new();
    let w = window("2024-01-05", "2024-01-05");

    assert!(session.run(&mut src, &w, &STAKE_ESPORTS, None).is_err());
    assert_eq!(session.phase(), Phase::Failed);
}

#[test]
fn a_session_runs_only_once() {
    let mut src = FixtureSource::new(vec![vec![bet(
        "15:00 05/01/2024",
        "One shot",
        "Vitória",
    )]]);
    let mut session = Session::new();
    let w = window("2024-01-05", "2024-01-05");

    session.run(&mut src, &w, &STAKE_ESPORTS, None).unwrap();
    assert!(session.run(&mut src, &w, &STAKE_ESPORTS, None).is_err());
}
