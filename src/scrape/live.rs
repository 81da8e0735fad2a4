// src/scrape/live.rs
//
// PageSource against the real site. All markup knowledge comes in through
// the BetPageSpec tables; this file only knows how to walk blocks.

use std::error::Error;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::thread;
use std::time::Duration;

use crate::config::consts::{NAV_POLL_MS, NAV_POLL_TRIES, REQUEST_PAUSE_MS};
use crate::core::html::{
    attr_value, has_attr, inner_after_open_tag, next_class_block_ci, next_tag_block_ci,
    open_tag, strip_tags, to_lower,
};
use crate::core::net;
use crate::core::sanitize::normalize_entities;
use crate::specs::BetPageSpec;

use super::source::{PageSource, RawEntry};

pub struct LiveSource {
    spec: &'static BetPageSpec,
    page: usize,
    html: String,
}

impl LiveSource {
    /// Fetch page 1. Failing here means the target is unreachable, which
    /// the worker reports as an environment error.
    pub fn open(spec: &'static BetPageSpec) -> Result<Self, Box<dyn Error>> {
        let html = fetch(spec, 1)?;
        Ok(Self { spec, page: 1, html })
    }

    fn next_control_tag(&self) -> Option<&str> {
        let lc = to_lower(&self.html);
        let at = lc.find(&to_lower(self.spec.next_marker))?;
        let start = self.html[..at].rfind('<')?;
        let end = self.html[at..].find('>')? + at + 1;
        Some(&self.html[start..end])
    }
}

fn fetch(spec: &BetPageSpec, page: usize) -> Result<String, Box<dyn Error>> {
    net::http_get(&spec.path_tmpl.replace("{page}", &page.to_string()))
}

/// Hash of the rendered entry region. Two fetches of the "same" page match;
/// a real advance changes it.
fn fingerprint(html: &str, spec: &BetPageSpec) -> u64 {
    let lc = to_lower(html);
    let region = match lc.find(&to_lower(spec.entry_marker)) {
        Some(at) => &html[at..],
        None => html,
    };
    let mut h = DefaultHasher::new();
    region.hash(&mut h);
    h.finish()
}

/// First `<span>` inside `block` whose class does not contain `skip`.
fn first_span_except(block: &str, skip: &str) -> Option<String> {
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(block, "<span", "</span>", pos) {
        let span = &block[s..e];
        let class = attr_value(open_tag(span), "class").unwrap_or_default();
        if skip.is_empty() || !to_lower(&class).contains(&to_lower(skip)) {
            return Some(strip_tags(normalize_entities(&inner_after_open_tag(span))));
        }
        pos = e;
    }
    None
}

fn first_span(block: &str) -> Option<String> {
    first_span_except(block, "")
}

fn class_block<'a>(block: &'a str, marker: &str) -> Option<&'a str> {
    let (s, e) = next_class_block_ci(block, marker, 0)?;
    Some(&block[s..e])
}

fn parse_entry(block: &str, spec: &BetPageSpec) -> RawEntry {
    let mut entry = RawEntry::default();

    if let Some(badge) = class_block(block, spec.badge_marker) {
        entry.status_text = strip_tags(normalize_entities(&inner_after_open_tag(badge)));
        entry.status_class = attr_value(open_tag(badge), "class").unwrap_or_default();
    }

    // Date label sits in a span next to the badge; skip the badge span.
    if let Some(date_block) = class_block(block, spec.date_marker) {
        entry.date_text = first_span_except(date_block, spec.badge_marker)
            .filter(|t| !t.is_empty());
    }

    if let Some(title) = class_block(block, spec.title_marker) {
        if let Some((a_s, a_e)) = next_tag_block_ci(title, "<a", "</a>", 0) {
            let a = &title[a_s..a_e];
            entry.link = attr_value(open_tag(a), "href").unwrap_or_default();
            entry.event = first_span(a).unwrap_or_default();

            // Secondary line: first marked span outside the event link.
            let mut pos = 0usize;
            while let Some((s, e)) = next_tag_block_ci(title, "<span", "</span>", pos) {
                pos = e;
                if s >= a_s && s < a_e {
                    continue;
                }
                let span = &title[s..e];
                let class = attr_value(open_tag(span), "class").unwrap_or_default();
                let class = to_lower(&class);
                if class.contains(&to_lower(spec.detail_marker))
                    && !class.contains(&to_lower(spec.detail_exclude))
                {
                    entry.detail = strip_tags(normalize_entities(&inner_after_open_tag(span)));
                    break;
                }
            }
        }
    }

    if let Some(pick) = class_block(block, spec.pick_marker) {
        entry.pick = first_span(pick).unwrap_or_default();
    }

    if let Some(stake) = class_block(block, spec.stake_marker) {
        entry.stake = class_block(stake, spec.amount_marker)
            .and_then(first_span)
            .unwrap_or_else(|| strip_tags(normalize_entities(&inner_after_open_tag(stake))));
    }

    if let Some(odds) = class_block(block, spec.odds_marker) {
        entry.odds = first_span(odds).unwrap_or_default();
    }

    entry
}

impl PageSource for LiveSource {
    fn entries(&mut self) -> Result<Vec<RawEntry>, Box<dyn Error>> {
        let mut out = Vec::new();
        let mut pos = 0usize;
        while let Some((s, e)) = next_class_block_ci(&self.html, self.spec.entry_marker, pos) {
            out.push(parse_entry(&self.html[s..e], self.spec));
            pos = e;
        }

        if out.is_empty() && next_class_block_ci(&self.html, self.spec.list_marker, 0).is_none() {
            return Err(format!(
                "bet list container '{}' not found on page {}",
                self.spec.list_marker, self.page
            )
            .into());
        }
        Ok(out)
    }

    fn has_next_page(&self) -> bool {
        let Some(tag) = self.next_control_tag() else {
            return false;
        };
        if self.spec.disabled_attrs.iter().any(|a| has_attr(tag, a)) {
            return false;
        }
        let class = attr_value(tag, "class").unwrap_or_default();
        !to_lower(&class).contains(&to_lower(self.spec.disabled_class))
    }

    fn advance_page(&mut self) -> Result<bool, Box<dyn Error>> {
        if !self.has_next_page() {
            return Ok(false);
        }

        let old = fingerprint(&self.html, self.spec);
        thread::sleep(Duration::from_millis(REQUEST_PAUSE_MS)); // be polite

        // The site renders the next page asynchronously with no completion
        // signal; poll for a content change and give up after the bound.
        for attempt in 0..NAV_POLL_TRIES {
            let html = fetch(self.spec, self.page + 1)?;
            if fingerprint(&html, self.spec) != old {
                self.html = html;
                self.page += 1;
                return Ok(true);
            }
            logd!("Nav: page {} unchanged (attempt {})", self.page + 1, attempt + 1);
            thread::sleep(Duration::from_millis(NAV_POLL_MS));
        }
        Ok(false)
    }
}
