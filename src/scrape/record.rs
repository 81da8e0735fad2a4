// src/scrape/record.rs
//
// RawEntry → one fixed-order export row. Field-level failures degrade to
// empty/default values; only a missing date gets a bet skipped, and that
// decision lives in the session loop.

use chrono::NaiveDateTime;

use crate::specs::{BetPageSpec, Outcome};
use super::source::RawEntry;

/// Betting-tracker import header. Row layout below must stay in step.
pub const EXPORT_HEADER: [&str; 19] = [
    "Date", "Type", "Sport", "Label", "Odds", "Stake", "State", "Bookmaker", "Tipster",
    "Category", "Competition", "BetType", "Closing", "Commission", "Live", "Freebet",
    "Cashout", "EachWay", "Comment",
];

const PAGE_DATE_FMT: &str = "%H:%M %d/%m/%Y";
const EXPORT_DATE_FMT: &str = "%Y-%m-%d %H:%M";

/// Page date label, e.g. `"14:30 05/01/2024"`.
pub fn parse_entry_date(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), PAGE_DATE_FMT).ok()
}

/// Canonical export form, e.g. `"2024-01-05 14:30"`. Empty when the page
/// text does not parse.
pub fn format_export_date(text: &str) -> String {
    match parse_entry_date(text) {
        Some(dt) => dt.format(EXPORT_DATE_FMT).to_string(),
        None => s!(),
    }
}

/// Status badge → outcome, tolerating either signal the site has shipped:
/// badge text first, badge class second, Unknown when neither table hits.
pub fn map_state(entry: &RawEntry, spec: &BetPageSpec) -> Outcome {
    let text = entry.status_text.to_lowercase();
    for (key, outcome) in spec.state_by_text {
        if text.contains(key) {
            return *outcome;
        }
    }
    let class = entry.status_class.to_lowercase();
    for (key, outcome) in spec.state_by_class {
        if class.contains(key) {
            return *outcome;
        }
    }
    Outcome::Unknown
}

/// Voided/cancelled bets are dropped entirely rather than exported.
pub fn is_void(entry: &RawEntry, spec: &BetPageSpec) -> bool {
    let text = entry.status_text.to_lowercase();
    if spec.void_states.iter().any(|k| text.contains(k)) {
        return true;
    }
    let class = entry.status_class.to_lowercase();
    spec.state_by_class
        .iter()
        .any(|(key, outcome)| *outcome == Outcome::Void && class.contains(key))
}

/// Currency text → plain decimal string. Strips currency markers, drops
/// grouping separators, and keeps a single `.` decimal point. `"0.00"`
/// when nothing is left.
pub fn normalize_amount(raw: &str, spec: &BetPageSpec) -> String {
    let mut text = raw.trim().to_string();
    for prefix in spec.currency_prefixes {
        text = text.replace(prefix, "");
    }
    let text = text.trim();

    // The rightmost of '.' and ',' is the decimal separator; every other
    // occurrence of either is grouping noise.
    let dec_idx = match (text.rfind('.'), text.rfind(',')) {
        (Some(d), Some(c)) => Some(d.max(c)),
        (Some(d), None) => Some(d),
        (None, Some(c)) => Some(c),
        (None, None) => None,
    };

    let mut out = s!();
    for (i, ch) in text.char_indices() {
        if ch.is_ascii_digit() {
            out.push(ch);
        } else if Some(i) == dec_idx {
            out.push('.');
        }
    }

    if out.is_empty() || out == "." {
        s!("0.00")
    } else {
        out
    }
}

/// `"event - detail - pick"`, the tracker's one-line bet label.
pub fn build_label(entry: &RawEntry) -> String {
    format!("{} - {} - {}", entry.event, entry.detail, entry.pick)
}

pub fn category_for(label: &str, spec: &BetPageSpec) -> &'static str {
    let label = label.to_lowercase();
    if spec.winner_keywords.iter().any(|k| label.contains(k)) {
        spec.category_winner
    } else {
        spec.category_default
    }
}

pub fn competition_for(link: &str, spec: &BetPageSpec) -> &'static str {
    let link = link.to_lowercase();
    for (key, tag) in spec.competitions {
        if link.contains(key) {
            return tag;
        }
    }
    ""
}

/// One export row, in EXPORT_HEADER order. Immutable once built.
pub fn normalize(entry: &RawEntry, spec: &BetPageSpec) -> Vec<String> {
    let label = build_label(entry);
    let date = entry
        .date_text
        .as_deref()
        .map(format_export_date)
        .unwrap_or_default();

    vec![
        date,
        s!(spec.type_tag),
        s!(spec.sport_tag),
        label.clone(),
        normalize_amount(&entry.odds, spec),
        normalize_amount(&entry.stake, spec),
        s!(map_state(entry, spec).code()),
        s!(spec.bookmaker_tag),
        s!(), // Tipster
        s!(category_for(&label, spec)),
        s!(competition_for(&entry.link, spec)),
        s!(), // BetType
        s!(), // Closing
        s!(), // Commission
        s!(), // Live
        s!(), // Freebet
        s!(), // Cashout
        s!(), // EachWay
        s!(), // Comment
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::STAKE_ESPORTS;

    fn entry() -> RawEntry {
        RawEntry {
            status_text: s!("Vitória"),
            status_class: s!("badge"),
            date_text: Some(s!("14:30 05/01/2024")),
            event: s!("Team A vs Team B"),
            detail: s!("Vencedor da partida"),
            pick: s!("Team A"),
            stake: s!("R$ 1.250,50"),
            odds: s!("1,85"),
            link: s!("/pt/esports/league-of-legends/match-1"),
        }
    }

    #[test]
    fn date_round_trip() {
        assert_eq!(format_export_date("14:30 05/01/2024"), "2024-01-05 14:30");
        assert_eq!(format_export_date("garbage"), "");
        assert_eq!(format_export_date(""), "");
    }

    #[test]
    fn amounts_normalize_to_decimal_point() {
        let spec = &STAKE_ESPORTS;
        assert_eq!(normalize_amount("R$ 1.250,50", spec), "1250.50");
        assert_eq!(normalize_amount("2,5", spec), "2.5");
        assert_eq!(normalize_amount("1,234.56", spec), "1234.56");
        assert_eq!(normalize_amount("150", spec), "150");
        assert_eq!(normalize_amount("", spec), "0.00");
        assert_eq!(normalize_amount("R$", spec), "0.00");
    }

    #[test]
    fn state_maps_from_text_or_class() {
        let spec = &STAKE_ESPORTS;
        let mut e = entry();
        assert_eq!(map_state(&e, spec), Outcome::Win);

        e.status_text = s!("Derrota");
        assert_eq!(map_state(&e, spec), Outcome::Loss);

        // Text says nothing; the class carries the signal.
        e.status_text = s!("Liquidada");
        e.status_class = s!("badge badge--lost");
        assert_eq!(map_state(&e, spec), Outcome::Loss);

        e.status_class = s!("badge");
        assert_eq!(map_state(&e, spec), Outcome::Unknown);
    }

    #[test]
    fn void_detected_on_either_signal() {
        let spec = &STAKE_ESPORTS;
        let mut e = entry();
        assert!(!is_void(&e, spec));
        e.status_text = s!("Cancelado");
        assert!(is_void(&e, spec));
        e.status_text = s!("Liquidada");
        e.status_class = s!("badge badge--cancelled");
        assert!(is_void(&e, spec));
    }

    #[test]
    fn category_splits_on_winner_keyword() {
        let spec = &STAKE_ESPORTS;
        assert_eq!(category_for("X - Vencedor da partida - Y", spec), "ML");
        assert_eq!(category_for("X - Total de mapas - Y", spec), "MS");
    }

    #[test]
    fn competition_from_link() {
        let spec = &STAKE_ESPORTS;
        assert_eq!(competition_for("/pt/esports/csgo/m1", spec), "CS");
        assert_eq!(competition_for("/pt/esports/dota-2/m1", spec), "Dota");
        assert_eq!(competition_for("/pt/esports/chess/m1", spec), "");
    }

    #[test]
    fn normalized_row_matches_header_shape() {
        let spec = &STAKE_ESPORTS;
        let row = normalize(&entry(), spec);
        assert_eq!(row.len(), EXPORT_HEADER.len());
        assert_eq!(row[0], "2024-01-05 14:30");
        assert_eq!(row[1], "S");
        assert_eq!(row[2], "eSport");
        assert_eq!(row[3], "Team A vs Team B - Vencedor da partida - Team A");
        assert_eq!(row[4], "1.85");
        assert_eq!(row[5], "1250.50");
        assert_eq!(row[6], "W");
        assert_eq!(row[7], "Stake");
        assert_eq!(row[9], "ML");
        assert_eq!(row[10], "LOL");
    }
}
