// src/specs/bets.rs
//
// Everything the extractor knows about one site's markup, as data.
// The pagination/extraction algorithm never hardcodes a selector; when the
// site's front end changes, this table changes and the loop does not.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Void,
    Unknown,
}

impl Outcome {
    /// Tracker column code.
    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Void => "V",
            Outcome::Unknown => "Unknown",
        }
    }
}

pub struct BetPageSpec {
    /// Request path, relative to the configured host prefix.
    pub path_tmpl: &'static str, // e.g. "sports/my-bets?page={page}"

    /* ---- class markers ---- */
    pub list_marker: &'static str,    // bet-list container
    pub entry_marker: &'static str,   // one bet block
    pub badge_marker: &'static str,   // status badge inside an entry
    pub date_marker: &'static str,    // date-time wrapper
    pub title_marker: &'static str,   // event title wrapper (holds the link)
    pub detail_marker: &'static str,  // secondary title line
    pub detail_exclude: &'static str, // icon spacer span sharing the marker
    pub pick_marker: &'static str,    // selected outcome name
    pub stake_marker: &'static str,   // total stake wrapper
    pub amount_marker: &'static str,  // numeric cell inside the stake wrapper
    pub odds_marker: &'static str,    // odds wrapper
    pub next_marker: &'static str,    // "next page" control
    pub disabled_attrs: &'static [&'static str],
    pub disabled_class: &'static str,

    /* ---- value tables ---- */
    /// Status keywords whose bets are dropped entirely (voided/cancelled).
    pub void_states: &'static [&'static str],
    /// Badge text keyword → outcome. Checked first.
    pub state_by_text: &'static [(&'static str, Outcome)],
    /// Badge class keyword → outcome. The site has shipped both signals
    /// across versions; tolerate either.
    pub state_by_class: &'static [(&'static str, Outcome)],
    /// Currency markers stripped off stake amounts.
    pub currency_prefixes: &'static [&'static str],
    /// Event-link keyword → competition tag.
    pub competitions: &'static [(&'static str, &'static str)],
    /// Label keyword that selects the match-winner category.
    pub winner_keywords: &'static [&'static str],

    /* ---- fixed row tags ---- */
    pub type_tag: &'static str,
    pub sport_tag: &'static str,
    pub bookmaker_tag: &'static str,
    pub category_winner: &'static str,
    pub category_default: &'static str,
}

/// Stake.com esports bet history (pt-BR front end).
pub const STAKE_ESPORTS: BetPageSpec = BetPageSpec {
    path_tmpl: "sports/my-bets?page={page}",

    list_marker: "bet-list",
    entry_marker: "sport-bet-preview",
    badge_marker: "badge",
    date_marker: "date-time",
    title_marker: "title-wrapper",
    detail_marker: "weight-normal",
    detail_exclude: "with-icon-space",
    pick_marker: "outcome-name",
    stake_marker: "total-stake",
    amount_marker: "numeric",
    odds_marker: "odds",
    next_marker: "pagination-next",
    disabled_attrs: &["disabled", "aria-disabled"],
    disabled_class: "disabled",

    void_states: &["anular", "anulada", "cancelado", "void", "cancelled"],
    state_by_text: &[
        ("vitória", Outcome::Win),
        ("win", Outcome::Win),
        ("derrota", Outcome::Loss),
        ("loss", Outcome::Loss),
        ("lost", Outcome::Loss),
        ("anulada", Outcome::Void),
        ("anular", Outcome::Void),
        ("cancelado", Outcome::Void),
        ("void", Outcome::Void),
    ],
    state_by_class: &[
        ("badge--won", Outcome::Win),
        ("badge--lost", Outcome::Loss),
        ("badge--void", Outcome::Void),
        ("badge--cancelled", Outcome::Void),
    ],
    currency_prefixes: &["R$", "US$", "$"],
    competitions: &[
        ("csgo", "CS"),
        ("counter-strike", "CS"),
        ("dota", "Dota"),
        ("league-of-legends", "LOL"),
        ("lol", "LOL"),
        ("valorant", "Valorant"),
    ],
    winner_keywords: &["vencedor", "winner"],

    type_tag: "S",
    sport_tag: "eSport",
    bookmaker_tag: "Stake",
    category_winner: "ML",
    category_default: "MS",
};
