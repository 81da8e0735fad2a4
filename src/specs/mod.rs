// src/specs/mod.rs
mod bets;

pub use bets::{BetPageSpec, Outcome, STAKE_ESPORTS};
