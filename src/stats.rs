//! Database-wide win/draw statistics, independent of the opening tree.

use serde::Serialize;

use crate::types::{GameRecord, Winner};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WinRates {
    pub white: WinShare,
    pub black: WinShare,
    pub draw: WinShare,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WinShare {
    pub wins: u64,
    pub rate: f64,
}

/// Per-outcome totals and percentages over the whole collection.
///
/// Games with an unresolved result count toward the denominator but toward
/// no bucket. An empty collection yields all zeroes.
pub fn win_rates(games: &[GameRecord]) -> WinRates {
    let mut rates = WinRates::default();

    for game in games {
        match game.winner() {
            Some(Winner::White) => rates.white.wins += 1,
            Some(Winner::Black) => rates.black.wins += 1,
            Some(Winner::Draw) => rates.draw.wins += 1,
            None => {}
        }
    }

    let total = games.len();
    if total > 0 {
        for share in [&mut rates.white, &mut rates.black, &mut rates.draw] {
            share.rate = share.wins as f64 * 100.0 / total as f64;
        }
    }

    rates
}
