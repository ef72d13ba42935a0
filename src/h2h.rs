use crate::game::{Game, Outcome};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tally {
    pub wins: u32,
    pub losses: u32,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    /// Laplace-smoothed head-to-head win rate, strictly inside (0, 1).
    pub fn win_probability(self) -> f64 {
        (f64::from(self.wins) + 1.0) / (f64::from(self.wins) + f64::from(self.losses) + 2.0)
    }
}

/// Annotates every game with the head-to-head record against its opponent
/// accumulated strictly before it, and the win probability derived from it.
///
/// Only played games move a tally; unplayed and simulated games leave it as is.
#[instrument(skip(games), fields(games = games.len()))]
pub fn score(games: &mut [Game]) {
    let mut tallies: FxHashMap<String, Tally> = FxHashMap::default();
    for game in games.iter_mut() {
        let tally = tallies.entry(game.opponent.clone()).or_default();
        game.h2h = *tally;
        game.win_probability = tally.win_probability();
        trace!(
            date = %game.date,
            opponent = %game.opponent,
            wins = tally.wins,
            losses = tally.losses,
            p = %game.win_probability,
        );
        if let Some(outcome) = game.actual {
            tally.record(outcome);
        }
    }
}
