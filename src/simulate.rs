use crate::game::{Game, Outcome, Prediction};
use rand::Rng;
use tracing::{instrument, trace};

/// Draws a result for every unplayed game that has not been predicted yet.
///
/// Played games are marked not-applicable; earlier predictions are kept, so a
/// schedule can be run through here any number of times. Returns the number of
/// draws taken from `rng`.
#[instrument(skip(games, rng), fields(games = games.len()))]
pub fn simulate<R: Rng>(games: &mut [Game], rng: &mut R) -> usize {
    let mut draws = 0;
    for game in games.iter_mut() {
        if game.is_played() {
            game.predicted = Prediction::NotApplicable;
            continue;
        }
        if let Prediction::Predicted(_) = game.predicted {
            continue;
        }

        let p = game.win_probability;
        let r = draw(rng);
        draws += 1;
        trace!(win = r <= p, %p, %r, date = %game.date, opponent = %game.opponent);
        game.predicted = Prediction::Predicted(if r <= p {
            Outcome::Win
        } else {
            Outcome::Loss
        });
    }
    draws
}

/// Uniform in [0, 1) at a resolution of one thousandth.
fn draw<R: Rng>(rng: &mut R) -> f64 {
    f64::from(rng.gen_range(0_u32, 1000)) / 1000.0
}
