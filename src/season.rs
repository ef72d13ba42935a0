use crate::error::{Error, Result};
use crate::game::{Game, Outcome};
use crate::util::round3;
use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeasonRecord {
    pub wins: u32,
    pub losses: u32,
}

impl SeasonRecord {
    /// Totals actual results, falling back to simulated ones for unplayed
    /// games. Every game has to be resolved and the schedule has to be
    /// `expected` games long.
    pub fn tally(games: &[Game], expected: usize) -> Result<SeasonRecord> {
        let mut record = SeasonRecord::default();
        for (index, game) in games.iter().enumerate() {
            match game.outcome() {
                Some(Outcome::Win) => record.wins += 1,
                Some(Outcome::Loss) => record.losses += 1,
                None => {
                    return Err(Error::Unresolved {
                        index,
                        date: game.date.clone(),
                        opponent: game.opponent.clone(),
                    })
                }
            }
        }
        if games.len() != expected {
            return Err(Error::Length {
                expected,
                found: games.len(),
            });
        }
        Ok(record)
    }

    pub fn games(self) -> u32 {
        self.wins + self.losses
    }

    /// Wins over games played, to three decimals.
    pub fn win_percentage(self) -> f64 {
        if self.games() == 0 {
            0.0
        } else {
            round3(f64::from(self.wins) / f64::from(self.games()))
        }
    }
}

impl fmt::Display for SeasonRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} ({:.3})",
            self.wins,
            self.losses,
            self.win_percentage()
        )
    }
}
