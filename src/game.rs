use crate::h2h::Tally;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn code(self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
        }
    }

    /// Reads a result cell. Only the leading letter counts, so walk-off
    /// markers like `W-wo` read as a plain win.
    pub fn parse(cell: &str) -> Option<Outcome> {
        match cell.trim().chars().next()? {
            'W' => Some(Outcome::Win),
            'L' => Some(Outcome::Loss),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Prediction {
    /// Unplayed and not simulated yet.
    Pending,
    /// The game has an actual result.
    NotApplicable,
    Predicted(Outcome),
}

impl Prediction {
    pub fn code(self) -> &'static str {
        match self {
            Prediction::Pending => "",
            Prediction::NotApplicable => "-",
            Prediction::Predicted(outcome) => outcome.code(),
        }
    }
}

impl Default for Prediction {
    fn default() -> Prediction {
        Prediction::Pending
    }
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct Game {
    pub date: String,
    pub opponent: String,
    pub actual: Option<Outcome>,
    pub predicted: Prediction,
    /// Head-to-head record against `opponent` from the games before this one.
    pub h2h: Tally,
    pub win_probability: f64,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("date", &self.date)
            .field("opponent", &self.opponent)
            .field("actual", &self.actual)
            .field("predicted", &self.predicted)
            .finish()
    }
}

impl Game {
    pub fn new<D, O>(date: D, opponent: O, actual: Option<Outcome>) -> Game
    where
        D: Into<String>,
        O: Into<String>,
    {
        Game {
            date: date.into(),
            opponent: opponent.into(),
            actual,
            predicted: Prediction::Pending,
            h2h: Tally::default(),
            win_probability: Tally::default().win_probability(),
        }
    }

    pub fn is_played(&self) -> bool {
        self.actual.is_some()
    }

    /// The actual result if the game was played, otherwise the simulated one.
    pub fn outcome(&self) -> Option<Outcome> {
        match (self.actual, self.predicted) {
            (Some(outcome), _) | (None, Prediction::Predicted(outcome)) => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, Outcome, Prediction};

    #[test]
    fn test_parse_outcome() {
        assert_eq!(Outcome::parse("W"), Some(Outcome::Win));
        assert_eq!(Outcome::parse("L"), Some(Outcome::Loss));
        assert_eq!(Outcome::parse("W-wo"), Some(Outcome::Win));
        assert_eq!(Outcome::parse(" L-wo "), Some(Outcome::Loss));
        assert_eq!(Outcome::parse(""), None);
        assert_eq!(Outcome::parse("T"), None);
    }

    #[test]
    fn test_outcome_prefers_actual() {
        let mut game = Game::new("2022-04-07", "BOS", Some(Outcome::Loss));
        game.predicted = Prediction::NotApplicable;
        assert_eq!(game.outcome(), Some(Outcome::Loss));

        let mut game = Game::new("2022-09-30", "BOS", None);
        assert_eq!(game.outcome(), None);
        game.predicted = Prediction::Predicted(Outcome::Win);
        assert_eq!(game.outcome(), Some(Outcome::Win));
    }
}
