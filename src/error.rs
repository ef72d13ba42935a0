use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to {url} failed")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("http {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("no {table} table found for {team}")]
    MissingTable { team: String, table: &'static str },

    /// An opponent or team name that no lookup table knows about.
    #[error("record {record}: unknown team {code:?}")]
    UnknownTeam { record: usize, code: String },

    #[error("record {record}: unrecognized result {value:?}")]
    BadResult { record: usize, value: String },

    #[error("game {index} ({date} vs {opponent}) has neither an actual nor a predicted result")]
    Unresolved {
        index: usize,
        date: String,
        opponent: String,
    },

    #[error("expected {expected} games, found {found}")]
    Length { expected: usize, found: usize },

    #[error("{path}:{line}: {message}", path = .path.display())]
    Table {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("invalid value for {key}: {value:?}")]
    Config { key: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
