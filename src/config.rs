use crate::error::{Error, Result};
use crate::util::flag;
use chrono::{Datelike, Utc};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const SCHEDULE_URL: &str = "https://www.baseball-reference.com/teams/{team}/{season}-schedule-scores.shtml";
pub const FANGRAPHS_URL: &str = "https://www.fangraphs.com/standings/playoff-odds";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FanGraphs {
    Off,
    Live,
    /// A page saved from a browser, since the live page renders client-side.
    Saved(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub season: i32,
    pub output_dir: PathBuf,
    pub seed: Option<u64>,
    pub schedule_length: usize,
    /// Canonical codes to process; empty means the whole league.
    pub teams: Vec<String>,
    pub resume: bool,
    pub use_cache: bool,
    /// Overrides the per-user cache directory.
    pub cache_dir: Option<PathBuf>,
    pub request_delay: Duration,
    pub fangraphs: FanGraphs,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());

        let season = match get("MLB_SEASON") {
            Some(v) => parse("MLB_SEASON", &v)?,
            None => Utc::now().year(),
        };
        let seed = get("MLB_SEED")
            .map(|v| parse("MLB_SEED", &v))
            .transpose()?;
        let schedule_length = get("MLB_SCHEDULE_LENGTH")
            .map(|v| parse("MLB_SCHEDULE_LENGTH", &v))
            .transpose()?
            .unwrap_or(162);
        let request_delay = get("MLB_REQUEST_DELAY_MS")
            .map(|v| parse("MLB_REQUEST_DELAY_MS", &v))
            .transpose()?
            .map_or(Duration::from_secs(3), Duration::from_millis);
        let teams = get("MLB_TEAMS")
            .map(|v| {
                v.split(',')
                    .map(|t| t.trim().to_ascii_uppercase())
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();
        let fangraphs = match get("MLB_FANGRAPHS") {
            None => FanGraphs::Off,
            Some(v) if v.trim().eq_ignore_ascii_case("live") => FanGraphs::Live,
            Some(v) => match flag(&v) {
                Some(true) => FanGraphs::Live,
                Some(false) => FanGraphs::Off,
                None => FanGraphs::Saved(PathBuf::from(v.trim())),
            },
        };

        Ok(Config {
            season,
            output_dir: get("MLB_OUTPUT_DIR").map_or_else(|| PathBuf::from("."), PathBuf::from),
            seed,
            schedule_length,
            teams,
            resume: get("MLB_RESUME")
                .map(|v| parse_flag("MLB_RESUME", &v))
                .transpose()?
                .unwrap_or(false),
            use_cache: !get("MLB_NO_CACHE")
                .map(|v| parse_flag("MLB_NO_CACHE", &v))
                .transpose()?
                .unwrap_or(false),
            cache_dir: get("MLB_CACHE_DIR").map(PathBuf::from),
            request_delay,
            fangraphs,
        })
    }

    pub fn schedule_url(&self, reference: &str) -> String {
        SCHEDULE_URL
            .replace("{team}", reference)
            .replace("{season}", &self.season.to_string())
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::Config {
        key,
        value: value.to_owned(),
    })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool> {
    flag(value).ok_or_else(|| Error::Config {
        key,
        value: value.to_owned(),
    })
}
