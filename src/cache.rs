use crate::game::Game;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

const CACHE_VERSION: u64 = 2;

/// Identifies one scrape: schedules are cached for the day they were fetched.
#[derive(Debug, Hash)]
pub struct CacheKey<'a> {
    version: u64,
    team: &'a str,
    season: i32,
    day: NaiveDate,
}

impl<'a> CacheKey<'a> {
    pub fn new(team: &'a str, season: i32, day: NaiveDate) -> CacheKey<'a> {
        CacheKey {
            version: CACHE_VERSION,
            team,
            season,
            day,
        }
    }

    fn digest(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

/// A schedule as it came out of one scrape.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Schedule {
    pub games: Vec<Game>,
    /// Rows the scrape skipped, rendered as their error messages.
    pub rejected: Vec<String>,
}

pub fn default_dir() -> Result<PathBuf> {
    Ok(dirs::cache_dir()
        .context("unable to find cache dir")?
        .join(env!("CARGO_PKG_NAME")))
}

pub fn load(dir: &Path, key: &CacheKey<'_>) -> Result<Schedule> {
    let mut reader = GzDecoder::new(File::open(cache_path(dir, key))?);
    Ok(bincode::deserialize_from(&mut reader)?)
}

pub fn save(dir: &Path, key: &CacheKey<'_>, schedule: &Schedule) -> Result<()> {
    let mut writer = GzEncoder::new(Vec::new(), Compression::default());
    bincode::serialize_into(&mut writer, schedule)?;
    let data = writer.finish()?;
    fs::create_dir_all(dir)?;
    fs::write(cache_path(dir, key), data)?;
    Ok(())
}

fn cache_path(dir: &Path, key: &CacheKey<'_>) -> PathBuf {
    dir.join(format!("schedule-{}-{:x}.bincode.gz", key.team, key.digest()))
}
