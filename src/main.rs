#![warn(clippy::pedantic, rust_2018_idioms)]

mod cache;
mod config;
mod csv;
mod error;
mod fangraphs;
mod game;
mod h2h;
mod html;
mod net;
mod pipeline;
mod scrape;
mod season;
mod simulate;
mod standings;
mod team;
mod util;

use crate::config::Config;
use crate::team::League;
use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;
    info!(season = config.season, seed = ?config.seed, "simulating");
    let league = League::mlb();
    let client = net::client()?;
    let report = pipeline::run(&config, &league, &client)?;
    if !report.failed.is_empty() {
        info!(teams = ?report.failed, "some teams have no season record");
    }
    Ok(())
}
