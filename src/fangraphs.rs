use crate::config::{FanGraphs, FANGRAPHS_URL};
use crate::csv::write_row;
use crate::error::{Error, Result};
use crate::html;
use crate::net;
use crate::team::League;
use reqwest::blocking::Client;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, instrument};

pub const HEADER: [&str; 6] = ["Team", "W", "L", "W%", "Strength of Schedule", "Make Playoffs"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamOdds {
    pub team: &'static str,
    pub wins: String,
    pub losses: String,
    pub win_percentage: String,
    pub strength_of_schedule: String,
    pub playoff_odds: String,
}

#[derive(Debug, Default)]
pub struct Parsed {
    pub teams: Vec<TeamOdds>,
    pub rejected: Vec<Error>,
}

/// Loads the playoff-odds page from wherever the configuration points.
/// Returns `None` when the snapshot is switched off.
#[instrument(skip(client, league))]
pub fn fetch(client: &Client, source: &FanGraphs, league: &League) -> Result<Option<Parsed>> {
    let page = match source {
        FanGraphs::Off => return Ok(None),
        FanGraphs::Live => net::get_text(client, FANGRAPHS_URL)?,
        FanGraphs::Saved(path) => fs::read_to_string(path)?,
    };
    let parsed = parse_standings(&page, league)?;
    info!(
        teams = parsed.teams.len(),
        rejected = parsed.rejected.len(),
        "parsed playoff odds"
    );
    Ok(Some(parsed))
}

pub fn parse_standings(page: &str, league: &League) -> Result<Parsed> {
    let mut parsed = Parsed::default();
    let mut record = 0;
    for (start, _) in page.match_indices("class=\"scroll\"") {
        let body = match html::blocks(&page[start..], "tbody").next() {
            Some(body) => body,
            None => continue,
        };
        for row in html::blocks(body.inner, "tr") {
            let cells: Vec<_> = html::blocks(row.inner, "td").collect();
            match parse_row(&cells, league, record) {
                Ok(odds) => parsed.teams.push(odds),
                Err(err) => parsed.rejected.push(err),
            }
            record += 1;
        }
    }
    if parsed.teams.is_empty() && parsed.rejected.is_empty() {
        return Err(Error::MissingTable {
            team: "league".to_owned(),
            table: "playoff odds",
        });
    }
    Ok(parsed)
}

fn parse_row(cells: &[html::Block<'_>], league: &League, record: usize) -> Result<TeamOdds> {
    let name = html::blocks(cells.first().map_or("", |c| c.inner), "span")
        .find(|s| s.has_class("fullName"))
        .map(|s| s.text())
        .unwrap_or_default();
    let team = league.from_nickname(&name).ok_or(Error::UnknownTeam {
        record,
        code: name,
    })?;
    let cell = |i: usize| cells.get(i).map(|c| html::first_line(c.inner)).unwrap_or_default();
    Ok(TeamOdds {
        team,
        wins: cell(1),
        losses: cell(2),
        win_percentage: cell(3),
        strength_of_schedule: cell(8),
        playoff_odds: cell(12),
    })
}

pub fn render<W: Write>(mut w: W, teams: &[TeamOdds]) -> io::Result<()> {
    write_row(&mut w, &HEADER)?;
    for t in teams {
        write_row(
            &mut w,
            &[
                t.team,
                t.wins.as_str(),
                t.losses.as_str(),
                t.win_percentage.as_str(),
                t.strength_of_schedule.as_str(),
                t.playoff_odds.as_str(),
            ],
        )?;
    }
    Ok(())
}

pub fn write(path: &Path, teams: &[TeamOdds]) -> io::Result<()> {
    let mut buf = Vec::new();
    render(&mut buf, teams)?;
    fs::write(path, buf)
}
