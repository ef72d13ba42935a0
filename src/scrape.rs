use crate::config::Config;
use crate::error::{Error, Result};
use crate::game::{Game, Outcome};
use crate::html::{self, Block};
use crate::net;
use crate::team::League;
use reqwest::blocking::Client;
use tracing::{info, instrument};

#[derive(Debug, Default)]
pub struct Parsed {
    pub games: Vec<Game>,
    /// Rows that could not be turned into a game, one error per row.
    pub rejected: Vec<Error>,
}

#[instrument(skip(client, config, league))]
pub fn fetch_schedule(client: &Client, config: &Config, league: &League, team: &str) -> Result<Parsed> {
    let reference = league.reference(team).ok_or_else(|| Error::UnknownTeam {
        record: 0,
        code: team.to_owned(),
    })?;
    let page = net::get_text(client, &config.schedule_url(reference))?;
    let parsed = parse_schedule(&page, league, team)?;
    info!(
        games = parsed.games.len(),
        rejected = parsed.rejected.len(),
        "parsed schedule"
    );
    Ok(parsed)
}

/// Reads the `team_schedule` table of a Baseball-Reference schedule page.
pub fn parse_schedule(page: &str, league: &League, team: &str) -> Result<Parsed> {
    let missing = || Error::MissingTable {
        team: team.to_owned(),
        table: "team_schedule",
    };
    let table = html::find_by_attr(page, "table", "id", "team_schedule").ok_or_else(missing)?;
    let body = html::blocks(table.inner, "tbody")
        .next()
        .ok_or_else(missing)?;

    let mut parsed = Parsed::default();
    // repeated header rows break the table up every few weeks
    let rows = html::blocks(body.inner, "tr").filter(|row| !row.has_class("thead"));
    for (record, row) in rows.enumerate() {
        match parse_row(row, league, record) {
            Ok(Some(game)) => parsed.games.push(game),
            Ok(None) => {}
            Err(err) => parsed.rejected.push(err),
        }
    }
    Ok(parsed)
}

fn parse_row(row: Block<'_>, league: &League, record: usize) -> Result<Option<Game>> {
    let cell = |stat: &str| {
        html::blocks(row.inner, "td")
            .chain(html::blocks(row.inner, "th"))
            .find(|b| b.attr("data-stat") == Some(stat))
    };

    let (date, opponent) = match (cell("date_game"), cell("opp_ID")) {
        (Some(date), Some(opponent)) => (date, opponent),
        // spacer rows carry no game
        _ => return Ok(None),
    };
    let date = date
        .attr("csk")
        .map_or_else(|| date.text(), str::to_owned);

    let code = opponent.text();
    let opponent = league
        .from_reference(&code)
        .ok_or(Error::UnknownTeam { record, code })?;

    let actual = match cell("win_loss_result").map(|b| b.text()) {
        None => None,
        Some(ref result) if result.is_empty() => None,
        Some(result) => Some(Outcome::parse(&result).ok_or(Error::BadResult {
            record,
            value: result,
        })?),
    };

    Ok(Some(Game::new(date, opponent, actual)))
}
