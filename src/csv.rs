use crate::error::{Error, Result};
use crate::game::{Game, Outcome, Prediction};
use crate::season::SeasonRecord;
use std::fs;
use std::io::{self, Write};
use std::mem::take;
use std::path::Path;

pub const SCHEDULE_HEADER: [&str; 7] = [
    "Date",
    "Opponent",
    "Actual Result",
    "Predicted Result",
    "H2H Wins",
    "H2H Losses",
    "Win %",
];
pub const SUMMARY_HEADER: [&str; 3] = ["Wins", "Losses", "Win %"];

/// Quote-aware CSV split; tolerates CRLF and a missing final newline.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => row.push(take(&mut field)),
            '\r' | '\n' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(take(&mut field));
                rows.push(take(&mut row));
            }
            _ => field.push(ch),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}

pub fn write_row<W, S>(mut w: W, row: &[S]) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        let cell = cell.as_ref();
        if cell.contains(|c: char| c == ',' || c == '"' || c == '\n' || c == '\r') {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    writeln!(w)
}

pub fn schedule_to_string(games: &[Game], summary: Option<SeasonRecord>) -> String {
    let mut buf = Vec::new();
    // writes into a Vec cannot fail
    let _ = write_schedule_to(&mut buf, games, summary);
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_schedule_to<W: Write>(
    mut w: W,
    games: &[Game],
    summary: Option<SeasonRecord>,
) -> io::Result<()> {
    write_row(&mut w, &SCHEDULE_HEADER)?;
    for game in games {
        write_row(
            &mut w,
            &[
                game.date.clone(),
                game.opponent.clone(),
                game.actual.map_or("", Outcome::code).to_owned(),
                game.predicted.code().to_owned(),
                game.h2h.wins.to_string(),
                game.h2h.losses.to_string(),
                format!("{:.3}", game.win_probability),
            ],
        )?;
    }
    if let Some(record) = summary {
        write_row(&mut w, &SUMMARY_HEADER)?;
        write_row(
            &mut w,
            &[
                record.wins.to_string(),
                record.losses.to_string(),
                format!("{:.3}", record.win_percentage()),
            ],
        )?;
    }
    Ok(())
}

/// Rewrites the per-team table in place; the season summary is appended when
/// the team could be totalled.
pub fn write_schedule(path: &Path, games: &[Game], summary: Option<SeasonRecord>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, schedule_to_string(games, summary))?;
    Ok(())
}

/// Loads a table written by [`write_schedule`]. Only the date, opponent and
/// results are restored; head-to-head columns are derived again by scoring.
pub fn read_schedule(path: &Path) -> Result<Vec<Game>> {
    let text = fs::read_to_string(path)?;
    parse_schedule(&text).map_err(|(line, message)| Error::Table {
        path: path.to_owned(),
        line,
        message,
    })
}

fn parse_schedule(text: &str) -> std::result::Result<Vec<Game>, (usize, String)> {
    let rows = parse_rows(text);
    let mut rows = rows.iter().enumerate().map(|(i, row)| (i + 1, row));

    match rows.next() {
        Some((_, header)) if header.len() >= 4 && header[..4] == SCHEDULE_HEADER[..4] => {}
        Some((line, _)) => return Err((line, "not a schedule table".to_owned())),
        None => return Err((1, "empty file".to_owned())),
    }

    let mut games = Vec::new();
    for (line, row) in rows {
        if row.iter().all(String::is_empty) {
            continue;
        }
        if row[0] == SUMMARY_HEADER[0] {
            break;
        }
        if row.len() < 4 {
            return Err((line, format!("expected at least 4 columns, found {}", row.len())));
        }
        let actual = match row[2].as_str() {
            "" => None,
            cell => Some(
                Outcome::parse(cell).ok_or_else(|| (line, format!("bad actual result {:?}", cell)))?,
            ),
        };
        let predicted = match row[3].as_str() {
            "" => Prediction::Pending,
            "-" => Prediction::NotApplicable,
            cell => Prediction::Predicted(
                Outcome::parse(cell)
                    .ok_or_else(|| (line, format!("bad predicted result {:?}", cell)))?,
            ),
        };
        let mut game = Game::new(row[0].as_str(), row[1].as_str(), actual);
        game.predicted = predicted;
        games.push(game);
    }
    Ok(games)
}
