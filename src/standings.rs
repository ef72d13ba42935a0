use crate::csv::write_row;
use crate::team::League;
use rustc_hash::FxHashMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionStandings {
    pub name: String,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    pub divisions: Vec<DivisionStandings>,
    /// Games in a full league season: every game has two teams.
    pub total_games: u32,
}

impl Standings {
    pub fn total_wins(&self) -> u32 {
        self.divisions
            .iter()
            .flat_map(|d| &d.rows)
            .map(|r| r.wins)
            .sum()
    }
}

/// Orders by wins, most first. Teams level on wins keep their input order.
pub fn rank(rows: &mut [Row]) {
    rows.sort_by(|a, b| b.wins.cmp(&a.wins));
}

pub fn build(league: &League, wins: &FxHashMap<String, u32>, schedule_length: u32) -> Standings {
    let divisions = league
        .divisions()
        .iter()
        .map(|division| {
            let mut rows: Vec<Row> = division
                .teams
                .iter()
                .filter_map(|&team| match wins.get(team) {
                    Some(&won) => Some(Row {
                        team: team.to_owned(),
                        wins: won,
                        losses: schedule_length.saturating_sub(won),
                    }),
                    None => {
                        warn!(team, division = division.name, "no season record, left out of standings");
                        None
                    }
                })
                .collect();
            rank(&mut rows);
            DivisionStandings {
                name: division.name.to_owned(),
                rows,
            }
        })
        .collect();

    #[allow(clippy::cast_possible_truncation)]
    let total_games = league.teams().len() as u32 * schedule_length / 2;
    Standings {
        divisions,
        total_games,
    }
}

pub fn render<W: Write>(mut w: W, standings: &Standings) -> io::Result<()> {
    write_row(&mut w, &["MLB Predicted Standings"])?;
    writeln!(w)?;
    for division in &standings.divisions {
        write_row(&mut w, &[format!("{} Standings", division.name)])?;
        write_row(&mut w, &["Team", "Wins", "Losses"])?;
        for row in &division.rows {
            write_row(
                &mut w,
                &[row.team.clone(), row.wins.to_string(), row.losses.to_string()],
            )?;
        }
    }
    write_row(&mut w, &["Total Wins", "Total Games"])?;
    write_row(
        &mut w,
        &[
            standings.total_wins().to_string(),
            standings.total_games.to_string(),
        ],
    )
}

pub fn write(path: &Path, standings: &Standings) -> io::Result<()> {
    let mut buf = Vec::new();
    render(&mut buf, standings)?;
    fs::write(path, buf)
}

#[cfg(test)]
mod tests {
    use super::{build, rank, render, Row};
    use crate::team::League;
    use maplit::hashmap;
    use rustc_hash::FxHashMap;

    fn row(team: &str, wins: u32) -> Row {
        Row {
            team: team.to_owned(),
            wins,
            losses: 162 - wins,
        }
    }

    fn teams(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.team.as_str()).collect()
    }

    #[test]
    fn test_rank_is_stable() {
        let mut rows = vec![
            row("AAA", 88),
            row("BBB", 75),
            row("CCC", 90),
            row("DDD", 70),
            row("EEE", 88),
        ];
        rank(&mut rows);
        assert_eq!(teams(&rows), vec!["CCC", "AAA", "EEE", "BBB", "DDD"]);
        assert_eq!(
            rows.iter().map(|r| r.wins).collect::<Vec<_>>(),
            vec![90, 88, 88, 75, 70]
        );

        let mut rows = vec![row("EEE", 88), row("AAA", 88), row("CCC", 90)];
        rank(&mut rows);
        assert_eq!(teams(&rows), vec!["CCC", "EEE", "AAA"]);
    }

    fn league_wins() -> FxHashMap<String, u32> {
        League::mlb()
            .teams()
            .iter()
            .map(|t| (t.code.to_owned(), 81))
            .collect()
    }

    #[test]
    fn test_build() {
        let league = League::mlb();
        let mut wins = league_wins();
        wins.extend(hashmap! {
            "TOR".to_owned() => 92,
            "NYY".to_owned() => 99,
            "BAL".to_owned() => 83,
            "BOS".to_owned() => 78,
            "TB".to_owned() => 86,
        });
        let standings = build(&league, &wins, 162);
        assert_eq!(standings.divisions.len(), 6);
        let al_east = &standings.divisions[0];
        assert_eq!(al_east.name, "AL East");
        assert_eq!(teams(&al_east.rows), vec!["NYY", "TOR", "TB", "BAL", "BOS"]);
        assert_eq!(al_east.rows[0].losses, 63);
        // level divisions keep the listing order
        assert_eq!(
            teams(&standings.divisions[5].rows),
            vec!["SD", "LAD", "SF", "ARI", "COL"]
        );
        assert_eq!(standings.total_games, 2430);
    }

    #[test]
    fn test_missing_team_is_left_out() {
        let league = League::mlb();
        let mut wins = league_wins();
        wins.remove("COL");
        let standings = build(&league, &wins, 162);
        assert_eq!(standings.divisions[5].rows.len(), 4);
        assert_eq!(standings.total_wins(), 29 * 81);
        assert_eq!(standings.total_games, 2430);
    }

    #[test]
    fn test_render() {
        let league = League::mlb();
        let standings = build(&league, &league_wins(), 162);
        let mut buf = Vec::new();
        render(&mut buf, &standings).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "MLB Predicted Standings");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "AL East Standings");
        assert_eq!(lines[3], "Team,Wins,Losses");
        assert_eq!(lines[4], "NYY,81,81");
        // title, blank, six divisions of header + columns + five teams, totals
        assert_eq!(lines.len(), 2 + 6 * 7 + 2);
        assert_eq!(&lines[lines.len() - 2..], &["Total Wins,Total Games", "2430,2430"]);
    }
}
