use crate::cache::{self, CacheKey, Schedule};
use crate::config::Config;
use crate::csv;
use crate::fangraphs;
use crate::h2h;
use crate::scrape;
use crate::season::SeasonRecord;
use crate::simulate::simulate;
use crate::standings;
use crate::team::{League, Team};
use crate::util::schedule_file;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::blocking::Client;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::PathBuf;
use std::thread;
use tracing::{debug, error, info, info_span, warn};

#[derive(Debug, Default)]
pub struct Report {
    /// Season win totals of every team that made it through.
    pub wins: FxHashMap<String, u32>,
    pub failed: Vec<String>,
}

pub fn run(config: &Config, league: &League, client: &Client) -> Result<Report> {
    let teams = selected_teams(config, league)?;
    let schedules = config.output_dir.join("schedules");
    fs::create_dir_all(&schedules)
        .with_context(|| format!("failed to create {}", schedules.display()))?;

    let mut report = Report::default();
    let mut fetcher = Fetcher {
        config,
        league,
        client,
        live_requests: 0,
    };
    for (index, team) in teams {
        let _span = info_span!("team", team = team.code).entered();
        match run_team(&mut fetcher, index, team) {
            Ok(record) => {
                info!(%record, "season simulated");
                report.wins.insert(team.code.to_owned(), record.wins);
            }
            Err(err) => {
                error!("{:#}", err);
                report.failed.push(team.code.to_owned());
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    let standings = standings::build(league, &report.wins, config.schedule_length as u32);
    let path = config.output_dir.join("FinalStandings.csv");
    standings::write(&path, &standings)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote standings");

    match fangraphs::fetch(client, &config.fangraphs, league) {
        Ok(Some(parsed)) => {
            for err in &parsed.rejected {
                warn!("skipped playoff odds row: {}", err);
            }
            let path = config.output_dir.join("FanGraphs.csv");
            match fangraphs::write(&path, &parsed.teams) {
                Ok(()) => info!(path = %path.display(), "wrote playoff odds"),
                Err(err) => warn!("failed to write {}: {}", path.display(), err),
            }
        }
        Ok(None) => {}
        Err(err) => warn!("playoff odds unavailable: {:#}", anyhow::Error::from(err)),
    }

    info!(
        succeeded = report.wins.len(),
        failed = report.failed.len(),
        "run complete"
    );
    Ok(report)
}

/// Teams to process, in league order, paired with their league index.
fn selected_teams<'l>(config: &Config, league: &'l League) -> Result<Vec<(usize, &'l Team)>> {
    for code in &config.teams {
        if league.get(code).is_none() {
            bail!("unknown team {:?} in MLB_TEAMS", code);
        }
    }
    Ok(league
        .teams()
        .iter()
        .enumerate()
        .filter(|(_, team)| config.teams.is_empty() || config.teams.iter().any(|c| c == team.code))
        .collect())
}

fn run_team(fetcher: &mut Fetcher<'_>, index: usize, team: &Team) -> Result<SeasonRecord> {
    let config = fetcher.config;
    let path = schedule_file(&config.output_dir, team.code);
    let schedule = fetcher.schedule(team)?;
    for row in &schedule.rejected {
        warn!("skipped schedule row: {}", row);
    }
    let skipped = schedule.rejected.len();
    let mut games = schedule.games;

    h2h::score(&mut games);
    // seeding by league position keeps a team's draws independent of which
    // other teams are in the run
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::from_entropy(),
    };
    let draws = simulate(&mut games, &mut rng);
    debug!(draws, "simulated unplayed games");

    let record = SeasonRecord::tally(&games, config.schedule_length);
    csv::write_schedule(&path, &games, record.as_ref().ok().copied())
        .with_context(|| format!("failed to write {}", path.display()))?;
    record.with_context(|| match skipped {
        0 => format!("{} season does not add up", team.code),
        n => format!("{} season does not add up with {} schedule rows skipped", team.code, n),
    })
}

struct Fetcher<'a> {
    config: &'a Config,
    league: &'a League,
    client: &'a Client,
    live_requests: usize,
}

impl Fetcher<'_> {
    /// A team's schedule from the first source that has it: the previous
    /// run's table when resuming, today's cached scrape, or the live page.
    fn schedule(&mut self, team: &Team) -> Result<Schedule> {
        let config = self.config;
        let path = schedule_file(&config.output_dir, team.code);
        if config.resume && path.exists() {
            info!(path = %path.display(), "resuming");
            let games = csv::read_schedule(&path)
                .with_context(|| format!("failed to resume from {}", path.display()))?;
            return Ok(Schedule {
                games,
                rejected: Vec::new(),
            });
        }

        let key = CacheKey::new(team.code, config.season, Utc::now().date_naive());
        let cache_dir = if config.use_cache { self.cache_dir() } else { None };
        if let Some(dir) = &cache_dir {
            match cache::load(dir, &key) {
                Ok(schedule) => {
                    debug!(
                        games = schedule.games.len(),
                        rejected = schedule.rejected.len(),
                        "using cached schedule"
                    );
                    return Ok(schedule);
                }
                Err(err) => debug!("no cached schedule: {:#}", err),
            }
        }

        if self.live_requests > 0 {
            thread::sleep(config.request_delay);
        }
        self.live_requests += 1;
        let parsed = scrape::fetch_schedule(self.client, config, self.league, team.code)
            .with_context(|| format!("failed to scrape the {} schedule", team.code))?;
        let schedule = Schedule {
            games: parsed.games,
            rejected: parsed.rejected.iter().map(ToString::to_string).collect(),
        };
        if let Some(dir) = &cache_dir {
            if let Err(err) = cache::save(dir, &key, &schedule) {
                debug!("failed to cache schedule: {:#}", err);
            }
        }
        Ok(schedule)
    }

    fn cache_dir(&self) -> Option<PathBuf> {
        self.config.cache_dir.clone().or_else(|| match cache::default_dir() {
            Ok(dir) => Some(dir),
            Err(err) => {
                debug!("cache disabled: {:#}", err);
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{run, Fetcher};
    use crate::cache::{self, CacheKey, Schedule};
    use crate::config::Config;
    use crate::csv::{read_schedule, write_schedule};
    use crate::game::{Game, Outcome, Prediction};
    use crate::team::League;
    use crate::util::schedule_file;
    use chrono::Utc;
    use maplit::hashmap;
    use reqwest::blocking::Client;
    use std::fs;
    use std::path::{Path, PathBuf};

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "{}-{}-{}",
            env!("CARGO_PKG_NAME"),
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config(dir: &Path) -> Config {
        let dir = dir.to_str().unwrap().to_owned();
        Config::from_lookup(move |key| {
            hashmap! {
                "MLB_OUTPUT_DIR" => dir.clone(),
                "MLB_SEED" => "162".to_owned(),
                "MLB_SCHEDULE_LENGTH" => "4".to_owned(),
                "MLB_TEAMS" => "NYY,BOS".to_owned(),
                "MLB_RESUME" => "1".to_owned(),
                "MLB_NO_CACHE" => "1".to_owned(),
            }
            .remove(key)
        })
        .unwrap()
    }

    fn seed_files(dir: &Path) {
        let nyy = vec![
            Game::new("2022-04-07", "BOS", Some(Outcome::Win)),
            Game::new("2022-04-08", "BOS", Some(Outcome::Loss)),
            Game::new("2022-09-30", "TB", None),
            Game::new("2022-10-01", "BOS", None),
        ];
        // one game short of a season
        let bos = vec![
            Game::new("2022-04-07", "NYY", Some(Outcome::Loss)),
            Game::new("2022-04-08", "NYY", Some(Outcome::Win)),
            Game::new("2022-10-01", "NYY", None),
        ];
        write_schedule(&schedule_file(dir, "NYY"), &nyy, None).unwrap();
        write_schedule(&schedule_file(dir, "BOS"), &bos, None).unwrap();
    }

    #[test]
    fn test_failures_stay_with_their_team() {
        let dir = scratch("isolation");
        seed_files(&dir);
        let report = run(&config(&dir), &League::mlb(), &Client::new()).unwrap();

        assert_eq!(report.failed, vec!["BOS"]);
        assert_eq!(report.wins.len(), 1);
        assert!(report.wins["NYY"] >= 1 && report.wins["NYY"] <= 3);

        let nyy = fs::read_to_string(schedule_file(&dir, "NYY")).unwrap();
        assert!(nyy.contains("\nWins,Losses,Win %\n"));
        // the short schedule is still simulated and written, without a summary
        let bos = read_schedule(&schedule_file(&dir, "BOS")).unwrap();
        assert!(matches!(bos[2].predicted, Prediction::Predicted(_)));
        assert!(!fs::read_to_string(schedule_file(&dir, "BOS"))
            .unwrap()
            .contains("Wins,Losses"));

        let standings = fs::read_to_string(dir.join("FinalStandings.csv")).unwrap();
        assert!(standings.contains(&format!("NYY,{},", report.wins["NYY"])));
        assert!(!standings.contains("\nBOS,"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_resume_does_not_reroll() {
        let dir = scratch("resume");
        seed_files(&dir);
        let config = config(&dir);
        let league = League::mlb();
        let client = Client::new();

        run(&config, &league, &client).unwrap();
        let first = read_schedule(&schedule_file(&dir, "NYY")).unwrap();
        let first_text = fs::read_to_string(schedule_file(&dir, "NYY")).unwrap();

        let mut reseeded = config.clone();
        reseeded.seed = Some(7);
        run(&reseeded, &league, &client).unwrap();
        assert_eq!(read_schedule(&schedule_file(&dir, "NYY")).unwrap(), first);
        assert_eq!(
            fs::read_to_string(schedule_file(&dir, "NYY")).unwrap(),
            first_text
        );
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_seeded_runs_match() {
        let a = scratch("seeded-a");
        let b = scratch("seeded-b");
        seed_files(&a);
        seed_files(&b);
        let league = League::mlb();
        let client = Client::new();
        run(&config(&a), &league, &client).unwrap();
        run(&config(&b), &league, &client).unwrap();
        assert_eq!(
            fs::read_to_string(schedule_file(&a, "NYY")).unwrap(),
            fs::read_to_string(schedule_file(&b, "NYY")).unwrap()
        );
        let _ = fs::remove_dir_all(&a);
        let _ = fs::remove_dir_all(&b);
    }

    #[test]
    fn test_cached_schedule_keeps_skipped_rows() {
        let dir = scratch("cache");
        let mut config = config(&dir);
        config.resume = false;
        config.use_cache = true;
        config.cache_dir = Some(dir.join("cache"));
        let league = League::mlb();
        let client = Client::new();

        let scraped = Schedule {
            games: vec![
                Game::new("2022-04-07", "BOS", Some(Outcome::Win)),
                Game::new("2022-04-08", "BOS", Some(Outcome::Loss)),
                Game::new("2022-10-01", "BOS", None),
            ],
            rejected: vec!["record 2: unknown team \"XXX\"".to_owned()],
        };
        let key = CacheKey::new("NYY", config.season, Utc::now().date_naive());
        cache::save(&dir.join("cache"), &key, &scraped).unwrap();

        let mut fetcher = Fetcher {
            config: &config,
            league: &league,
            client: &client,
            live_requests: 0,
        };
        let schedule = fetcher.schedule(league.get("NYY").unwrap()).unwrap();
        assert_eq!(fetcher.live_requests, 0);
        assert_eq!(schedule, scraped);

        // the short season still fails, and only for that team
        config.teams = vec!["NYY".to_owned()];
        let report = run(&config, &league, &client).unwrap();
        assert_eq!(report.failed, vec!["NYY"]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unknown_team_filter() {
        let dir = scratch("filter");
        let mut config = config(&dir);
        config.teams = vec!["MON".to_owned()];
        assert!(run(&config, &League::mlb(), &Client::new()).is_err());
        let _ = fs::remove_dir_all(&dir);
    }
}
