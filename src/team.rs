use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    /// Canonical abbreviation used everywhere inside the simulator.
    pub code: &'static str,
    /// Abbreviation used by Baseball-Reference URLs and schedule tables.
    pub reference: &'static str,
    /// Nickname as FanGraphs prints it.
    pub nickname: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Division {
    pub name: &'static str,
    pub teams: Vec<&'static str>,
}

#[derive(Debug)]
pub struct League {
    teams: Vec<Team>,
    divisions: Vec<Division>,
    by_code: FxHashMap<&'static str, usize>,
    by_reference: FxHashMap<&'static str, usize>,
    by_nickname: FxHashMap<String, usize>,
}

const MLB_TEAMS: [(&str, &str, &str); 30] = [
    ("LAA", "LAA", "Angels"),
    ("HOU", "HOU", "Astros"),
    ("OAK", "OAK", "Athletics"),
    ("TOR", "TOR", "Blue Jays"),
    ("ATL", "ATL", "Braves"),
    ("MIL", "MIL", "Brewers"),
    ("STL", "STL", "Cardinals"),
    ("CHC", "CHC", "Cubs"),
    ("ARI", "ARI", "Diamondbacks"),
    ("LAD", "LAD", "Dodgers"),
    ("SF", "SFG", "Giants"),
    ("CLE", "CLE", "Guardians"),
    ("SEA", "SEA", "Mariners"),
    ("MIA", "MIA", "Marlins"),
    ("NYM", "NYM", "Mets"),
    ("WSH", "WSN", "Nationals"),
    ("BAL", "BAL", "Orioles"),
    ("SD", "SDP", "Padres"),
    ("PHI", "PHI", "Phillies"),
    ("PIT", "PIT", "Pirates"),
    ("TEX", "TEX", "Rangers"),
    ("TB", "TBR", "Rays"),
    ("BOS", "BOS", "Red Sox"),
    ("CIN", "CIN", "Reds"),
    ("COL", "COL", "Rockies"),
    ("KC", "KCR", "Royals"),
    ("DET", "DET", "Tigers"),
    ("MIN", "MIN", "Twins"),
    ("CHW", "CHW", "White Sox"),
    ("NYY", "NYY", "Yankees"),
];

// Listing order within a division is the tie-break order for the standings.
const MLB_DIVISIONS: [(&str, [&str; 5]); 6] = [
    ("AL East", ["NYY", "BOS", "TB", "TOR", "BAL"]),
    ("AL Central", ["MIN", "CHW", "CLE", "KC", "DET"]),
    ("AL West", ["LAA", "HOU", "TEX", "SEA", "OAK"]),
    ("NL East", ["NYM", "ATL", "WSH", "PHI", "MIA"]),
    ("NL Central", ["STL", "MIL", "CHC", "CIN", "PIT"]),
    ("NL West", ["SD", "LAD", "SF", "ARI", "COL"]),
];

impl League {
    pub fn new(teams: Vec<Team>, divisions: Vec<Division>) -> League {
        let mut by_code = FxHashMap::default();
        let mut by_reference = FxHashMap::default();
        let mut by_nickname = FxHashMap::default();
        for (i, team) in teams.iter().enumerate() {
            by_code.insert(team.code, i);
            by_reference.insert(team.reference, i);
            by_nickname.insert(team.nickname.to_ascii_lowercase(), i);
        }
        League {
            teams,
            divisions,
            by_code,
            by_reference,
            by_nickname,
        }
    }

    pub fn mlb() -> League {
        let teams = MLB_TEAMS
            .iter()
            .map(|&(code, reference, nickname)| Team {
                code,
                reference,
                nickname,
            })
            .collect();
        let divisions = MLB_DIVISIONS
            .iter()
            .map(|&(name, teams)| Division {
                name,
                teams: teams.to_vec(),
            })
            .collect();
        League::new(teams, divisions)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn get(&self, code: &str) -> Option<&Team> {
        self.by_code.get(code).map(|&i| &self.teams[i])
    }

    /// Baseball-Reference abbreviation → canonical code.
    pub fn from_reference(&self, reference: &str) -> Option<&'static str> {
        self.by_reference.get(reference).map(|&i| self.teams[i].code)
    }

    /// Canonical code → Baseball-Reference abbreviation.
    pub fn reference(&self, code: &str) -> Option<&'static str> {
        self.get(code).map(|team| team.reference)
    }

    pub fn from_nickname(&self, nickname: &str) -> Option<&'static str> {
        self.by_nickname
            .get(&nickname.trim().to_ascii_lowercase())
            .map(|&i| self.teams[i].code)
    }
}

#[cfg(test)]
mod tests {
    use super::League;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_reference_codes() {
        let league = League::mlb();
        assert_eq!(league.from_reference("SFG"), Some("SF"));
        assert_eq!(league.from_reference("WSN"), Some("WSH"));
        assert_eq!(league.from_reference("SDP"), Some("SD"));
        assert_eq!(league.from_reference("TBR"), Some("TB"));
        assert_eq!(league.from_reference("KCR"), Some("KC"));
        assert_eq!(league.from_reference("NYY"), Some("NYY"));
        assert_eq!(league.from_reference("SF"), None);
        assert_eq!(league.from_reference("XYZ"), None);
        assert_eq!(league.reference("SD"), Some("SDP"));
        assert_eq!(league.reference("KC"), Some("KCR"));
        assert_eq!(league.reference("NYY"), Some("NYY"));
        assert_eq!(league.reference("SDP"), None);
        for team in league.teams() {
            let reference = league.reference(team.code).unwrap();
            assert_eq!(league.from_reference(reference), Some(team.code));
        }
    }

    #[test]
    fn test_nicknames() {
        let league = League::mlb();
        assert_eq!(league.from_nickname("Red Sox"), Some("BOS"));
        assert_eq!(league.from_nickname("DiamondBacks"), Some("ARI"));
        assert_eq!(league.from_nickname(" white sox "), Some("CHW"));
        assert_eq!(league.from_nickname("Expos"), None);
    }

    #[test]
    fn test_divisions_cover_league() {
        let league = League::mlb();
        assert_eq!(league.teams().len(), 30);
        assert_eq!(league.divisions().len(), 6);

        let mut seen = FxHashSet::default();
        for division in league.divisions() {
            assert_eq!(division.teams.len(), 5, "{}", division.name);
            for code in &division.teams {
                assert!(league.get(code).is_some(), "{} is not a team", code);
                assert!(seen.insert(*code), "{} is in two divisions", code);
            }
        }
        assert_eq!(seen.len(), 30);
    }
}
