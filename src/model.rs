use serde::{Deserialize, Serialize};

/// One side of a game as reported by the archive API.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Participant {
    #[serde(default)]
    pub username: Option<String>,
}

/// A single game inside a monthly archive. Only the fields we read are kept.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GameRecord {
    #[serde(default)]
    pub pgn: Option<String>,
    #[serde(default)]
    pub white: Option<Participant>,
    #[serde(default)]
    pub black: Option<Participant>,
}

impl GameRecord {
    /// Notation text, if present and non-empty.
    pub fn notation(&self) -> Option<&str> {
        self.pgn.as_deref().filter(|p| !p.is_empty())
    }

    pub fn white_username(&self) -> Option<&str> {
        self.white.as_ref().and_then(|p| p.username.as_deref())
    }

    pub fn black_username(&self) -> Option<&str> {
        self.black.as_ref().and_then(|p| p.username.as_deref())
    }
}

/// Result of a game from the queried player's side.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    Unknown,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub archive_url: String,
    pub archive_month: String, // trailing "YYYY/MM" of the archive url
    pub total_seconds: u64,
    pub game_count: u64,
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
}

impl MonthlySummary {
    pub fn new(archive_url: &str, archive_month: String) -> Self {
        Self {
            archive_url: archive_url.to_string(),
            archive_month,
            ..Self::default()
        }
    }

    /// Count one game carrying notation text.
    pub fn add_game(&mut self, seconds: u64, outcome: Outcome) {
        self.game_count += 1;
        self.total_seconds += seconds;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Unknown => {}
        }
    }

    /// Games with a resolved outcome; never exceeds `game_count`.
    pub fn decided(&self) -> u64 {
        self.wins + self.losses + self.draws
    }

    pub fn record(&self) -> String {
        format!("{}/{}/{}", self.wins, self.losses, self.draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_record_ignores_unknown_fields() {
        let json = r#"{
            "url": "https://www.chess.com/game/live/1",
            "pgn": "[Event \"Live Chess\"]",
            "time_class": "blitz",
            "white": {"rating": 1500, "result": "win", "username": "Alice"},
            "black": {"rating": 1480, "result": "resigned", "username": "bob"}
        }"#;
        let g: GameRecord = serde_json::from_str(json).unwrap();
        assert_eq!(g.notation(), Some("[Event \"Live Chess\"]"));
        assert_eq!(g.white_username(), Some("Alice"));
        assert_eq!(g.black_username(), Some("bob"));
    }

    #[test]
    fn test_empty_pgn_is_no_notation() {
        let g: GameRecord = serde_json::from_str(r#"{"pgn": ""}"#).unwrap();
        assert_eq!(g.notation(), None);
        let g: GameRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(g.notation(), None);
        assert_eq!(g.white_username(), None);
    }

    #[test]
    fn test_add_game_buckets() {
        let mut s = MonthlySummary::new("https://x/2024/01", "2024/01".into());
        s.add_game(60, Outcome::Win);
        s.add_game(30, Outcome::Unknown);
        s.add_game(10, Outcome::Draw);
        assert_eq!(s.game_count, 3);
        assert_eq!(s.total_seconds, 100);
        assert_eq!(s.decided(), 2);
        assert_eq!(s.record(), "1/0/1");
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let s = MonthlySummary::new("https://x/2024/01", "2024/01".into());
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["archiveUrl"], "https://x/2024/01");
        assert_eq!(v["archiveMonth"], "2024/01");
        assert_eq!(v["totalSeconds"], 0);
        assert_eq!(v["gameCount"], 0);
        assert!(v.get("wins").is_some() && v.get("losses").is_some() && v.get("draws").is_some());
    }
}
