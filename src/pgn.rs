use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{GameRecord, Outcome};

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

// Tags read for every game; other names are compiled on demand.
const HEADER_TAGS: [&str; 5] = ["White", "Black", "Result", "StartTime", "EndTime"];

static HEADER_PATTERNS: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    HEADER_TAGS
        .into_iter()
        .filter_map(|tag| Some((tag, tag_pattern(tag)?)))
        .collect()
});

fn tag_pattern(tag: &str) -> Option<Regex> {
    Regex::new(&format!(r#"(?m)^\[{} "([^"]+)"\]"#, regex::escape(tag))).ok()
}

fn first_capture(re: &Regex, pgn: &str) -> Option<String> {
    re.captures(pgn)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Header fields we pull out of a game's notation text.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ExtractedFields {
    pub white: Option<String>,
    pub black: Option<String>,
    pub start: Option<i64>, // seconds since midnight
    pub end: Option<i64>,
    pub result: Option<String>,
}

/// Value of the first `[Tag "Value"]` line in the notation text.
/// Tag name match is case-sensitive; empty values are treated as absent.
pub fn extract_tag(pgn: &str, tag: &str) -> Option<String> {
    match HEADER_PATTERNS.get(tag) {
        Some(re) => first_capture(re, pgn),
        None => first_capture(&tag_pattern(tag)?, pgn),
    }
}

/// "HH:MM:SS" -> seconds since midnight. Components are not range-checked,
/// but a total that does not fit in an `i64` is treated as malformed.
pub fn parse_clock_time(value: &str) -> Option<i64> {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    let mut nums = [0i64; 3];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        *slot = part.trim().parse::<i64>().ok()?;
    }
    let [h, m, s] = nums;
    h.checked_mul(3600)?
        .checked_add(m.checked_mul(60)?)?
        .checked_add(s)
}

/// Wall-clock duration between two times of day, wrapping past midnight.
/// Missing or malformed endpoints contribute nothing.
pub fn elapsed_seconds(start: Option<i64>, end: Option<i64>) -> u64 {
    match (start, end) {
        // widened so any pair of i64 endpoints subtracts without overflow
        (Some(s), Some(e)) => (i128::from(e) - i128::from(s)).rem_euclid(i128::from(SECONDS_PER_DAY)) as u64,
        _ => 0,
    }
}

/// Pull every header the summarizer needs from one game.
pub fn extract_fields(game: &GameRecord) -> ExtractedFields {
    let Some(pgn) = game.notation() else {
        return ExtractedFields::default();
    };
    // tag wins over the structured participant field
    let white = extract_tag(pgn, "White").or_else(|| game.white_username().map(str::to_string));
    let black = extract_tag(pgn, "Black").or_else(|| game.black_username().map(str::to_string));

    ExtractedFields {
        white,
        black,
        start: extract_tag(pgn, "StartTime").and_then(|v| parse_clock_time(&v)),
        end: extract_tag(pgn, "EndTime").and_then(|v| parse_clock_time(&v)),
        result: extract_tag(pgn, "Result"),
    }
}

impl ExtractedFields {
    pub fn elapsed_seconds(&self) -> u64 {
        elapsed_seconds(self.start, self.end)
    }

    /// Outcome for `player`, compared case-insensitively against both sides.
    pub fn outcome_for(&self, player: &str) -> Outcome {
        if player.is_empty() {
            return Outcome::Unknown;
        }
        let player = player.to_lowercase();
        let is_white = self.white.as_deref().is_some_and(|w| w.to_lowercase() == player);
        let is_black = self.black.as_deref().is_some_and(|b| b.to_lowercase() == player);
        if !is_white && !is_black {
            return Outcome::Unknown;
        }

        match self.result.as_deref() {
            Some("1-0") if is_white => Outcome::Win,
            Some("1-0") => Outcome::Loss,
            Some("0-1") if is_black => Outcome::Win,
            Some("0-1") => Outcome::Loss,
            Some("1/2-1/2") => Outcome::Draw,
            _ => Outcome::Unknown,
        }
    }
}

/// The queried player's result for one game.
pub fn player_outcome(game: &GameRecord, player: &str) -> Outcome {
    if game.notation().is_none() {
        return Outcome::Unknown;
    }
    extract_fields(game).outcome_for(player)
}
