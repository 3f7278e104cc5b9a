//! High score leaderboard
//!
//! Tracks the top 10 runs. The text form is one `name:score` per line.

use serde::{Deserialize, Serialize};

/// Board size
pub const MAX_HIGH_SCORES: usize = 10;

/// Name used when the player leaves it blank
const DEFAULT_NAME: &str = "anon";

/// One finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `score` would make the board.
    ///
    /// Zero never does: a run that never left the spawn height climbed
    /// nothing, and keeping it would only push real runs off a short board.
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0
            && (self.entries.len() < MAX_HIGH_SCORES
                || self.entries.last().is_some_and(|lowest| score > lowest.score))
    }

    /// 1-based rank `score` would take, or `None` if it doesn't make the board.
    /// Ties rank below the scores already on the board.
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.qualifies(score)
            .then(|| self.entries.partition_point(|e| e.score >= score) + 1)
    }

    /// Record a finished run; returns the rank it took
    pub fn add_score(&mut self, name: &str, score: u64) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                name: sanitize_name(name),
                score,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Wipe the board
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score on the board
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Parse `name:score` lines. Blank lines are skipped; malformed ones are
    /// skipped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut entries: Vec<HighScoreEntry> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| {
                let parsed = line
                    .rsplit_once(':')
                    .and_then(|(name, score)| Some((name, score.trim().parse::<u64>().ok()?)));
                if parsed.is_none() {
                    log::warn!("Skipping malformed high score line: {line:?}");
                }
                parsed.map(|(name, score)| HighScoreEntry {
                    name: sanitize_name(name),
                    score,
                })
            })
            .collect();

        // Stable sort keeps file order among equal scores
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Render as `name:score` lines
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}:{}\n", e.name, e.score))
            .collect()
    }
}

/// Trim the name and strip characters that would break the line format
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c == ':' || c.is_control() { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        DEFAULT_NAME.to_string()
    } else {
        cleaned
    }
}
