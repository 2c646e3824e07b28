//! High score leaderboard system
//!
//! Persisted as JSON, tracks the top 10 scores together with the score
//! history of each run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};
use crate::sim::ScorePoint;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's name
    pub name: String,
    /// Final score
    pub score: u64,
    /// Score history copied at submission time
    #[serde(default)]
    pub history: Vec<ScorePoint>,
}

/// High score leaderboard, sorted by score descending
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a leaderboard from unsorted entries (sorts and trims)
    pub fn from_entries(mut entries: Vec<HighScoreEntry>) -> Self {
        // Stable sort keeps earlier entries ahead on equal scores
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_entry(&mut self, name: &str, score: u64, history: Vec<ScorePoint>) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
            history,
        };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn top_entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Score history of the entry at `index`, empty if there is none
    pub fn history(&self, index: usize) -> &[ScorePoint] {
        match self.entries.get(index) {
            Some(entry) => &entry.history,
            None => {
                log::warn!("Requested score history for out-of-range entry {index}");
                &[]
            }
        }
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores, starting fresh on any problem
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No high scores found, starting fresh");
            return Self::new();
        }
        match persistence::read_json::<HighScores>(path) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.entries.len());
                Self::from_entries(scores.entries)
            }
            Err(e) => {
                log::warn!("Could not load high scores ({e}), starting fresh");
                Self::new()
            }
        }
    }

    /// Import a file in the legacy plain-text format
    pub fn import_legacy(path: &Path) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path)?;
        let scores = Self::from_entries(persistence::legacy::parse_high_scores(&content));
        log::info!("Imported {} legacy high scores", scores.entries.len());
        Ok(scores)
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::write_json(path, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(score: u64) -> Vec<ScorePoint> {
        vec![ScorePoint { time: 1.0, score }]
    }

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_add_keeps_order_and_cap() {
        let mut scores = HighScores::new();
        for s in 1..=12u64 {
            scores.add_entry(&format!("p{s}"), s * 10, history(s));
        }
        let top = scores.top_entries();
        assert_eq!(top.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(120));
        assert_eq!(top.last().map(|e| e.score), Some(30));
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));

        // Must beat the last entry once full
        assert!(!scores.qualifies(30));
        assert_eq!(scores.potential_rank(31), Some(10));
        assert_eq!(scores.add_entry("late", 25, Vec::new()), None);
    }

    #[test]
    fn test_equal_scores_rank_after_existing() {
        let mut scores = HighScores::new();
        scores.add_entry("first", 50, Vec::new());
        assert_eq!(scores.add_entry("second", 50, Vec::new()), Some(2));
        assert_eq!(scores.top_entries()[0].name, "first");
    }

    #[test]
    fn test_history_lookup() {
        let mut scores = HighScores::new();
        scores.add_entry("ada", 40, history(40));
        assert_eq!(scores.history(0), history(40).as_slice());
        assert!(scores.history(5).is_empty());
    }

    #[test]
    fn test_save_load_and_legacy_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("highscores.json");
        assert!(HighScores::load(&path).is_empty());

        let mut scores = HighScores::new();
        scores.add_entry("ada", 40, history(40));
        scores.save(&path).unwrap();
        let loaded = HighScores::load(&path);
        assert_eq!(loaded.entries, scores.entries);

        let legacy = dir.path().join("highscores.txt");
        fs::write(&legacy, "low 5\n1:5\nhigh 90\n1:40 2:90\n").unwrap();
        let imported = HighScores::import_legacy(&legacy).unwrap();
        assert_eq!(imported.top_entries()[0].name, "high");
        assert_eq!(imported.history(0).len(), 2);
    }
}
