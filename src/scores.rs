//! High score leaderboard
//!
//! Persisted to a JSON file, tracks the top 10 runs.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of scores to keep
pub const MAX_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Three initials, arcade style
    pub name: String,
    pub score: u32,
    /// Level reached when the run ended
    pub level: u32,
}

/// Score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoreBoard {
    pub entries: Vec<ScoreEntry>,
}

impl ScoreBoard {
    /// Create an empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a run to the leaderboard if it qualifies.
    /// Returns the rank achieved (1-indexed) or None if it didn't.
    pub fn add(&mut self, name: &str, score: u32, level: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = ScoreEntry {
            name: name.to_string(),
            score,
            level,
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

        self.entries.truncate(MAX_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load a leaderboard from a JSON file; a missing or unreadable file
    /// yields an empty board.
    pub fn load(path: &Path) -> Self {
        if let Ok(json) = fs::read_to_string(path) {
            match serde_json::from_str::<ScoreBoard>(&json) {
                Ok(board) => {
                    log::info!("Loaded {} high scores", board.entries.len());
                    return board;
                }
                Err(err) => log::warn!("Ignoring bad score file: {}", err),
            }
        }
        Self::new()
    }

    /// Write the leaderboard to a JSON file, best effort
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("Could not save scores to {}: {}", path.display(), err);
                }
            }
            Err(err) => log::warn!("Could not serialize scores: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let board = ScoreBoard::new();
        assert!(!board.qualifies(0));
        assert!(board.qualifies(1));
    }

    #[test]
    fn test_ranks_sorted_descending() {
        let mut board = ScoreBoard::new();
        assert_eq!(board.add("AAA", 1000, 2), Some(1));
        assert_eq!(board.add("BBB", 3000, 4), Some(1));
        assert_eq!(board.add("CCC", 2000, 3), Some(2));

        let scores: Vec<u32> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![3000, 2000, 1000]);
        assert_eq!(board.best(), Some(3000));
    }

    #[test]
    fn test_board_caps_at_ten() {
        let mut board = ScoreBoard::new();
        for i in 1..=12u32 {
            board.add("AAA", i * 100, 1);
        }
        assert_eq!(board.entries.len(), MAX_SCORES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(300));

        // Below the cut: rejected outright
        assert!(!board.qualifies(300));
        assert_eq!(board.add("ZZZ", 250, 1), None);
        assert_eq!(board.add("ZZZ", 350, 1), Some(10));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let board = ScoreBoard::load(Path::new("/nonexistent/scores.json"));
        assert!(board.is_empty());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let path = std::env::temp_dir().join("omega-race-scores-test.json");
        let mut board = ScoreBoard::new();
        board.add("AAA", 4200, 3);
        board.save(&path);

        let loaded = ScoreBoard::load(&path);
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries[0].name, "AAA");
        assert_eq!(loaded.best(), Some(4200));
        let _ = std::fs::remove_file(&path);
    }
}
