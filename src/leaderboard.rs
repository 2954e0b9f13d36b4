//! Leaderboard
//!
//! Ranked by score, top 10 kept. Submission happens once per run, after game
//! over, and is best-effort: a failed save is logged and the game carries on.

use serde::{Deserialize, Serialize};

use crate::engine::RunSummary;
use crate::error::LeaderboardError;

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 10;

/// Longest accepted player name, in characters
pub const MAX_NAME_LEN: usize = 20;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when submitted
    pub timestamp: f64,
}

/// Score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
}

/// Trim and cap a player name. Returns None when nothing is left.
pub fn sanitize_name(name: &str) -> Option<String> {
    let name: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    let name = name.trim_end().to_string();
    if name.is_empty() { None } else { Some(name) }
}

impl Leaderboard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "orb_hop_leaderboard";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a finished run. Requires a non-empty name and a qualifying score.
    /// Returns the rank achieved (1-indexed).
    pub fn submit(&mut self, name: &str, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        let name = sanitize_name(name)?;
        if !self.qualifies(score) {
            return None;
        }

        let entry = LeaderboardEntry {
            name,
            score,
            level,
            timestamp,
        };

        // Ties go below existing entries
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

        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    /// Submit the result of a finished run
    pub fn submit_run(&mut self, name: &str, run: &RunSummary, timestamp: f64) -> Option<usize> {
        self.submit(name, run.score, run.level, timestamp)
    }

    /// Best `n` entries, highest score first
    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> Result<String, LeaderboardError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse stored JSON, restoring the ordering and size invariants
    pub fn from_json(json: &str) -> Result<Self, LeaderboardError> {
        let mut board: Self = serde_json::from_str(json)?;
        board.entries.sort_by(|a, b| b.score.cmp(&a.score));
        board.entries.truncate(MAX_ENTRIES);
        Ok(board)
    }

    /// Load the leaderboard from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(board) => {
                        log::info!("Loaded {} leaderboard entries", board.entries.len());
                        return board;
                    }
                    Err(e) => log::warn!("Discarding stored leaderboard: {}", e),
                }
            }
        }

        log::info!("No leaderboard found, starting fresh");
        Self::new()
    }

    /// Save the leaderboard to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), LeaderboardError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| LeaderboardError::Storage("LocalStorage unavailable".to_string()))?;

        let json = self.to_json()?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| LeaderboardError::Storage(format!("{:?}", e)))?;
        log::info!("Leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), LeaderboardError> {
        // No persistent store natively
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RunPhase;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("  Ada  "), Some("Ada".to_string()));
        assert_eq!(sanitize_name("   "), None);
        assert_eq!(
            sanitize_name("abcdefghijklmnopqrstuvwxyz"),
            Some("abcdefghijklmnopqrst".to_string())
        );
    }

    #[test]
    fn test_submit_orders_by_score() {
        let mut board = Leaderboard::new();
        assert_eq!(board.submit("ann", 100, 1, 0.0), Some(1));
        assert_eq!(board.submit("bob", 300, 2, 1.0), Some(1));
        assert_eq!(board.submit("cat", 200, 2, 2.0), Some(2));
        // Tie ranks below the existing entry
        assert_eq!(board.submit("dan", 200, 3, 3.0), Some(3));

        let names: Vec<_> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["bob", "cat", "dan", "ann"]);
        assert_eq!(board.top_score(), Some(300));
        assert_eq!(board.top(2).len(), 2);
        assert_eq!(board.top(50).len(), 4);
    }

    #[test]
    fn test_rejects_empty_name_and_zero_score() {
        let mut board = Leaderboard::new();
        assert_eq!(board.submit("", 500, 1, 0.0), None);
        assert_eq!(board.submit("eve", 0, 1, 0.0), None);
        assert!(board.is_empty());
    }

    #[test]
    fn test_board_is_capped() {
        let mut board = Leaderboard::new();
        for i in 1..=MAX_ENTRIES as u64 {
            board.submit("p", i * 10, 1, 0.0);
        }
        assert!(!board.qualifies(10));
        assert_eq!(board.potential_rank(55), Some(6));
        assert_eq!(board.submit("late", 5, 1, 0.0), None);
        assert_eq!(board.submit("best", 1000, 4, 0.0), Some(1));
        assert_eq!(board.entries.len(), MAX_ENTRIES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_submit_run() {
        let mut board = Leaderboard::new();
        let run = RunSummary {
            score: 420,
            level: 3,
            lives: 0,
            phase: RunPhase::GameOver,
            ticks: 9000,
        };
        assert_eq!(board.submit_run("zed", &run, 1.0), Some(1));
        assert_eq!(board.entries[0].level, 3);
    }

    #[test]
    fn test_from_json_restores_order() {
        let json = r#"{"entries":[
            {"name":"a","score":5,"level":1,"timestamp":0.0},
            {"name":"b","score":50,"level":2,"timestamp":0.0}
        ]}"#;
        let board = Leaderboard::from_json(json).unwrap();
        assert_eq!(board.top_score(), Some(50));
        assert!(Leaderboard::from_json("nope").is_err());
    }
}
