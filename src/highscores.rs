//! Session best table
//!
//! Kept in memory for the life of the process. The game state's own
//! `highest_score` starts over on every restart, so finished runs are recorded
//! here to keep a best score across them.

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// The run's high score field when it ended
    pub score: u32,
    /// Hops forward during the run
    pub up_moves: u32,
    /// Clock tick the run ended on
    pub elapsed_ticks: u64,
}

impl HighScoreEntry {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.highest_score,
            up_moves: state.up_move_count,
            elapsed_ticks: state.elapsed_ticks,
        }
    }
}

/// High score leaderboard
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

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a finished run to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        // Sorted descending; ties keep the earlier run first
        let pos = self.entries.iter().position(|e| entry.score > e.score);
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

        self.entries.truncate(MAX_HIGH_SCORES);
        log::debug!("Recorded run at rank {}", rank);

        Some(rank)
    }

    /// Record the run a finished state belongs to
    pub fn record(&mut self, state: &GameState) -> Option<usize> {
        self.add(HighScoreEntry::from_state(state))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Best score seen this session, counting a run still in progress
    pub fn best_with(&self, state: &GameState) -> u32 {
        self.top_score().unwrap_or(0).max(state.highest_score)
    }
}
