//! High score leaderboard
//!
//! Kept for the session only; tracks the top 10 runs. The top entry is the
//! high score shown next to the live score.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u64,
    /// Ticks the run lasted
    pub run_ticks: u64,
    /// Run number within the session
    pub run: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
    runs_seen: u32,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
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

    /// Add a finished run to the leaderboard (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, run_ticks: u64, run: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            run_ticks,
            run,
        };

        // Sorted descending by score; ties keep the earlier run first
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

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Feed simulation events; crashes become leaderboard entries.
    /// Returns the rank of the last qualifying crash, if any.
    pub fn record(&mut self, events: &[GameEvent]) -> Option<usize> {
        let mut rank = None;
        for event in events {
            match *event {
                GameEvent::Started { run } => self.runs_seen = run,
                GameEvent::Crashed { score, run_ticks } => {
                    if let Some(r) = self.add_score(score, run_ticks, self.runs_seen) {
                        log::info!("Run {} placed #{} with {}", self.runs_seen, r, score);
                        rank = Some(r);
                    }
                }
                _ => {}
            }
        }
        rank
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// High score to display next to a live score
    pub fn high_score(&self, live_score: u64) -> u64 {
        self.top_score().unwrap_or(0).max(live_score)
    }
}
