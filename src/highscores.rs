//! High score leaderboard
//!
//! Keeps the top 10 finished runs in memory. The table is serializable so a
//! host can persist it however it likes.

use serde::{Deserialize, Serialize};

use crate::sim::state::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level reached
    pub level: u32,
    pub difficulty: Difficulty,
    /// Run length in ticks
    pub ticks: u64,
}

/// High score leaderboard, sorted by descending score
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

    /// Record a finished run.
    ///
    /// Returns the 1-based rank it took, or `None` for a zero score or one
    /// that does not make the table. Ties rank below earlier runs.
    pub fn add_score(
        &mut self,
        score: u64,
        level: u32,
        difficulty: Difficulty,
        ticks: u64,
    ) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let index = self.entries.partition_point(|e| e.score >= score);
        if index >= MAX_HIGH_SCORES {
            return None;
        }

        self.entries.insert(
            index,
            HighScoreEntry {
                score,
                level,
                difficulty,
                ticks,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        let rank = index + 1;
        log::info!("High score #{rank}: {score} ({})", difficulty.as_str());
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let mut hs = HighScores::new();
        assert_eq!(hs.add_score(0, 1, Difficulty::Easy, 10), None);
        assert!(hs.is_empty());
    }

    #[test]
    fn test_sorted_insert_and_rank() {
        let mut hs = HighScores::new();
        assert_eq!(hs.add_score(10, 1, Difficulty::Easy, 100), Some(1));
        assert_eq!(hs.add_score(30, 2, Difficulty::Hard, 200), Some(1));
        assert_eq!(hs.add_score(20, 2, Difficulty::Medium, 150), Some(2));
        let scores: Vec<u64> = hs.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![30, 20, 10]);
        assert_eq!(hs.top_score(), Some(30));
        // Tie goes below the earlier run
        assert_eq!(hs.add_score(20, 3, Difficulty::Easy, 300), Some(3));
    }

    #[test]
    fn test_truncates_to_max() {
        let mut hs = HighScores::new();
        for s in 1..=15 {
            hs.add_score(s, 1, Difficulty::Medium, s);
        }
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(hs.entries.last().map(|e| e.score), Some(6));
        assert_eq!(hs.add_score(5, 1, Difficulty::Medium, 1), None);
        assert_eq!(hs.add_score(6, 1, Difficulty::Medium, 1), None);
        assert_eq!(hs.add_score(7, 1, Difficulty::Medium, 1), Some(10));
    }
}
