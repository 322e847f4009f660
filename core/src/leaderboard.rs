use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// One completed attempt. The score is the elapsed time, so lower ranks
/// first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    name: String,
    score: u32,
    mode: String,
}

impl ScoreRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Lowercased "difficulty-shape" key this run was played under.
    pub fn mode(&self) -> &str {
        &self.mode
    }
}

/// Ranked records of completed runs, partitioned by game mode.
///
/// Insert-only: records are never overwritten or deduplicated, and the
/// same player may appear any number of times. Within one score, newer
/// submissions rank ahead of older ones. Serializable, so it survives
/// across sessions in whatever store the host uses.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    boards: BTreeMap<String, BTreeMap<u32, Vec<ScoreRecord>>>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed run under the case-normalized mode key.
    pub fn submit(&mut self, name: &str, score: u32, mode: &str) {
        let mode = mode.to_lowercase();
        let record = ScoreRecord {
            name: name.to_string(),
            score,
            mode: mode.clone(),
        };
        self.boards
            .entry(mode)
            .or_default()
            .entry(score)
            .or_default()
            .push(record);
    }

    /// Up to `n` records for `mode`, best (lowest) score first; equal
    /// scores rank the most recent submission first.
    ///
    /// A mode that has never received a submission is an error, not an
    /// empty list, so callers can tell "no attempts yet" apart from an
    /// exhausted listing.
    pub fn top_n(&self, mode: &str, n: usize) -> Result<Vec<&ScoreRecord>> {
        let mode = mode.to_lowercase();
        let board = self
            .boards
            .get(&mode)
            .ok_or_else(|| GameError::UnknownMode(mode.clone()))?;
        Ok(board
            .values()
            .flat_map(|group| group.iter().rev())
            .take(n)
            .collect())
    }

    pub fn top_ten(&self, mode: &str) -> Result<Vec<&ScoreRecord>> {
        self.top_n(mode, 10)
    }

    /// Mode keys that have received at least one submission.
    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.boards.keys().map(String::as_str)
    }

    /// Total records across every mode.
    pub fn len(&self) -> usize {
        self.boards
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_ascending_by_score() {
        let mut scores = Leaderboard::new();
        scores.submit("ada", 120, "easy-rectangle");
        scores.submit("bob", 45, "easy-rectangle");
        scores.submit("cyd", 300, "easy-rectangle");

        let top = scores.top_ten("easy-rectangle").unwrap();
        let ranked: Vec<(&str, u32)> = top.iter().map(|r| (r.name(), r.score())).collect();
        assert_eq!(ranked, [("bob", 45), ("ada", 120), ("cyd", 300)]);
    }

    #[test]
    fn equal_scores_rank_most_recent_first() {
        let mut scores = Leaderboard::new();
        scores.submit("first", 60, "hard-cross");
        scores.submit("second", 60, "hard-cross");
        scores.submit("third", 60, "hard-cross");
        scores.submit("quick", 10, "hard-cross");

        let top = scores.top_ten("hard-cross").unwrap();
        let names: Vec<&str> = top.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["quick", "third", "second", "first"]);
    }

    #[test]
    fn unknown_mode_is_an_error_not_an_empty_list() {
        let mut scores = Leaderboard::new();
        scores.submit("ada", 10, "easy-rectangle");
        assert_eq!(
            scores.top_ten("hard-diamond"),
            Err(GameError::UnknownMode(String::from("hard-diamond")))
        );
    }

    #[test]
    fn mode_keys_are_case_normalized() {
        let mut scores = Leaderboard::new();
        scores.submit("ada", 33, "Easy-Rectangle");

        let top = scores.top_ten("EASY-RECTANGLE").unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].mode(), "easy-rectangle");
    }

    #[test]
    fn repeat_submissions_are_all_kept() {
        let mut scores = Leaderboard::new();
        scores.submit("ada", 90, "easy-diamond");
        scores.submit("ada", 90, "easy-diamond");
        scores.submit("ada", 70, "easy-diamond");

        assert_eq!(scores.len(), 3);
        let top = scores.top_ten("easy-diamond").unwrap();
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn hundred_submissions_trim_to_a_sorted_top_ten() {
        use rand::prelude::*;

        let mut rng = rand::rngs::SmallRng::seed_from_u64(99);
        let mut scores = Leaderboard::new();
        for i in 0..100 {
            let name = alloc::format!("player{i}");
            scores.submit(&name, rng.random_range(0..999), "beginner-rectangle");
        }

        let top = scores.top_n("beginner-rectangle", 10).unwrap();
        assert_eq!(top.len(), 10);
        for record in &top {
            assert_eq!(record.mode(), "beginner-rectangle");
        }
        for pair in top.windows(2) {
            assert!(pair[0].score() <= pair[1].score());
        }
    }

    #[test]
    fn short_boards_return_everything_in_rank_order() {
        let mut scores = Leaderboard::new();
        scores.submit("ada", 50, "medium-triangle");
        scores.submit("bob", 20, "medium-triangle");

        let top = scores.top_n("medium-triangle", 10).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name(), "bob");
    }
}
