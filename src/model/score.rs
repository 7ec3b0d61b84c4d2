use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded score. With a `round_id` it is the player's score for that
/// round and unique per (round, player); without one it is free-standing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Score {
    pub id: i64,
    pub player_id: i64,
    pub round_id: Option<i64>,
    pub value: i32,
    pub recorded_at: DateTime<Utc>,
}

impl Score {
    /// A zero means the round has not been played yet.
    #[must_use]
    pub fn is_played(&self) -> bool {
        self.value != 0
    }
}

/// Per-player aggregate over played scores, as shown on the leaderboard.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PlayerTotals {
    pub player_id: i64,
    pub name: String,
    pub total: i64,
    pub average: f64,
    pub scores: Vec<i32>,
}

/// One line of a round's score entry form.
#[derive(Clone, Debug, PartialEq)]
pub struct ScorecardLine {
    pub player: crate::model::Player,
    pub score: Option<i32>,
}
