use chrono::{DateTime, Utc};
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Result of one won game, handed to the scoreboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStat {
    name: String,
    score: u32,
    game_time: Duration,
    date: DateTime<Utc>,
}

impl GameStat {
    pub fn new(name: impl Into<String>, score: u32, game_time: Duration, date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            score,
            game_time,
            date,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_time(&self) -> Duration {
        self.game_time
    }

    /// When the game was completed.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }
}
