use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

use crate::{GameStat, ScoreboardError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Name,
    Score,
    Date,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// High-score list of won games.
///
/// Serialized as a plain JSON array of stats, storage is up to the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scoreboard {
    stats: Vec<GameStat>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stat: GameStat) {
        log::debug!("new score {} for {:?}", stat.score(), stat.name());
        self.stats.push(stat);
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameStat> {
        self.stats.iter()
    }

    /// Highest score, the earliest one on ties.
    pub fn best(&self) -> Option<&GameStat> {
        self.stats
            .iter()
            .reduce(|best, stat| if stat.score() > best.score() { stat } else { best })
    }

    /// Stable sort, equal keys keep their current order.
    pub fn sort_by(&mut self, key: SortKey, order: SortOrder) {
        let compare = |a: &GameStat, b: &GameStat| -> Ordering {
            match key {
                SortKey::Name => a.name().cmp(b.name()),
                SortKey::Score => a.score().cmp(&b.score()),
                SortKey::Date => a.date().cmp(&b.date()),
            }
        };
        match order {
            SortOrder::Ascending => self.stats.sort_by(compare),
            SortOrder::Descending => self.stats.sort_by(|a, b| compare(b, a)),
        }
    }

    pub fn to_json(&self) -> Result<String, ScoreboardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Blank input reads as an empty scoreboard.
    pub fn from_json(json: &str) -> Result<Self, ScoreboardError> {
        if json.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_json::from_str(json)?)
    }
}

impl Extend<GameStat> for Scoreboard {
    fn extend<I: IntoIterator<Item = GameStat>>(&mut self, iter: I) {
        self.stats.extend(iter);
    }
}

impl FromIterator<GameStat> for Scoreboard {
    fn from_iter<I: IntoIterator<Item = GameStat>>(iter: I) -> Self {
        Self {
            stats: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Scoreboard {
    type Item = &'a GameStat;
    type IntoIter = core::slice::Iter<'a, GameStat>;

    fn into_iter(self) -> Self::IntoIter {
        self.stats.iter()
    }
}
