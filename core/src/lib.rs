use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use random::*;
pub use scoreboard::*;
pub use stat::*;
pub use types::*;

mod board;
mod cell;
mod clock;
mod engine;
mod error;
mod random;
mod scoreboard;
mod stat;
mod types;

/// Smallest supported board side.
pub const MIN_SIZE: Coord = 1;
/// Largest supported board side.
pub const MAX_SIZE: Coord = 64;
/// Side the setup screen starts with.
pub const DEFAULT_SIZE: Coord = 10;

/// Board side and per-cell bomb probability.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord,
    pub difficulty: f64,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord, difficulty: f64) -> Self {
        Self { size, difficulty }
    }

    /// Clamps both values into the supported range, NaN difficulty becomes 0.
    pub fn new(size: Coord, difficulty: f64) -> Self {
        let size = size.clamp(MIN_SIZE, MAX_SIZE);
        let difficulty = if difficulty.is_nan() {
            0.0
        } else {
            difficulty.clamp(0.0, 1.0)
        };
        Self::new_unchecked(size, difficulty)
    }

    pub fn try_new(size: Coord, difficulty: f64) -> Result<Self> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GameError::InvalidSize);
        }
        if !(0.0..=1.0).contains(&difficulty) {
            return Err(GameError::InvalidDifficulty);
        }
        Ok(Self::new_unchecked(size, difficulty))
    }

    pub fn preset(size: Coord, difficulty: Difficulty) -> Self {
        Self::new(size, difficulty.percentage())
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::preset(DEFAULT_SIZE, Difficulty::default())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Per-cell bomb probability.
    pub const fn percentage(self) -> f64 {
        match self {
            Self::Easy => 0.12,
            Self::Medium => 0.18,
            Self::Hard => 0.24,
        }
    }

    /// Levels 1 to 3 as shown on the setup slider.
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Easy),
            2 => Some(Self::Medium),
            3 => Some(Self::Hard),
            _ => None,
        }
    }

    pub const fn level(self) -> u8 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::InvalidDifficulty)
    }
}
