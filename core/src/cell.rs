use serde::{Deserialize, Serialize};

/// Neighbour count stored on bomb cells, never shown to the player.
pub(crate) const BOMB_MARKER: u8 = 9;

/// State of a single grid position.
///
/// A cell is never both visited and flagged: the engine refuses to reveal a
/// flagged cell and to flag a visited one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    bomb: bool,
    visited: bool,
    flagged: bool,
    reward: bool,
    adjacent: u8,
}

impl Cell {
    pub const fn is_bomb(&self) -> bool {
        self.bomb
    }

    pub const fn is_visited(&self) -> bool {
        self.visited
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Whether an unclaimed peek reward sits on this cell.
    pub const fn has_reward(&self) -> bool {
        self.reward
    }

    /// Number of bombs around a safe cell, `None` for a bomb.
    pub const fn adjacent_bombs(&self) -> Option<u8> {
        if self.bomb { None } else { Some(self.adjacent) }
    }

    pub(crate) fn reset(&mut self, bomb: bool) {
        *self = Self {
            bomb,
            ..Self::default()
        };
    }

    pub(crate) fn set_bomb(&mut self, bomb: bool) {
        self.bomb = bomb;
    }

    pub(crate) fn set_adjacent(&mut self, adjacent: u8) {
        self.adjacent = adjacent;
    }

    pub(crate) fn raw_adjacent(&self) -> u8 {
        self.adjacent
    }

    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }

    pub(crate) fn toggle_flag(&mut self) {
        self.flagged = !self.flagged;
    }

    pub(crate) fn place_reward(&mut self) {
        self.reward = true;
    }

    /// Removes the reward token, returning whether there was one.
    pub(crate) fn take_reward(&mut self) -> bool {
        core::mem::take(&mut self.reward)
    }
}
