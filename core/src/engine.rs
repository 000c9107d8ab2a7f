use chrono::TimeDelta;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::cell::BOMB_MARKER;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeekOutcome {
    NoReward,
    OutOfBounds,
    Bomb,
    Safe,
}

impl PeekOutcome {
    /// Whether the peek spent a reward.
    pub const fn consumed_reward(self) -> bool {
        matches!(self, Self::Bomb | Self::Safe)
    }
}

impl fmt::Display for PeekOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoReward => "No reward available.",
            Self::OutOfBounds => "That position is out of bounds.",
            Self::Bomb => "Peek result: This cell IS a bomb.",
            Self::Safe => "Peek result: This cell is safe.",
        })
    }
}

/// Score of a won game on `config` that took `elapsed`.
pub fn final_score(config: BoardConfig, elapsed: TimeDelta) -> u32 {
    let seconds = if elapsed <= TimeDelta::zero() {
        0.0
    } else {
        elapsed
            .num_microseconds()
            .map_or(f64::INFINITY, |us| us as f64 / 1_000_000.0)
    };
    let size = f64::from(config.size);
    let base = size * size * 20.0;
    let difficulty_bonus = config.difficulty * 5000.0;
    let speed_bonus = (3000.0 - seconds * 10.0).max(0.0);
    (base + difficulty_bonus + speed_bonus) as u32
}

/// Game rules applied to a [`Board`] owned by the caller.
///
/// The engine keeps no game state, only its random source and clock.
#[derive(Clone, Debug)]
pub struct BoardEngine<R, C = SystemClock> {
    random: R,
    clock: C,
}

impl<R: RandomSource> BoardEngine<R> {
    pub fn new(random: R) -> Self {
        Self::with_clock(random, SystemClock)
    }
}

impl<R: RandomSource, C: Clock> BoardEngine<R, C> {
    pub fn with_clock(random: R, clock: C) -> Self {
        Self { random, clock }
    }

    pub fn into_parts(self) -> (R, C) {
        (self.random, self.clock)
    }

    /// Starts a fresh game: resets every cell, rolls each cell as a bomb with
    /// the board's difficulty, hides one reward and counts neighbours.
    pub fn setup_bombs(&mut self, board: &mut Board) {
        board.restart(self.clock.now());

        let difficulty = board.difficulty();
        for cell in board.cells_mut() {
            let bomb = self.random.next_f64() < difficulty;
            cell.reset(bomb);
        }

        self.place_reward(board);
        self.count_bombs_nearby(board);
        log::debug!(
            "board {size}x{size} set up with {} bombs at {}",
            board.bomb_count(),
            board.started_at(),
            size = board.size(),
        );
    }

    fn place_reward(&mut self, board: &mut Board) {
        let candidates = board.positions_where(|_, cell| !cell.is_bomb());
        if candidates.is_empty() {
            log::warn!("Board is all bombs, no reward placed");
            return;
        }

        let coords = candidates[self.random.next_index(candidates.len())];
        board.cell_mut(coords).place_reward();
        log::trace!("reward hidden at {:?}", coords);
    }

    pub fn count_bombs_nearby(&self, board: &mut Board) {
        let counts: Vec<(Coord2, u8)> = board
            .iter_cells()
            .map(|(coords, cell)| {
                let count = if cell.is_bomb() {
                    BOMB_MARKER
                } else {
                    board
                        .iter_neighbors(coords)
                        .filter(|&pos| board.cell_at(pos).is_some_and(Cell::is_bomb))
                        .count() as u8
                };
                (coords, count)
            })
            .collect();

        for (coords, count) in counts {
            board.cell_mut(coords).set_adjacent(count);
        }
    }

    /// Reveals a cell, opening the surrounding area when it has no bomb
    /// neighbours. Call [`Self::determine_game_state`] afterwards.
    pub fn reveal_cell(&mut self, board: &mut Board, coords: Coord2) {
        let Some(&cell) = board.cell_at(coords) else {
            return;
        };
        if cell.is_visited() || cell.is_flagged() {
            return;
        }

        if cell.is_bomb() && !board.any_visited() {
            self.relocate_first_bomb(board, coords);
        }

        if board.cell_mut(coords).take_reward() {
            board.grant_reward();
            log::debug!(
                "reward claimed at {:?}, {} available",
                coords,
                board.rewards_remaining()
            );
        }

        let cell = board.cell_mut(coords);
        if cell.is_bomb() {
            cell.mark_visited();
            log::debug!("bomb hit at {:?}", coords);
            return;
        }
        if cell.raw_adjacent() > 0 {
            cell.mark_visited();
            log::debug!("revealed {:?}, bomb count: {}", coords, cell.raw_adjacent());
            return;
        }

        Self::flood_fill(board, coords);
    }

    /// Moves the bomb under a first click to a random free cell.
    fn relocate_first_bomb(&mut self, board: &mut Board, coords: Coord2) {
        let candidates = board
            .positions_where(|pos, cell| pos != coords && !cell.is_bomb() && !cell.has_reward());
        if candidates.is_empty() {
            log::warn!("No free cell to move the first-click bomb at {:?}", coords);
            return;
        }

        let target = candidates[self.random.next_index(candidates.len())];
        board.cell_mut(target).set_bomb(true);
        board.cell_mut(coords).set_bomb(false);
        self.count_bombs_nearby(board);
        log::debug!("first-click bomb moved from {:?} to {:?}", coords, target);
    }

    fn flood_fill(board: &mut Board, start: Coord2) {
        let mut to_visit = vec![start];
        log::trace!("Starting flood-fill from {:?}", start);

        while let Some(visit_coords) = to_visit.pop() {
            let Some(&cell) = board.cell_at(visit_coords) else {
                continue;
            };
            if cell.is_visited() || cell.is_flagged() || cell.is_bomb() {
                continue;
            }

            board.cell_mut(visit_coords).mark_visited();
            log::trace!(
                "Flood opened cell at {:?}, bomb count: {}",
                visit_coords,
                cell.raw_adjacent()
            );

            if cell.raw_adjacent() == 0 {
                to_visit.extend(board.iter_neighbors(visit_coords));
            }
        }
    }

    pub fn toggle_flag(&self, board: &mut Board, coords: Coord2) {
        if !board.in_bounds(coords) {
            return;
        }
        let cell = board.cell_mut(coords);
        if !cell.is_visited() {
            cell.toggle_flag();
        }
    }

    /// Spends a reward to learn whether a cell is a bomb, without touching
    /// the cell.
    pub fn use_reward_peek(&self, board: &mut Board, coords: Coord2) -> PeekOutcome {
        if board.rewards_remaining() == 0 {
            return PeekOutcome::NoReward;
        }
        let Some(&cell) = board.cell_at(coords) else {
            return PeekOutcome::OutOfBounds;
        };

        let spent = board.spend_reward();
        debug_assert!(spent, "reward counter checked above");
        log::debug!("peek at {:?}, {} rewards left", coords, board.rewards_remaining());
        if cell.is_bomb() {
            PeekOutcome::Bomb
        } else {
            PeekOutcome::Safe
        }
    }

    /// Opens every unflagged bomb of a lost board. Flagged bombs keep their
    /// flag. Does nothing while the game is not lost.
    pub fn reveal_all_bombs(&self, board: &mut Board) {
        if board.state() != GameState::Lost {
            return;
        }
        let mut opened = 0usize;
        for cell in board.cells_mut() {
            if cell.is_bomb() && !cell.is_flagged() && !cell.is_visited() {
                cell.mark_visited();
                opened += 1;
            }
        }
        log::debug!("revealed {} bombs after loss", opened);
    }

    /// Derives the state from the cells. Every call on a finished board
    /// stamps the end time again.
    pub fn determine_game_state(&self, board: &mut Board) -> GameState {
        let state = if board
            .iter_cells()
            .any(|(_, cell)| cell.is_bomb() && cell.is_visited())
        {
            GameState::Lost
        } else if board
            .iter_cells()
            .all(|(_, cell)| cell.is_bomb() || cell.is_visited())
        {
            GameState::Won
        } else {
            GameState::StillPlaying
        };

        if state.is_finished() {
            let now = self.clock.now();
            if board.state() != state {
                log::debug!("game {:?} at {}", state, now);
            }
            board.set_ended_at(now);
        }
        board.set_state(state);
        state
    }

    /// Zero unless the board is won.
    pub fn determine_final_score(&self, board: &Board) -> u32 {
        match (board.state(), board.elapsed()) {
            (GameState::Won, Some(elapsed)) => final_score(board.config(), elapsed),
            _ => 0,
        }
    }

    pub fn create_game_stat(&self, board: &Board, player_name: &str) -> Result<GameStat> {
        let (GameState::Won, Some(ended_at), Some(elapsed)) =
            (board.state(), board.ended_at(), board.elapsed())
        else {
            return Err(GameError::NotWon);
        };

        Ok(GameStat::new(
            player_name,
            self.determine_final_score(board),
            elapsed.to_std().unwrap_or_default(),
            ended_at,
        ))
    }
}
