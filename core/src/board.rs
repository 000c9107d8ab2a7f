use chrono::{DateTime, TimeDelta, Utc};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    StillPlaying,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Square grid of cells plus the bookkeeping of one game.
///
/// Mutated in place by [`BoardEngine`] for the whole game. Serializable so a
/// caller can snapshot a game in progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    config: BoardConfig,
    cells: Array2<Cell>,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    state: GameState,
    rewards_remaining: u32,
}

/// Unchecked wire form of [`Board`], validated before use.
#[derive(Deserialize)]
struct BoardSnapshot {
    config: BoardConfig,
    cells: Array2<Cell>,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    state: GameState,
    rewards_remaining: u32,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = GameError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self> {
        let board = Self {
            config: snapshot.config,
            cells: snapshot.cells,
            started_at: snapshot.started_at,
            ended_at: snapshot.ended_at,
            state: snapshot.state,
            rewards_remaining: snapshot.rewards_remaining,
        };
        board.validate()?;
        Ok(board)
    }
}

impl Board {
    /// Empty board: no bombs, no reward, nothing revealed.
    pub fn new(config: BoardConfig) -> Self {
        let side = usize::from(config.size);
        Self {
            config,
            cells: Array2::default((side, side)),
            started_at: DateTime::default(),
            ended_at: None,
            state: GameState::default(),
            rewards_remaining: 0,
        }
    }

    /// Board with bombs at exactly `bombs`. Neighbour counts are left at zero
    /// until [`BoardEngine::count_bombs_nearby`] runs.
    pub fn with_bombs(config: BoardConfig, bombs: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(config);
        for &coords in bombs {
            board.validate_coords(coords)?;
            board.cell_mut(coords).set_bomb(true);
        }
        Ok(board)
    }

    /// Checks the config range and that the grid is `size` x `size`.
    pub fn validate(&self) -> Result<()> {
        BoardConfig::try_new(self.config.size, self.config.difficulty)?;
        let side = usize::from(self.config.size);
        if self.cells.dim() != (side, side) {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(())
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn difficulty(&self) -> f64 {
        self.config.difficulty
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Claimed peek rewards that have not been spent yet.
    pub fn rewards_remaining(&self) -> u32 {
        self.rewards_remaining
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Time between start and end, `None` while no end has been stamped.
    pub fn elapsed(&self) -> Option<TimeDelta> {
        self.ended_at.map(|ended_at| ended_at - self.started_at)
    }

    pub fn in_bounds(&self, (row, col): Coord2) -> bool {
        row < self.size() && col < self.size()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        if self.in_bounds(coords) {
            Some(&self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    /// All cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn bomb_count(&self) -> CellCount {
        self.count_cells(Cell::is_bomb)
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_cells(Cell::is_flagged)
    }

    pub fn visited_count(&self) -> CellCount {
        self.count_cells(Cell::is_visited)
    }

    /// Safe cells the player still has to uncover.
    pub fn safe_cells_left(&self) -> CellCount {
        self.count_cells(|cell| !cell.is_bomb() && !cell.is_visited())
    }

    /// Where the unclaimed reward token sits, if any.
    pub fn reward_position(&self) -> Option<Coord2> {
        self.iter_cells()
            .find(|(_, cell)| cell.has_reward())
            .map(|(coords, _)| coords)
    }

    pub(crate) fn any_visited(&self) -> bool {
        self.cells.iter().any(Cell::is_visited)
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Coordinates of every cell matching `filter`, row-major.
    pub(crate) fn positions_where(&self, filter: impl Fn(Coord2, &Cell) -> bool) -> Vec<Coord2> {
        self.iter_cells()
            .filter(|&(coords, cell)| filter(coords, cell))
            .map(|(coords, _)| coords)
            .collect()
    }

    pub(crate) fn restart(&mut self, now: DateTime<Utc>) {
        self.started_at = now;
        self.ended_at = None;
        self.state = GameState::StillPlaying;
        self.rewards_remaining = 0;
    }

    pub(crate) fn set_state(&mut self, state: GameState) {
        self.state = state;
    }

    pub(crate) fn set_ended_at(&mut self, ended_at: DateTime<Utc>) {
        self.ended_at = Some(ended_at);
    }

    pub(crate) fn grant_reward(&mut self) {
        self.rewards_remaining += 1;
    }

    /// Spends one reward, returns `false` when none is left.
    pub(crate) fn spend_reward(&mut self) -> bool {
        match self.rewards_remaining.checked_sub(1) {
            Some(left) => {
                self.rewards_remaining = left;
                true
            }
            None => false,
        }
    }

    fn count_cells(&self, filter: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|&cell| filter(cell)).count() as CellCount
    }
}
