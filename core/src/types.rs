/// Single coordinate axis used for the board side and row/column positions.
pub type Coord = u8;

/// Count type used for cell totals on a board.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Cell count of a square board with side `size`.
pub const fn area(size: Coord) -> CellCount {
    let size = size as CellCount;
    size.saturating_mul(size)
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Shifts `coords` by `delta`, keeping only results inside a `size` x `size` square.
fn shift(coords: Coord2, delta: (i8, i8), size: Coord) -> Option<Coord2> {
    let row = coords.0.checked_add_signed(delta.0)?;
    let col = coords.1.checked_add_signed(delta.1)?;
    (row < size && col < size).then_some((row, col))
}

/// Moore neighbourhood of a cell, clipped at the board edges.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    size: Coord,
    index: usize,
}

impl NeighborIter {
    pub fn new(center: Coord2, size: Coord) -> Self {
        Self {
            center,
            size,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(self.index) {
            self.index += 1;
            if let Some(coords) = shift(self.center, delta, self.size) {
                return Some(coords);
            }
        }
        None
    }
}
