//! Square grid of cell states.
//!
//! The side length is chosen at runtime, so cells are kept in a flat
//! row-major `Vec`. The grid knows nothing about ships;
//! the `Board` layers placement and attack rules on top of it.

use core::fmt;

/// Zero-based `(row, col)` position on a grid.
pub type Coord = (usize, usize);

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Empty,
    /// An unattacked ship segment.
    Ship,
    /// A ship segment that has been attacked.
    Hit,
    /// An attacked cell with no ship.
    Miss,
}

impl CellState {
    /// Glyph used when rendering the cell.
    pub fn symbol(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Ship => 'S',
            CellState::Hit => 'X',
            CellState::Miss => 'O',
        }
    }

    /// Whether this cell has already been fired at.
    pub fn is_resolved(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A `size`×`size` matrix of [`CellState`].
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create a grid with every cell `Empty`.
    pub fn new(size: usize) -> Self {
        Grid {
            size,
            cells: vec![CellState::Empty; size * size],
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `(row, col)` lies inside the grid.
    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        self.in_bounds(row, col).then(|| row * self.size + col)
    }

    /// State at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Overwrite the state at `(row, col)`. Returns `false` when out of bounds.
    pub(crate) fn set(&mut self, row: usize, col: usize, state: CellState) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = state;
                true
            }
            None => false,
        }
    }

    /// In-bounds cells of the 8-neighbourhood around `(row, col)`.
    pub fn neighbours(&self, row: usize, col: usize) -> impl Iterator<Item = Coord> + '_ {
        NEIGHBOUR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            self.in_bounds(r, c).then_some((r, c))
        })
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{} {{", self.size, self.size)?;
        for row in self.rows() {
            let line: String = row.iter().map(|c| c.symbol()).collect();
            writeln!(f, "  {}", line)?;
        }
        write!(f, "}}")
    }
}
