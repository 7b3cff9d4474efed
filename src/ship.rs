//! Ship definitions and per-ship damage tracking.

use core::fmt;
use std::collections::BTreeSet;

use crate::grid::Coord;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The `i`-th cell of a run starting at `(row, col)`.
    pub fn step(self, row: usize, col: usize, i: usize) -> Coord {
        match self {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipType {
    name: &'static str,
    size: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(name: &'static str, size: usize) -> Self {
        Self { name, size }
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of cells the ship occupies.
    pub const fn size(&self) -> usize {
        self.size
    }
}

/// A fleet member. Starts unplaced; the board assigns its coordinates once.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    ship_type: ShipType,
    coordinates: BTreeSet<Coord>,
    hits: BTreeSet<Coord>,
}

impl Ship {
    /// Create an unplaced ship of the given type.
    pub fn new(ship_type: ShipType) -> Self {
        Ship {
            ship_type,
            coordinates: BTreeSet::new(),
            hits: BTreeSet::new(),
        }
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    pub fn name(&self) -> &'static str {
        self.ship_type.name()
    }

    pub fn size(&self) -> usize {
        self.ship_type.size()
    }

    /// Cells occupied by the ship. Empty until placed.
    pub fn coordinates(&self) -> &BTreeSet<Coord> {
        &self.coordinates
    }

    /// Occupied cells that have been hit.
    pub fn hits(&self) -> &BTreeSet<Coord> {
        &self.hits
    }

    pub fn is_placed(&self) -> bool {
        !self.coordinates.is_empty()
    }

    /// Returns `true` if the ship occupies `(row, col)`.
    pub fn occupies(&self, row: usize, col: usize) -> bool {
        self.coordinates.contains(&(row, col))
    }

    /// A placed ship is sunk once every occupied cell has been hit.
    pub fn is_sunk(&self) -> bool {
        self.is_placed() && self.hits.len() == self.ship_type.size()
    }

    pub(crate) fn set_coordinates(&mut self, run: impl IntoIterator<Item = Coord>) {
        self.coordinates = run.into_iter().collect();
    }

    /// Register a hit at (`row`, `col`).
    /// Returns `true` if the ship occupies that cell.
    pub(crate) fn register_hit(&mut self, row: usize, col: usize) -> bool {
        if self.occupies(row, col) {
            self.hits.insert((row, col));
            true
        } else {
            false
        }
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", size: {}, cells: {:?}, hits: {} }}",
            self.name(),
            self.size(),
            self.coordinates,
            self.hits.len(),
        )
    }
}
