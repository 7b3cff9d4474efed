//! Game board: a grid plus the fleet placed on it.

use core::fmt;
use log::{debug, warn};
use rand::Rng;

use crate::common::BoardError;
use crate::config::{MAX_BOARD_SIZE, MAX_LAYOUT_RESTARTS, MAX_PLACEMENT_ATTEMPTS, MIN_BOARD_SIZE};
use crate::grid::{CellState, Coord, Grid};
use crate::ship::{Orientation, Ship, ShipType};

/// One party's private board: ship placements, hits and misses.
#[derive(Clone)]
pub struct Board {
    grid: Grid,
    ships: Vec<Ship>,
}

impl Board {
    /// Create an empty board. Fails unless `size` is within the legal range.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Board {
            grid: Grid::new(size),
            ships: Vec::new(),
        })
    }

    /// Lay out a complete fleet at random on a fresh board.
    ///
    /// A ship that cannot be fitted after `MAX_PLACEMENT_ATTEMPTS` samples
    /// throws the partial layout away and starts over.
    pub fn random_fleet<R: Rng + ?Sized>(
        size: usize,
        fleet: &[ShipType],
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let mut last_err = None;
        for restart in 0..MAX_LAYOUT_RESTARTS {
            let mut board = Board::new(size)?;
            match board.place_remaining(fleet, rng) {
                Ok(()) => return Ok(board),
                Err(e) => {
                    warn!("random layout {} failed: {}", restart, e);
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or(BoardError::UnableToPlaceShip("fleet")))
    }

    fn place_remaining<R: Rng + ?Sized>(
        &mut self,
        fleet: &[ShipType],
        rng: &mut R,
    ) -> Result<(), BoardError> {
        for &def in fleet.iter().skip(self.ships.len()) {
            let (r, c, o) = self.random_placement(rng, def)?;
            self.place_ship(Ship::new(def), r, c, o)?;
        }
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Placed ships in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<CellState> {
        self.grid.get(row, col)
    }

    /// Returns `true` when at least one ship is placed and all are sunk.
    pub fn all_sunk(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_sunk)
    }

    /// Returns `true` when every role of `fleet` has been placed.
    pub fn fleet_complete(&self, fleet: &[ShipType]) -> bool {
        self.ships.len() >= fleet.len()
    }

    /// Ships still afloat.
    pub fn remaining_ships(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }

    /// Validate the whole run for a ship of `size` cells without touching the grid.
    fn validate_run(
        &self,
        size: usize,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<Vec<Coord>, BoardError> {
        let mut run = Vec::with_capacity(size);
        for i in 0..size {
            let (r, c) = orientation.step(row, col, i);
            match self.grid.get(r, c) {
                None => return Err(BoardError::OutOfBounds { row: r, col: c }),
                Some(CellState::Empty) => run.push((r, c)),
                Some(_) => return Err(BoardError::CellOccupied { row: r, col: c }),
            }
        }
        for &(r, c) in &run {
            let touching = self.grid.neighbours(r, c).any(|(nr, nc)| {
                self.grid.get(nr, nc) == Some(CellState::Ship) && !run.contains(&(nr, nc))
            });
            if touching {
                return Err(BoardError::ShipsTouching { row: r, col: c });
            }
        }
        Ok(run)
    }

    /// Place `ship` starting at (`row`, `col`) and extending along `orientation`.
    ///
    /// The run is checked as a whole first; on error the board is unchanged.
    pub fn place_ship(
        &mut self,
        mut ship: Ship,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if ship.is_placed() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        let run = self.validate_run(ship.size(), row, col, orientation)?;
        for &(r, c) in &run {
            self.grid.set(r, c, CellState::Ship);
        }
        debug!(
            "placed {} at ({}, {}) {:?}",
            ship.name(),
            row,
            col,
            orientation
        );
        ship.set_coordinates(run);
        self.ships.push(ship);
        Ok(())
    }

    /// Returns a random legal (row, col, Orientation) for a ship of type `def`.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        def: ShipType,
    ) -> Result<(usize, usize, Orientation), BoardError> {
        let size = self.size();
        if def.size() == 0 || def.size() > size {
            return Err(BoardError::UnableToPlaceShip(def.name()));
        }
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orient = if rng.random_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let r = rng.random_range(0..size);
            let c = rng.random_range(0..size);
            if self.validate_run(def.size(), r, c, orient).is_ok() {
                return Ok((r, c, orient));
            }
        }
        Err(BoardError::UnableToPlaceShip(def.name()))
    }

    /// Resolve an attack at (`row`, `col`).
    ///
    /// `Ok(Some(ship))` is a hit on `ship` (check [`Ship::is_sunk`]),
    /// `Ok(None)` a miss. Out-of-bounds or already resolved targets are
    /// rejected and leave the board untouched.
    pub fn receive_attack(
        &mut self,
        row: usize,
        col: usize,
    ) -> Result<Option<&Ship>, BoardError> {
        let cell = self
            .grid
            .get(row, col)
            .ok_or(BoardError::OutOfBounds { row, col })?;
        if cell.is_resolved() {
            return Err(BoardError::AlreadyAttacked { row, col });
        }
        if cell != CellState::Ship {
            self.grid.set(row, col, CellState::Miss);
            debug!("attack at ({}, {}) missed", row, col);
            return Ok(None);
        }
        let idx = self
            .ships
            .iter()
            .position(|s| s.occupies(row, col))
            .ok_or(BoardError::UnknownShipHit { row, col })?;
        self.grid.set(row, col, CellState::Hit);
        let ship = &mut self.ships[idx];
        ship.register_hit(row, col);
        debug!("attack at ({}, {}) hit {}", row, col, ship.name());
        Ok(Some(&*ship))
    }

    /// Text view of the board. With `hide_ships` unattacked ship cells look empty.
    pub fn render(&self, hide_ships: bool) -> String {
        let mut out = String::from("   ");
        let header: Vec<String> = (0..self.size()).map(|i| format!("{:2}", i)).collect();
        out.push_str(&header.join(" "));
        for (i, row) in self.grid.rows().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .map(|&cell| match cell {
                    CellState::Ship if hide_ships => CellState::Empty.symbol(),
                    other => other.symbol(),
                })
                .map(|ch| format!("{:>2}", ch))
                .collect();
            out.push('\n');
            out.push_str(&format!("{:2} {}", i, cells.join(" ")));
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("grid", &self.grid)
            .field("ships", &self.ships)
            .finish()
    }
}
