use std::collections::{HashSet, VecDeque};

use log::trace;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::common::TurnOutcome;
use crate::grid::Coord;
use crate::player::{Player, PlayerError};

/// Computer opponent.
///
/// Follow-up targets are consumed before any random guess. The plain
/// opponent never queues any; [`AiPlayer::hunter`] queues the orthogonal
/// neighbours of every hit and, once the ship sinks, rules out every cell
/// bordering it.
#[derive(Debug, Default)]
pub struct AiPlayer {
    tried: HashSet<Coord>,
    follow_up: VecDeque<Coord>,
    /// Hits on the ship currently being hunted.
    wounded: Vec<Coord>,
    hunt: bool,
    board_size: usize,
}

impl AiPlayer {
    /// Random-guess opponent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opponent that works around each hit until the ship sinks.
    pub fn hunter() -> Self {
        Self {
            hunt: true,
            ..Self::default()
        }
    }

    /// Coordinates already chosen.
    pub fn tried(&self) -> &HashSet<Coord> {
        &self.tried
    }

    /// Pending priority targets, in the order they will be fired.
    pub fn follow_up(&self) -> &VecDeque<Coord> {
        &self.follow_up
    }

    /// Queue `coord` to be fired at before falling back to random guesses.
    pub fn push_follow_up(&mut self, coord: Coord) {
        if !self.tried.contains(&coord) && !self.follow_up.contains(&coord) {
            self.follow_up.push_back(coord);
        }
    }

    fn in_bounds(&self, (r, c): Coord) -> bool {
        r < self.board_size && c < self.board_size
    }

    fn offset(&self, (r, c): Coord, dr: isize, dc: isize) -> Option<Coord> {
        let coord = (r.checked_add_signed(dr)?, c.checked_add_signed(dc)?);
        self.in_bounds(coord).then_some(coord)
    }
}

impl Player for AiPlayer {
    fn next_move(&mut self, rng: &mut SmallRng, board_size: usize) -> Result<Coord, PlayerError> {
        self.board_size = board_size;
        while let Some(coord) = self.follow_up.pop_front() {
            if self.tried.insert(coord) {
                trace!("follow-up target {:?}", coord);
                return Ok(coord);
            }
        }
        if self.tried.len() >= board_size * board_size {
            return Err(PlayerError::Exhausted);
        }
        loop {
            let coord = (
                rng.random_range(0..board_size),
                rng.random_range(0..board_size),
            );
            if self.tried.insert(coord) {
                return Ok(coord);
            }
        }
    }

    fn handle_attack_result(&mut self, coord: Coord, outcome: TurnOutcome) {
        if !self.hunt || !outcome.is_hit() {
            return;
        }
        self.wounded.push(coord);
        if let TurnOutcome::Sunk(name) = outcome {
            // Everything around a sunk ship is water.
            for (r, c) in std::mem::take(&mut self.wounded) {
                for dr in -1..=1 {
                    for dc in -1..=1 {
                        if let Some(around) = self.offset((r, c), dr, dc) {
                            self.tried.insert(around);
                        }
                    }
                }
            }
            trace!("{} sunk, dropping {} follow-ups", name, self.follow_up.len());
            self.follow_up.clear();
            return;
        }
        // Ships never touch, so diagonal neighbours of a hit are water.
        for (dr, dc) in [(-1, -1), (-1, 1), (1, -1), (1, 1)] {
            if let Some(diag) = self.offset(coord, dr, dc) {
                self.tried.insert(diag);
            }
        }
        for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            if let Some(next) = self.offset(coord, dr, dc) {
                self.push_follow_up(next);
            }
        }
    }
}
