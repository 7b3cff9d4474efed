#![cfg(feature = "cli")]

use std::io::{BufRead, Write};

use rand::rngs::SmallRng;

use crate::{
    common::TurnOutcome,
    game::Party,
    grid::Coord,
    player::{Player, PlayerError},
    ui::SharedConsole,
};

/// Human player typing coordinates into a console.
pub struct CliPlayer<R, W> {
    party: Party,
    console: SharedConsole<R, W>,
}

impl<R: BufRead, W: Write> CliPlayer<R, W> {
    pub fn new(party: Party, console: SharedConsole<R, W>) -> Self {
        Self { party, console }
    }
}

impl<R: BufRead, W: Write> Player for CliPlayer<R, W> {
    fn next_move(&mut self, _rng: &mut SmallRng, board_size: usize) -> Result<Coord, PlayerError> {
        self.console
            .borrow_mut()
            .prompt_attack(self.party, board_size)
    }

    fn handle_attack_result(&mut self, coord: Coord, outcome: TurnOutcome) {
        log::debug!("{} fired at {:?} -> {:?}", self.party, coord, outcome);
    }
}
