use rand::rngs::SmallRng;
use thiserror::Error;

use crate::common::TurnOutcome;
use crate::grid::Coord;

/// Why a player could not produce a move.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The player asked to abandon the game.
    #[error("aborted by player")]
    Aborted,
    /// Every coordinate on the board has already been tried.
    #[error("no untried coordinates left")]
    Exhausted,
    #[error("input error: {0}")]
    Io(#[from] std::io::Error),
}

/// Interface implemented by different player types.
pub trait Player {
    /// Choose the next coordinate to fire at on a `board_size`×`board_size` grid.
    fn next_move(&mut self, rng: &mut SmallRng, board_size: usize) -> Result<Coord, PlayerError>;

    /// Inform the player of the result of its last shot.
    fn handle_attack_result(&mut self, _coord: Coord, _outcome: TurnOutcome) {}
}
