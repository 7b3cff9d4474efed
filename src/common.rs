//! Common types for Battleship: errors and turn outcomes.

use core::fmt;
use thiserror::Error;

use crate::config::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::game::Party;
use crate::player::PlayerError;
use crate::ship::Ship;

/// Result of a resolved turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The target was out of bounds or already fired at. Nothing changed.
    Invalid,
    /// Shot missed all ships.
    Miss,
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot sank a ship, carrying its name.
    Sunk(&'static str),
}

impl TurnOutcome {
    /// Classify an accepted attack from the ship it hit, if any.
    pub fn from_hit(ship: Option<&Ship>) -> Self {
        match ship {
            Some(s) if s.is_sunk() => TurnOutcome::Sunk(s.name()),
            Some(_) => TurnOutcome::Hit,
            None => TurnOutcome::Miss,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, TurnOutcome::Hit | TurnOutcome::Sunk(_))
    }
}

impl fmt::Display for TurnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnOutcome::Invalid => write!(f, "Invalid attack position!"),
            TurnOutcome::Miss => write!(f, "Miss!"),
            TurnOutcome::Hit => write!(f, "Hit!"),
            TurnOutcome::Sunk(name) => write!(f, "Hit! You sunk the {}!", name),
        }
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size {0} is outside {min}..={max}", min = MIN_BOARD_SIZE, max = MAX_BOARD_SIZE)]
    InvalidSize(usize),
    #[error("({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("ship is already placed on a board")]
    ShipAlreadyPlaced,
    #[error("({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },
    #[error("ship at ({row}, {col}) would touch another ship")]
    ShipsTouching { row: usize, col: usize },
    #[error("({row}, {col}) has already been attacked")]
    AlreadyAttacked { row: usize, col: usize },
    #[error("unable to place {0}")]
    UnableToPlaceShip(&'static str),
    #[error("no ship owns the occupied cell ({row}, {col})")]
    UnknownShipHit { row: usize, col: usize },
}

/// Errors raised while validating game settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(
        "grid size must be between {min} and {max}, got {0}",
        min = MIN_BOARD_SIZE,
        max = MAX_BOARD_SIZE
    )]
    BoardSize(usize),
}

/// Errors returned by Game operations.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("it is not {0}'s turn")]
    NotYourTurn(Party),
    #[error("{0} cannot place ships now")]
    NotPlacing(Party),
    #[error("game aborted")]
    Aborted,
    #[error("the game is over")]
    GameOver,
    #[error("{party} failed to move: {source}")]
    Player {
        party: Party,
        #[source]
        source: PlayerError,
    },
}
