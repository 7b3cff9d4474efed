//! Commonly used types and utilities for ease of import.

pub use crate::{
    AiPlayer, Board, GameConfig, Game, GameError, GameResult, Mode, Orientation, Party, Phase,
    Player, Ship, TurnOutcome, FLEET,
};

#[cfg(feature = "cli")]
pub use crate::{init_logging, CliPlayer, Console};
