//! Two-party grid battle game engine.
//!
//! Each party places a fixed fleet on a private square grid, then the parties
//! take turns firing at the opponent's grid until one fleet is destroyed.
//! The terminal front end and the simulator live in the binaries; everything
//! they need is exported from here.

mod board;
mod common;
mod config;
mod game;
mod grid;
#[cfg(feature = "cli")]
mod logging;
mod player;
mod player_ai;
#[cfg(feature = "cli")]
mod player_cli;
pub mod prelude;
mod ship;
#[cfg(feature = "cli")]
pub mod ui;

pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use grid::*;
#[cfg(feature = "cli")]
pub use logging::{init_logging, level_from_env, LOG_ENV};
pub use player::*;
pub use player_ai::*;
#[cfg(feature = "cli")]
pub use player_cli::*;
pub use ship::*;
#[cfg(feature = "cli")]
pub use ui::{Console, SharedConsole};
