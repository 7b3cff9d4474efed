use core::fmt;

use crate::common::ConfigError;
use crate::ship::ShipType;

pub const MIN_BOARD_SIZE: usize = 10;
pub const MAX_BOARD_SIZE: usize = 15;
pub const DEFAULT_BOARD_SIZE: usize = 10;

pub const NUM_SHIPS: usize = 5;
pub const FLEET: [ShipType; NUM_SHIPS] = [
    ShipType::new("Carrier", 5),
    ShipType::new("Battleship", 4),
    ShipType::new("Cruiser", 3),
    ShipType::new("Submarine", 3),
    ShipType::new("Destroyer", 2),
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = fleet_cells(&FLEET);

const fn fleet_cells(fleet: &[ShipType]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < fleet.len() {
        total += fleet[i].size();
        i += 1;
    }
    total
}

/// Random samples tried for a single ship before giving up on the layout.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1_000;

/// Fresh-board restarts allowed when laying out a whole fleet at random.
pub const MAX_LAYOUT_RESTARTS: usize = 100;

/// Who sits in the second seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Mode {
    /// Party 2 is the computer.
    #[default]
    Single,
    /// Two humans share the terminal.
    Two,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Single => write!(f, "single player"),
            Mode::Two => write!(f, "two players"),
        }
    }
}

/// Validated settings for a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    board_size: usize,
    mode: Mode,
}

impl GameConfig {
    pub fn new(board_size: usize, mode: Mode) -> Result<Self, ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&board_size) {
            return Err(ConfigError::BoardSize(board_size));
        }
        Ok(Self { board_size, mode })
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            mode: Mode::Single,
        }
    }
}
