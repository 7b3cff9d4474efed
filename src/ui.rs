#![cfg(feature = "cli")]

//! Line-oriented terminal I/O shared by human players and the game loop.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use crate::{
    config::Mode,
    game::{Game, Party},
    player::PlayerError,
    ship::{Orientation, ShipType},
};

/// Inputs that abandon the game from any prompt.
const ABORT_WORDS: [&str; 3] = ["q", "quit", "abort"];

/// A console handle that several players can share.
pub type SharedConsole<R, W> = Rc<RefCell<Console<R, W>>>;

/// Prompts on `W`, answers read line by line from `R`.
///
/// End of input and any of `q`, `quit`, `abort` surface as
/// [`PlayerError::Aborted`].
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Wrap for sharing between players.
    pub fn shared(self) -> SharedConsole<R, W> {
        Rc::new(RefCell::new(self))
    }

    /// Give back the output sink, e.g. to inspect what was written.
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, msg: impl AsRef<str>) -> Result<(), PlayerError> {
        writeln!(self.output, "{}", msg.as_ref())?;
        Ok(())
    }

    /// Print `msg` without a newline and read one trimmed line.
    pub fn prompt(&mut self, msg: &str) -> Result<String, PlayerError> {
        write!(self.output, "{}", msg)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PlayerError::Aborted);
        }
        let line = line.trim();
        if ABORT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w)) {
            return Err(PlayerError::Aborted);
        }
        Ok(line.to_string())
    }

    /// Prompt until the answer parses as a non-negative number.
    pub fn prompt_number(&mut self, msg: &str) -> Result<usize, PlayerError> {
        loop {
            match self.prompt(msg)?.parse() {
                Ok(n) => return Ok(n),
                Err(_) => self.say("Invalid input! Please enter valid numbers.")?,
            }
        }
    }

    /// Prompt for a board size until it lies in `range`.
    pub fn prompt_board_size(
        &mut self,
        range: std::ops::RangeInclusive<usize>,
    ) -> Result<usize, PlayerError> {
        let msg = format!("Enter grid size ({}-{}): ", range.start(), range.end());
        loop {
            let size = self.prompt_number(&msg)?;
            if range.contains(&size) {
                return Ok(size);
            }
            self.say(format!(
                "Grid size must be between {} and {}!",
                range.start(),
                range.end()
            ))?;
        }
    }

    /// Prompt for `1` (single player) or `2` (two players).
    pub fn prompt_mode(&mut self) -> Result<Mode, PlayerError> {
        loop {
            match self
                .prompt("Select game mode (1 for Single Player, 2 for Two Players): ")?
                .as_str()
            {
                "1" => return Ok(Mode::Single),
                "2" => return Ok(Mode::Two),
                _ => self.say("Please enter 1 or 2!")?,
            }
        }
    }

    /// Read an attack coordinate. Range is not checked here.
    pub fn prompt_attack(
        &mut self,
        party: Party,
        board_size: usize,
    ) -> Result<(usize, usize), PlayerError> {
        self.say(format!("\n{}'s turn!", party))?;
        let max = board_size.saturating_sub(1);
        let row = self.prompt_number(&format!("Enter attack row (0-{}): ", max))?;
        let col = self.prompt_number(&format!("Enter column (0-{}): ", max))?;
        Ok((row, col))
    }

    /// Read a placement for `def`. An empty row answer asks for random placement.
    pub fn prompt_placement(
        &mut self,
        def: ShipType,
        board_size: usize,
    ) -> Result<Option<(usize, usize, Orientation)>, PlayerError> {
        self.say(format!("\nPlacing {} (size: {})", def.name(), def.size()))?;
        let max = board_size.saturating_sub(1);
        let row = loop {
            let answer = self.prompt(&format!("Enter row (0-{}, empty for random): ", max))?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse() {
                Ok(n) => break n,
                Err(_) => self.say("Invalid input! Please enter valid numbers.")?,
            }
        };
        let col = self.prompt_number(&format!("Enter column (0-{}): ", max))?;
        let horizontal = self.prompt("Place horizontally? (y/n): ")?;
        let orientation = if horizontal.eq_ignore_ascii_case("y") {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        Ok(Some((row, col, orientation)))
    }

    /// Show `party`'s own board and the opponent's board with ships hidden.
    pub fn show_boards(&mut self, game: &Game, party: Party) -> Result<(), PlayerError> {
        self.say(format!("\n{}'s Board:", party))?;
        self.say(game.board(party).render(false))?;
        self.say("\nOpponent's Board:")?;
        self.say(game.board(party.other()).render(true))
    }
}
