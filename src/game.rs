//! Two-party game: boards, players and turn sequencing.

use core::fmt;
use log::{debug, info};
use rand::rngs::SmallRng;

use crate::{
    board::Board,
    common::{GameError, TurnOutcome},
    config::{GameConfig, Mode, FLEET},
    player::{Player, PlayerError},
    ship::{Orientation, Ship, ShipType},
};

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub enum Party {
    One,
    Two,
}

impl Party {
    pub fn other(self) -> Self {
        match self {
            Party::One => Party::Two,
            Party::Two => Party::One,
        }
    }

    /// 1 or 2.
    pub fn number(self) -> u8 {
        match self {
            Party::One => 1,
            Party::Two => 2,
        }
    }

    fn index(self) -> usize {
        usize::from(self.number() - 1)
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Where the game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, nothing placed yet.
    Setup,
    /// The given party is placing its fleet.
    Placement(Party),
    /// Shots are being exchanged; the given party moves next.
    InProgress(Party),
    /// Terminal. No further moves are accepted.
    GameOver,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Aborted,
    Won { winner: Party, mode: Mode },
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Aborted => write!(f, "Game aborted!"),
            GameResult::Won {
                winner: Party::One,
                ..
            } => write!(f, "Congratulations! Player 1 won!"),
            GameResult::Won {
                winner: Party::Two,
                mode: Mode::Single,
            } => write!(f, "Game Over! Computer won!"),
            GameResult::Won {
                winner: Party::Two,
                mode: Mode::Two,
            } => write!(f, "Game Over! Player 2 won!"),
        }
    }
}

/// Core game logic holding both boards and both players.
pub struct Game {
    config: GameConfig,
    boards: [Board; 2],
    players: [Box<dyn Player>; 2],
    phase: Phase,
    aborted: bool,
    turns: usize,
    shots: [usize; 2],
}

impl Game {
    /// Create a game with two empty boards of the configured size.
    pub fn new(
        config: GameConfig,
        player1: Box<dyn Player>,
        player2: Box<dyn Player>,
    ) -> Result<Self, GameError> {
        let size = config.board_size();
        Ok(Self {
            config,
            boards: [Board::new(size)?, Board::new(size)?],
            players: [player1, player2],
            phase: Phase::Setup,
            aborted: false,
            turns: 0,
            shots: [0; 2],
        })
    }

    pub fn mode(&self) -> Mode {
        self.config.mode()
    }

    pub fn board_size(&self) -> usize {
        self.config.board_size()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The party due to fire next, while the game is in progress.
    pub fn active_party(&self) -> Option<Party> {
        match self.phase {
            Phase::InProgress(p) => Some(p),
            _ => None,
        }
    }

    /// The board owned by `party`.
    pub fn board(&self, party: Party) -> &Board {
        &self.boards[party.index()]
    }

    /// Accepted shots by both parties. Invalid targets are not counted.
    pub fn turns_played(&self) -> usize {
        self.turns
    }

    /// Accepted shots fired by `party`.
    pub fn shots_fired(&self, party: Party) -> usize {
        self.shots[party.index()]
    }

    /// Next fleet role `party` still has to place.
    pub fn next_ship(&self, party: Party) -> Option<ShipType> {
        FLEET.get(self.board(party).ships().len()).copied()
    }

    fn placing(&self, party: Party) -> Result<ShipType, GameError> {
        let allowed = match (self.phase, party) {
            (Phase::GameOver, _) => return Err(GameError::GameOver),
            (Phase::Setup, Party::One) => true,
            (Phase::Placement(p), _) => p == party,
            _ => false,
        };
        if !allowed {
            return Err(GameError::NotPlacing(party));
        }
        self.next_ship(party).ok_or(GameError::NotPlacing(party))
    }

    fn advance_placement(&mut self, party: Party) {
        if self.board(party).fleet_complete(&FLEET) {
            self.phase = match party {
                Party::One => Phase::Placement(Party::Two),
                Party::Two => Phase::InProgress(Party::One),
            };
            debug!("{} fleet complete, now {:?}", party, self.phase);
        } else if self.phase == Phase::Setup {
            self.phase = Phase::Placement(Party::One);
        }
    }

    /// Place `party`'s next fleet role at (`row`, `col`).
    ///
    /// Rejected placements leave the board untouched and can be retried.
    pub fn place_ship(
        &mut self,
        party: Party,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        let def = self.placing(party)?;
        self.boards[party.index()].place_ship(Ship::new(def), row, col, orientation)?;
        self.advance_placement(party);
        Ok(())
    }

    /// Place `party`'s next fleet role at a random legal position.
    pub fn place_random_ship(&mut self, party: Party, rng: &mut SmallRng) -> Result<(), GameError> {
        let def = self.placing(party)?;
        let board = &mut self.boards[party.index()];
        let (r, c, o) = board.random_placement(rng, def)?;
        board.place_ship(Ship::new(def), r, c, o)?;
        self.advance_placement(party);
        Ok(())
    }

    /// Place every remaining ship of `party` at random.
    pub fn place_automated_fleet(
        &mut self,
        party: Party,
        rng: &mut SmallRng,
    ) -> Result<(), GameError> {
        self.placing(party)?;
        if self.board(party).ships().is_empty() {
            self.boards[party.index()] = Board::random_fleet(self.board_size(), &FLEET, rng)?;
            self.advance_placement(party);
        } else {
            while self.next_ship(party).is_some() {
                self.place_random_ship(party, rng)?;
            }
        }
        Ok(())
    }

    /// Let `party` fire one shot at the opposing board.
    ///
    /// An `Invalid` outcome leaves the turn with `party`. If the player
    /// aborts, the game is aborted and `GameError::Aborted` returned.
    pub fn play_turn(
        &mut self,
        party: Party,
        rng: &mut SmallRng,
    ) -> Result<TurnOutcome, GameError> {
        match self.phase {
            Phase::GameOver => return Err(GameError::GameOver),
            Phase::InProgress(active) if active == party => {}
            _ => return Err(GameError::NotYourTurn(party)),
        }

        let size = self.board_size();
        let (row, col) = match self.players[party.index()].next_move(rng, size) {
            Ok(coord) => coord,
            Err(PlayerError::Aborted) => {
                self.abort();
                return Err(GameError::Aborted);
            }
            Err(source) => return Err(GameError::Player { party, source }),
        };

        let outcome = match self.boards[party.other().index()].receive_attack(row, col) {
            Ok(hit) => TurnOutcome::from_hit(hit),
            Err(e) => {
                debug!("{} shot rejected: {}", party, e);
                TurnOutcome::Invalid
            }
        };
        debug!("{} fired at ({}, {}): {:?}", party, row, col, outcome);
        self.players[party.index()].handle_attack_result((row, col), outcome);

        if outcome != TurnOutcome::Invalid {
            self.turns += 1;
            self.shots[party.index()] += 1;
        }
        if let Some(result) = self.is_game_over() {
            info!("{} after {} turns", result, self.turns);
            self.phase = Phase::GameOver;
        } else if outcome != TurnOutcome::Invalid {
            self.phase = Phase::InProgress(party.other());
        }
        Ok(outcome)
    }

    /// `Some(result)` once the game has ended.
    ///
    /// A fleet counts as destroyed only once it is complete, so a board
    /// without ships never loses.
    pub fn is_game_over(&self) -> Option<GameResult> {
        if self.aborted {
            return Some(GameResult::Aborted);
        }
        let destroyed = |party: Party| {
            let board = self.board(party);
            board.fleet_complete(&FLEET) && board.all_sunk()
        };
        let winner = if destroyed(Party::Two) {
            Party::One
        } else if destroyed(Party::One) {
            Party::Two
        } else {
            return None;
        };
        Some(GameResult::Won {
            winner,
            mode: self.mode(),
        })
    }

    /// Abandon the game. Irreversible.
    pub fn abort(&mut self) {
        if !self.aborted {
            info!("game aborted in {:?}", self.phase);
        }
        self.aborted = true;
        self.phase = Phase::GameOver;
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("aborted", &self.aborted)
            .field("turns", &self.turns)
            .field("boards", &self.boards)
            .finish()
    }
}
