use std::collections::VecDeque;

use battleship::{
    AiPlayer, Coord, Game, GameConfig, GameError, GameResult, Mode, Orientation, Party, Phase,
    Player, PlayerError, TurnOutcome, FLEET, TOTAL_SHIP_CELLS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};

/// Fires a fixed list of shots, then asks to abort.
struct Scripted(VecDeque<Coord>);

impl Scripted {
    fn boxed(shots: impl IntoIterator<Item = Coord>) -> Box<dyn Player> {
        Box::new(Scripted(shots.into_iter().collect()))
    }

    /// A player that aborts on its first move.
    fn idle() -> Box<dyn Player> {
        Self::boxed(Vec::<Coord>::new())
    }
}

impl Player for Scripted {
    fn next_move(&mut self, _rng: &mut SmallRng, _board_size: usize) -> Result<Coord, PlayerError> {
        self.0.pop_front().ok_or(PlayerError::Aborted)
    }
}

/// Rows 0, 2, 4, 6, 8 from column 0, one ship per row.
const LAYOUT: [(usize, usize); 5] = [(0, 0), (2, 0), (4, 0), (6, 0), (8, 0)];

fn layout_cells() -> Vec<Coord> {
    LAYOUT
        .iter()
        .zip(FLEET.iter())
        .flat_map(|(&(r, c), def)| (0..def.size()).map(move |i| (r, c + i)))
        .collect()
}

/// Column 9 then column 8: never a ship in `LAYOUT`.
fn water() -> Vec<Coord> {
    (0..10).map(|r| (r, 9)).chain((0..10).map(|r| (r, 8))).collect()
}

fn place_layout(game: &mut Game, party: Party) {
    for &(r, c) in LAYOUT.iter() {
        game.place_ship(party, r, c, Orientation::Horizontal).unwrap();
    }
}

fn ready_game(mode: Mode, p1: Box<dyn Player>, p2: Box<dyn Player>) -> Game {
    let mut game = Game::new(GameConfig::new(10, mode).unwrap(), p1, p2).unwrap();
    place_layout(&mut game, Party::One);
    place_layout(&mut game, Party::Two);
    game
}

#[test]
fn test_config_rejects_bad_sizes() {
    assert!(GameConfig::new(9, Mode::Single).is_err());
    assert!(GameConfig::new(16, Mode::Two).is_err());
    let config = GameConfig::new(15, Mode::Two).unwrap();
    assert_eq!(config.board_size(), 15);
    assert_eq!(config.mode(), Mode::Two);
}

#[test]
fn test_placement_phases() {
    let mut rng = SmallRng::seed_from_u64(3);
    let config = GameConfig::new(10, Mode::Single).unwrap();
    let mut game =
        Game::new(config, Box::new(AiPlayer::new()), Box::new(AiPlayer::new())).unwrap();
    assert_eq!(game.phase(), Phase::Setup);
    assert_eq!(game.next_ship(Party::One), Some(FLEET[0]));

    assert!(matches!(
        game.place_ship(Party::Two, 0, 0, Orientation::Horizontal),
        Err(GameError::NotPlacing(Party::Two))
    ));
    assert!(matches!(
        game.play_turn(Party::One, &mut rng),
        Err(GameError::NotYourTurn(Party::One))
    ));

    game.place_ship(Party::One, 0, 0, Orientation::Horizontal).unwrap();
    assert_eq!(game.phase(), Phase::Placement(Party::One));
    assert_eq!(game.next_ship(Party::One), Some(FLEET[1]));

    // a rejected placement keeps the same role pending
    assert!(matches!(
        game.place_ship(Party::One, 1, 0, Orientation::Horizontal),
        Err(GameError::Board(_))
    ));
    assert_eq!(game.next_ship(Party::One), Some(FLEET[1]));

    game.place_automated_fleet(Party::One, &mut rng).unwrap();
    assert_eq!(game.phase(), Phase::Placement(Party::Two));
    assert_eq!(game.next_ship(Party::One), None);
    assert!(matches!(
        game.place_random_ship(Party::One, &mut rng),
        Err(GameError::NotPlacing(Party::One))
    ));

    game.place_automated_fleet(Party::Two, &mut rng).unwrap();
    assert_eq!(game.phase(), Phase::InProgress(Party::One));
    assert_eq!(game.active_party(), Some(Party::One));
    assert_eq!(game.board(Party::Two).ships().len(), FLEET.len());
}

#[test]
fn test_incomplete_fleets_never_lose() {
    let config = GameConfig::new(10, Mode::Two).unwrap();
    let mut game = Game::new(config, Scripted::idle(), Scripted::idle()).unwrap();
    assert!(game.is_game_over().is_none());
    place_layout(&mut game, Party::One);
    assert!(game.is_game_over().is_none());
    game.place_ship(Party::Two, 0, 0, Orientation::Horizontal).unwrap();
    assert!(game.is_game_over().is_none());
}

#[test]
fn test_player_one_wins() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut game = ready_game(
        Mode::Single,
        Scripted::boxed(layout_cells()),
        Scripted::boxed(water()),
    );

    let mut last = TurnOutcome::Invalid;
    while game.is_game_over().is_none() {
        let party = game.active_party().unwrap();
        last = game.play_turn(party, &mut rng).unwrap();
        if party == Party::Two {
            assert_eq!(last, TurnOutcome::Miss);
        }
    }

    assert_eq!(last, TurnOutcome::Sunk("Destroyer"));
    assert_eq!(last.to_string(), "Hit! You sunk the Destroyer!");
    let result = game.is_game_over().unwrap();
    assert_eq!(
        result,
        GameResult::Won {
            winner: Party::One,
            mode: Mode::Single
        }
    );
    assert_eq!(result.to_string(), "Congratulations! Player 1 won!");
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.shots_fired(Party::One), 17);
    assert_eq!(game.shots_fired(Party::Two), 16);
    assert_eq!(game.turns_played(), 33);

    assert!(matches!(
        game.play_turn(Party::Two, &mut rng),
        Err(GameError::GameOver)
    ));
}

#[test]
fn test_computer_wins_single_player() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut game = ready_game(
        Mode::Single,
        Scripted::boxed(water()),
        Scripted::boxed(layout_cells()),
    );

    let mut last = TurnOutcome::Invalid;
    while game.is_game_over().is_none() {
        let party = game.active_party().unwrap();
        last = game.play_turn(party, &mut rng).unwrap();
        if party == Party::One {
            assert_eq!(last, TurnOutcome::Miss);
        }
    }

    assert_eq!(last, TurnOutcome::Sunk("Destroyer"));
    let result = game.is_game_over().unwrap();
    assert_eq!(
        result,
        GameResult::Won {
            winner: Party::Two,
            mode: Mode::Single
        }
    );
    assert_eq!(result.to_string(), "Game Over! Computer won!");
    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.board(Party::One).all_sunk());
    assert_eq!(game.board(Party::Two).remaining_ships(), FLEET.len());
    assert_eq!(game.shots_fired(Party::One), 17);
    assert_eq!(game.shots_fired(Party::Two), 17);
    assert_eq!(game.turns_played(), 34);
}

#[test]
fn test_player_two_win_messages() {
    let computer = GameResult::Won {
        winner: Party::Two,
        mode: Mode::Single,
    };
    let human = GameResult::Won {
        winner: Party::Two,
        mode: Mode::Two,
    };
    assert_eq!(computer.to_string(), "Game Over! Computer won!");
    assert_eq!(human.to_string(), "Game Over! Player 2 won!");
    assert_eq!(GameResult::Aborted.to_string(), "Game aborted!");
}

#[test]
fn test_outcome_messages() {
    assert_eq!(TurnOutcome::Invalid.to_string(), "Invalid attack position!");
    assert_eq!(TurnOutcome::Hit.to_string(), "Hit!");
    assert_eq!(TurnOutcome::Miss.to_string(), "Miss!");
    assert!(TurnOutcome::Hit.is_hit());
    assert!(TurnOutcome::Sunk("Cruiser").is_hit());
    assert!(!TurnOutcome::Miss.is_hit());
    assert!(!TurnOutcome::Invalid.is_hit());
}

#[test]
fn test_fleet_cell_total() {
    let total: usize = FLEET.iter().map(|def| def.size()).sum();
    assert_eq!(TOTAL_SHIP_CELLS, total);
    assert_eq!(TOTAL_SHIP_CELLS, 17);
}

#[test]
fn test_invalid_shot_keeps_turn() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut game = ready_game(
        Mode::Two,
        Scripted::boxed([(5, 5), (5, 5), (42, 0), (0, 0)]),
        Scripted::boxed([(9, 9), (8, 8)]),
    );

    assert_eq!(game.play_turn(Party::One, &mut rng).unwrap(), TurnOutcome::Miss);
    assert_eq!(game.active_party(), Some(Party::Two));
    assert_eq!(game.play_turn(Party::Two, &mut rng).unwrap(), TurnOutcome::Miss);

    assert_eq!(game.play_turn(Party::One, &mut rng).unwrap(), TurnOutcome::Invalid);
    assert_eq!(game.active_party(), Some(Party::One));
    assert_eq!(game.play_turn(Party::One, &mut rng).unwrap(), TurnOutcome::Invalid);
    assert_eq!(game.active_party(), Some(Party::One));
    assert_eq!(game.turns_played(), 2);

    assert_eq!(game.play_turn(Party::One, &mut rng).unwrap(), TurnOutcome::Hit);
    assert_eq!(game.active_party(), Some(Party::Two));
    assert!(matches!(
        game.play_turn(Party::One, &mut rng),
        Err(GameError::NotYourTurn(Party::One))
    ));
}

#[test]
fn test_player_abort_ends_game() {
    let mut rng = SmallRng::seed_from_u64(0);
    let mut game = ready_game(Mode::Two, Scripted::idle(), Scripted::idle());

    assert!(matches!(
        game.play_turn(Party::One, &mut rng),
        Err(GameError::Aborted)
    ));
    assert!(game.is_aborted());
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.is_game_over(), Some(GameResult::Aborted));
    assert!(matches!(
        game.play_turn(Party::One, &mut rng),
        Err(GameError::GameOver)
    ));
}

#[test]
fn test_abort_is_terminal() {
    let mut rng = SmallRng::seed_from_u64(0);
    let config = GameConfig::new(11, Mode::Single).unwrap();
    let mut game =
        Game::new(config, Box::new(AiPlayer::new()), Box::new(AiPlayer::new())).unwrap();
    game.abort();
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.is_game_over(), Some(GameResult::Aborted));
    assert!(matches!(
        game.place_automated_fleet(Party::One, &mut rng),
        Err(GameError::GameOver)
    ));
    game.abort();
    assert_eq!(game.is_game_over(), Some(GameResult::Aborted));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn active_party_alternates(seed in any::<u64>(), turns in 0..30usize) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let config = GameConfig::new(10, Mode::Single).unwrap();
        let mut game =
            Game::new(config, Box::new(AiPlayer::new()), Box::new(AiPlayer::new())).unwrap();
        game.place_automated_fleet(Party::One, &mut rng).unwrap();
        game.place_automated_fleet(Party::Two, &mut rng).unwrap();

        // each side needs 17 hits, so 30 shots cannot finish the game
        for _ in 0..turns {
            let party = game.active_party().unwrap();
            let outcome = game.play_turn(party, &mut rng).unwrap();
            prop_assert_ne!(outcome, TurnOutcome::Invalid);
        }
        let expected = if turns % 2 == 0 { Party::One } else { Party::Two };
        prop_assert_eq!(game.active_party(), Some(expected));
        prop_assert_eq!(game.turns_played(), turns);
    }
}
