use anyhow::Context;
use battleship::prelude::*;
use clap::Parser;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Play one computer-vs-computer game and print a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    seed1: u64,
    seed2: u64,
    #[arg(long, default_value_t = battleship::DEFAULT_BOARD_SIZE)]
    size: usize,
    /// Give both computers hunt/target follow-ups.
    #[arg(long)]
    smart: bool,
}

fn computer(smart: bool) -> Box<dyn Player> {
    if smart {
        Box::new(AiPlayer::hunter())
    } else {
        Box::new(AiPlayer::new())
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let mut rng1 = SmallRng::seed_from_u64(args.seed1);
    let mut rng2 = SmallRng::seed_from_u64(args.seed2);

    let config = GameConfig::new(args.size, Mode::Two)?;
    let mut game = Game::new(config, computer(args.smart), computer(args.smart))?;
    game.place_automated_fleet(Party::One, &mut rng1)
        .context("placing fleet for player 1")?;
    game.place_automated_fleet(Party::Two, &mut rng2)
        .context("placing fleet for player 2")?;

    let result = loop {
        let party = game.active_party().context("no party is due to move")?;
        let rng = match party {
            Party::One => &mut rng1,
            Party::Two => &mut rng2,
        };
        game.play_turn(party, rng)?;
        if let Some(result) = game.is_game_over() {
            break result;
        }
    };

    let winner = match result {
        GameResult::Won { winner, .. } => Some(winner),
        GameResult::Aborted => None,
    };
    let summary = json!({
        "player1": {
            "shots": game.shots_fired(Party::One),
            "ships_left": game.board(Party::One).remaining_ships(),
        },
        "player2": {
            "shots": game.shots_fired(Party::Two),
            "ships_left": game.board(Party::Two).remaining_ships(),
        },
        "turns": game.turns_played(),
        "winner": winner,
        "message": result.to_string(),
    });

    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
