use std::io::{BufRead, Write};

use anyhow::Context;
use battleship::{
    init_logging, AiPlayer, CliPlayer, Console, Game, GameConfig, GameError, GameResult, Mode,
    Party, Player, PlayerError, SharedConsole, MAX_BOARD_SIZE, MIN_BOARD_SIZE,
};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about = "Play Battleship in the terminal", long_about = None)]
struct Cli {
    /// Grid side length (10-15). Asked for interactively when omitted.
    #[arg(long)]
    size: Option<usize>,
    /// Single player against the computer, or two players sharing the terminal.
    #[arg(long, value_enum)]
    mode: Option<Mode>,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Let the computer work around its hits instead of guessing at random.
    #[arg(long)]
    smart_ai: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let console = Console::new(std::io::stdin().lock(), std::io::stdout()).shared();
    console.borrow_mut().say("Welcome to Battleship!")?;

    let outcome = run(&cli, &console, &mut rng);

    let mut out = console.borrow_mut();
    let failed = match outcome {
        Ok(result) => {
            out.say(format!("\n{}", result))?;
            false
        }
        Err(e) if is_abort(&e) => {
            out.say("\nGame aborted!")?;
            false
        }
        Err(e) => {
            log::error!("game failed: {:?}", e);
            out.say(format!("\nAn error occurred: {:#}", e))?;
            true
        }
    };
    out.say("\nThanks for playing!")?;
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn is_abort(e: &anyhow::Error) -> bool {
    matches!(e.downcast_ref::<PlayerError>(), Some(PlayerError::Aborted))
        || matches!(e.downcast_ref::<GameError>(), Some(GameError::Aborted))
}

fn run<R, W>(
    cli: &Cli,
    console: &SharedConsole<R, W>,
    rng: &mut SmallRng,
) -> anyhow::Result<GameResult>
where
    R: BufRead + 'static,
    W: Write + 'static,
{
    let size = match cli.size {
        Some(s) => s,
        None => console
            .borrow_mut()
            .prompt_board_size(MIN_BOARD_SIZE..=MAX_BOARD_SIZE)?,
    };
    let mode = match cli.mode {
        Some(m) => m,
        None => console.borrow_mut().prompt_mode()?,
    };
    let config = GameConfig::new(size, mode)?;
    log::info!("starting {} game on a {}x{} grid", mode, size, size);

    let player1: Box<dyn Player> = Box::new(CliPlayer::new(Party::One, console.clone()));
    let player2: Box<dyn Player> = match mode {
        Mode::Two => Box::new(CliPlayer::new(Party::Two, console.clone())),
        Mode::Single if cli.smart_ai => Box::new(AiPlayer::hunter()),
        Mode::Single => Box::new(AiPlayer::new()),
    };
    let mut game = Game::new(config, player1, player2)?;

    match play(&mut game, console, rng) {
        Err(e) if is_abort(&e) => {
            game.abort();
            Ok(GameResult::Aborted)
        }
        other => other,
    }
}

fn play<R, W>(
    game: &mut Game,
    console: &SharedConsole<R, W>,
    rng: &mut SmallRng,
) -> anyhow::Result<GameResult>
where
    R: BufRead + 'static,
    W: Write + 'static,
{
    console
        .borrow_mut()
        .say("\nPlace your ships:\n(Enter q at any prompt to abort the game)")?;
    place_fleet(game, Party::One, console, rng)?;
    match game.mode() {
        Mode::Two => place_fleet(game, Party::Two, console, rng)?,
        Mode::Single => {
            console.borrow_mut().say("\nComputer is placing ships...")?;
            game.place_automated_fleet(Party::Two, rng)
                .context("placing the computer's fleet")?;
        }
    }

    let single = game.mode() == Mode::Single;
    loop {
        let party = game.active_party().context("no party is due to move")?;
        let is_computer = single && party == Party::Two;
        {
            let mut con = console.borrow_mut();
            con.show_boards(game, party)?;
            if is_computer {
                con.prompt("\nPress Enter for computer's turn (or q to abort)...")?;
            }
        }

        let outcome = game.play_turn(party, rng)?;
        {
            let mut con = console.borrow_mut();
            if is_computer {
                con.say("\nComputer attacked!")?;
            }
            con.say(outcome.to_string())?;
        }

        if let Some(result) = game.is_game_over() {
            console.borrow_mut().show_boards(game, party)?;
            return Ok(result);
        }
    }
}

fn place_fleet<R, W>(
    game: &mut Game,
    party: Party,
    console: &SharedConsole<R, W>,
    rng: &mut SmallRng,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut con = console.borrow_mut();
    con.say(format!("\n{}, place your ships:", party))?;
    while let Some(def) = game.next_ship(party) {
        con.show_boards(game, party)?;
        let placed = match con.prompt_placement(def, game.board_size())? {
            None => game.place_random_ship(party, rng),
            Some((row, col, orientation)) => game.place_ship(party, row, col, orientation),
        };
        match placed {
            Ok(()) => {}
            Err(GameError::Board(e)) => {
                log::debug!("rejected placement of {}: {}", def.name(), e);
                con.say("Invalid placement! Ships cannot touch and must be within bounds.")?;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
