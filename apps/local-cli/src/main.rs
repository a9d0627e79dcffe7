use std::time::Duration;

use bisca::domain::{CardId, Difficulty, GameState, Phase};
use bisca::{LocalGame, LocalGameConfig};
use clap::{Parser, ValueEnum};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

mod commands;
mod render;

use commands::Command;

#[derive(Clone, Copy, ValueEnum)]
enum Level {
    Easy,
    Medium,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Medium => Difficulty::Medium,
            Level::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser)]
#[command(name = "bisca-local")]
#[command(about = "Play Bisca in the terminal against computer opponents")]
struct Args {
    /// Your name at the table
    #[arg(short, long, default_value = "You")]
    nickname: String,

    /// Number of computer opponents
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=4))]
    opponents: u8,

    /// How well the computer plays
    #[arg(short, long, value_enum, default_value = "medium")]
    difficulty: Level,

    /// Fix the deal and the opponents' choices
    #[arg(long)]
    seed: Option<u64>,

    /// How long a finished trick stays on the table, in milliseconds
    #[arg(long, default_value_t = 1500)]
    trick_ms: u64,
}

const HUMAN_ID: &str = "human";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let mut config = LocalGameConfig::new(HUMAN_ID, args.nickname.trim())
        .with_ai(args.opponents as usize, args.difficulty.into())
        .with_trick_clear_delay(Duration::from_millis(args.trick_ms));
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let game = match LocalGame::new(config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(2);
        }
    };

    let (tx, mut updates) = mpsc::unbounded_channel::<GameState>();
    game.subscribe(move |state| {
        let _ = tx.send(state.clone());
    });

    println!("{}", commands::HELP);
    game.start_game();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(state) = updates.recv() => {
                print!("{}", render::render(&state, HUMAN_ID));
                if state.phase == Phase::GameEnd {
                    break;
                }
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        eprintln!("stdin: {e}");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match commands::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(cmd) => run(&game, cmd),
                    Err(msg) => println!("{msg}"),
                }
            }
        }
    }

    game.destroy();
}

fn run(game: &LocalGame, cmd: Command) {
    let applied = match cmd {
        Command::Bet(bet) => game.place_bet(HUMAN_ID, bet),
        Command::Play {
            position,
            ace_is_high,
        } => {
            let state = game.state();
            let card: Option<CardId> = state
                .player(HUMAN_ID)
                .and_then(|me| me.hand.get(position - 1))
                .map(|c| c.id.clone());
            match card {
                Some(card) => game.play_card(HUMAN_ID, &card, ace_is_high),
                None => {
                    println!("no card {position} in your hand");
                    return;
                }
            }
        }
        Command::Ready => game.mark_ready(HUMAN_ID),
        Command::Show => {
            print!("{}", render::render(&game.state(), HUMAN_ID));
            return;
        }
        Command::Help => {
            println!("{}", commands::HELP);
            return;
        }
        Command::Quit => return,
    };
    if !applied {
        println!("not allowed right now");
    }
}
