//! Monkey Typer - headless demo
//!
//! Plays one round with the autopilot and records the result.
//!
//! The data directory holds `settings.json`, `highscores.json` and a
//! `dictionary/` folder of word lists.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use monkey_typer::sim::Autopilot;
use monkey_typer::{Game, HighScores, Settings, WordBank};

/// Simulated display refresh
const FRAME_DT: f32 = 1.0 / 60.0;

/// Play a round of Monkey Typer with the autopilot at the keyboard
#[derive(Parser, Debug)]
#[command(name = "monkey-typer", version, about)]
struct Args {
    /// Seed for word selection and placement
    #[arg(short, long, default_value_t = 0x5eed)]
    seed: u64,

    /// Directory with settings, high scores and word lists
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Stop the round after this many seconds
    #[arg(short, long, default_value_t = 300.0)]
    max_seconds: f32,

    /// Autopilot typing speed in characters per second (5 is about 60 WPM)
    #[arg(short, long, default_value_t = 5.0)]
    typing_speed: f32,

    /// Name recorded on the leaderboard
    #[arg(short, long, default_value = "autopilot")]
    name: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Monkey Typer (headless) starting...");

    let settings_path = args.data_dir.join("settings.json");
    let scores_path = args.data_dir.join("highscores.json");
    let settings = Settings::load(&settings_path);
    let words = WordBank::load_dir(&args.data_dir.join("dictionary"));
    let high_scores = HighScores::load(&scores_path);
    log::info!("Word sets: {}", words.names().join(", "));

    let mut game = Game::new(settings, words, high_scores, args.seed);
    game.autopilot = Some(Autopilot::new(args.typing_speed));
    let round_seed = game.start_round();
    log::info!("Round seed {round_seed}");

    let mut wall_time = 0.0;
    while wall_time < args.max_seconds {
        game.update(FRAME_DT);
        wall_time += FRAME_DT;
        if game.round().is_some_and(|r| r.is_over()) {
            break;
        }
    }
    game.end_round();

    let Some(round) = game.round() else {
        return ExitCode::FAILURE;
    };
    let stats = &round.stats;
    println!(
        "score {}  words {}  wpm {:.1}  accuracy {:.1}%  time {:.1}s",
        stats.score, stats.words_typed, stats.wpm, stats.accuracy, stats.elapsed
    );

    if game.is_high_score_eligible() {
        if let Some(rank) = game.submit_high_score(&args.name) {
            println!("new high score, rank {rank}");
        }
        if let Err(e) = game.high_scores.save(&scores_path) {
            log::error!("Failed to save high scores: {e}");
            return ExitCode::FAILURE;
        }
    }
    for (i, entry) in game.high_scores.top_entries().iter().enumerate() {
        println!("{:>2}. {:<20} {}", i + 1, entry.name, entry.score);
    }

    if !settings_path.exists() {
        if let Err(e) = game.settings.save(&settings_path) {
            log::warn!("Failed to write default settings: {e}");
        }
    }

    ExitCode::SUCCESS
}
