//! Self-play driver
//!
//! Plays the computer against itself and prints each game's move text.

mod record;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_core::Color;
use chess_session::{Level, Session, SessionConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use record::GameRecord;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Session config (TOML); defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 1)]
    games: u32,

    /// Level for White (name or 1-10); defaults to the config's level
    #[arg(long)]
    white: Option<Level>,

    /// Level for Black (name or 1-10); defaults to the config's level
    #[arg(long)]
    black: Option<Level>,

    /// Plies before an unfinished game is abandoned
    #[arg(long, default_value_t = 400)]
    max_plies: u32,

    /// Base seed; game `i` uses `seed + i`
    #[arg(long)]
    seed: Option<u64>,

    /// Write all games as JSON to this file
    #[arg(long)]
    json: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("loading session config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    config.computer_white = true;
    config.computer_black = true;
    let base_seed = args.seed.or(config.seed);
    let white = args.white.unwrap_or(config.level);
    let black = args.black.unwrap_or(config.level);

    let mut records = Vec::with_capacity(args.games as usize);
    for game in 0..args.games {
        config.seed = base_seed.map(|s| s.wrapping_add(u64::from(game)));
        let mut session = Session::new(config.clone());
        let record = play_game(&mut session, white, black, args.max_plies).await?;

        println!("[Game {}] {} vs {}", game + 1, white, black);
        println!("{}", record.movetext());
        info!(
            game = game + 1,
            result = record.result_tag(),
            plies = record.moves.len(),
            draw = ?record.draw,
            "game finished"
        );
        records.push(record);
    }

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&records)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

async fn play_game(
    session: &mut Session,
    white: Level,
    black: Level,
    max_plies: u32,
) -> Result<GameRecord> {
    for _ in 0..max_plies {
        if session.game().is_over() {
            break;
        }
        let level = match session.game().side_to_move() {
            Color::White => white,
            Color::Black => black,
        };
        if session.play_computer_move(level).await?.is_none() {
            break;
        }
    }
    Ok(GameRecord::from_session(session, white, black))
}
