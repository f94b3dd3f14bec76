//! Per-move perft breakdown, for chasing move-generator bugs against a
//! reference engine's `divide` output.
//!
//! Usage:
//!   cargo run --release --example perft_divide -p chess_core -- [depth] [fen]
//!
//!   # Kiwipete at depth 3
//!   cargo run --release --example perft_divide -p chess_core -- 3 "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"

use chess_core::{Position, divide, san, sq_to_coord};
use std::env;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(4);

    let mut pos = match args.get(2) {
        Some(fen) => match Position::from_fen(fen) {
            Ok(pos) => pos,
            Err(e) => {
                eprintln!("bad FEN: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Position::startpos(),
    };

    println!("Position: {}", pos.to_fen());
    println!("Depth: {depth}");
    println!();

    let start = Instant::now();
    let breakdown = divide(&mut pos, depth);
    let elapsed = start.elapsed();

    let mut total = 0u64;
    for (mv, nodes) in &breakdown {
        let mut uci = format!("{}{}", sq_to_coord(mv.from), sq_to_coord(mv.to));
        if let Some(kind) = mv.promo {
            uci.push(kind.fen_char().to_ascii_lowercase());
        }
        println!("{uci:<6} {:<8} {nodes:>12}", san(&mut pos, *mv));
        total += nodes;
    }

    println!();
    println!("Moves: {}", breakdown.len());
    println!("Nodes: {total} in {elapsed:.3?}");
    ExitCode::SUCCESS
}
