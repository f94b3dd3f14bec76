//! Move-path enumeration for verifying the generator against known node counts.

use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Number of leaf positions reachable from `pos` in exactly `depth` plies.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    count(pos, &mut layers[..])
}

/// Per-root-move breakdown of [`perft`], in generation order.
pub fn divide(pos: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    let mut roots = Vec::with_capacity(64);
    legal_moves_into(pos, &mut roots);
    let mut layers = vec![Vec::with_capacity(64); depth.saturating_sub(1) as usize];
    roots
        .into_iter()
        .map(|mv| {
            let mut child = pos.play(mv);
            (mv, count(&mut child, &mut layers[..]))
        })
        .collect()
}

// One scratch buffer per remaining ply keeps the walk allocation-free.
fn count(pos: &mut Position, layers: &mut [Vec<Move>]) -> u64 {
    let Some((buf, rest)) = layers.split_first_mut() else {
        return 1;
    };
    legal_moves_into(pos, buf);
    if rest.is_empty() {
        return buf.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in buf.iter().copied() {
        let mut child = pos.play(mv);
        nodes += count(&mut child, rest);
    }
    nodes
}
