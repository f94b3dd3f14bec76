use super::*;
use crate::eval::Evaluator;
use crate::search::{MATE_SCORE, SearchConfig};
use chess_core::{SearchControl, coord_to_sq, legal_moves};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn at(c: &str) -> u8 {
    coord_to_sq(c).unwrap()
}

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

const TWO_CAPTURES: &str = "4k3/8/8/3q1p2/4P3/8/8/4K3 w - - 0 1";
const BACK_RANK: &str = "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1";

#[test]
fn test_random_picks_a_legal_move() {
    let p = Position::startpos();
    let moves = legal_moves(&p);
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        assert!(moves.contains(&random(&moves, &mut rng).unwrap()));
    }
    assert_eq!(random(&[], &mut rng), None);
}

#[test]
fn test_easy_capture_bias() {
    let p = pos(TWO_CAPTURES);
    let moves = legal_moves(&p);
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let mv = easy(&p, &moves, 1.0, &mut rng).unwrap();
        assert_eq!(mv.from, at("e4"), "always a capture with full bias");
    }
    for _ in 0..20 {
        assert!(moves.contains(&easy(&p, &moves, 0.0, &mut rng).unwrap()));
    }
}

#[test]
fn test_medium_takes_the_most_valuable_capture() {
    let p = pos(TWO_CAPTURES);
    let moves = legal_moves(&p);
    let values = PieceValues::default();
    let mut rng = StdRng::seed_from_u64(9);
    assert_eq!(
        medium(&p, &moves, &values, 1.0, &mut rng),
        Some(Move::new(at("e4"), at("d5")))
    );
    // Without the bias it still only ever captures.
    for _ in 0..20 {
        let mv = medium(&p, &moves, &values, 0.0, &mut rng).unwrap();
        assert!(mv.to == at("d5") || mv.to == at("f5"));
    }
}

#[test]
fn test_medium_counts_en_passant_as_a_capture() {
    let p = pos("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
    let moves = legal_moves(&p);
    let mv = medium(&p, &moves, &PieceValues::default(), 1.0, &mut StdRng::seed_from_u64(0)).unwrap();
    assert!(mv.is_en_passant);
    assert_eq!(mv.to, at("d6"));
}

#[test]
fn test_medium_without_captures_is_uniform() {
    let p = Position::startpos();
    let moves = legal_moves(&p);
    let mv = medium(&p, &moves, &PieceValues::default(), 1.0, &mut StdRng::seed_from_u64(1));
    assert!(moves.contains(&mv.unwrap()));
}

#[test]
fn test_hard_and_advanced_find_mate_in_one() {
    let evaluator = Evaluator::default();
    let config = SearchConfig::default();
    let control = SearchControl::new();
    let mate = Move::new(at("a1"), at("a8"));

    let mut p = pos(BACK_RANK);
    let moves = legal_moves(&p);
    let mut searcher = Searcher::new(&evaluator, &config, &control);
    let outcome = hard(&mut searcher, &mut p, &moves);
    assert_eq!(outcome.best_move, Some(mate));
    assert_eq!(outcome.score, MATE_SCORE - 1);

    let mut searcher = Searcher::new(&evaluator, &config, &control);
    let outcome = advanced(&mut searcher, &mut p, &moves, config.advanced_reply_cap);
    assert_eq!(outcome.best_move, Some(mate));
    assert_eq!(p, pos(BACK_RANK));
}

#[test]
fn test_hard_takes_a_free_queen() {
    let evaluator = Evaluator::default();
    let config = SearchConfig::default();
    let control = SearchControl::new();
    let mut searcher = Searcher::new(&evaluator, &config, &control);
    let mut p = pos("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1");
    let moves = legal_moves(&p);
    let outcome = hard(&mut searcher, &mut p, &moves);
    assert_eq!(outcome.best_move, Some(Move::new(at("d1"), at("d5"))));
    assert_eq!(searcher.nodes, moves.len() as u64);
}

#[test]
fn test_advanced_sees_the_recapture() {
    let evaluator = Evaluator::default();
    let config = SearchConfig::default();
    let control = SearchControl::new();
    let mut searcher = Searcher::new(&evaluator, &config, &control);
    let mut p = pos("4k3/8/2p5/3p4/8/8/8/3QK3 w - - 0 1");
    let moves = legal_moves(&p);
    let outcome = advanced(&mut searcher, &mut p, &moves, config.advanced_reply_cap);
    assert!(outcome.best_move.is_some());
    assert_ne!(outcome.best_move, Some(Move::new(at("d1"), at("d5"))));
}

#[test]
fn test_stopped_tiers_report_it() {
    let evaluator = Evaluator::default();
    let config = SearchConfig::default();
    let control = SearchControl::new();
    control.stop();
    let mut searcher = Searcher::new(&evaluator, &config, &control);
    let mut p = Position::startpos();
    let moves = legal_moves(&p);
    let outcome = hard(&mut searcher, &mut p, &moves);
    assert!(outcome.stopped);
    assert_eq!(outcome.best_move, None);
}
