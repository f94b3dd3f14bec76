use super::*;
use chess_core::coord_to_sq;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn at(c: &str) -> u8 {
    coord_to_sq(c).unwrap()
}

fn run(fen: &str, depth: u8, algorithm: Algorithm, seed: u64) -> (SearchOutcome, u64) {
    let evaluator = Evaluator::default();
    let config = SearchConfig::default();
    let control = SearchControl::new();
    let mut searcher = Searcher::new(&evaluator, &config, &control);
    let mut pos = Position::from_fen(fen).unwrap();
    let before = pos.clone();
    let outcome = searcher.search_root(&mut pos, depth, algorithm, &mut StdRng::seed_from_u64(seed));
    assert_eq!(pos, before, "search must leave the position untouched");
    (outcome, searcher.nodes)
}

const MIDGAME: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
const BACK_RANK: &str = "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1";

#[test]
fn test_alpha_beta_matches_minimax_score() {
    for depth in 1..=3 {
        let (minimax, minimax_nodes) = run(MIDGAME, depth, Algorithm::Minimax, 1);
        let (pruned, pruned_nodes) = run(MIDGAME, depth, Algorithm::AlphaBeta { quiescence: false }, 1);
        assert_eq!(minimax.score, pruned.score, "depth {depth}");
        assert!(pruned_nodes <= minimax_nodes);
    }
}

#[test]
fn test_finds_back_rank_mate() {
    let mate = Move::new(at("a1"), at("a8"));
    for algorithm in [
        Algorithm::Minimax,
        Algorithm::AlphaBeta { quiescence: false },
        Algorithm::AlphaBeta { quiescence: true },
    ] {
        let (outcome, _) = run(BACK_RANK, 2, algorithm, 7);
        assert_eq!(outcome.best_move, Some(mate), "{algorithm:?}");
        assert_eq!(outcome.score, MATE_SCORE - 1);
        assert!(!outcome.stopped);
    }
}

#[test]
fn test_no_legal_moves_yields_no_move() {
    let (outcome, nodes) = run("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 3, Algorithm::Minimax, 0);
    assert_eq!(outcome, SearchOutcome::none());
    assert_eq!(nodes, 0);
}

#[test]
fn test_ties_are_broken_by_the_rng() {
    // Bare kings: every king move scores the same insufficient-material draw.
    let fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";
    let picks: std::collections::HashSet<_> = (0..32)
        .map(|seed| run(fen, 1, Algorithm::Minimax, seed).0.best_move.unwrap())
        .collect();
    assert!(picks.len() > 1);
    // The same seed always picks the same move.
    assert_eq!(
        run(fen, 1, Algorithm::Minimax, 5).0.best_move,
        run(fen, 1, Algorithm::Minimax, 5).0.best_move
    );
}

#[test]
fn test_quiescence_sees_the_recapture() {
    let evaluator = Evaluator::default();
    let config = SearchConfig::default();
    let control = SearchControl::new();
    let mut searcher = Searcher::new(&evaluator, &config, &control);
    // White's queen has just taken on d5 and hangs to the c6 pawn.
    let mut pos = Position::from_fen("4k3/8/2p5/3Q4/8/8/8/4K3 b - - 0 1").unwrap();
    assert!(evaluator.evaluate(&pos) < 0);
    assert!(searcher.quiescence(&mut pos, -INF, INF, 0, 0) > 0);
    assert!(searcher.nodes > 0);
}

#[test]
fn test_stopped_control_aborts() {
    let evaluator = Evaluator::default();
    let config = SearchConfig::default();
    let control = SearchControl::new();
    control.stop();
    let mut searcher = Searcher::new(&evaluator, &config, &control);
    let mut pos = Position::startpos();
    let outcome = searcher.search_root(&mut pos, 4, Algorithm::Minimax, &mut StdRng::seed_from_u64(0));
    assert!(outcome.stopped);
    assert_eq!(outcome.best_move, None);
    assert_eq!(pos, Position::startpos());
}

#[test]
fn test_leaf_score_recognises_terminal_positions() {
    let evaluator = Evaluator::default();
    let config = SearchConfig::default();
    let control = SearchControl::new();
    let mut searcher = Searcher::new(&evaluator, &config, &control);

    let mut mated = Position::from_fen("R5k1/5ppp/8/8/8/8/5PPP/6K1 b - - 1 1").unwrap();
    assert_eq!(searcher.leaf_score(&mut mated, 1), -(MATE_SCORE - 1));

    let mut stalemated = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert_eq!(searcher.leaf_score(&mut stalemated, 1), 0);

    let mut bare = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert_eq!(searcher.leaf_score(&mut bare, 1), 0);
}

#[test]
fn test_config_defaults_fill_missing_fields() {
    let config: SearchConfig = serde_json::from_str(r#"{"advanced_reply_cap": 3}"#).unwrap();
    assert_eq!(config.advanced_reply_cap, 3);
    assert_eq!(config.delta_margin, 200);
    assert_eq!(config.quiescence_max_ply, 32);
}
