use super::*;
use chess_core::{Outcome, coord_to_sq, legal_moves};

fn at(c: &str) -> u8 {
    coord_to_sq(c).unwrap()
}

fn seeded(computer_white: bool, computer_black: bool) -> Session {
    Session::new(SessionConfig {
        computer_white,
        computer_black,
        seed: Some(7),
        ..SessionConfig::default()
    })
}

#[test]
fn test_select_then_move() {
    let mut session = seeded(false, false);
    let options = session.select_square(at("e2")).to_vec();
    assert_eq!(options.len(), 2);
    assert_eq!(session.selected_square(), Some(at("e2")));

    assert!(session.select_square(at("e4")).is_empty());
    assert_eq!(session.selected_square(), None);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.history()[0].notation, "e4");
}

#[test]
fn test_selection_is_cleared_by_other_squares() {
    let mut session = seeded(false, false);
    session.select_square(at("g1"));
    assert_eq!(session.options().len(), 2);
    // An enemy piece, then the same piece twice.
    assert!(session.select_square(at("e7")).is_empty());
    session.select_square(at("g1"));
    assert!(session.select_square(at("g1")).is_empty());
    assert!(session.history().is_empty());
}

#[test]
fn test_selection_ignored_on_computer_turn() {
    let mut session = seeded(true, false);
    assert!(session.is_computer_turn());
    assert!(session.select_square(at("e2")).is_empty());
    assert_eq!(session.selected_square(), None);
}

#[test]
fn test_promotion_options_collapse_by_destination() {
    let mut session = seeded(false, false);
    session.game = Game::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", Default::default()).unwrap();
    let options = session.possible_moves(at("a7"));
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].special, Special::Promotion);

    session.select_square(at("a7"));
    session.select_square(at("a8"));
    assert_eq!(session.history()[0].promotion, Some(PieceKind::Queen));
}

#[test]
fn test_computer_flags() {
    let mut session = seeded(false, true);
    assert!(!session.is_computer(Color::White));
    assert!(session.is_computer(Color::Black));
    session.set_computer(Color::White, true);
    assert!(session.is_computer_turn());
    assert!(!session.is_thinking());
}

#[tokio::test]
async fn test_human_turn_yields_no_move() {
    let mut session = seeded(false, true);
    assert_eq!(session.play_computer_move(Level::Random).await.unwrap(), None);
    assert!(session.history().is_empty());
    assert!(session.start_computer_move(Level::Random).is_none());
}

#[tokio::test]
async fn test_computer_plays_a_legal_move() {
    let mut session = seeded(true, false);
    let legal = legal_moves(session.position());
    let mv = session.play_computer_move(Level::Hard).await.unwrap().unwrap();
    assert!(legal.contains(&mv));
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.game().side_to_move(), Color::Black);
    assert!(!session.is_thinking());
    // Now it is the human's move.
    assert_eq!(session.computer_turn().await.unwrap(), None);
}

#[tokio::test]
async fn test_no_move_after_the_game_ended() {
    let mut session = seeded(false, false);
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        session.make_move(at(from), at(to), None).unwrap();
    }
    assert_eq!(session.game().outcome(), Outcome::BlackWins);
    session.set_computer(Color::White, true);
    assert_eq!(session.play_computer_move(Level::Numeric(10)).await.unwrap(), None);
}

#[tokio::test]
async fn test_cancelled_task_yields_no_move() {
    let mut session = seeded(true, false);
    let task = session.start_computer_move(Level::Numeric(10)).unwrap();
    assert!(session.is_thinking());
    assert!(session.start_computer_move(Level::Random).is_none(), "one search at a time");

    task.cancel();
    let reply = task.finish().await.unwrap();
    assert!(reply.result.stopped);
    assert_eq!(session.apply_search(reply).unwrap(), None);
    assert!(!session.is_thinking());
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_dropped_task_frees_the_session() {
    let mut session = seeded(true, false);
    let task = session.start_computer_move(Level::Numeric(10)).unwrap();
    let control = task.control().clone();
    task.cancel();
    drop(task);
    assert!(control.is_stopped());
    assert!(!session.is_thinking());

    // Dropping without cancelling stops the search too.
    let task = session.start_computer_move(Level::Numeric(10)).unwrap();
    let control = task.control().clone();
    drop(task);
    assert!(control.is_stopped());
    assert!(!session.is_thinking());

    let mv = session.play_computer_move(Level::Random).await.unwrap();
    assert!(mv.is_some());
    assert_eq!(session.history().len(), 1);
}

#[tokio::test]
async fn test_abandoned_computer_move_does_not_wedge_the_session() {
    let mut session = seeded(true, false);
    tokio::select! {
        biased;
        _ = tokio::task::yield_now() => {}
        _ = session.play_computer_move(Level::Numeric(10)) => {}
    }
    assert!(!session.is_thinking());
    assert!(session.history().is_empty());

    let mv = session.play_computer_move(Level::Random).await.unwrap();
    assert!(mv.is_some());
    assert!(!session.is_thinking());
}

#[tokio::test]
async fn test_reply_for_an_old_position_is_dropped() {
    let mut session = seeded(true, false);
    let task = session.start_computer_move(Level::Random).unwrap();
    let reply = task.finish().await.unwrap();
    assert!(reply.result.best_move.is_some());

    // Taking over the move makes the search stale.
    session.cancel_computer_move();
    assert_eq!(session.apply_search(reply).unwrap(), None);
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn test_initialize_board_resets_the_game() {
    let mut session = seeded(true, true);
    for _ in 0..4 {
        session.computer_turn().await.unwrap().unwrap();
    }
    assert_eq!(session.history().len(), 4);
    session.initialize_board();
    assert!(session.history().is_empty());
    assert_eq!(session.position(), &Position::startpos());
    assert!(session.undo_move().is_none());
}
