use chessbot::player::{GreedyPlayer, HumanPlayer, MiniMaxPlayer, Player, RandomPlayer};
use chessbot::{EngineConfig, Error, Position};
use cozy_chess::Color;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::io::Cursor;

// Qxd5 wins a pawn on the spot but loses the queen to exd5.
const POISONED_PAWN: &str = "6k1/8/4p3/3p4/8/8/8/3Q2K1 w - - 0 10";
const FOOLS_MATE: &str = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";

fn seeded(seed: u64) -> EngineConfig {
    EngineConfig { seed: Some(seed), ..EngineConfig::default() }
}

#[test]
fn greedy_grabs_the_pawn_minimax_does_not() {
    let pos = Position::from_fen(POISONED_PAWN).expect("valid FEN");
    for seed in 0..4 {
        let mut greedy = GreedyPlayer::new(Color::White, &seeded(seed)).unwrap();
        assert_eq!(greedy.select_move(&pos).unwrap(), "d1d5");

        let mut minimax = MiniMaxPlayer::new(Color::White, &seeded(seed)).unwrap();
        assert_eq!(minimax.depth(), 3);
        let mv = minimax.select_move(&pos).unwrap();
        assert_ne!(mv, "d1d5");
        assert!(pos.parse_move(&mv).is_ok());
    }
}

#[test]
fn greedy_scores_include_jitter() {
    let pos = Position::from_fen(POISONED_PAWN).expect("valid FEN");
    let mut greedy = GreedyPlayer::new(Color::White, &seeded(1)).unwrap();
    let scores = greedy.score_moves(&pos);
    assert_eq!(scores.len(), pos.legal_moves().len());
    for (mv, s) in scores {
        let base = if mv.to_string() == "d1d5" { 9.0 } else { 8.0 };
        assert!(s >= base && s < base + 1.0, "{} scored {}", mv, s);
    }
}

#[test]
fn greedy_takes_mate_in_one() {
    let pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 20").unwrap();
    let mut greedy = GreedyPlayer::new(Color::White, &seeded(3)).unwrap();
    assert_eq!(greedy.select_move(&pos).unwrap(), "a1a8");
}

#[test]
fn random_player_is_legal_and_reproducible() {
    let mut pos = Position::startpos();
    let mut a = RandomPlayer::new(Color::White, SmallRng::seed_from_u64(8));
    let mut b = RandomPlayer::new(Color::White, SmallRng::seed_from_u64(8));
    let mut black = RandomPlayer::new(Color::Black, SmallRng::seed_from_u64(9));
    for _ in 0..5 {
        let mv = a.select_move(&pos).unwrap();
        assert_eq!(mv, b.select_move(&pos).unwrap());
        pos = pos.apply_notation(&mv).unwrap();
        if pos.is_game_over(true) {
            break;
        }
        let reply = black.select_move(&pos).unwrap();
        pos = pos.apply_notation(&reply).unwrap();
        if pos.is_game_over(true) {
            break;
        }
    }
}

#[test]
fn players_refuse_to_move_for_the_other_side() {
    let pos = Position::startpos();
    let mut random = RandomPlayer::new(Color::Black, SmallRng::seed_from_u64(0));
    assert!(matches!(random.select_move(&pos), Err(Error::NotOnMove { side: Color::Black, .. })));
    let mut greedy = GreedyPlayer::new(Color::Black, &seeded(0)).unwrap();
    assert!(matches!(greedy.select_move(&pos), Err(Error::NotOnMove { .. })));
    let mut minimax = MiniMaxPlayer::new(Color::Black, &seeded(0)).unwrap();
    assert!(matches!(minimax.select_move(&pos), Err(Error::NotOnMove { .. })));
}

#[test]
fn mated_side_has_no_move() {
    let pos = Position::from_fen(FOOLS_MATE).unwrap();
    let mut minimax = MiniMaxPlayer::new(Color::White, &seeded(0)).unwrap();
    assert!(matches!(minimax.select_move(&pos), Err(Error::NoLegalMove { .. })));
    let mut random = RandomPlayer::new(Color::White, SmallRng::seed_from_u64(0));
    assert!(matches!(random.select_move(&pos), Err(Error::NoLegalMove { .. })));
    let mut greedy = GreedyPlayer::new(Color::White, &seeded(0)).unwrap();
    assert!(matches!(greedy.select_move(&pos), Err(Error::NoLegalMove { .. })));
}

#[test]
fn invalid_configs_are_rejected() {
    let bad_depth = EngineConfig { depth: 0, ..EngineConfig::default() };
    assert!(MiniMaxPlayer::new(Color::White, &bad_depth).is_err());

    let mut small_win = EngineConfig::default();
    small_win.end_scores.win = 10.0;
    assert!(GreedyPlayer::new(Color::White, &small_win).is_err());
    assert!(MiniMaxPlayer::new(Color::White, &small_win).is_err());
}

#[test]
fn human_is_prompted_until_a_legal_move_arrives() {
    let pos = Position::startpos();
    let input = Cursor::new("zz\ne2e5\n e2e4 \n");
    let mut human = HumanPlayer::new(Color::White, input, Vec::new());
    assert_eq!(human.select_move(&pos).unwrap(), "e2e4");

    let out = String::from_utf8(human.into_output()).unwrap();
    let prompt = "(White) Your turn! Choose move (in uci): ";
    assert_eq!(out.matches(prompt).count(), 3);
    assert!(out.contains("Invalid uci move! Try again."));
    assert!(out.contains("Not a legal move! Available moves:"));
    assert!(out.contains("g1f3"));
    assert!(out.lines().any(|l| l.matches(" | ").count() == 3));
}

#[test]
fn human_input_closing_is_an_error() {
    let pos = Position::startpos();
    let mut human = HumanPlayer::new(Color::White, Cursor::new("a1a1\n"), Vec::new());
    assert!(matches!(human.select_move(&pos), Err(Error::Input { .. })));
}

const CASTLING: &str = "r3k2r/pppq1ppp/2npbn2/4p3/4P3/2NPBN2/PPPQ1PPP/R3K2R w KQkq - 4 9";

#[test]
fn human_castles_with_standard_uci() {
    let pos = Position::from_fen(CASTLING).expect("valid FEN");
    let mut human = HumanPlayer::new(Color::White, Cursor::new("e1g1\n"), Vec::new());
    let mv = human.select_move(&pos).unwrap();
    assert_eq!(mv, "e1g1");
    let out = String::from_utf8(human.into_output()).unwrap();
    assert!(!out.contains("Not a legal move!"), "{}", out);

    let after = pos.apply_notation(&mv).unwrap();
    assert!(after.fen().contains("/R4RK1 b kq "), "{}", after.fen());
}

#[test]
fn human_list_shows_castling_in_uci() {
    let pos = Position::from_fen(CASTLING).expect("valid FEN");
    // The king-takes-rook form is refused; the listed form is accepted.
    let mut human = HumanPlayer::new(Color::White, Cursor::new("e1h1\ne1c1\n"), Vec::new());
    assert_eq!(human.select_move(&pos).unwrap(), "e1c1");
    let out = String::from_utf8(human.into_output()).unwrap();
    assert!(out.contains("Not a legal move! Available moves:"));
    assert!(out.contains("e1g1") && out.contains("e1c1"), "{}", out);
    assert!(!out.contains("e1h1 |") && !out.contains("| e1h1"), "{}", out);
}

#[test]
fn minimax_traces_through_its_searcher() {
    let pos = Position::from_fen(CASTLING).expect("valid FEN");
    let config = EngineConfig { seed: Some(2), depth: 1, ..EngineConfig::default() };
    let mut minimax = MiniMaxPlayer::new(Color::White, &config).unwrap();
    let lines = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let sink = std::rc::Rc::clone(&lines);
    minimax
        .searcher_mut()
        .set_tracer(Some(move |t: &chessbot::search::MoveTrace| sink.borrow_mut().push(t.mv.clone())));
    let mv = minimax.select_move(&pos).unwrap();
    assert!(pos.parse_move(&mv).is_ok());
    let lines = lines.borrow();
    assert_eq!(lines.len(), pos.legal_moves().len());
    assert!(lines.contains(&"e1g1".to_string()), "{:?}", lines);
    assert!(!lines.contains(&"e1h1".to_string()), "{:?}", lines);
}

#[test]
fn minimax_does_not_play_a_random_move_in_a_move_one_puzzle() {
    // Fullmove 1, White to move, but not the initial setup.
    let pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").expect("valid FEN");
    assert_eq!(pos.move_history_length(), 0);
    assert!(!pos.is_start_position());
    for seed in 0..8 {
        let mut minimax = MiniMaxPlayer::new(Color::White, &seeded(seed)).unwrap();
        assert_eq!(minimax.select_move(&pos).unwrap(), "a1a8", "seed {}", seed);
    }
}
