// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use hermes::eval::{BoardEvaluator, PieceSquareEvaluator, Score};
use hermes::search::Search;
use hermes::{movegen, zobrist};
use hermes::{Board, Color, Difficulty, Engine, EngineConfig, Move, Piece, Square, RANKS};

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap().0
}

fn engine(computer: Color, seed: u64, depth: u32) -> Engine {
    Engine::new(EngineConfig {
        computer,
        seed: Some(seed),
        max_depth: Some(depth),
        ..Default::default()
    })
}

fn play(moves: &[&str]) -> Board {
    moves.iter().fold(Board::initial(), |board, m| {
        board.apply_move(m.parse::<Move>().unwrap())
    })
}

fn mirror(board: &Board) -> Board {
    let mut mirrored = Board::empty();
    for (square, piece) in board.occupied() {
        let flipped = Square::of(RANKS[7 - square.rank() as usize], square.file());
        mirrored.place(flipped, Piece::new(piece.kind, piece.color.toggle()));
    }

    mirrored
}

// Black to move in every position, with White never left in check.
const POSITIONS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b",
    "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b",
    "4k3/8/8/8/8/8/3q4/7K b",
    "rnbqkbnr/ppppp2p/5p2/6pQ/4P3/8/PPPP1PPP/RNB1KBNR b",
    "4k3/4R3/8/8/8/8/8/4K3 b",
];

#[test]
fn best_move_is_none_iff_no_legal_moves() {
    for &fen in POSITIONS {
        let board = board(fen);
        let mut engine = engine(Color::Black, 1, 1);
        let has_moves = !movegen::legal_moves(&board, Color::Black).is_empty();
        assert_eq!(
            has_moves,
            engine.best_move(&board, Difficulty::Easy, &[]).is_some(),
            "{}",
            fen
        );
    }

    // checkmated
    let mated = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w");
    assert!(engine(Color::White, 1, 1)
        .best_move(&mated, Difficulty::Hard, &[])
        .is_none());

    // stalemated
    let stalemated = board("7k/5Q2/6K1/8/8/8/8/8 b");
    assert!(engine(Color::Black, 1, 1)
        .best_move(&stalemated, Difficulty::Hard, &[])
        .is_none());
}

#[test]
fn positions_are_reachable() {
    for &fen in POSITIONS {
        assert!(!movegen::is_king_in_check(&board(fen), Color::White), "{}", fen);
    }
}

#[test]
fn best_move_never_leaves_king_in_check() {
    for &fen in POSITIONS {
        let board = board(fen);
        for seed in 0..4 {
            let mut engine = engine(Color::Black, seed, 1);
            if let Some(mov) = engine.best_move(&board, Difficulty::Easy, &[]) {
                assert!(movegen::legal_moves(&board, Color::Black).contains(&mov));
                let after = board.apply_move(mov);
                assert!(
                    !movegen::is_king_in_check(&after, Color::Black),
                    "{} left the king in check in {}",
                    mov,
                    fen
                );
            }
        }
    }
}

#[test]
fn escapes_check() {
    let board = board("4k3/4R3/8/8/8/8/8/4K3 b");
    let mut engine = engine(Color::Black, 3, 2);
    let mov = engine.best_move(&board, Difficulty::Grandmaster, &[]).unwrap();
    // the rook is defended by nothing, so taking it is best.
    assert_eq!(Move::new(Square::E8, Square::E7), mov);
}

#[test]
fn transposition_table_does_not_change_choice() {
    for &fen in POSITIONS.iter().filter(|f| !f.starts_with("r3k2r")) {
        let board = board(fen);
        for &difficulty in &[Difficulty::Easy, Difficulty::Grandmaster] {
            for seed in 0..2 {
                let mut with_table = engine(Color::Black, seed, 2);
                let mut without_table = Engine::new(EngineConfig {
                    use_transposition_table: false,
                    ..with_table.config().clone()
                });

                let cached = with_table.search(&board, difficulty);
                let fresh = without_table.search(&board, difficulty);
                assert_eq!(
                    fresh.as_ref().map(|r| (r.best_move, r.score)),
                    cached.as_ref().map(|r| (r.best_move, r.score)),
                    "{} at {}",
                    fen,
                    difficulty
                );
            }
        }
    }
}

#[test]
fn zobrist_hash_is_deterministic() {
    let board = play(&["e2e4", "c7c5", "g1f3"]);
    assert_eq!(
        zobrist::hash(&board, Color::Black),
        zobrist::hash(&board, Color::Black)
    );
    assert_eq!(
        zobrist::hash(&board, Color::Black),
        zobrist::hash(&board.clone(), Color::Black)
    );
}

#[test]
fn zobrist_hash_changes_on_any_relocation() {
    let board = Board::initial();
    let original = zobrist::hash(&board, Color::White);
    for (from, piece) in board.occupied() {
        for to in Square::all().filter(|&sq| board.piece_at(sq).is_none()) {
            let mut moved = board.clone();
            moved.remove(from);
            moved.place(to, piece);
            assert_ne!(
                original,
                zobrist::hash(&moved, Color::White),
                "{} from {} to {}",
                piece,
                from,
                to
            );
        }
    }
}

#[test]
fn fools_mate() {
    let board = play(&["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert!(movegen::is_checkmate(&board, Color::White));
    assert!(!movegen::is_checkmate(&board, Color::Black));
    let mut engine = engine(Color::White, 0, 2);
    assert!(engine.best_move(&board, Difficulty::Medium, &[]).is_none());
}

#[test]
fn finds_fools_mate() {
    let board = play(&["f2f3", "e7e5", "g2g4"]);
    let mut engine = engine(Color::Black, 0, 1);
    let result = engine.search(&board, Difficulty::Grandmaster).unwrap();
    assert_eq!(Move::new(Square::D8, Square::H4), result.best_move);
    assert_eq!(Score::CHECKMATE, result.score);
}

#[test]
fn evaluation_is_symmetric() {
    for &fen in POSITIONS {
        let board = board(fen);
        for &check_bonus in &[false, true] {
            let evaluator = PieceSquareEvaluator::new(check_bonus);
            assert_eq!(
                evaluator.evaluate(&board),
                -evaluator.evaluate(&mirror(&board)),
                "{}",
                fen
            );
        }
    }
}

#[test]
fn quiescence_resolves_hanging_piece_at_horizon() {
    // the black queen hangs to the knight. Quiescence finds the capture
    // whether or not there is a full ply left to search.
    let board = board("4k3/8/8/3q4/8/4N3/8/4K3 w");
    let evaluator = PieceSquareEvaluator::new(false);
    let static_score = evaluator.evaluate(&board);

    let mut shallow = Search::new(&evaluator, None, Color::White);
    let at_horizon = shallow.minimax(&board, 0, -Score::INFINITY, Score::INFINITY, true);
    let mut deeper = Search::new(&evaluator, None, Color::White);
    let one_more = deeper.minimax(&board, 1, -Score::INFINITY, Score::INFINITY, true);

    assert_eq!(at_horizon, one_more);
    assert!(at_horizon > static_score + Score(800));
}
