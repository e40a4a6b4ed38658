// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move generation and legality checking.
//!
//! Generation happens in two stages. The pseudo-legal generator produces every
//! move a piece could make given board geometry and blocking, without regard
//! for the safety of its own king. The legal move functions then simulate each
//! pseudo-legal move and discard those that leave the mover's king attacked.
use crate::board::Board;
use crate::moves::Move;
use crate::types::{Color, Piece, PieceKind, Square, PROMOTION_KINDS};

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Terminal and non-terminal states of a game from the point of view of the
/// side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

fn push_pawn_move(from: Square, to: Square, color: Color, moves: &mut Vec<Move>) {
    if to.rank() == color.promotion_rank() {
        for &kind in &PROMOTION_KINDS {
            moves.push(Move::promotion(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

fn add_pawn_moves(board: &Board, square: Square, color: Color, moves: &mut Vec<Move>) {
    let forward = color.forward();

    // non-capturing advances, two squares from the starting rank
    if let Some(target) = square.offset(0, forward) {
        if board.piece_at(target).is_none() {
            push_pawn_move(square, target, color, moves);
            if square.rank() == color.pawn_start_rank() {
                if let Some(two_push_target) = target.offset(0, forward) {
                    if board.piece_at(two_push_target).is_none() {
                        moves.push(Move::new(square, two_push_target));
                    }
                }
            }
        }
    }

    // diagonal captures
    for &df in &[-1, 1] {
        if let Some(target) = square.offset(df, forward) {
            match board.piece_at(target) {
                Some(victim) if victim.color != color => {
                    push_pawn_move(square, target, color, moves)
                }
                _ => {}
            }
        }
    }
}

fn add_stepping_moves(
    board: &Board,
    square: Square,
    color: Color,
    offsets: &[(i32, i32)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in offsets {
        if let Some(target) = square.offset(df, dr) {
            match board.piece_at(target) {
                Some(occupant) if occupant.color == color => {}
                _ => moves.push(Move::new(square, target)),
            }
        }
    }
}

fn add_sliding_moves(
    board: &Board,
    square: Square,
    color: Color,
    directions: &[(i32, i32)],
    moves: &mut Vec<Move>,
) {
    for &(df, dr) in directions {
        let mut cursor = square;
        while let Some(target) = cursor.offset(df, dr) {
            match board.piece_at(target) {
                None => moves.push(Move::new(square, target)),
                Some(occupant) => {
                    // the first occupied square ends the ray; it is a capture
                    // only if the occupant is an enemy.
                    if occupant.color != color {
                        moves.push(Move::new(square, target));
                    }
                    break;
                }
            }

            cursor = target;
        }
    }
}

fn add_piece_moves(board: &Board, square: Square, piece: Piece, moves: &mut Vec<Move>) {
    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => add_pawn_moves(board, square, color, moves),
        PieceKind::Knight => add_stepping_moves(board, square, color, &KNIGHT_OFFSETS, moves),
        PieceKind::Bishop => add_sliding_moves(board, square, color, &BISHOP_DIRECTIONS, moves),
        PieceKind::Rook => add_sliding_moves(board, square, color, &ROOK_DIRECTIONS, moves),
        PieceKind::Queen => {
            add_sliding_moves(board, square, color, &ROOK_DIRECTIONS, moves);
            add_sliding_moves(board, square, color, &BISHOP_DIRECTIONS, moves);
        }
        PieceKind::King => add_stepping_moves(board, square, color, &KING_OFFSETS, moves),
    }
}

/// Pseudo-legal moves for the piece standing on the given square. An empty
/// square has no moves.
pub fn pseudo_legal_moves(board: &Board, square: Square) -> Vec<Move> {
    let mut moves = Vec::new();
    if let Some(piece) = board.piece_at(square) {
        add_piece_moves(board, square, piece, &mut moves);
    }

    moves
}

/// Returns true if any piece of color `by` attacks the given square.
///
/// Rather than generating every enemy move, this pretends that a "super-piece"
/// stands on the target square and looks outward along each line of attack
/// for an enemy piece that could travel back along it.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    let holds = |sq: Option<Square>, kinds: &[PieceKind]| match sq.and_then(|s| board.piece_at(s)) {
        Some(piece) => piece.color == by && kinds.contains(&piece.kind),
        None => false,
    };

    // Pawns of color `by` capture toward their forward direction, so they sit
    // one rank behind the target from their own point of view.
    for &df in &[-1, 1] {
        if holds(target.offset(df, -by.forward()), &[PieceKind::Pawn]) {
            return true;
        }
    }

    for &(df, dr) in &KNIGHT_OFFSETS {
        if holds(target.offset(df, dr), &[PieceKind::Knight]) {
            return true;
        }
    }

    for &(df, dr) in &KING_OFFSETS {
        if holds(target.offset(df, dr), &[PieceKind::King]) {
            return true;
        }
    }

    let rays: [(&[(i32, i32)], [PieceKind; 2]); 2] = [
        (&ROOK_DIRECTIONS, [PieceKind::Rook, PieceKind::Queen]),
        (&BISHOP_DIRECTIONS, [PieceKind::Bishop, PieceKind::Queen]),
    ];
    for (directions, sliders) in rays.iter() {
        for &(df, dr) in directions.iter() {
            let mut cursor = target;
            while let Some(next) = cursor.offset(df, dr) {
                if let Some(piece) = board.piece_at(next) {
                    if piece.color == by && sliders.contains(&piece.kind) {
                        return true;
                    }
                    break;
                }

                cursor = next;
            }
        }
    }

    false
}

/// Returns true if the king of the given color is attacked. A board with no
/// king of that color is never in check.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king) => is_square_attacked(board, king, color.toggle()),
        None => false,
    }
}

fn is_legal_given_pseudolegal(board: &Board, mov: Move, color: Color) -> bool {
    let next = board.apply_move(mov);
    !is_king_in_check(&next, color)
}

/// All legal moves for the given color.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for (square, piece) in board.pieces(color) {
        add_piece_moves(board, square, piece, &mut moves);
    }

    moves.retain(|&mov| is_legal_given_pseudolegal(board, mov, color));
    moves
}

/// Legal moves for the given color that capture an enemy piece.
pub fn legal_captures(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for (square, piece) in board.pieces(color) {
        add_piece_moves(board, square, piece, &mut moves);
    }

    moves.retain(|&mov| {
        board.piece_at(mov.to).is_some() && is_legal_given_pseudolegal(board, mov, color)
    });
    moves
}

/// Returns true if the given color has at least one legal move. Stops at the
/// first one found.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    let mut moves = Vec::new();
    for (square, piece) in board.pieces(color) {
        moves.clear();
        add_piece_moves(board, square, piece, &mut moves);
        if moves
            .iter()
            .any(|&mov| is_legal_given_pseudolegal(board, mov, color))
        {
            return true;
        }
    }

    false
}

/// The given color is in check and every legal move leaves it in check.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_king_in_check(board, color) && !has_legal_move(board, color)
}

/// The given color is not in check but has no legal move.
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !is_king_in_check(board, color) && !has_legal_move(board, color)
}

pub fn game_status(board: &Board, side_to_move: Color) -> GameStatus {
    let in_check = is_king_in_check(board, side_to_move);
    match (in_check, has_legal_move(board, side_to_move)) {
        (true, false) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
        (true, true) => GameStatus::Check,
        (false, true) => GameStatus::Ongoing,
    }
}

/// Legal destination squares for `piece` standing on `square`. Hosts use this
/// to highlight moves and to validate a player's move. Returns nothing if the
/// square is empty. Promotion choices collapse into a single destination.
pub fn valid_moves(square: Square, piece: Piece, board: &Board) -> Vec<Square> {
    if board.piece_at(square).is_none() {
        return vec![];
    }

    let mut moves = Vec::new();
    add_piece_moves(board, square, piece, &mut moves);
    let mut destinations: Vec<Square> = moves
        .into_iter()
        .filter(|&mov| is_legal_given_pseudolegal(board, mov, piece.color))
        .map(|mov| mov.to)
        .collect();
    destinations.dedup();
    destinations
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn board(fen: &'static str) -> (Board, Color) {
        Board::from_fen(fen).unwrap()
    }

    fn destinations(fen: &'static str, square: Square) -> HashSet<Square> {
        let (board, _) = board(fen);
        let piece = board.piece_at(square).unwrap();
        valid_moves(square, piece, &board).into_iter().collect()
    }

    fn set(squares: &[Square]) -> HashSet<Square> {
        squares.iter().cloned().collect()
    }

    fn attacked_by_definition(board: &Board, target: Square, by: Color) -> bool {
        board.pieces(by).any(|(sq, _)| {
            pseudo_legal_moves(board, sq)
                .iter()
                .any(|mov| mov.to == target)
        })
    }

    mod pawns {
        use super::*;

        #[test]
        fn white_single_and_double_push() {
            assert_eq!(
                set(&[Square::E3, Square::E4]),
                destinations("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", Square::E2)
            );
        }

        #[test]
        fn black_single_and_double_push() {
            assert_eq!(
                set(&[Square::D6, Square::D5]),
                destinations("4k3/3p4/8/8/8/8/8/4K3 b - - 0 1", Square::D7)
            );
        }

        #[test]
        fn no_double_push_off_start_rank() {
            assert_eq!(
                set(&[Square::E4]),
                destinations("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1", Square::E3)
            );
        }

        #[test]
        fn blocked() {
            assert!(destinations("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1", Square::E2).is_empty());
            assert_eq!(
                set(&[Square::E3]),
                destinations("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1", Square::E2)
            );
        }

        #[test]
        fn captures_enemies_only() {
            assert_eq!(
                set(&[Square::E5, Square::D5]),
                destinations("4k3/8/8/3p1N2/4P3/8/8/4K3 w - - 0 1", Square::E4)
            );
        }

        #[test]
        fn promotions() {
            let (board, _) = board("8/4P3/8/8/8/8/8/k3K3 w - - 0 1");
            let moves = pseudo_legal_moves(&board, Square::E7);
            assert_eq!(4, moves.len());
            for &kind in &PROMOTION_KINDS {
                assert!(moves.contains(&Move::promotion(Square::E7, Square::E8, kind)));
            }
            assert_eq!(
                vec![Square::E8],
                valid_moves(Square::E7, board.piece_at(Square::E7).unwrap(), &board)
            );
        }
    }

    mod pieces {
        use super::*;

        #[test]
        fn knight_in_corner() {
            assert_eq!(
                set(&[Square::B3, Square::C2]),
                destinations("4k3/8/8/8/8/8/8/N3K3 w - - 0 1", Square::A1)
            );
        }

        #[test]
        fn rook_stops_at_blockers() {
            assert_eq!(
                set(&[
                    Square::A2,
                    Square::A3,
                    Square::A4,
                    Square::B1,
                    Square::C1,
                    Square::D1,
                ]),
                destinations("4k3/8/8/8/p7/8/8/R3K3 w - - 0 1", Square::A1)
            );
        }

        #[test]
        fn bishop_diagonals() {
            assert_eq!(
                13,
                destinations("k7/8/8/8/3B4/8/8/7K w - - 0 1", Square::D4).len()
            );
        }

        #[test]
        fn queen_on_empty_board() {
            assert_eq!(
                27,
                destinations("k7/8/8/8/3Q4/8/8/7K w - - 0 1", Square::D4).len()
            );
        }

        #[test]
        fn king_cannot_step_into_check() {
            // the rook on h1 keeps covering d1 and f1 once the king steps off
            // the first rank's line of fire.
            assert_eq!(
                set(&[Square::D2, Square::E2, Square::F2]),
                destinations("4k3/8/8/8/8/8/8/4K2r w - - 0 1", Square::E1)
            );
        }

        #[test]
        fn empty_square_has_no_moves() {
            let board = Board::initial();
            let piece = Piece::new(PieceKind::Queen, Color::White);
            assert!(valid_moves(Square::E4, piece, &board).is_empty());
            assert!(pseudo_legal_moves(&board, Square::E4).is_empty());
        }
    }

    mod legality {
        use super::*;

        #[test]
        fn start_position_has_twenty_moves() {
            let board = Board::initial();
            assert_eq!(20, legal_moves(&board, Color::White).len());
            assert_eq!(20, legal_moves(&board, Color::Black).len());
        }

        #[test]
        fn pinned_piece_cannot_leave_line() {
            // the bishop on d3 is pinned to the king by the queen on d6.
            assert!(destinations("7k/8/3q4/8/8/3B4/3K4/8 w - - 0 1", Square::D3).is_empty());
        }

        #[test]
        fn must_escape_check() {
            let (board, side) = board("4k3/8/8/8/8/8/3PP3/r3K3 w - - 0 1");
            assert!(is_king_in_check(&board, side));
            let moves = legal_moves(&board, side);
            assert!(!moves.is_empty());
            for mov in moves {
                assert!(!is_king_in_check(&board.apply_move(mov), side));
            }
        }

        #[test]
        fn captures_only() {
            let (board, side) = board("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
            assert_eq!(
                vec![Move::new(Square::E4, Square::D5)],
                legal_captures(&board, side)
            );
        }

        #[test]
        fn attack_detection_matches_definition() {
            for &fen in &[
                "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w - - 0 1",
                "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
                "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w - - 0 1",
            ] {
                let (board, _) = board(fen);
                for square in Square::all() {
                    // only occupied targets matter for pawns, which attack
                    // diagonally but only move diagonally onto enemies.
                    if board.piece_at(square).is_none() {
                        continue;
                    }
                    let occupant = board.piece_at(square).unwrap();
                    let by = occupant.color.toggle();
                    assert_eq!(
                        attacked_by_definition(&board, square, by),
                        is_square_attacked(&board, square, by),
                        "{} attacked by {:?} in {}",
                        square,
                        by,
                        fen
                    );
                }
            }
        }
    }

    mod status {
        use super::*;

        #[test]
        fn back_rank_mate() {
            let (board, side) = board("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
            assert!(is_king_in_check(&board, side));
            assert!(is_checkmate(&board, side));
            assert!(!is_stalemate(&board, side));
            assert_eq!(GameStatus::Checkmate, game_status(&board, side));
        }

        #[test]
        fn check_with_escape() {
            let (board, side) = board("3R2k1/5pp1/8/8/8/8/8/6K1 b - - 0 1");
            assert!(!is_checkmate(&board, side));
            assert_eq!(GameStatus::Check, game_status(&board, side));
        }

        #[test]
        fn stalemate() {
            let (board, side) = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
            assert!(!is_king_in_check(&board, side));
            assert!(is_stalemate(&board, side));
            assert!(!is_checkmate(&board, side));
            assert_eq!(GameStatus::Stalemate, game_status(&board, side));
        }

        #[test]
        fn ongoing() {
            assert_eq!(
                GameStatus::Ongoing,
                game_status(&Board::initial(), Color::White)
            );
        }

        #[test]
        fn missing_king_is_never_in_check() {
            let (board, _) = board("8/8/8/8/8/8/8/r7 w - - 0 1");
            assert!(!is_king_in_check(&board, Color::White));
        }
    }
}
