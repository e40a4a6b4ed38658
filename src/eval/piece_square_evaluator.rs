// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;
use crate::eval::{BoardEvaluator, Score};
use crate::movegen;
use crate::types::{Color, Piece, PieceKind, Square, TableIndex};

// Positional bonuses, written from White's point of view with the first row
// being the eighth rank. Kinds without a table get no positional bonus.
#[rustfmt::skip]
const PAWN_TABLE: [[i32; 8]; 8] = [
    [ 0,  0,   0,   0,   0,   0,  0,  0],
    [50, 50,  50,  50,  50,  50, 50, 50],
    [10, 10,  20,  30,  30,  20, 10, 10],
    [ 5,  5,  10,  25,  25,  10,  5,  5],
    [ 0,  0,   0,  20,  20,   0,  0,  0],
    [ 5, -5, -10,   0,   0, -10, -5,  5],
    [ 5, 10,  10, -20, -20,  10, 10,  5],
    [ 0,  0,   0,   0,   0,   0,  0,  0],
];

#[rustfmt::skip]
const KING_TABLE: [[i32; 8]; 8] = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [ 20,  20,   0,   0,   0,   0,  20,  20],
    [ 20,  30,  10,   0,   0,  10,  30,  20],
];

/// Material plus piece-square evaluation, with a reduced king-shelter bonus
/// in the endgame and an optional bonus for giving check.
#[derive(Copy, Clone, Debug, Default)]
pub struct PieceSquareEvaluator {
    check_bonus: bool,
}

impl PieceSquareEvaluator {
    pub fn new(check_bonus: bool) -> PieceSquareEvaluator {
        PieceSquareEvaluator { check_bonus }
    }
}

impl BoardEvaluator for PieceSquareEvaluator {
    fn evaluate(&self, board: &Board) -> Score {
        if movegen::is_checkmate(board, Color::White) {
            return -Score::CHECKMATE;
        }
        if movegen::is_checkmate(board, Color::Black) {
            return Score::CHECKMATE;
        }

        let mut score = Score::DRAW;
        if self.check_bonus {
            if movegen::is_king_in_check(board, Color::White) {
                score = score - Score::CHECK_BONUS;
            }
            if movegen::is_king_in_check(board, Color::Black) {
                score = score + Score::CHECK_BONUS;
            }
        }

        let endgame = is_endgame(board);
        for (square, piece) in board.occupied() {
            let value = Score(piece_value(piece, square, endgame));
            score = score + value.relative_to(piece.color);
        }

        score
    }
}

/// No queens remain, or both queens remain with at most two minor pieces.
pub fn is_endgame(board: &Board) -> bool {
    let queens = board.count(PieceKind::Queen);
    let minors = board.count(PieceKind::Knight) + board.count(PieceKind::Bishop);
    queens == 0 || (queens == 2 && minors <= 2)
}

fn piece_value(piece: Piece, square: Square, endgame: bool) -> i32 {
    let table = match piece.kind {
        PieceKind::Pawn => Some(&PAWN_TABLE),
        PieceKind::King => Some(&KING_TABLE),
        _ => None,
    };

    let rank = square.rank().as_index();
    let row = match piece.color {
        Color::White => 7 - rank,
        Color::Black => rank,
    };

    let mut bonus = table.map_or(0, |t| t[row][square.file().as_index()]);
    if piece.kind == PieceKind::King && endgame {
        bonus /= 2;
    }

    piece.kind.value() + bonus
}
