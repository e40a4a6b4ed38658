// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::board::Board;
use crate::movegen;
use crate::types::Color;

/// Counts the leaf nodes of the legal move tree of the given depth. Root
/// moves are counted in parallel.
pub fn perft(board: &Board, side_to_move: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    movegen::legal_moves(board, side_to_move)
        .par_iter()
        .map(|&mov| count(&board.apply_move(mov), side_to_move.toggle(), depth - 1))
        .sum()
}

fn count(board: &Board, side_to_move: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = movegen::legal_moves(board, side_to_move);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mov| count(&board.apply_move(mov), side_to_move.toggle(), depth - 1))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::perft;
    use crate::board::Board;

    fn perft_test(fen: &'static str, depth: u32, count: u64) {
        let (board, side) = Board::from_fen(fen).unwrap();
        assert_eq!(count, perft(&board, side, depth));
    }

    macro_rules! perft_tests {
        () => {};
        ($name:ident ($depth:expr): $fen:expr => $count:expr; $($tail:tt)*) => {
            #[test]
            fn $name() {
                perft_test($fen, $depth, $count)
            }

            perft_tests!($($tail)*);
        };
    }

    // Castling and en passant are not part of the rules this engine plays,
    // so only positions where neither can arise within the searched depth
    // are checked against the standard counts.
    perft_tests! {
        start_1 (1): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1" => 20;
        start_2 (2): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1" => 400;
        start_3 (3): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1" => 8902;

        position_3_1 (1): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1" => 14;

        promotions_1 (1): "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1" => 24;
        promotions_2 (2): "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1" => 496;
        promotions_3 (3): "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1" => 9483;
    }
}
