// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Zobrist hashing of boards. Every (square, piece kind, color) triple is
//! assigned a random 64-bit key, plus one key for "black to move". The hash
//! of a board is the XOR of the keys of every occupied square, XORed with the
//! side-to-move key when black is to move.
//!
//! Boards maintain the placement half of the hash incrementally through
//! `modify_piece`; `hash` folds in the side to move.
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::board::Board;
use crate::types::{Color, Piece, Square, TableIndex};

struct ZobristHasher {
    piece_hashes: [[u64; 12]; 64],
    black_to_move_hash: u64,
}

impl ZobristHasher {
    pub fn new(seed: u64) -> ZobristHasher {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut piece_hashes = [[0; 12]; 64];
        for square in piece_hashes.iter_mut() {
            for entry in square.iter_mut() {
                *entry = rng.next_u64();
            }
        }

        ZobristHasher {
            piece_hashes,
            black_to_move_hash: rng.next_u64(),
        }
    }

    pub fn square_hash(&self, piece: Piece, square: Square) -> u64 {
        // Each square has twelve keys: the six white piece kinds followed by
        // the six black piece kinds.
        let color_offset = if piece.color == Color::White { 0 } else { 6 };
        self.piece_hashes[square.as_index()][color_offset + piece.kind.as_index()]
    }

    pub fn side_to_move_hash(&self, side: Color) -> u64 {
        match side {
            Color::White => 0,
            Color::Black => self.black_to_move_hash,
        }
    }
}

const ZOBRIST_SEED: u64 = 0xf68e_34a4_e8cc_f09a;

lazy_static! {
    static ref ZOBRIST_HASHER: ZobristHasher = ZobristHasher::new(ZOBRIST_SEED);
}

/// Fingerprint of a board together with the side to move.
pub fn hash(board: &Board, side_to_move: Color) -> u64 {
    board.zobrist_hash() ^ ZOBRIST_HASHER.side_to_move_hash(side_to_move)
}

/// Recomputes the placement hash of a board from scratch.
pub fn placement_hash(board: &Board) -> u64 {
    board
        .occupied()
        .fold(0, |acc, (square, piece)| acc ^ ZOBRIST_HASHER.square_hash(piece, square))
}

pub fn modify_piece(hash: &mut u64, square: Square, piece: Piece) {
    *hash ^= ZOBRIST_HASHER.square_hash(piece, square);
}
