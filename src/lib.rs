// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A chess engine for playing against the computer. The board model is a
//! plain 64-square mailbox; the computer searches it with alpha-beta
//! minimax, a capture-only quiescence extension, and a transposition table,
//! at one of several difficulty levels.
//!
//! The two entry points most callers need are `valid_moves`, for the
//! squares a piece may legally move to, and `Engine::best_move`, for the
//! computer's reply.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod board;
pub mod book;
pub mod eval;
pub mod movegen;
mod moves;
mod perft;
pub mod search;
mod types;
pub mod zobrist;

pub use board::{Board, FenParseError, START_FEN};
pub use movegen::{valid_moves, GameStatus};
pub use moves::{Move, ParseMoveError};
pub use perft::perft;
pub use search::{Difficulty, Engine, EngineConfig, SearchResult};
pub use types::{
    Color, File, ParseSquareError, Piece, PieceKind, Rank, Square, COLORS, FILES, PIECE_KINDS,
    PROMOTION_KINDS, RANKS,
};
