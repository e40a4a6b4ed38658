// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::board::Board;

mod piece_square_evaluator;
mod score;

pub use piece_square_evaluator::PieceSquareEvaluator;
pub use score::Score;

/// A static evaluation function. Scores are reported from White's point of
/// view.
pub trait BoardEvaluator {
    fn evaluate(&self, board: &Board) -> Score;
}
