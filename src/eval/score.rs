// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::ops::{Add, Neg, Sub};

use crate::types::Color;

/// Score is the output of a board evaluation, in centipawns. Scores are
/// reported from the point of view of one color: positive values favor that
/// color. Checkmate saturates at `Score::CHECKMATE` in either direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(pub i32);

impl Score {
    /// The side being evaluated has delivered checkmate.
    pub const CHECKMATE: Score = Score(100_000);

    /// Bonus for giving check, penalty for being in check.
    pub const CHECK_BONUS: Score = Score(500);

    pub const DRAW: Score = Score(0);

    /// Bound on every score a search can return. Used for open windows.
    pub const INFINITY: Score = Score(1_000_000);

    /// Converts a score reported from White's point of view into the given
    /// color's point of view.
    pub fn relative_to(self, color: Color) -> Score {
        match color {
            Color::White => self,
            Color::Black => -self,
        }
    }

    pub fn is_mate(self) -> bool {
        self.0.abs() >= Score::CHECKMATE.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_mate() {
            if self.0 > 0 {
                write!(f, "#+")
            } else {
                write!(f, "#-")
            }
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        Score(-self.0)
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, other: Score) -> Score {
        Score(self.0 + other.0)
    }
}

impl Sub for Score {
    type Output = Score;

    fn sub(self, other: Score) -> Score {
        Score(self.0 - other.0)
    }
}
