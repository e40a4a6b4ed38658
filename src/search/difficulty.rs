// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Playing strength. Each level fixes how deep the engine looks, how much
/// random noise is added to its root scores, and whether giving check is
/// rewarded by the evaluator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Grandmaster,
}

impl Difficulty {
    /// Plies searched below each root move before quiescence takes over.
    pub fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
            Difficulty::Grandmaster => 6,
        }
    }

    /// Width, in centipawns, of the uniform noise added to each root score.
    pub fn randomness(self) -> f64 {
        match self {
            Difficulty::Easy => 300.0,
            Difficulty::Medium => 150.0,
            Difficulty::Hard => 50.0,
            Difficulty::Grandmaster => 0.0,
        }
    }

    pub fn check_bonus(self) -> bool {
        self != Difficulty::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Grandmaster => "grandmaster",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected easy, medium, hard or grandmaster)")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Difficulty, ParseDifficultyError> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "grandmaster" => Ok(Difficulty::Grandmaster),
            _ => Err(ParseDifficultyError(s.to_owned())),
        }
    }
}
