// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module contains the definition of a Move. A move is a pure
//! description of a piece travelling from one square to another, optionally
//! promoting on arrival. It carries no information about the board it is
//! played on; applying it is the job of `Board::apply_move`.
//!
//! Moves are written and parsed in coordinate notation: the source square,
//! the destination square, and a trailing promotion letter if the move
//! promotes (`e2e4`, `e7e8q`).
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

use crate::types::{PieceKind, Square};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Constructs a new non-promoting move from the source square to the
    /// destination square.
    pub fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Constructs a new move that promotes the moving pawn to the given kind.
    pub fn promotion(from: Square, to: Square, kind: PieceKind) -> Move {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind)?;
        }

        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseMoveError {
    #[error("move must be four or five characters")]
    InvalidLength,
    #[error("invalid square in move")]
    InvalidSquare,
    #[error("invalid promotion piece")]
    InvalidPromotion,
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Move, ParseMoveError> {
        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
            return Err(ParseMoveError::InvalidLength);
        }

        let from = s[0..2]
            .parse::<Square>()
            .map_err(|_| ParseMoveError::InvalidSquare)?;
        let to = s[2..4]
            .parse::<Square>()
            .map_err(|_| ParseMoveError::InvalidSquare)?;
        let promotion = match s[4..].chars().next() {
            Some(c) => match PieceKind::try_from(c) {
                Ok(PieceKind::Pawn) | Ok(PieceKind::King) | Err(_) => {
                    return Err(ParseMoveError::InvalidPromotion)
                }
                Ok(kind) => Some(kind),
            },
            None => None,
        };

        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

// Moves serialize as their coordinate notation so that they can key JSON maps.
impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Move, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
