// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::fmt::{self, Write};

use thiserror::Error;

use crate::moves::Move;
use crate::types::{Color, File, Piece, PieceKind, Rank, Square, TableIndex};
use crate::types::{FILES, RANKS};
use crate::zobrist;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

/// Possible errors that can arise when parsing a FEN string into a `Board`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum FenParseError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("empty-square count must be between 1 and 8")]
    InvalidDigit,
    #[error("rank does not sum to eight files")]
    FileDoesNotSumToEight,
    #[error("unknown piece character")]
    UnknownPiece,
    #[error("invalid side to move")]
    InvalidSideToMove,
    #[error("more than one king of the same color")]
    TooManyKings,
}

/// An 8x8 chess board. Each square holds at most one piece. The board does
/// not know whose turn it is; callers track the side to move alongside it.
///
/// Boards are plain values. Cloning a board produces a fully independent
/// copy, and `apply_move` never mutates the board it is called on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    zobrist_hash: u64,
}

//
// Board state getters
//

impl Board {
    pub fn empty() -> Board {
        Board {
            squares: [None; 64],
            zobrist_hash: 0,
        }
    }

    /// The standard starting position.
    pub fn initial() -> Board {
        use crate::types::PieceKind::*;
        const BACK_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Board::empty();
        for (&file, &kind) in FILES.iter().zip(BACK_RANK.iter()) {
            board.place(Square::of(Rank::One, file), Piece::new(kind, Color::White));
            board.place(Square::of(Rank::Two, file), Piece::new(Pawn, Color::White));
            board.place(Square::of(Rank::Seven, file), Piece::new(Pawn, Color::Black));
            board.place(Square::of(Rank::Eight, file), Piece::new(kind, Color::Black));
        }

        board
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.as_index()]
    }

    /// The hash of this board's piece placement, maintained incrementally as
    /// pieces are placed and removed. See `zobrist::hash` for the hash that
    /// includes the side to move.
    pub fn zobrist_hash(&self) -> u64 {
        self.zobrist_hash
    }

    /// Iterates over every occupied square on the board.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, piece)| piece.map(|p| (Square::from_index(idx), p)))
    }

    /// Iterates over the pieces belonging to the given color.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn count(&self, kind: PieceKind) -> usize {
        self.occupied().filter(|(_, p)| p.kind == kind).count()
    }
}

//
// Move application and board manipulation
//

impl Board {
    /// Puts a piece on the given square, replacing whatever was there.
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.remove(square);
        self.squares[square.as_index()] = Some(piece);
        zobrist::modify_piece(&mut self.zobrist_hash, square, piece);
    }

    /// Clears the given square, returning the piece that was on it.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let existing = self.squares[square.as_index()].take();
        if let Some(piece) = existing {
            zobrist::modify_piece(&mut self.zobrist_hash, square, piece);
        }

        existing
    }

    /// Produces the board that results from playing the given move. Any
    /// piece on the destination square is captured. A pawn arriving on its
    /// last rank without an explicit promotion becomes a queen.
    ///
    /// Panics if there is no piece on the move's source square.
    pub fn apply_move(&self, mov: Move) -> Board {
        let mut next = self.clone();
        let moving_piece = next
            .remove(mov.from)
            .expect("invalid move: no piece at source square");

        let kind = match mov.promotion {
            Some(kind) => kind,
            None if moving_piece.kind == PieceKind::Pawn
                && mov.to.rank() == moving_piece.color.promotion_rank() =>
            {
                PieceKind::Queen
            }
            None => moving_piece.kind,
        };

        next.place(mov.to, Piece::new(kind, moving_piece.color));
        debug_assert_eq!(next.zobrist_hash, zobrist::placement_hash(&next));
        next
    }
}

//
// FEN and move parsing and generation.
//
// Only the piece placement and side to move fields of FEN are meaningful to
// the engine. The remaining fields are tolerated on input and written as
// placeholders on output.
//

impl Board {
    /// Constructs a board and side to move from a FEN string.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<(Board, Color), FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat(iter: &mut Stream<'_>, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn peek(iter: &mut Stream<'_>) -> Result<char, FenParseError> {
            iter.peek().copied().ok_or(FenParseError::UnexpectedEnd)
        }

        let mut board = Board::empty();
        let iter = &mut fen.as_ref().chars().peekable();
        for &rank in RANKS.iter().rev() {
            let mut file = File::A.as_index();
            while file < 8 {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if let Some(value) = c.to_digit(10) {
                    if value < 1 || value > 8 {
                        return Err(FenParseError::InvalidDigit);
                    }

                    file += value as usize;
                    if file > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    iter.next();
                    continue;
                }

                if c == '/' || c == ' ' {
                    return Err(FenParseError::FileDoesNotSumToEight);
                }

                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                if piece.kind == PieceKind::King && board.king_square(piece.color).is_some() {
                    return Err(FenParseError::TooManyKings);
                }

                board.place(Square::of(rank, File::from_index(file)), piece);
                iter.next();
                file += 1;
            }

            if rank != Rank::One {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        let side = Color::try_from(peek(iter)?).map_err(|_| FenParseError::InvalidSideToMove)?;
        iter.next();
        match iter.next() {
            None | Some(' ') => Ok((board, side)),
            Some(c) => Err(FenParseError::UnexpectedChar(c)),
        }
    }

    pub fn as_fen(&self, side_to_move: Color) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                if let Some(piece) = self.piece_at(Square::of(rank, file)) {
                    if empty_squares != 0 {
                        buf.push_str(&empty_squares.to_string());
                    }
                    buf.push_str(&piece.to_string());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                buf.push_str(&empty_squares.to_string());
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        buf.push(' ');
        buf.push_str(&side_to_move.to_string());
        buf.push_str(" - - 0 1");
        buf
    }

    /// Parses a coordinate-notation move against this board. Returns `None`
    /// if the string is malformed or the source square is empty. A pawn move
    /// onto the last rank with no promotion letter promotes to a queen.
    pub fn move_from_uci(&self, move_str: &str) -> Option<Move> {
        let mut mov = move_str.parse::<Move>().ok()?;
        let piece = self.piece_at(mov.from)?;
        if piece.kind == PieceKind::Pawn && mov.to.rank() == piece.color.promotion_rank() {
            if mov.promotion.is_none() {
                mov.promotion = Some(PieceKind::Queen);
            }
        } else if mov.promotion.is_some() {
            return None;
        }

        Some(mov)
    }
}

//
// Trait implementations
//

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                match self.piece_at(Square::of(rank, file)) {
                    Some(piece) => write!(f, " {} ", piece)?,
                    None => f.write_str(" . ")?,
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            f.write_str("---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::initial()
    }
}
