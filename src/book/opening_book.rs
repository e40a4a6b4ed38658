// Copyright 2017-2020 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rand::seq::SliceRandom;
use rand::Rng;

use crate::book::radix_tree::RadixTree;
use crate::moves::Move;

/// Book lines as space-separated move histories, each naming the opening
/// reached by its last move and how often that move is played.
const STANDARD_LINES: &[(&str, &str, u32)] = &[
    ("e2e4", "King's Pawn Opening", 45),
    ("d2d4", "Queen's Pawn Opening", 40),
    ("c2c4", "English Opening", 10),
    ("g1f3", "Reti Opening", 5),
    ("e2e4 e7e5", "Open Game", 45),
    ("e2e4 c7c5", "Sicilian Defense", 35),
    ("e2e4 e7e6", "French Defense", 12),
    ("e2e4 c7c6", "Caro-Kann Defense", 8),
    ("e2e4 e7e5 g1f3", "King's Knight Opening", 60),
    ("e2e4 e7e5 f1c4", "Bishop's Opening", 15),
    ("e2e4 e7e5 f2f4", "King's Gambit", 15),
    ("e2e4 e7e5 d2d4", "Center Game", 10),
    ("e2e4 e7e5 g1f3 b8c6", "King's Knight Opening: Normal Variation", 70),
    ("e2e4 e7e5 g1f3 g8f6", "Petrov's Defense", 20),
    ("e2e4 e7e5 g1f3 d7d6", "Philidor Defense", 10),
    ("e2e4 e7e5 g1f3 b8c6 f1b5", "Ruy Lopez", 50),
    ("e2e4 e7e5 g1f3 b8c6 f1c4", "Italian Game", 35),
    ("e2e4 e7e5 g1f3 b8c6 d2d4", "Scotch Game", 15),
    ("e2e4 c7c5 g1f3", "Sicilian Defense: Open", 70),
    ("e2e4 c7c5 b1c3", "Sicilian Defense: Closed", 20),
    ("e2e4 c7c5 c2c3", "Sicilian Defense: Alapin Variation", 10),
    ("e2e4 e7e6 d2d4", "French Defense: Normal Variation", 100),
    ("e2e4 c7c6 d2d4", "Caro-Kann Defense: Main Line", 100),
    ("d2d4 d7d5", "Closed Game", 45),
    ("d2d4 g8f6", "Indian Defense", 40),
    ("d2d4 f7f5", "Dutch Defense", 10),
    ("d2d4 e7e6", "Horwitz Defense", 5),
    ("d2d4 d7d5 c2c4", "Queen's Gambit", 65),
    ("d2d4 d7d5 c1f4", "London System", 25),
    ("d2d4 d7d5 g1f3", "Queen's Pawn Game: Zukertort Variation", 10),
    ("d2d4 d7d5 c2c4 e7e6", "Queen's Gambit Declined", 50),
    ("d2d4 d7d5 c2c4 d5c4", "Queen's Gambit Accepted", 25),
    ("d2d4 d7d5 c2c4 c7c6", "Slav Defense", 25),
    ("d2d4 g8f6 c2c4", "Indian Game", 70),
    ("d2d4 g8f6 c1g5", "Trompowsky Attack", 15),
    ("d2d4 g8f6 c1f4", "London System", 15),
    ("d2d4 g8f6 c2c4 e7e6", "Indian Game: East Indian Defense", 45),
    ("d2d4 g8f6 c2c4 g7g6", "King's Indian Defense", 45),
    ("d2d4 g8f6 c2c4 c7c5", "Benoni Defense", 10),
    ("c2c4 e7e5", "English Opening: Reversed Sicilian", 50),
    ("c2c4 g8f6", "English Opening: Anglo-Indian Defense", 50),
    ("g1f3 d7d5", "Reti Opening", 60),
    ("g1f3 g8f6", "Reti Opening: Symmetrical", 40),
];

/// A candidate reply from the opening book.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookMove {
    pub mov: Move,
    pub name: String,
    pub frequency: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
struct BookEntry {
    name: String,
    frequency: u32,
}

/// An opening book: a tree of move histories, each step annotated with the
/// name of the opening it reaches and how often it is played.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct OpeningBook {
    tree: RadixTree<BookEntry>,
}

impl OpeningBook {
    pub fn new() -> OpeningBook {
        OpeningBook {
            tree: RadixTree::new(),
        }
    }

    /// The built-in book covering the most common first few moves.
    pub fn standard() -> OpeningBook {
        let mut book = OpeningBook::new();
        for &(line, name, frequency) in STANDARD_LINES {
            let moves: Vec<Move> = line
                .split_whitespace()
                .map(|m| m.parse().expect("malformed move in standard book"))
                .collect();
            book.add_line(&moves, name, frequency);
        }

        book
    }

    /// Adds a book move, the last move of `line`, as a reply to the moves
    /// preceding it.
    pub fn add_line(&mut self, line: &[Move], name: &str, frequency: u32) {
        self.tree.insert(
            line,
            BookEntry {
                name: name.to_owned(),
                frequency,
            },
        );
    }

    /// All book replies to the given history, most frequent first.
    pub fn book_moves(&self, history: &[Move]) -> Vec<BookMove> {
        let mut moves = vec![];
        self.tree.each_child(history, |mov, entry| {
            if let Some(entry) = entry {
                moves.push(BookMove {
                    mov,
                    name: entry.name.clone(),
                    frequency: entry.frequency,
                });
            }
        });

        moves.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.mov.to_string().cmp(&b.mov.to_string()))
        });
        moves
    }

    /// Picks a book reply at random, weighted by how often each is played.
    pub fn book_move<R: Rng>(&self, history: &[Move], rng: &mut R) -> Option<BookMove> {
        let moves = self.book_moves(history);
        moves
            .choose_weighted(rng, |m| m.frequency)
            .ok()
            .cloned()
    }

    /// Whether the book has any reply to the given history.
    pub fn contains(&self, history: &[Move]) -> bool {
        !self.book_moves(history).is_empty()
    }

    /// The name of the deepest book position reached by the given history.
    pub fn opening_name(&self, history: &[Move]) -> Option<&str> {
        self.tree
            .longest_prefix_value(history)
            .map(|e| e.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::OpeningBook;
    use crate::board::Board;
    use crate::movegen;
    use crate::moves::Move;
    use crate::types::Color;

    fn line(moves: &str) -> Vec<Move> {
        moves.split_whitespace().map(|m| m.parse().unwrap()).collect()
    }

    #[test]
    fn standard_book_is_legal() {
        // every reply in the book must be playable from the position its
        // history reaches.
        fn walk(book: &OpeningBook, history: &mut Vec<Move>, board: &Board, side: Color) {
            for reply in book.book_moves(history) {
                assert!(
                    movegen::legal_moves(board, side).contains(&reply.mov),
                    "{} after {:?}",
                    reply.mov,
                    history
                );
                history.push(reply.mov);
                walk(book, history, &board.apply_move(reply.mov), side.toggle());
                history.pop();
            }
        }

        let book = OpeningBook::standard();
        walk(&book, &mut vec![], &Board::initial(), Color::White);
    }

    #[test]
    fn replies_sorted_by_frequency() {
        let book = OpeningBook::standard();
        let replies = book.book_moves(&line("e2e4"));
        assert_eq!(4, replies.len());
        assert_eq!("e7e5", replies[0].mov.to_string());
        assert_eq!("Open Game", replies[0].name);
        assert!(replies.windows(2).all(|w| w[0].frequency >= w[1].frequency));
    }

    #[test]
    fn book_move_comes_from_book() {
        let book = OpeningBook::standard();
        let mut rng = StdRng::seed_from_u64(42);
        let history = line("d2d4 d7d5");
        let replies = book.book_moves(&history);
        for _ in 0..20 {
            let choice = book.book_move(&history, &mut rng).unwrap();
            assert!(replies.contains(&choice));
        }
    }

    #[test]
    fn out_of_book() {
        let book = OpeningBook::standard();
        let mut rng = StdRng::seed_from_u64(42);
        let history = line("a2a3");
        assert!(!book.contains(&history));
        assert!(book.book_move(&history, &mut rng).is_none());
        assert!(book.contains(&[]));
    }

    #[test]
    fn opening_names() {
        let book = OpeningBook::standard();
        assert_eq!(None, book.opening_name(&[]));
        assert_eq!(Some("Sicilian Defense"), book.opening_name(&line("e2e4 c7c5")));
        assert_eq!(
            Some("Ruy Lopez"),
            book.opening_name(&line("e2e4 e7e5 g1f3 b8c6 f1b5 a7a6 b5a4"))
        );
    }

    #[test]
    fn json_round_trip() {
        let book = OpeningBook::standard();
        let json = serde_json::to_string(&book).unwrap();
        let loaded: OpeningBook = serde_json::from_str(&json).unwrap();
        let history = line("e2e4 e7e5");
        assert_eq!(book.book_moves(&history), loaded.book_moves(&history));
    }
}
