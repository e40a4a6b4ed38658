// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::Board;
use crate::book::OpeningBook;
use crate::eval::PieceSquareEvaluator;
use crate::movegen;
use crate::moves::Move;
use crate::search::{Difficulty, Search, SearchResult, TranspositionTable};
use crate::types::{Color, Piece};

/// Default number of positions retained by the transposition table.
pub const DEFAULT_TABLE_CAPACITY: usize = 1_000_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// The color the engine plays.
    pub computer: Color,
    pub tt_capacity: usize,
    pub use_transposition_table: bool,
    /// Seed for the root-score noise and book move selection. Seeded from
    /// entropy if absent.
    pub seed: Option<u64>,
    /// Overrides the search depth implied by the difficulty.
    pub max_depth: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            computer: Color::Black,
            tt_capacity: DEFAULT_TABLE_CAPACITY,
            use_transposition_table: true,
            seed: None,
            max_depth: None,
        }
    }
}

/// The computer opponent. An engine owns its transposition table, which
/// persists across moves of the same game until `new_game` is called or the
/// difficulty switches to a different scoring mode.
pub struct Engine {
    config: EngineConfig,
    ttable: TranspositionTable,
    // Check bonus setting the table's scores were computed with.
    table_check_bonus: Option<bool>,
    rng: StdRng,
    book: Option<OpeningBook>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Engine {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Engine {
            ttable: TranspositionTable::new(config.tt_capacity),
            table_check_bonus: None,
            config,
            rng,
            book: None,
        }
    }

    pub fn with_book(mut self, book: OpeningBook) -> Engine {
        self.book = Some(book);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table(&self) -> &TranspositionTable {
        &self.ttable
    }

    pub fn book(&self) -> Option<&OpeningBook> {
        self.book.as_ref()
    }

    /// Forgets everything learned during the previous game.
    pub fn new_game(&mut self) {
        self.ttable.clear();
        self.table_check_bonus = None;
    }

    /// Searches the given board with the computer to move. Returns None if
    /// the computer has no legal moves.
    pub fn search(&mut self, board: &Board, difficulty: Difficulty) -> Option<SearchResult> {
        let depth = self.config.max_depth.unwrap_or_else(|| difficulty.depth());
        let evaluator = PieceSquareEvaluator::new(difficulty.check_bonus());
        if self.table_check_bonus != Some(difficulty.check_bonus()) {
            if !self.ttable.is_empty() {
                debug!("scoring changed at {}, clearing transposition table", difficulty);
                self.ttable.clear();
            }
            self.table_check_bonus = Some(difficulty.check_bonus());
        }

        let ttable = if self.config.use_transposition_table {
            Some(&mut self.ttable)
        } else {
            None
        };

        info!(
            "searching as {} at {} (depth {})",
            self.config.computer, difficulty, depth
        );
        let mut search = Search::new(&evaluator, ttable, self.config.computer);
        let result = search.search_root(board, depth, difficulty.randomness(), &mut self.rng);
        match result {
            Some(ref result) => info!(
                "best move {} ({}), {} nodes",
                result.best_move, result.score, result.nodes_searched
            ),
            None => info!("no legal moves for {}", self.config.computer),
        }

        debug!(
            "transposition table: {} entries, {:?}",
            self.ttable.len(),
            self.ttable.stats()
        );
        result
    }

    /// Picks the computer's move. Captured pieces are accepted for
    /// interface compatibility and do not influence the choice.
    pub fn best_move(
        &mut self,
        board: &Board,
        difficulty: Difficulty,
        _captured: &[Piece],
    ) -> Option<Move> {
        self.search(board, difficulty).map(|r| r.best_move)
    }

    /// Consults the opening book for a reply to the given move history.
    /// Only moves that are legal on the given board are returned.
    pub fn book_move(&mut self, board: &Board, history: &[Move]) -> Option<Move> {
        let book = self.book.as_ref()?;
        let candidate = book.book_move(history, &mut self.rng)?;
        if !movegen::legal_moves(board, self.config.computer).contains(&candidate.mov) {
            warn!("book move {} is not legal here, ignoring", candidate.mov);
            return None;
        }

        info!("book move {} ({})", candidate.mov, candidate.name);
        Some(candidate.mov)
    }
}
