// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp::{self, Reverse};

use rand::Rng;

use crate::board::Board;
use crate::eval::{BoardEvaluator, Score};
use crate::movegen;
use crate::moves::Move;
use crate::search::{Bound, TableEntry, TranspositionTable};
use crate::types::Color;
use crate::zobrist;

pub struct SearchResult {
    pub best_move: Move,
    pub nodes_searched: u64,
    /// The unperturbed score of the chosen move, from the searching color's
    /// point of view.
    pub score: Score,
}

/// A single fixed-depth search on behalf of one color.
///
/// Scores inside the search are always from the point of view of the
/// searching color: it is the maximizing player, and its opponent the
/// minimizing one.
pub struct Search<'a, E> {
    evaluator: &'a E,
    ttable: Option<&'a mut TranspositionTable>,
    maximizer: Color,
    nodes_searched: u64,
}

impl<'a, E: BoardEvaluator> Search<'a, E> {
    pub fn new(
        evaluator: &'a E,
        ttable: Option<&'a mut TranspositionTable>,
        maximizer: Color,
    ) -> Search<'a, E> {
        Search {
            evaluator,
            ttable,
            maximizer,
            nodes_searched: 0,
        }
    }

    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    /// Searches every legal move of the maximizing color to the given depth
    /// and picks the one with the highest score after adding uniform noise
    /// of the given width. Returns None if there are no legal moves.
    pub fn search_root<R: Rng>(
        &mut self,
        board: &Board,
        depth: u32,
        randomness: f64,
        rng: &mut R,
    ) -> Option<SearchResult> {
        debug_assert!(
            !movegen::is_king_in_check(board, self.maximizer.toggle()),
            "search root has the side not to move in check"
        );
        let mut moves = movegen::legal_moves(board, self.maximizer);
        order_moves(board, &mut moves);

        let mut best: Option<(Move, Score, f64)> = None;
        for mov in moves {
            let child = board.apply_move(mov);
            let score = self.minimax(&child, depth, -Score::INFINITY, Score::INFINITY, false);
            let perturbed = f64::from(score.0) + (rng.gen::<f64>() - 0.5) * randomness;
            debug!("root move {}: {} (perturbed {:.1})", mov, score, perturbed);
            let improves = match best {
                Some((_, _, best_perturbed)) => perturbed > best_perturbed,
                None => true,
            };

            if improves {
                best = Some((mov, score, perturbed));
            }
        }

        best.map(|(best_move, score, _)| SearchResult {
            best_move,
            score,
            nodes_searched: self.nodes_searched,
        })
    }

    fn side_to_move(&self, maximizing: bool) -> Color {
        if maximizing {
            self.maximizer
        } else {
            self.maximizer.toggle()
        }
    }

    fn evaluate(&mut self, board: &Board) -> Score {
        self.nodes_searched += 1;
        self.evaluator.evaluate(board).relative_to(self.maximizer)
    }

    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Score {
        let side = self.side_to_move(maximizing);
        let key = zobrist::hash(board, side);
        if let Some(entry) = self.ttable.as_mut().and_then(|t| t.probe(key)) {
            if entry.depth >= depth {
                match entry.bound {
                    Bound::Exact => return entry.score,
                    Bound::LowerBound => alpha = cmp::max(alpha, entry.score),
                    Bound::UpperBound => beta = cmp::min(beta, entry.score),
                }

                if alpha >= beta {
                    return entry.score;
                }
            }
        }

        if depth == 0 {
            return self.quiesce(board, alpha, beta, maximizing);
        }

        let mut moves = movegen::legal_moves(board, side);
        if moves.is_empty() {
            self.nodes_searched += 1;
            let score = if !movegen::is_king_in_check(board, side) {
                Score::DRAW
            } else if maximizing {
                -Score::CHECKMATE
            } else {
                Score::CHECKMATE
            };

            self.record(key, depth, score, Bound::Exact);
            return score;
        }

        order_moves(board, &mut moves);
        let (window_alpha, window_beta) = (alpha, beta);
        let mut best;
        if maximizing {
            best = -Score::INFINITY;
            for mov in moves {
                let score = self.minimax(&board.apply_move(mov), depth - 1, alpha, beta, false);
                best = cmp::max(best, score);
                alpha = cmp::max(alpha, score);
                if alpha >= beta {
                    break;
                }
            }
        } else {
            best = Score::INFINITY;
            for mov in moves {
                let score = self.minimax(&board.apply_move(mov), depth - 1, alpha, beta, true);
                best = cmp::min(best, score);
                beta = cmp::min(beta, score);
                if alpha >= beta {
                    break;
                }
            }
        }

        let bound = if best <= window_alpha {
            Bound::UpperBound
        } else if best >= window_beta {
            Bound::LowerBound
        } else {
            Bound::Exact
        };

        self.record(key, depth, best, bound);
        best
    }

    /// Extends the search along captures only, so that the static evaluator
    /// is never asked to score a position in the middle of an exchange. The
    /// side to move may always decline to capture, so the static score is a
    /// floor (or ceiling, for the minimizer) on the result.
    pub fn quiesce(
        &mut self,
        board: &Board,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Score {
        let stand_pat = self.evaluate(board);
        if stand_pat.is_mate() {
            return stand_pat;
        }

        let side = self.side_to_move(maximizing);
        let mut best = stand_pat;
        if maximizing {
            if stand_pat >= beta {
                return stand_pat;
            }

            alpha = cmp::max(alpha, stand_pat);
            let mut captures = movegen::legal_captures(board, side);
            order_moves(board, &mut captures);
            for mov in captures {
                let score = self.quiesce(&board.apply_move(mov), alpha, beta, false);
                best = cmp::max(best, score);
                alpha = cmp::max(alpha, score);
                if alpha >= beta {
                    break;
                }
            }
        } else {
            if stand_pat <= alpha {
                return stand_pat;
            }

            beta = cmp::min(beta, stand_pat);
            let mut captures = movegen::legal_captures(board, side);
            order_moves(board, &mut captures);
            for mov in captures {
                let score = self.quiesce(&board.apply_move(mov), alpha, beta, true);
                best = cmp::min(best, score);
                beta = cmp::min(beta, score);
                if alpha >= beta {
                    break;
                }
            }
        }

        best
    }

    fn record(&mut self, zobrist_key: u64, depth: u32, score: Score, bound: Bound) {
        if let Some(table) = self.ttable.as_mut() {
            table.store(TableEntry {
                zobrist_key,
                depth,
                score,
                bound,
            });
        }
    }
}

/// Orders moves so that captures of valuable pieces by cheap ones come
/// first. Quiet moves keep their generation order.
pub fn order_moves(board: &Board, moves: &mut Vec<Move>) {
    moves.sort_by_key(|&mov| Reverse(move_priority(board, mov)));
}

fn move_priority(board: &Board, mov: Move) -> i32 {
    let mut priority = 0;
    if let Some(victim) = board.piece_at(mov.to) {
        let attacker = board
            .piece_at(mov.from)
            .map(|p| p.kind.value())
            .unwrap_or(0);
        priority += 10 * victim.kind.value() - attacker;
    }

    if let Some(kind) = mov.promotion {
        priority += kind.value();
    }

    priority
}
