// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate criterion;

use criterion::black_box;
use criterion::Criterion;
use hermes::eval::{BoardEvaluator, PieceSquareEvaluator};
use hermes::{movegen, zobrist};
use hermes::{Board, Color, Difficulty, Engine, EngineConfig};

const MIDDLEGAME_FEN: &str = "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b";

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("board clone", |b| {
        let board = Board::initial();
        b.iter(|| black_box(&board).clone())
    });

    c.bench_function("generate moves start", |b| {
        let board = Board::initial();
        b.iter(|| movegen::legal_moves(black_box(&board), Color::White))
    });

    c.bench_function("generate moves middlegame", |b| {
        let (board, side) = Board::from_fen(MIDDLEGAME_FEN).unwrap();
        b.iter(|| movegen::legal_moves(black_box(&board), side))
    });

    c.bench_function("evaluate middlegame", |b| {
        let (board, _) = Board::from_fen(MIDDLEGAME_FEN).unwrap();
        let evaluator = PieceSquareEvaluator::new(true);
        b.iter(|| evaluator.evaluate(black_box(&board)))
    });

    c.bench_function("zobrist hash", |b| {
        let board = Board::initial();
        b.iter(|| zobrist::hash(black_box(&board), Color::Black))
    });

    c.bench_function("search middlegame depth 2", |b| {
        let (board, _) = Board::from_fen(MIDDLEGAME_FEN).unwrap();
        b.iter(|| {
            let mut engine = Engine::new(EngineConfig {
                seed: Some(0),
                max_depth: Some(2),
                ..Default::default()
            });
            engine.best_move(black_box(&board), Difficulty::Grandmaster, &[])
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
