// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::process;
use std::time::Instant;

use clap::{App, Arg, ArgMatches, SubCommand};
use hermes::book::OpeningBook;
use hermes::eval::{BoardEvaluator, PieceSquareEvaluator};
use hermes::movegen;
use hermes::{perft, Board, Color, Difficulty, Engine, EngineConfig, GameStatus, Move};

fn engine_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("difficulty")
            .help("Engine strength: easy, medium, hard or grandmaster")
            .value_name("LEVEL")
            .long("--difficulty")
            .takes_value(true)
            .default_value("medium"),
        Arg::with_name("depth")
            .help("Depth of move tree to search, overriding the difficulty")
            .value_name("DEPTH")
            .short("-d")
            .long("--depth")
            .takes_value(true),
        Arg::with_name("seed")
            .help("Seed for the engine's random choices")
            .value_name("SEED")
            .long("--seed")
            .takes_value(true),
        Arg::with_name("no-tt")
            .help("Disable the transposition table")
            .long("--no-tt"),
    ]
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("depth")
                        .help("Depth of move tree to search")
                        .value_name("DEPTH")
                        .short("-d")
                        .long("--depth")
                        .takes_value(true)
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("evaluate")
                .about("Evaluate a board position and search it for the side to move")
                .arg(
                    Arg::with_name("FEN")
                        .help("FEN string for a board position")
                        .required(true)
                        .index(1),
                )
                .args(&engine_args()),
        )
        .subcommand(
            SubCommand::with_name("play")
                .about("Play a game against the engine")
                .arg(
                    Arg::with_name("color")
                        .help("The color you play")
                        .value_name("COLOR")
                        .long("--color")
                        .possible_values(&["white", "black"])
                        .default_value("white"),
                )
                .arg(
                    Arg::with_name("book")
                        .help("JSON opening book to use instead of the built-in one")
                        .value_name("FILE")
                        .long("--book")
                        .takes_value(true),
                )
                .args(&engine_args()),
        )
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("evaluate", Some(matches)) => run_evaluate(matches),
        ("play", Some(matches)) => run_play(matches),
        _ => {
            eprintln!("{}", matches.usage());
            process::exit(1);
        }
    }
}

fn parse_fen(matches: &ArgMatches) -> (Board, Color) {
    let fen = matches.value_of("FEN").unwrap();
    match Board::from_fen(fen) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("invalid fen: {}", err);
            process::exit(1);
        }
    }
}

fn engine_config(matches: &ArgMatches, computer: Color) -> (EngineConfig, Difficulty) {
    let difficulty = value_t_or_exit!(matches, "difficulty", Difficulty);
    let config = EngineConfig {
        computer,
        use_transposition_table: !matches.is_present("no-tt"),
        seed: matches.value_of("seed").map(|_| value_t_or_exit!(matches, "seed", u64)),
        max_depth: matches
            .value_of("depth")
            .map(|_| value_t_or_exit!(matches, "depth", u32)),
        ..Default::default()
    };

    (config, difficulty)
}

fn run_perft(matches: &ArgMatches) -> ! {
    let (board, side) = parse_fen(matches);
    let depth = value_t_or_exit!(matches, "depth", u32);
    println!("fen:   {}", board.as_fen(side));
    println!("depth: {}", depth);
    println!();
    println!("{}", board);
    println!();
    for i in 1..=depth {
        let start = Instant::now();
        let results = perft(&board, side, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_evaluate(matches: &ArgMatches) -> ! {
    let (board, side) = parse_fen(matches);
    let (config, difficulty) = engine_config(matches, side);
    println!("fen:    {}", board.as_fen(side));
    println!("status: {:?}", movegen::game_status(&board, side));
    println!();
    println!("{}", board);
    println!();

    let evaluator = PieceSquareEvaluator::new(difficulty.check_bonus());
    println!("static: {}", evaluator.evaluate(&board));
    let start = Instant::now();
    let mut engine = Engine::new(config);
    match engine.search(&board, difficulty) {
        Some(result) => {
            println!("best move: {}", result.best_move);
            println!("    score: {}", result.score);
            println!("    nodes: {}", result.nodes_searched);
            println!("     time: {} ms", start.elapsed().as_millis());
        }
        None => println!("no legal moves"),
    }

    process::exit(0);
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "white",
        Color::Black => "black",
    }
}

fn load_book(matches: &ArgMatches) -> OpeningBook {
    let path = match matches.value_of("book") {
        Some(path) => path,
        None => return OpeningBook::standard(),
    };

    let book = File::open(path)
        .map_err(|e| e.to_string())
        .and_then(|file| serde_json::from_reader(file).map_err(|e| e.to_string()));
    match book {
        Ok(book) => book,
        Err(err) => {
            eprintln!("failed to load opening book {}: {}", path, err);
            process::exit(1);
        }
    }
}

fn run_play(matches: &ArgMatches) -> ! {
    let human = match matches.value_of("color") {
        Some("black") => Color::Black,
        _ => Color::White,
    };
    let (config, difficulty) = engine_config(matches, human.toggle());
    let mut engine = Engine::new(config).with_book(load_book(matches));
    let mut board = Board::initial();
    let mut history: Vec<Move> = vec![];
    let mut side = Color::White;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("{}", board);
        match movegen::game_status(&board, side) {
            GameStatus::Checkmate => {
                println!("checkmate, {} wins", color_name(side.toggle()));
                break;
            }
            GameStatus::Stalemate => {
                println!("stalemate");
                break;
            }
            GameStatus::Check => println!("{} is in check", color_name(side)),
            GameStatus::Ongoing => {}
        }

        let mov = if side == human {
            print!("your move: ");
            let _ = io::stdout().flush();
            let line = match lines.next() {
                Some(Ok(line)) => line,
                _ => break,
            };

            match board.move_from_uci(line.trim()) {
                Some(mov) if movegen::legal_moves(&board, side).contains(&mov) => mov,
                _ => {
                    println!("illegal move: {}", line.trim());
                    continue;
                }
            }
        } else {
            let mov = match engine.book_move(&board, &history) {
                Some(mov) => Some(mov),
                None => engine.best_move(&board, difficulty, &[]),
            };

            match mov {
                Some(mov) => {
                    println!("engine plays {}", mov);
                    mov
                }
                None => break,
            }
        };

        board = board.apply_move(mov);
        history.push(mov);
        side = side.toggle();
        if let Some(name) = engine.book().and_then(|b| b.opening_name(&history)) {
            println!("opening: {}", name);
        }
    }

    process::exit(0);
}
