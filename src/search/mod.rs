// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
mod difficulty;
mod engine;
mod searcher;
mod transposition_table;

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use engine::{Engine, EngineConfig, DEFAULT_TABLE_CAPACITY};
pub use searcher::{order_moves, Search, SearchResult};
pub use transposition_table::{Bound, TableEntry, TableStats, TranspositionTable};
