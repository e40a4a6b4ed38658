// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::collections::VecDeque;

use hashbrown::HashMap;

use crate::eval::Score;

/// How a stored score relates to the true value of the position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The score is the exact minimax value at the stored depth.
    Exact,
    /// The search failed high; the true value is at least the score.
    LowerBound,
    /// The search failed low; the true value is at most the score.
    UpperBound,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableEntry {
    pub zobrist_key: u64,
    pub depth: u32,
    pub score: Score,
    pub bound: Bound,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    pub evictions: u64,
}

/// A bounded cache of search results keyed by Zobrist hash.
///
/// An entry for a hash already in the table is only replaced by a result of
/// equal or greater depth. When the table is full, inserting a new hash
/// evicts the oldest inserted entry.
pub struct TranspositionTable {
    table: HashMap<u64, TableEntry>,
    insertion_order: VecDeque<u64>,
    capacity: usize,
    stats: TableStats,
}

impl TranspositionTable {
    pub fn new(capacity: usize) -> TranspositionTable {
        TranspositionTable {
            table: HashMap::new(),
            insertion_order: VecDeque::new(),
            capacity,
            stats: TableStats::default(),
        }
    }

    pub fn stats(&self) -> TableStats {
        self.stats
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn get(&self, zobrist_key: u64) -> Option<&TableEntry> {
        self.table.get(&zobrist_key)
    }

    /// Looks up an entry, counting the lookup as a hit or miss.
    pub fn probe(&mut self, zobrist_key: u64) -> Option<TableEntry> {
        let entry = self.table.get(&zobrist_key).copied();
        if entry.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }

        entry
    }

    pub fn store(&mut self, entry: TableEntry) {
        if self.capacity == 0 {
            return;
        }

        if let Some(existing) = self.table.get_mut(&entry.zobrist_key) {
            if entry.depth >= existing.depth {
                *existing = entry;
                self.stats.stores += 1;
            }
            return;
        }

        if self.table.len() >= self.capacity {
            if let Some(oldest) = self.insertion_order.pop_front() {
                self.table.remove(&oldest);
                self.stats.evictions += 1;
            }
        }

        self.table.insert(entry.zobrist_key, entry);
        self.insertion_order.push_back(entry.zobrist_key);
        self.stats.stores += 1;
    }

    /// Forgets every entry. Statistics are reset as well.
    pub fn clear(&mut self) {
        self.table.clear();
        self.insertion_order.clear();
        self.stats = TableStats::default();
    }
}
