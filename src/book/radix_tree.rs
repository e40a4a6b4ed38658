// Copyright 2017-2020 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `radix_tree` module provides a prefix tree for sequences of moves, used to hold opening
//! books. It is designed to be serialized and deserialized so that a book can be written to disk
//! as JSON and loaded by the engine at runtime.

use std::collections::HashMap;

use crate::moves::Move;

/// A prefix tree keyed by sequences of moves.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RadixTree<T> {
    root: RadixTreeNode<T>,
}

impl<T> RadixTree<T> {
    pub fn new() -> RadixTree<T> {
        RadixTree {
            root: RadixTreeNode::default(),
        }
    }

    /// Inserts a value keyed by the given move sequence, replacing any value already stored
    /// there. Nodes created along the way carry no value.
    pub fn insert(&mut self, move_sequence: &[Move], value: T) {
        let mut cursor = &mut self.root;
        for &mov in move_sequence {
            cursor = cursor
                .children
                .entry(mov)
                .or_insert_with(RadixTreeNode::default);
        }

        cursor.value = Some(value);
    }

    pub fn get(&self, move_sequence: &[Move]) -> Option<&T> {
        self.get_node(move_sequence).and_then(|n| n.value.as_ref())
    }

    pub fn contains_prefix(&self, move_sequence: &[Move]) -> bool {
        self.get_node(move_sequence).is_some()
    }

    /// Calls `func` with every move that extends the given sequence, along with the value stored
    /// for the extended sequence.
    pub fn each_child<F>(&self, move_sequence: &[Move], mut func: F)
    where
        F: FnMut(Move, Option<&T>),
    {
        if let Some(node) = self.get_node(move_sequence) {
            for (&mov, node) in &node.children {
                func(mov, node.value.as_ref())
            }
        }
    }

    /// Walks the given sequence from the root and returns the value of the deepest node along
    /// the way that has one.
    pub fn longest_prefix_value(&self, move_sequence: &[Move]) -> Option<&T> {
        let mut cursor = &self.root;
        let mut found = cursor.value.as_ref();
        for mov in move_sequence {
            cursor = match cursor.children.get(mov) {
                Some(child) => child,
                None => break,
            };

            if cursor.value.is_some() {
                found = cursor.value.as_ref();
            }
        }

        found
    }

    fn get_node(&self, move_sequence: &[Move]) -> Option<&RadixTreeNode<T>> {
        let mut cursor = &self.root;
        for mov in move_sequence {
            cursor = cursor.children.get(mov)?;
        }

        Some(cursor)
    }
}

impl<T> Default for RadixTree<T> {
    fn default() -> RadixTree<T> {
        RadixTree::new()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
struct RadixTreeNode<T> {
    value: Option<T>,
    children: HashMap<Move, RadixTreeNode<T>>,
}

impl<T> Default for RadixTreeNode<T> {
    fn default() -> RadixTreeNode<T> {
        RadixTreeNode {
            value: None,
            children: HashMap::new(),
        }
    }
}
