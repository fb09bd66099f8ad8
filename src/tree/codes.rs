//! Code table derivation

use super::node::{HuffmanTree, Node};
use crate::symbol::{Symbol, Weight};
use crate::table::SymbolTable;
use std::collections::BTreeMap;

/// Bit codes for every symbol reachable in a tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Symbol, String>,
}

impl CodeTable {
    /// Walk the tree depth-first, `0` for left edges and `1` for right edges
    ///
    /// A tree made of a single leaf has no edges; its symbol gets the code `0`.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();

        match tree.root() {
            Node::Leaf { symbol, .. } => {
                codes.insert(*symbol, "0".to_string());
            }
            root => collect(root, &mut String::new(), &mut codes),
        }

        Self { codes }
    }

    pub fn get(&self, symbol: Symbol) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes ordered by symbol
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> + '_ {
        self.codes.iter().map(|(s, c)| (*s, c.as_str()))
    }

    /// True when no code is a prefix of another
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&str> = self.codes.values().map(String::as_str).collect();
        sorted.sort_unstable();
        // a prefix sorts immediately before some string it prefixes
        sorted.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    /// Expected code length in bits per symbol, weighted by the table
    ///
    /// Weights are scaled by the largest one first, so tables whose total
    /// overflows `f64` still give a finite result.
    pub fn weighted_length(&self, table: &SymbolTable) -> Weight {
        let max = table.iter().map(|(_, w)| w).fold(0.0, Weight::max);
        if max == 0.0 || !max.is_finite() {
            return 0.0;
        }

        let (bits, total) = table
            .iter()
            .filter_map(|(symbol, weight)| {
                self.get(symbol).map(|code| (weight / max, code.len()))
            })
            .fold((0.0, 0.0), |(bits, total), (scaled, len)| {
                (bits + scaled * len as Weight, total + scaled)
            });

        if total == 0.0 {
            return 0.0;
        }
        bits / total
    }
}

fn collect(node: &Node, prefix: &mut String, codes: &mut BTreeMap<Symbol, String>) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(*symbol, prefix.clone());
        }
        Node::Internal { left, right, .. } => {
            prefix.push('0');
            collect(left, prefix, codes);
            prefix.pop();

            prefix.push('1');
            collect(right, prefix, codes);
            prefix.pop();
        }
    }
}
