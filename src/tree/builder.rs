//! Two-queue Huffman tree builder

use super::node::{HuffmanTree, Node};
use crate::table::SymbolTable;
use std::cmp::Ordering;
use std::collections::VecDeque;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, PartialEq)]
pub enum TreeError {
    #[error("Cannot build a tree from an empty symbol table")]
    EmptyInput,

    #[error("Failed to build tree: {0}")]
    BuildError(String),
}

/// Builds a Huffman tree from a symbol table
///
/// Leaves wait in `singles`, sorted by weight with ties in table order.
/// Merged nodes are appended to `merged`, whose weights never decrease, so
/// the smaller of the two queue fronts is always the global minimum.
pub struct TreeBuilder {
    singles: VecDeque<Node>,
    merged: VecDeque<Node>,
}

impl TreeBuilder {
    /// Build a tree from a symbol table
    pub fn build(table: &SymbolTable) -> Result<HuffmanTree, TreeError> {
        if table.is_empty() {
            return Err(TreeError::EmptyInput);
        }

        let mut leaves: Vec<Node> = table
            .iter()
            .map(|(symbol, weight)| Node::leaf(symbol, weight))
            .collect();
        // stable: equal weights (0.0 and -0.0 included) stay in table order
        leaves.sort_by(|a, b| {
            a.weight()
                .partial_cmp(&b.weight())
                .unwrap_or(Ordering::Equal)
        });

        let mut builder = Self {
            singles: leaves.into(),
            merged: VecDeque::new(),
        };

        let root = builder.merge_all()?;
        let tree = HuffmanTree::new(root);

        info!(
            symbols = tree.leaf_count(),
            depth = tree.depth(),
            weight = tree.weight(),
            "built Huffman tree"
        );

        Ok(tree)
    }

    fn merge_all(&mut self) -> Result<Node, TreeError> {
        while self.singles.len() + self.merged.len() > 1 {
            let left = self.next_node()?;
            let right = self.next_node()?;

            debug!(
                left = left.weight(),
                right = right.weight(),
                "merging two lowest-weight nodes"
            );

            self.merged.push_back(Node::merge(left, right));
        }

        self.merged
            .pop_front()
            .or_else(|| self.singles.pop_front())
            .ok_or_else(|| TreeError::BuildError("no node left after merging".to_string()))
    }

    /// Pop the lighter queue front; `merged` wins ties
    fn next_node(&mut self) -> Result<Node, TreeError> {
        let take_merged = match (self.merged.front(), self.singles.front()) {
            (Some(m), Some(s)) => m.weight() <= s.weight(),
            (Some(_), None) => true,
            (None, _) => false,
        };

        let node = if take_merged {
            self.merged.pop_front()
        } else {
            self.singles.pop_front()
        };

        node.ok_or_else(|| TreeError::BuildError("both queues are empty".to_string()))
    }
}
