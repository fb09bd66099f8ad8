//! Tree nodes

use super::codes::CodeTable;
use crate::symbol::{Symbol, Weight};

/// A node in the Huffman tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A symbol with its input weight
    Leaf { symbol: Symbol, weight: Weight },
    /// Merge of two subtrees; `left` is reached with bit `0`, `right` with `1`
    Internal {
        weight: Weight,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(symbol: Symbol, weight: Weight) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Join two subtrees under a new internal node
    pub fn merge(left: Node, right: Node) -> Self {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> Weight {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Child reached by `bit`, or `None` at a leaf
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { right } else { left }),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn internal_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => {
                1 + left.internal_count() + right.internal_count()
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

/// A finished Huffman tree; owns every node through its root
#[derive(Debug, Clone, PartialEq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    pub(crate) fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Sum of all symbol weights
    pub fn weight(&self) -> Weight {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn internal_count(&self) -> usize {
        self.root.internal_count()
    }

    /// Length of the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Derive the code of every leaf symbol
    pub fn code_table(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(c: char, w: Weight) -> Node {
        Node::leaf(Symbol::from_char(c).unwrap(), w)
    }

    #[test]
    fn test_merge_sums_weights() {
        let node = Node::merge(leaf('A', 0.25), leaf('B', 0.5));
        assert_eq!(node.weight(), 0.75);
        assert!(!node.is_leaf());
        assert_eq!(node.child(false).and_then(Node::symbol).map(|s| s.as_char()), Some('A'));
        assert_eq!(node.child(true).and_then(Node::symbol).map(|s| s.as_char()), Some('B'));
    }

    #[test]
    fn test_leaf_has_no_children() {
        let node = leaf('Q', 1.0);
        assert!(node.child(false).is_none());
        assert!(node.child(true).is_none());
    }

    #[test]
    fn test_counts_and_depth() {
        let tree = HuffmanTree::new(Node::merge(
            leaf('A', 0.5),
            Node::merge(leaf('B', 0.25), leaf('C', 0.25)),
        ));
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.internal_count(), 2);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.weight(), 1.0);
    }
}
