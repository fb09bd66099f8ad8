//! Huffman tree construction and code derivation

mod builder;
mod codes;
mod node;

pub use builder::{TreeBuilder, TreeError};
pub use codes::CodeTable;
pub use node::{HuffmanTree, Node};
