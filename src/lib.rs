//! Huffman coding for the letters `A`..`Z`
//!
//! A [`SymbolTable`] of letter probabilities is turned into a [`HuffmanTree`]
//! by [`TreeBuilder`], which also yields a [`CodeTable`]. Lines of uppercase
//! letters and spaces are then converted with [`encode`] and [`decode`].

pub mod cli;
pub mod codec;
pub mod config;
pub mod output;
pub mod symbol;
pub mod table;
pub mod tree;

pub use codec::{decode, encode, CodecError};
pub use symbol::{Symbol, Weight};
pub use table::{LoadOutcome, MalformedRecord, SymbolTable, TableError};
pub use tree::{CodeTable, HuffmanTree, Node, TreeBuilder, TreeError};
