//! Common test utilities

#![allow(dead_code)]

use std::path::PathBuf;

use huffman_letters::{CodeTable, HuffmanTree, Symbol, SymbolTable, TreeBuilder};

/// Get the path to the testdata directory
pub fn testdata_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

pub fn fixture(name: &str) -> PathBuf {
    testdata_dir().join(name)
}

/// Load a probability fixture and build its tree and codes
pub fn build_fixture(name: &str) -> (SymbolTable, HuffmanTree, CodeTable) {
    let outcome = SymbolTable::from_path(&fixture(name)).expect("Failed to load fixture");
    let tree = TreeBuilder::build(&outcome.table).expect("Failed to build tree");
    let codes = tree.code_table();
    (outcome.table, tree, codes)
}

pub fn table_from(entries: &[(char, f64)]) -> SymbolTable {
    SymbolTable::from_entries(
        entries
            .iter()
            .map(|&(c, w)| (Symbol::from_char(c).expect("not an uppercase letter"), w)),
    )
}

pub fn code_of(codes: &CodeTable, c: char) -> &str {
    codes
        .get(Symbol::from_char(c).expect("not an uppercase letter"))
        .expect("symbol has no code")
}

/// Every pair with strictly lower weight must have a code at least as long
pub fn lengths_follow_weights(table: &SymbolTable, codes: &CodeTable) -> bool {
    let lengths: Vec<(f64, usize)> = table
        .iter()
        .map(|(symbol, weight)| (weight, codes.get(symbol).map_or(0, str::len)))
        .collect();

    lengths.iter().all(|&(w_low, len_low)| {
        lengths
            .iter()
            .filter(|&&(w_high, _)| w_low < w_high)
            .all(|&(_, len_high)| len_low >= len_high)
    })
}
