//! Line encoder and decoder
//!
//! Both directions pass spaces through unchanged. Positions in errors are
//! zero-based character offsets into the input.

use crate::symbol::Symbol;
use crate::tree::{CodeTable, HuffmanTree, Node};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    #[error("Cannot encode {ch:?} at position {position}: only uppercase letters from the table and spaces are supported")]
    UnsupportedSymbol { ch: char, position: usize },

    #[error("Invalid bit {ch:?} at position {position}")]
    InvalidBit { ch: char, position: usize },

    #[error("Encoded input ends in the middle of a code (after position {position})")]
    TruncatedCode { position: usize },
}

/// Encode a line of uppercase letters and spaces into a `0`/`1` string
pub fn encode(line: &str, codes: &CodeTable) -> Result<String, CodecError> {
    let mut encoded = String::with_capacity(line.len() * 4);

    for (position, ch) in line.chars().enumerate() {
        if ch == ' ' {
            encoded.push(' ');
            continue;
        }

        let code = Symbol::from_char(ch)
            .and_then(|symbol| codes.get(symbol))
            .ok_or(CodecError::UnsupportedSymbol { ch, position })?;
        encoded.push_str(code);
    }

    Ok(encoded)
}

/// Decode a `0`/`1` string by walking the tree from the root
///
/// A space is copied to the output without resetting the walk. Input must end
/// on a code boundary.
pub fn decode(bits: &str, tree: &HuffmanTree) -> Result<String, CodecError> {
    let root = tree.root();
    let mut decoded = String::new();
    let mut cursor = root;
    let mut consumed = 0;

    for (position, ch) in bits.chars().enumerate() {
        consumed = position + 1;

        let bit = match ch {
            '0' => false,
            '1' => true,
            ' ' => {
                decoded.push(' ');
                continue;
            }
            _ => return Err(CodecError::InvalidBit { ch, position }),
        };

        cursor = match cursor.child(bit) {
            Some(next) => next,
            // single-symbol tree: the lone leaf is coded as `0`
            None if !bit => cursor,
            None => return Err(CodecError::InvalidBit { ch, position }),
        };

        if let Node::Leaf { symbol, .. } = cursor {
            decoded.push(symbol.as_char());
            cursor = root;
        }
    }

    if !std::ptr::eq(cursor, root) {
        return Err(CodecError::TruncatedCode {
            position: consumed.saturating_sub(1),
        });
    }

    Ok(decoded)
}
