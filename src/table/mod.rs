//! Symbol probability table

mod loader;

pub use loader::{parse_record, MalformedRecord, RecordError};

use crate::symbol::{Symbol, Weight, ALPHABET_LEN};
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Probability file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read probability file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read probability records: {0}")]
    Read(#[from] io::Error),
}

/// Result of loading a table: the valid entries plus every skipped line
#[derive(Debug)]
pub struct LoadOutcome {
    pub table: SymbolTable,
    pub skipped: Vec<MalformedRecord>,
}

/// Symbol weights in first-appearance order
///
/// The order is the tie-break order used by the tree builder. A symbol that
/// appears twice keeps its first position and takes the last weight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    entries: Vec<(Symbol, Weight)>,
    positions: [Option<usize>; ALPHABET_LEN],
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from already-parsed entries
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Symbol, Weight)>,
    {
        let mut table = Self::new();
        for (symbol, weight) in entries {
            table.insert(symbol, weight);
        }
        table
    }

    /// Read `<letter>\t<probability>` records, skipping malformed lines
    ///
    /// A line that is not valid UTF-8 is skipped like any other malformed
    /// record; only I/O failures abort the load.
    pub fn load<R: BufRead>(mut reader: R) -> Result<LoadOutcome, TableError> {
        let mut table = Self::new();
        let mut skipped = Vec::new();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_number += 1;

            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }

            let (line, parsed) = match std::str::from_utf8(&buf) {
                Ok(line) => (line.to_string(), parse_record(line)),
                Err(_) => (
                    String::from_utf8_lossy(&buf).into_owned(),
                    Err(RecordError::InvalidUtf8),
                ),
            };

            match parsed {
                Ok((symbol, weight)) => {
                    if let Some(previous) = table.insert(symbol, weight) {
                        debug!(
                            line_number,
                            %symbol,
                            previous,
                            weight,
                            "duplicate symbol, keeping the later weight"
                        );
                    }
                }
                Err(reason) => {
                    warn!(line_number, %reason, "skipping malformed record: {:?}", line);
                    skipped.push(MalformedRecord {
                        line_number,
                        line,
                        reason,
                    });
                }
            }
        }

        debug!(
            symbols = table.len(),
            skipped = skipped.len(),
            "loaded probability table"
        );

        Ok(LoadOutcome { table, skipped })
    }

    /// Open and load a probability file
    pub fn from_path(path: &Path) -> Result<LoadOutcome, TableError> {
        let file = fs::File::open(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                TableError::NotFound(path.to_path_buf())
            } else {
                TableError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Self::load(BufReader::new(file)).map_err(|e| match e {
            TableError::Read(source) => TableError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Insert or overwrite a weight, returning the previous weight if any
    pub(crate) fn insert(&mut self, symbol: Symbol, weight: Weight) -> Option<Weight> {
        match self.positions[symbol.index()] {
            Some(pos) => {
                let previous = self.entries[pos].1;
                self.entries[pos].1 = weight;
                Some(previous)
            }
            None => {
                self.positions[symbol.index()] = Some(self.entries.len());
                self.entries.push((symbol, weight));
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn weight(&self, symbol: Symbol) -> Option<Weight> {
        self.positions[symbol.index()].map(|pos| self.entries[pos].1)
    }

    pub fn total_weight(&self) -> Weight {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Entries in tie-break (first appearance) order
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, Weight)> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeBuilder;
    use std::io::Cursor;

    fn sym(c: char) -> Symbol {
        Symbol::from_char(c).unwrap()
    }

    #[test]
    fn test_load_preserves_file_order() {
        let outcome = SymbolTable::load(Cursor::new("C\t0.2\nA\t0.5\nB\t0.3\n")).unwrap();
        let order: Vec<char> = outcome.table.iter().map(|(s, _)| s.as_char()).collect();
        assert_eq!(order, vec!['C', 'A', 'B']);
        assert!(outcome.skipped.is_empty());
        assert!((outcome.table.total_weight() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let source = "A\t0.5\nX 0.2\n\nB\tabc\nC\t0.5\n";
        let outcome = SymbolTable::load(Cursor::new(source)).unwrap();

        assert_eq!(outcome.table.len(), 2);
        assert!(outcome.table.weight(sym('A')).is_some());
        assert!(outcome.table.weight(sym('C')).is_some());
        assert!(outcome.table.weight(sym('X')).is_none());

        let lines: Vec<usize> = outcome.skipped.iter().map(|r| r.line_number).collect();
        assert_eq!(lines, vec![2, 3, 4]);
        assert_eq!(outcome.skipped[0].reason, RecordError::FieldCount(1));
        assert_eq!(outcome.skipped[0].line, "X 0.2");
        assert_eq!(outcome.skipped[1].reason, RecordError::Blank);
    }

    #[test]
    fn test_duplicate_last_value_wins_first_position_kept() {
        let outcome = SymbolTable::load(Cursor::new("A\t0.1\nB\t0.2\nA\t0.7\n")).unwrap();
        let entries: Vec<(char, f64)> = outcome
            .table
            .iter()
            .map(|(s, w)| (s.as_char(), w))
            .collect();
        assert_eq!(entries, vec![('A', 0.7), ('B', 0.2)]);
        assert_eq!(outcome.table.weight(sym('A')), Some(0.7));
    }

    #[test]
    fn test_crlf_line_endings() {
        let outcome = SymbolTable::load(Cursor::new("A\t0.6\r\nB\t0.4\r\n")).unwrap();
        assert_eq!(outcome.table.len(), 2);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped() {
        let source: &[u8] = b"A\t0.5\n\xC9\t0.1\nB\t0.5\n";
        let outcome = SymbolTable::load(Cursor::new(source)).unwrap();

        assert_eq!(outcome.table.len(), 2);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].line_number, 2);
        assert_eq!(outcome.skipped[0].reason, RecordError::InvalidUtf8);
        assert_eq!(outcome.skipped[0].line, "\u{FFFD}\t0.1");
    }

    #[test]
    fn test_last_line_without_newline() {
        let outcome = SymbolTable::load(Cursor::new("A\t0.5\nB\t0.5")).unwrap();
        assert_eq!(outcome.table.len(), 2);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_negative_zero_keeps_file_order() {
        let outcome = SymbolTable::load(Cursor::new("A\t0\nB\t-0\nC\t5\n")).unwrap();
        let codes = TreeBuilder::build(&outcome.table).unwrap().code_table();

        assert_eq!(codes.get(sym('A')), Some("00"));
        assert_eq!(codes.get(sym('B')), Some("01"));
        assert_eq!(codes.get(sym('C')), Some("1"));
    }

    #[test]
    fn test_empty_source() {
        let outcome = SymbolTable::load(Cursor::new("")).unwrap();
        assert!(outcome.table.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = SymbolTable::from_path(Path::new("definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, TableError::NotFound(_)));
    }

    #[test]
    fn test_from_entries_applies_duplicate_rule() {
        let table = SymbolTable::from_entries(vec![(sym('Z'), 1.0), (sym('Z'), 2.0)]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.weight(sym('Z')), Some(2.0));
    }
}
