//! Letter symbols and their weights

use std::fmt;
use thiserror::Error;

/// Probability or summed probability attached to a node
pub type Weight = f64;

/// Number of distinct symbols (`A`..`Z`)
pub const ALPHABET_LEN: usize = 26;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SymbolError {
    #[error("'{0}' is not an uppercase letter A-Z")]
    NotUppercase(char),
}

/// A single uppercase letter, stored as its offset from `A`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u8);

impl Symbol {
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_uppercase() {
            Some(Self(c as u8 - b'A'))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        (b'A' + self.0) as char
    }
}

impl TryFrom<char> for Symbol {
    type Error = SymbolError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c).ok_or(SymbolError::NotUppercase(c))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
