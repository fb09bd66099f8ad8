//! Probability record parsing

use crate::symbol::{Symbol, Weight};
use thiserror::Error;

/// Why a line of the probability source was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("blank line")]
    Blank,

    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    #[error("expected 2 tab-separated fields, found {0}")]
    FieldCount(usize),

    #[error("'{0}' is not a single uppercase letter")]
    BadSymbol(String),

    #[error("'{0}' is not a decimal number")]
    BadProbability(String),

    #[error("probability {0} is negative")]
    NegativeProbability(Weight),

    #[error("probability '{0}' is not finite")]
    NonFiniteProbability(String),
}

/// A skipped line, kept so callers can report or inspect it
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedRecord {
    /// 1-based line number in the source
    pub line_number: usize,
    pub line: String,
    pub reason: RecordError,
}

/// Parse one `<letter>\t<probability>` record
pub fn parse_record(line: &str) -> Result<(Symbol, Weight), RecordError> {
    if line.trim().is_empty() {
        return Err(RecordError::Blank);
    }

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 2 {
        return Err(RecordError::FieldCount(fields.len()));
    }

    let symbol = parse_symbol(fields[0].trim())?;
    let weight = parse_probability(fields[1].trim())?;

    Ok((symbol, weight))
}

fn parse_symbol(field: &str) -> Result<Symbol, RecordError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            Symbol::from_char(c).ok_or_else(|| RecordError::BadSymbol(field.to_string()))
        }
        _ => Err(RecordError::BadSymbol(field.to_string())),
    }
}

fn parse_probability(field: &str) -> Result<Weight, RecordError> {
    let value: Weight = field
        .parse()
        .map_err(|_| RecordError::BadProbability(field.to_string()))?;

    if !value.is_finite() {
        return Err(RecordError::NonFiniteProbability(field.to_string()));
    }
    if value < 0.0 {
        return Err(RecordError::NegativeProbability(value));
    }

    // "-0" parses as -0.0, which would sort ahead of 0.0
    Ok(if value == 0.0 { 0.0 } else { value })
}
