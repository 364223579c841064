//! Scalar cell values.
//!
//! Source rows carry heterogeneous scalars: spreadsheet-backed artifacts
//! distinguish integers from floats from text, while delimited text is all
//! text. Parsers branch on the variant where the source type matters (an
//! integer DRG code is zero-padded, a text one is kept verbatim).

use std::fmt;

/// One scalar value from a source row.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Blank cell, or delimited field that trimmed to nothing.
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    /// Builds a cell from one delimited-text field. Fields are trimmed;
    /// a field that trims to nothing is [`Cell::Empty`].
    pub fn from_csv_field(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Borrowed text content, for text cells only.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Numeric value of a number cell. Text is not coerced; currency text
    /// goes through the price utilities instead.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(value) => Some(*value as f64),
            Cell::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Rendered text of any non-empty cell. Integer-valued floats render
    /// without a trailing `.0`, so a spreadsheet identifier like `38000501`
    /// survives as `"38000501"`.
    pub fn to_text(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }

    /// Returns a copy with text content trimmed.
    pub fn trimmed(&self) -> Cell {
        match self {
            Cell::Text(value) => Cell::from_csv_field(value),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(value) => write!(f, "{value}"),
            Cell::Int(value) => write!(f, "{value}"),
            Cell::Float(value) => write!(f, "{}", format_float(*value)),
            Cell::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// Formats a float without trailing zeros: `10.50` -> `10.5`, `10.0` -> `10`.
fn format_float(value: f64) -> String {
    let rendered = format!("{value}");
    if rendered.contains('.') {
        rendered
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        rendered
    }
}
