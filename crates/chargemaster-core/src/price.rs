//! Currency and missing-sentinel parsing shared by every institution parser.

use chargemaster_ingest::Cell;

use crate::error::{ParseError, Result};

/// True for the textual "not applicable" sentinels: empty input, `NA`, and
/// `N/A`, case-insensitively. The numeric `-1` convention is applied only by
/// parsers whose institution defines it.
pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NA") || trimmed.eq_ignore_ascii_case("N/A")
}

/// Parses a currency string into a number.
///
/// Missing sentinels return `Ok(None)`. Otherwise a single leading currency
/// symbol and thousands separators are stripped and the remainder parsed as
/// a decimal.
///
/// # Errors
///
/// Fails when the cleaned string is not numeric; callers decide whether to
/// propagate or treat the value as absent.
pub fn parse_price(raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if is_missing(trimmed) {
        return Ok(None);
    }
    let cleaned = trimmed.strip_prefix('$').unwrap_or(trimmed).replace(',', "");
    cleaned
        .trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ParseError::Price {
            value: trimmed.to_string(),
        })
}

/// [`parse_price`] over a scalar cell; numeric cells pass straight through.
///
/// # Errors
///
/// Fails for non-numeric text (as [`parse_price`]) and for boolean cells.
pub fn parse_price_cell(cell: &Cell) -> Result<Option<f64>> {
    match cell {
        Cell::Empty => Ok(None),
        Cell::Int(value) => Ok(Some(*value as f64)),
        Cell::Float(value) => Ok(Some(*value)),
        Cell::Text(value) => parse_price(value),
        Cell::Bool(_) => Err(ParseError::Price {
            value: cell.to_string(),
        }),
    }
}

/// Recover-by-absence variant of [`parse_price_cell`]: an unparsable cell
/// becomes `None` instead of an error, so one malformed value never aborts
/// its row.
pub fn parse_price_lenient(cell: &Cell) -> Option<f64> {
    match parse_price_cell(cell) {
        Ok(value) => value,
        Err(_) => {
            tracing::debug!(value = %cell, "treating unparsable price as absent");
            None
        }
    }
}

/// Recover-by-absence variant of [`parse_price`] for textual values.
pub fn parse_price_lenient_text(raw: &str) -> Option<f64> {
    match parse_price(raw) {
        Ok(value) => value,
        Err(_) => {
            tracing::debug!(value = raw, "treating unparsable price as absent");
            None
        }
    }
}

/// Leading dollar amount of a rate cell that may trail prose, e.g.
/// `"$64,336 days 1-8, $4,843 days 9+"` normalizes to `64336.0`. Returns
/// `None` when the first token is not an amount.
pub fn leading_amount(raw: &str) -> Option<f64> {
    let stripped = raw.replace('$', "");
    let token = stripped.split_whitespace().next()?;
    token.replace(',', "").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_detection() {
        assert!(is_missing(""));
        assert!(is_missing(" NA "));
        assert!(is_missing("n/a"));
        assert!(!is_missing("-1"));
        assert!(!is_missing("Variable"));
    }

    #[test]
    fn leading_amount_takes_the_first_token() {
        assert_eq!(leading_amount("$322,555.66"), Some(322555.66));
        assert_eq!(leading_amount("$64,336 days 1-8, $4,843 days 9+"), Some(64336.0));
        assert_eq!(leading_amount("70% of gross charges"), None);
    }
}
