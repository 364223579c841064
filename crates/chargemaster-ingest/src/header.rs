//! Header discovery for wide rate tables.
//!
//! Published chargemaster files routinely open with titles, usage
//! instructions, and blank lines before the real column header. Discovery
//! scans rows from the top and accepts the first row in which more than a
//! fixed number of cells match the institution's known column names. Column
//! positions are recorded by name, never by fixed index, so a source that
//! reorders its columns parses identically.
//!
//! A header cell can also name several payers at once, joined by an embedded
//! separator (a line break, or `;`). When a [`HeaderSpec`] carries an alias
//! separator, such cells fan out into multiple logical column names at
//! discovery time; every alias of a column shares the column's cell value.

use std::rc::Rc;

use crate::cell::Cell;
use crate::error::Result;

/// Matches required before a row is accepted as the header.
/// Acceptance is strictly greater-than, so the default demands six hits.
pub const DEFAULT_HEADER_THRESHOLD: usize = 5;

static EMPTY_CELL: Cell = Cell::Empty;

/// What a header row looks like for one institution.
#[derive(Debug, Clone)]
pub struct HeaderSpec {
    known: &'static [&'static str],
    threshold: usize,
    alias_separator: Option<&'static str>,
}

impl HeaderSpec {
    pub fn new(known: &'static [&'static str]) -> Self {
        Self {
            known,
            threshold: DEFAULT_HEADER_THRESHOLD,
            alias_separator: None,
        }
    }

    /// Overrides the match threshold (still strictly greater-than).
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Splits composite header cells into alias names on `separator`.
    #[must_use]
    pub fn with_alias_separator(mut self, separator: &'static str) -> Self {
        self.alias_separator = Some(separator);
        self
    }

    /// Accepts `row` as the header when more than `threshold` of its cells
    /// match a known column name.
    pub fn matches(&self, row: &[Cell]) -> Option<HeaderMap> {
        let mut columns = Vec::new();
        let mut hits = 0usize;
        for (index, cell) in row.iter().enumerate() {
            let Some(name) = cell.trimmed().to_text() else {
                continue;
            };
            if self.known.contains(&name.as_str()) {
                hits += 1;
            }
            let aliases = match self.alias_separator {
                Some(separator) => name
                    .split(separator)
                    .map(str::trim)
                    .filter(|alias| !alias.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => vec![name.clone()],
            };
            columns.push(HeaderColumn {
                index,
                name,
                aliases,
            });
        }
        (hits > self.threshold).then_some(HeaderMap { columns })
    }
}

/// One recognized header cell: its position, its full text, and the logical
/// payer aliases it fans out into (just the full text when no separator
/// applies).
#[derive(Debug, Clone)]
pub struct HeaderColumn {
    pub index: usize,
    pub name: String,
    pub aliases: Vec<String>,
}

/// The accepted header row: named column positions.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    columns: Vec<HeaderColumn>,
}

impl HeaderMap {
    pub fn columns(&self) -> &[HeaderColumn] {
        &self.columns
    }
}

/// One data row projected through the header: cells addressable by column
/// name, in source column order.
#[derive(Debug, Clone)]
pub struct RowValues {
    header: Rc<HeaderMap>,
    cells: Vec<Cell>,
}

impl RowValues {
    fn project(header: &Rc<HeaderMap>, row: &[Cell]) -> Self {
        let cells = header
            .columns
            .iter()
            .map(|column| row.get(column.index).map_or(Cell::Empty, Cell::trimmed))
            .collect();
        Self {
            header: Rc::clone(header),
            cells,
        }
    }

    /// The cell under the exactly-named column; [`Cell::Empty`] when the row
    /// was short, `None` when no such column exists.
    pub fn get(&self, name: &str) -> Option<&Cell> {
        self.header
            .columns
            .iter()
            .position(|column| column.name == name)
            .map(|at| self.cells.get(at).unwrap_or(&EMPTY_CELL))
    }

    /// Non-empty text of the named column.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Cell::as_str)
    }

    /// Every column with its cell value, in source order.
    pub fn columns(&self) -> impl Iterator<Item = (&HeaderColumn, &Cell)> {
        self.header.columns.iter().zip(self.cells.iter())
    }
}

/// Lazy adapter over raw rows: hunts for the header, then yields every
/// subsequent row projected through it. When no row ever qualifies the
/// iterator is simply empty; the condition is logged so an all-preamble
/// artifact is distinguishable from an empty one.
pub struct HeaderedRows<I> {
    rows: I,
    spec: HeaderSpec,
    source: String,
    header: Option<Rc<HeaderMap>>,
    saw_rows: bool,
}

impl<I> HeaderedRows<I>
where
    I: Iterator<Item = Result<Vec<Cell>>>,
{
    pub fn new(rows: I, spec: HeaderSpec, source: impl Into<String>) -> Self {
        Self {
            rows,
            spec,
            source: source.into(),
            header: None,
            saw_rows: false,
        }
    }
}

impl<I> Iterator for HeaderedRows<I>
where
    I: Iterator<Item = Result<Vec<Cell>>>,
{
    type Item = Result<RowValues>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(row) = self.rows.next() else {
                if self.header.is_none() && self.saw_rows {
                    tracing::warn!(source = %self.source, "no header row found; artifact produced no records");
                }
                return None;
            };
            let row = match row {
                Ok(row) => row,
                Err(err) => return Some(Err(err)),
            };
            self.saw_rows = true;
            match &self.header {
                Some(header) => return Some(Ok(RowValues::project(header, &row))),
                None => {
                    if let Some(found) = self.spec.matches(&row) {
                        tracing::debug!(
                            source = %self.source,
                            columns = found.columns().len(),
                            "header row accepted"
                        );
                        self.header = Some(Rc::new(found));
                    }
                }
            }
        }
    }
}
