//! Tabular lookup: linear scan over a sheet grid.

use docfill_core::record::Record;

use crate::RecordSource;
use crate::error::LocatorError;

/// Black-box access to one sheet: read the full display-formatted grid,
/// write a single cell. Row and column indices are 1-based at this
/// boundary, matching the backing spreadsheet service.
pub trait SheetStore {
    fn read_all(&self) -> Result<Vec<Vec<String>>, LocatorError>;

    fn write_cell(&self, row: usize, column: usize, value: &str) -> Result<(), LocatorError>;
}

/// Record source backed by a sheet grid; the first row holds the headers.
pub struct SheetSource<S> {
    store: S,
}

impl<S: SheetStore> SheetSource<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: SheetStore> RecordSource for SheetSource<S> {
    fn locate(&self, key_column: &str, key: &str) -> Result<Record, LocatorError> {
        let rows = self.store.read_all()?;
        let (record, row) = scan_grid(&rows, key_column, key)?;
        tracing::debug!("matched key {key:?} at row {}", row + 1);
        Ok(record)
    }

    fn write_back(
        &self,
        key_column: &str,
        key: &str,
        link_column: &str,
        value: &str,
    ) -> Result<(), LocatorError> {
        let rows = self.store.read_all()?;
        let (_, row) = scan_grid(&rows, key_column, key)?;
        let column = column_index(&rows[0], link_column)?;
        self.store.write_cell(row + 1, column + 1, value)
    }
}

/// Scan `rows` (headers first) for the first row whose `key_column` cell
/// equals `key`. Returns the record and its 0-based row index.
pub fn scan_grid(
    rows: &[Vec<String>],
    key_column: &str,
    key: &str,
) -> Result<(Record, usize), LocatorError> {
    let headers = rows
        .first()
        .ok_or_else(|| LocatorError::Sheet("sheet has no header row".to_string()))?;
    let column = column_index(headers, key_column)?;

    for (i, row) in rows.iter().enumerate().skip(1) {
        if row.get(column).is_some_and(|cell| cell == key) {
            return Ok((Record::from_columns(key, headers, row), i));
        }
    }

    Err(LocatorError::RecordNotFound {
        column: key_column.to_string(),
        key: key.to_string(),
    })
}

fn column_index(headers: &[String], column: &str) -> Result<usize, LocatorError> {
    headers
        .iter()
        .position(|h| h.trim() == column.trim())
        .ok_or_else(|| LocatorError::ColumnNotFound {
            column: column.to_string(),
        })
}
