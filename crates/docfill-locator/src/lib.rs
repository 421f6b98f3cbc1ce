//! docfill-locator
//!
//! Record lookup by unique-key equality, from either a sheet grid or the
//! AppSheet REST API. Both strategies produce the same `Record` shape,
//! consumed identically by the export pipeline.

pub mod appsheet;
pub mod error;
pub mod sheet;

use docfill_core::record::Record;

use crate::error::LocatorError;

/// A source of records, addressable by key-column equality.
pub trait RecordSource {
    /// Find the first record whose `key_column` value equals `key`.
    /// First match wins; duplicate keys are not diagnosed.
    fn locate(&self, key_column: &str, key: &str) -> Result<Record, LocatorError>;

    /// Write `value` into `link_column` of the record matched by
    /// `key_column = key`. Callers treat failure as non-fatal.
    fn write_back(
        &self,
        key_column: &str,
        key: &str,
        link_column: &str,
        value: &str,
    ) -> Result<(), LocatorError>;
}
