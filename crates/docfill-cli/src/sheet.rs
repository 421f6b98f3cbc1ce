//! Sheet grids stored as local JSON files.
//!
//! A spreadsheet is a JSON object mapping sheet names to arrays of rows;
//! each row is an array of cell values. Cells are coerced to display
//! strings on read, the same way AppSheet fields are.

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use docfill_locator::appsheet::display_string;
use docfill_locator::error::LocatorError;
use docfill_locator::sheet::SheetStore;

pub struct JsonSheet {
    path: PathBuf,
    sheet_name: String,
}

impl JsonSheet {
    pub fn new(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet_name: sheet_name.into(),
        }
    }

    fn load(&self) -> Result<serde_json::Map<String, Value>, LocatorError> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| LocatorError::Sheet(format!("cannot read {}: {e}", self.path.display())))?;
        match serde_json::from_str(&raw)? {
            Value::Object(map) => Ok(map),
            _ => Err(LocatorError::Sheet(format!(
                "{} is not a spreadsheet object",
                self.path.display()
            ))),
        }
    }

    fn grid(&self, map: &serde_json::Map<String, Value>) -> Result<Vec<Vec<Value>>, LocatorError> {
        let sheet = map.get(&self.sheet_name).ok_or_else(|| {
            LocatorError::Sheet(format!(
                "sheet {:?} not found in {}",
                self.sheet_name,
                self.path.display()
            ))
        })?;
        let Value::Array(rows) = sheet else {
            return Err(LocatorError::Sheet(format!(
                "sheet {:?} is not an array of rows",
                self.sheet_name
            )));
        };
        rows.iter()
            .map(|row| match row {
                Value::Array(cells) => Ok(cells.clone()),
                _ => Err(LocatorError::Sheet(format!(
                    "sheet {:?} contains a non-array row",
                    self.sheet_name
                ))),
            })
            .collect()
    }
}

impl SheetStore for JsonSheet {
    fn read_all(&self) -> Result<Vec<Vec<String>>, LocatorError> {
        let map = self.load()?;
        Ok(self
            .grid(&map)?
            .iter()
            .map(|row| row.iter().map(display_string).collect())
            .collect())
    }

    fn write_cell(&self, row: usize, column: usize, value: &str) -> Result<(), LocatorError> {
        let mut map = self.load()?;
        let mut rows = self.grid(&map)?;
        let cell = rows
            .get_mut(row - 1)
            .and_then(|r| r.get_mut(column - 1))
            .ok_or_else(|| {
                LocatorError::Sheet(format!("cell ({row}, {column}) is out of range"))
            })?;
        *cell = Value::String(value.to_string());

        map.insert(
            self.sheet_name.clone(),
            Value::Array(rows.into_iter().map(Value::Array).collect()),
        );
        let raw = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, raw)
            .map_err(|e| LocatorError::Sheet(format!("cannot write {}: {e}", self.path.display())))
    }
}
