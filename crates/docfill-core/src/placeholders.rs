use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Mapping from `{{field}}` placeholder keys to display values.
///
/// Keys are unique; a duplicate field name overwrites the earlier value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceholderMap {
    entries: Vec<(String, String)>,
}

impl PlaceholderMap {
    /// Wrap each of the record's field names in `{{...}}` delimiters.
    pub fn from_record(record: &Record) -> Self {
        let mut map = Self::default();
        for (name, value) in record.fields() {
            map.insert(format!("{{{{{name}}}}}"), value.clone());
        }
        map
    }

    pub fn insert(&mut self, key: String, value: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every occurrence of every key in `text`.
    ///
    /// Replacement is literal-substring: field names may contain characters
    /// that look like pattern syntax, and they must never be treated as such.
    pub fn apply(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (key, value) in &self.entries {
            out = out.replace(key.as_str(), value);
        }
        out
    }
}
