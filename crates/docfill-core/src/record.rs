use serde::{Deserialize, Serialize};

/// One resolved data record: the matched key plus ordered field/value
/// pairs, all display strings.
///
/// Field names are trimmed on insertion and empty names are dropped, so
/// every remaining field can become a placeholder key. Headerless columns
/// cannot be targeted by a template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    key: String,
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            fields: Vec::new(),
        }
    }

    /// Build a record from a header row and an aligned value row.
    /// Missing values fill in as empty strings.
    pub fn from_columns(key: impl Into<String>, headers: &[String], values: &[String]) -> Self {
        let mut record = Self::new(key);
        for (i, header) in headers.iter().enumerate() {
            record.push_field(header, values.get(i).cloned().unwrap_or_default());
        }
        record
    }

    pub fn push_field(&mut self, name: &str, value: String) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        self.fields.push((name.to_string(), value));
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
