//! Remote lookup against the AppSheet REST API.

use serde_json::{Value, json};

use docfill_core::record::Record;

use crate::RecordSource;
use crate::error::LocatorError;

/// Record source backed by the AppSheet `Find` action.
///
/// One filtered POST per lookup; no retries or timeouts beyond what the
/// platform applies on its side.
pub struct AppSheetSource {
    agent: ureq::Agent,
    app_id: String,
    access_key: String,
    table: String,
}

impl AppSheetSource {
    pub fn new(
        app_id: impl Into<String>,
        access_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        // non-200 responses carry diagnostics in the body, so they must
        // arrive as responses rather than transport errors
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.into(),
            app_id: app_id.into(),
            access_key: access_key.into(),
            table: table.into(),
        }
    }

    fn action_url(&self) -> String {
        format!(
            "https://api.appsheet.com/api/v2/apps/{}/tables/{}/Action",
            self.app_id, self.table
        )
    }
}

impl RecordSource for AppSheetSource {
    fn locate(&self, key_column: &str, key: &str) -> Result<Record, LocatorError> {
        let payload = json!({
            "Action": "Find",
            "Properties": {
                "Filter": format!("{key_column} = '{key}'"),
            },
        });

        tracing::debug!("querying AppSheet table {} for {key_column} = {key:?}", self.table);
        let mut response = self
            .agent
            .post(&self.action_url())
            .header("ApplicationAccessKey", &self.access_key)
            .send_json(&payload)
            .map_err(|e| LocatorError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| LocatorError::Transport(e.to_string()))?;

        parse_find_response(status, &body, key_column, key)
    }

    fn write_back(
        &self,
        _key_column: &str,
        _key: &str,
        _link_column: &str,
        _value: &str,
    ) -> Result<(), LocatorError> {
        Err(LocatorError::WriteBackUnsupported)
    }
}

/// Interpret an AppSheet `Find` response.
///
/// Two shapes are accepted: a bare array of record objects, or an envelope
/// object exposing a `Rows` array. The first element of whichever array is
/// present wins. All field values are coerced to display strings.
pub fn parse_find_response(
    status: u16,
    body: &str,
    key_column: &str,
    key: &str,
) -> Result<Record, LocatorError> {
    if status != 200 {
        return Err(LocatorError::Http {
            status,
            body: body.to_string(),
        });
    }

    let value: Value = serde_json::from_str(body)?;
    let rows = match &value {
        Value::Array(rows) => rows,
        Value::Object(envelope) => match envelope.get("Rows") {
            Some(Value::Array(rows)) => rows,
            _ => return Err(LocatorError::UnexpectedShape(excerpt(body))),
        },
        _ => return Err(LocatorError::UnexpectedShape(excerpt(body))),
    };

    let first = rows.first().ok_or_else(|| LocatorError::RecordNotFound {
        column: key_column.to_string(),
        key: key.to_string(),
    })?;
    let Value::Object(fields) = first else {
        return Err(LocatorError::UnexpectedShape(excerpt(body)));
    };

    let mut record = Record::new(key);
    for (name, value) in fields {
        record.push_field(name, display_string(value));
    }
    Ok(record)
}

/// Coerce a JSON value to its display string; null becomes empty.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn excerpt(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX).collect();
        format!("{cut}…")
    }
}
