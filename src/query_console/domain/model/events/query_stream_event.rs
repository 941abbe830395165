use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::query_console::domain::model::value_objects::column_descriptor::ColumnDescriptor;

/// One frame of the result-streaming protocol.
///
/// A stream carries exactly one `start`, at most one `schema` before any
/// `rows`, and exactly one terminal `end` or `error`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QueryStreamEvent {
    Start {
        #[serde(rename = "queryId")]
        query_id: String,
        #[serde(rename = "startedAt")]
        started_at: DateTime<Utc>,
    },
    /// Tabular results announce `columns`; schemaless results announce `fields`.
    Schema {
        #[serde(skip_serializing_if = "Option::is_none")]
        columns: Option<Vec<ColumnDescriptor>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        fields: Option<Vec<String>>,
    },
    Rows { rows: Vec<Value> },
    End {
        #[serde(rename = "rowCount")]
        row_count: u64,
        #[serde(rename = "durationMs")]
        duration_ms: u64,
    },
    Error {
        message: String,
        #[serde(rename = "errorId")]
        error_id: String,
    },
}

impl QueryStreamEvent {
    pub fn columns(columns: Vec<ColumnDescriptor>) -> Self {
        Self::Schema {
            columns: Some(columns),
            fields: None,
        }
    }

    pub fn fields(fields: Vec<String>) -> Self {
        Self::Schema {
            columns: None,
            fields: Some(fields),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End { .. } | Self::Error { .. })
    }
}
