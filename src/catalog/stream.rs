use std::sync::Arc;

use serde_derive::{Deserialize, Serialize};

use crate::types::{expr::StreamName, LogicalType};

/// FORMAT option value marking a binary-payload stream, compared
/// case-insensitively.
pub const FORMAT_BINARY: &str = "binary";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamField {
    pub name: String,
    pub field_type: LogicalType,
}

impl StreamField {
    pub fn new(name: &str, field_type: LogicalType) -> Self {
        Self {
            name: name.to_owned(),
            field_type,
        }
    }
}

/// Options declared in the CREATE STREAM statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamOptions {
    /// Name of the event-time field, when the stream declares one.
    pub timestamp: Option<String>,
    pub timestamp_format: Option<String>,
    /// Wire encoding of the payload, e.g. "json" or "binary".
    pub format: Option<String>,
}

impl StreamOptions {
    pub fn is_binary(&self) -> bool {
        match &self.format {
            Some(format) => format.eq_ignore_ascii_case(FORMAT_BINARY),
            None => false,
        }
    }
}

/// Parsed CREATE STREAM statement: the per-stream schema and its options.
/// `stream_fields` is `None` for schemaless streams, whose shape is only
/// known at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamStmt {
    pub name: StreamName,
    pub stream_fields: Option<Vec<StreamField>>,
    pub options: StreamOptions,
}

pub type StreamStmtRef = Arc<StreamStmt>;

impl StreamStmt {
    pub fn new(name: &str, stream_fields: Option<Vec<StreamField>>, options: StreamOptions) -> Self {
        Self {
            name: StreamName::named(name),
            stream_fields,
            options,
        }
    }
}
