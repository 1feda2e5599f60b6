//! Push dataset types.

use serde::{Deserialize, Serialize};

/// Request to create a push dataset.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDatasetRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// `Push`, `Streaming` or `PushStreaming`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_mode: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<Table>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
}

/// A table schema, used when creating a push dataset and when replacing a
/// table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<Column>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub measures: Vec<Measure>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub data_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub format_string: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Measure {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expression: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from_column: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from_table: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub to_column: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub to_table: String,
    /// `OneDirection`, `BothDirections` or `Automatic`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cross_filtering_behavior: String,
}

/// The created push dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostDatasetResponse {
    pub id: String,
    pub name: String,
}

/// A table name returned when listing a push dataset's tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableName {
    pub name: String,
}

/// Rows to append to a push dataset table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostRowsRequest {
    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
}
