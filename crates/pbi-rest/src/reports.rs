//! Report types.

use serde::{Deserialize, Serialize};

/// A report within a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Report {
    pub id: String,
    pub name: String,
    pub dataset_id: String,
    pub web_url: String,
    pub embed_url: String,
}
