//! Capacity types.

use serde::{Deserialize, Serialize};

/// A capacity the caller has access to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capacity {
    pub id: String,
    pub display_name: String,
    pub admins: Vec<String>,
    pub sku: String,
    pub state: String,
    pub region: String,
    pub capacity_user_access_right: String,
}
