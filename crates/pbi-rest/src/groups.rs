//! Workspace (group) types.

use serde::{Deserialize, Serialize};

/// Request to create a workspace.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

/// A workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub is_on_dedicated_capacity: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_id: Option<String>,
}

/// Request to move a workspace onto a capacity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAssignToCapacityRequest {
    /// Capacity id; the all-zero GUID moves the workspace to shared capacity.
    pub capacity_id: String,
}

/// Request to rename a workspace through the admin API.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateGroupAsAdminRequest {
    pub name: String,
}
