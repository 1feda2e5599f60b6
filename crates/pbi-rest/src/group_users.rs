//! Workspace access types.

use serde::{Deserialize, Serialize};

/// A principal's access to a workspace. Used both when listing and when
/// granting or changing access.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupUser {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email_address: String,
    /// `Admin`, `Contributor`, `Member`, `Viewer` or `None`.
    pub group_user_access_right: String,
    /// Email for users, object id for apps and groups.
    pub identifier: String,
    /// `User`, `Group` or `App`.
    pub principal_type: String,
}
