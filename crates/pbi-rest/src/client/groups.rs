use powerbi_client::{RequestMethod, Result};
use tracing::instrument;

use crate::groups::{CreateGroupRequest, Group, GroupAssignToCapacityRequest};
use crate::types::ODataList;

impl super::PowerBiClient {
    /// Create a new (V2) workspace.
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_group(&self, request: &CreateGroupRequest) -> Result<Group> {
        let url = self.url_with_query(&["groups"], &[("workspaceV2", "True".to_string())])?;
        self.http.do_json(RequestMethod::Post, &url, Some(request)).await
    }

    /// List the workspaces the caller has access to.
    ///
    /// `filter` is an OData filter expression; `top` and `skip` page the
    /// result.
    #[instrument(skip(self))]
    pub async fn get_groups(
        &self,
        filter: Option<&str>,
        top: Option<u32>,
        skip: Option<u32>,
    ) -> Result<ODataList<Group>> {
        let query = [
            ("$filter", filter.unwrap_or_default().to_string()),
            ("$top", top.filter(|n| *n > 0).map(|n| n.to_string()).unwrap_or_default()),
            ("$skip", skip.filter(|n| *n > 0).map(|n| n.to_string()).unwrap_or_default()),
        ];
        let url = self.url_with_query(&["groups"], &query)?;
        self.http.get_json(&url).await
    }

    /// Look up one workspace by id. Returns `None` if it does not exist or
    /// the caller cannot see it.
    #[instrument(skip(self))]
    pub async fn get_group(&self, group_id: &str) -> Result<Option<Group>> {
        let filter = format!("id eq '{}'", group_id);
        let groups = self.get_groups(Some(&filter), None, None).await?;
        Ok(groups.value.into_iter().next())
    }

    /// Look up one workspace by its exact name. Returns `None` if no
    /// visible workspace has that name.
    #[instrument(skip(self))]
    pub async fn get_group_by_name(&self, name: &str) -> Result<Option<Group>> {
        // OData string literals escape a quote by doubling it.
        let filter = format!("name eq '{}'", name.replace('\'', "''"));
        let groups = self.get_groups(Some(&filter), None, None).await?;
        Ok(groups.value.into_iter().next())
    }

    /// Delete a workspace.
    #[instrument(skip(self))]
    pub async fn delete_group(&self, group_id: &str) -> Result<()> {
        self.http.delete(&self.url(&["groups", group_id])).await
    }

    /// Move a workspace onto a capacity.
    #[instrument(skip(self, request))]
    pub async fn group_assign_to_capacity(
        &self,
        group_id: &str,
        request: &GroupAssignToCapacityRequest,
    ) -> Result<()> {
        let url = self.url(&["groups", group_id, "AssignToCapacity"]);
        self.http
            .do_json_unit(RequestMethod::Post, &url, Some(request))
            .await
    }
}
