use powerbi_client::{RequestMethod, Result};
use tracing::instrument;

use crate::groups::UpdateGroupAsAdminRequest;

impl super::PowerBiClient {
    /// Rename a workspace through the admin API. Requires Power BI
    /// administrator rights.
    #[instrument(skip(self, request))]
    pub async fn update_group_as_admin(
        &self,
        group_id: &str,
        request: &UpdateGroupAsAdminRequest,
    ) -> Result<()> {
        let url = self.url(&["admin", "groups", group_id]);
        self.http
            .do_json_unit(RequestMethod::Patch, &url, Some(request))
            .await
    }
}
