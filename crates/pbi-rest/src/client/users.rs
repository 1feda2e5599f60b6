use powerbi_client::{RequestMethod, Result};
use tracing::instrument;

impl super::PowerBiClient {
    /// Ask Power BI to refresh the caller's permissions, e.g. right after
    /// being granted access to a workspace.
    #[instrument(skip(self))]
    pub async fn refresh_user_permissions(&self) -> Result<()> {
        self.http
            .do_json_unit::<()>(RequestMethod::Post, &self.url(&["RefreshUserPermissions"]), None)
            .await
    }
}
