use powerbi_client::Result;
use tracing::instrument;

use crate::reports::Report;
use crate::types::ODataList;

impl super::PowerBiClient {
    /// List the reports in a workspace.
    #[instrument(skip(self))]
    pub async fn get_reports_in_group(&self, group_id: &str) -> Result<ODataList<Report>> {
        self.http
            .get_json(&self.url(&["groups", group_id, "reports"]))
            .await
    }

    /// Delete a report.
    #[instrument(skip(self))]
    pub async fn delete_report_in_group(&self, group_id: &str, report_id: &str) -> Result<()> {
        self.http
            .delete(&self.url(&["groups", group_id, "reports", report_id]))
            .await
    }
}
