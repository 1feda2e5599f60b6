use powerbi_client::{RequestMethod, Result};
use tracing::instrument;

use crate::push_datasets::{PostDatasetRequest, PostDatasetResponse, PostRowsRequest, Table, TableName};
use crate::types::ODataList;

impl super::PowerBiClient {
    /// Create a push dataset in a workspace.
    ///
    /// `retention_policy` is `None` or `basicFIFO`; pass `None` to omit it.
    #[instrument(skip(self, request))]
    pub async fn post_dataset_in_group(
        &self,
        group_id: &str,
        retention_policy: Option<&str>,
        request: &PostDatasetRequest,
    ) -> Result<PostDatasetResponse> {
        let url = self.url_with_query(
            &["groups", group_id, "datasets"],
            &[("defaultRetentionPolicy", retention_policy.unwrap_or_default().to_string())],
        )?;
        self.http.do_json(RequestMethod::Post, &url, Some(request)).await
    }

    /// List the tables of a push dataset.
    #[instrument(skip(self))]
    pub async fn get_tables(&self, dataset_id: &str) -> Result<ODataList<TableName>> {
        self.http
            .get_json(&self.url(&["datasets", dataset_id, "tables"]))
            .await
    }

    /// Replace the schema of a push dataset table.
    #[instrument(skip(self, table))]
    pub async fn put_table_in_group(
        &self,
        group_id: &str,
        dataset_id: &str,
        table_name: &str,
        table: &Table,
    ) -> Result<()> {
        let url = self.url(&["groups", group_id, "datasets", dataset_id, "tables", table_name]);
        self.http
            .do_json_unit(RequestMethod::Put, &url, Some(table))
            .await
    }

    /// Append rows to a push dataset table.
    #[instrument(skip(self, request), fields(rows = request.rows.len()))]
    pub async fn post_rows_in_group(
        &self,
        group_id: &str,
        dataset_id: &str,
        table_name: &str,
        request: &PostRowsRequest,
    ) -> Result<()> {
        let url = self.url(&["groups", group_id, "datasets", dataset_id, "tables", table_name, "rows"]);
        self.http
            .do_json_unit(RequestMethod::Post, &url, Some(request))
            .await
    }
}
