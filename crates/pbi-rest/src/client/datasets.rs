use powerbi_client::{RequestMethod, Result};
use tracing::instrument;

use crate::datasets::{
    Dataset, DatasetParameter, Datasource, RefreshSchedule, RefreshScheduleUpdate,
    RefreshScheduleUpdateBody, UpdateDatasourcesRequest, UpdateParametersRequest,
};
use crate::types::ODataList;

impl super::PowerBiClient {
    /// Get one dataset in a workspace.
    #[instrument(skip(self))]
    pub async fn get_dataset_in_group(&self, group_id: &str, dataset_id: &str) -> Result<Dataset> {
        self.http
            .get_json(&self.url(&["groups", group_id, "datasets", dataset_id]))
            .await
    }

    /// List the datasets in a workspace.
    #[instrument(skip(self))]
    pub async fn get_datasets_in_group(&self, group_id: &str) -> Result<ODataList<Dataset>> {
        self.http
            .get_json(&self.url(&["groups", group_id, "datasets"]))
            .await
    }

    /// Delete a dataset.
    #[instrument(skip(self))]
    pub async fn delete_dataset_in_group(&self, group_id: &str, dataset_id: &str) -> Result<()> {
        self.http
            .delete(&self.url(&["groups", group_id, "datasets", dataset_id]))
            .await
    }

    /// List a dataset's parameters.
    #[instrument(skip(self))]
    pub async fn get_parameters_in_group(
        &self,
        group_id: &str,
        dataset_id: &str,
    ) -> Result<ODataList<DatasetParameter>> {
        self.http
            .get_json(&self.url(&["groups", group_id, "datasets", dataset_id, "parameters"]))
            .await
    }

    /// Set parameter values.
    #[instrument(skip(self, request))]
    pub async fn update_parameters_in_group(
        &self,
        group_id: &str,
        dataset_id: &str,
        request: &UpdateParametersRequest,
    ) -> Result<()> {
        let url = self.url(&["groups", group_id, "datasets", dataset_id, "Default.UpdateParameters"]);
        self.http
            .do_json_unit(RequestMethod::Post, &url, Some(request))
            .await
    }

    /// List a dataset's datasources.
    #[instrument(skip(self))]
    pub async fn get_datasources_in_group(
        &self,
        group_id: &str,
        dataset_id: &str,
    ) -> Result<ODataList<Datasource>> {
        self.http
            .get_json(&self.url(&["groups", group_id, "datasets", dataset_id, "datasources"]))
            .await
    }

    /// Repoint datasources.
    #[instrument(skip(self, request))]
    pub async fn update_datasources_in_group(
        &self,
        group_id: &str,
        dataset_id: &str,
        request: &UpdateDatasourcesRequest,
    ) -> Result<()> {
        let url = self.url(&["groups", group_id, "datasets", dataset_id, "Default.UpdateDatasources"]);
        self.http
            .do_json_unit(RequestMethod::Post, &url, Some(request))
            .await
    }

    /// Get a dataset's refresh schedule.
    #[instrument(skip(self))]
    pub async fn get_refresh_schedule_in_group(
        &self,
        group_id: &str,
        dataset_id: &str,
    ) -> Result<RefreshSchedule> {
        self.http
            .get_json(&self.url(&["groups", group_id, "datasets", dataset_id, "refreshSchedule"]))
            .await
    }

    /// Change a dataset's refresh schedule. Only the fields set in `update`
    /// are sent.
    #[instrument(skip(self, update))]
    pub async fn update_refresh_schedule_in_group(
        &self,
        group_id: &str,
        dataset_id: &str,
        update: &RefreshScheduleUpdate,
    ) -> Result<()> {
        let url = self.url(&["groups", group_id, "datasets", dataset_id, "refreshSchedule"]);
        let body = RefreshScheduleUpdateBody { value: update };
        self.http
            .do_json_unit(RequestMethod::Patch, &url, Some(&body))
            .await
    }

    /// Transfer ownership of a dataset to the caller.
    #[instrument(skip(self))]
    pub async fn take_over_in_group(&self, group_id: &str, dataset_id: &str) -> Result<()> {
        let url = self.url(&["groups", group_id, "datasets", dataset_id, "Default.TakeOver"]);
        self.http
            .do_json_unit::<()>(RequestMethod::Post, &url, None)
            .await
    }
}
