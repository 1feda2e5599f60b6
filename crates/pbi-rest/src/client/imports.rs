use std::future::Future;
use std::path::Path;
use std::time::Duration;

use powerbi_client::{poll_until, Error, ErrorKind, PollStatus, RequestMethod, Result};
use tokio::io::AsyncRead;
use tracing::{info, instrument};

use crate::imports::{Import, ImportOptions, PostImportResponse};

impl super::PowerBiClient {
    /// Upload a `.pbix` file into a workspace. The import runs
    /// asynchronously; see [`wait_for_import_to_succeed`](Self::wait_for_import_to_succeed).
    #[instrument(skip(self, options, data))]
    pub async fn post_import_in_group<R>(
        &self,
        group_id: &str,
        options: &ImportOptions,
        data: R,
    ) -> Result<PostImportResponse>
    where
        R: AsyncRead + Unpin,
    {
        let query = [
            (
                "datasetDisplayName",
                options.dataset_display_name.clone().unwrap_or_default(),
            ),
            ("nameConflict", options.name_conflict.clone().unwrap_or_default()),
            (
                "skipReport",
                if options.skip_report { "true".to_string() } else { String::new() },
            ),
        ];
        let url = self.url_with_query(&["groups", group_id, "imports"], &query)?;
        self.http.do_multipart(RequestMethod::Post, &url, data).await
    }

    /// Upload a `.pbix` file from disk.
    #[instrument(skip(self, options, path), fields(path = %path.as_ref().display()))]
    pub async fn post_import_file_in_group(
        &self,
        group_id: &str,
        options: &ImportOptions,
        path: impl AsRef<Path>,
    ) -> Result<PostImportResponse> {
        let file = tokio::fs::File::open(path.as_ref()).await?;
        self.post_import_in_group(group_id, options, file).await
    }

    /// Get an import within a workspace.
    #[instrument(skip(self))]
    pub async fn get_import_in_group(&self, group_id: &str, import_id: &str) -> Result<Import> {
        self.http
            .get_json(&self.url(&["groups", group_id, "imports", import_id]))
            .await
    }

    /// Get an import by id.
    #[instrument(skip(self))]
    pub async fn get_import(&self, import_id: &str) -> Result<Import> {
        self.http.get_json(&self.url(&["imports", import_id])).await
    }

    /// Poll an import until it has been published.
    ///
    /// Fails with [`ErrorKind::ImportFailed`] if the import settles in any
    /// state other than `Succeeded`, and with
    /// [`ErrorKind::OperationTimeout`] if it is still publishing after
    /// `timeout`.
    #[instrument(skip(self))]
    pub async fn wait_for_import_to_succeed(&self, import_id: &str, timeout: Duration) -> Result<Import> {
        self.wait_for_import(timeout, || self.get_import(import_id))
            .await
    }

    /// Poll an import within a workspace until it has been published.
    /// Fails like [`wait_for_import_to_succeed`](Self::wait_for_import_to_succeed).
    #[instrument(skip(self))]
    pub async fn wait_for_import_in_group_to_succeed(
        &self,
        group_id: &str,
        import_id: &str,
        timeout: Duration,
    ) -> Result<Import> {
        self.wait_for_import(timeout, || self.get_import_in_group(group_id, import_id))
            .await
    }

    async fn wait_for_import<F, Fut>(&self, timeout: Duration, fetch: F) -> Result<Import>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<Import>>,
    {
        let interval = self.http.config().poll_interval;

        let import = poll_until("import", interval, timeout, || async {
            let import = fetch().await?;
            if import.is_succeeded() {
                Ok(PollStatus::Done(import))
            } else if import.is_publishing() {
                Ok(PollStatus::Pending)
            } else {
                Err(Error::new(ErrorKind::ImportFailed {
                    import_id: import.id,
                    state: import.import_state,
                }))
            }
        })
        .await?;

        info!(import_id = %import.id, "Import succeeded");
        Ok(import)
    }
}
