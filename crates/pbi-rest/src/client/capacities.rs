use powerbi_client::Result;
use tracing::instrument;

use crate::capacities::Capacity;
use crate::types::ODataList;

impl super::PowerBiClient {
    /// List the capacities the caller has access to.
    #[instrument(skip(self))]
    pub async fn get_capacities(&self) -> Result<ODataList<Capacity>> {
        self.http.get_json(&self.url(&["capacities"])).await
    }
}
