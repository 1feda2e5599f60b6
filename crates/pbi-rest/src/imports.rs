//! Import types.
//!
//! An import uploads a `.pbix` file into a workspace and publishes the
//! dataset and report it contains. Publishing is asynchronous; the import
//! has to be polled until it leaves the `Publishing` state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Import state while the upload is still being processed.
pub const IMPORT_STATE_PUBLISHING: &str = "Publishing";

/// Import state once the upload has been published.
pub const IMPORT_STATE_SUCCEEDED: &str = "Succeeded";

/// Options for uploading a `.pbix` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Display name of the dataset, including the `.pbix` extension.
    pub dataset_display_name: Option<String>,
    /// `Abort`, `Overwrite`, `CreateOrOverwrite` or `Ignore`.
    pub name_conflict: Option<String>,
    /// Publish only the dataset.
    pub skip_report: bool,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset_display_name(mut self, name: impl Into<String>) -> Self {
        self.dataset_display_name = Some(name.into());
        self
    }

    pub fn with_name_conflict(mut self, name_conflict: impl Into<String>) -> Self {
        self.name_conflict = Some(name_conflict.into());
        self
    }

    pub fn skip_report(mut self) -> Self {
        self.skip_report = true;
        self
    }
}

/// The import created by an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PostImportResponse {
    pub id: String,
}

/// An import and what it published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Import {
    pub id: String,
    pub import_state: String,
    pub created_date_time: Option<DateTime<Utc>>,
    pub updated_date_time: Option<DateTime<Utc>>,
    pub name: String,
    pub connection_type: String,
    pub source: String,
    pub datasets: Vec<ImportDataset>,
    pub reports: Vec<ImportReport>,
}

impl Import {
    /// Returns true once the import has been published.
    pub fn is_succeeded(&self) -> bool {
        self.import_state == IMPORT_STATE_SUCCEEDED
    }

    /// Returns true while the import is still being processed.
    pub fn is_publishing(&self) -> bool {
        self.import_state == IMPORT_STATE_PUBLISHING
    }
}

/// A dataset published by an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportDataset {
    pub id: String,
    pub name: String,
    pub web_url: String,
    pub target_storage_mode: String,
}

/// A report published by an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportReport {
    pub id: String,
    pub report_type: String,
    pub name: String,
    pub web_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_deserialization() {
        let json = r#"{
            "id": "82d9a37a-2b45-4221-b012-cb109b8e30c7",
            "importState": "Succeeded",
            "createdDateTime": "2018-05-08T14:56:18.477Z",
            "updatedDateTime": "2018-05-08T14:56:18.477Z",
            "name": "SalesMarketing",
            "connectionType": "import",
            "source": "Upload",
            "datasets": [{
                "id": "cfafbeb1-8037-4d0c-896e-a46fb27ff229",
                "name": "SalesMarketing",
                "webUrl": "https://app.powerbi.com/datasets/cfafbeb1-8037-4d0c-896e-a46fb27ff229"
            }],
            "reports": [{
                "id": "5b218778-e7a5-4d73-8187-f10824047715",
                "name": "SalesMarketing",
                "webUrl": "https://app.powerbi.com/reports/5b218778-e7a5-4d73-8187-f10824047715"
            }]
        }"#;
        let import: Import = serde_json::from_str(json).unwrap();
        assert!(import.is_succeeded());
        assert!(!import.is_publishing());
        assert_eq!(import.datasets.len(), 1);
        assert_eq!(import.reports[0].name, "SalesMarketing");
        assert_eq!(
            import.created_date_time.unwrap().to_rfc3339(),
            "2018-05-08T14:56:18.477+00:00"
        );
    }

    #[test]
    fn test_publishing_import_without_timestamps() {
        let import: Import =
            serde_json::from_str(r#"{"id":"abc","importState":"Publishing"}"#).unwrap();
        assert!(import.is_publishing());
        assert!(import.created_date_time.is_none());
        assert!(import.datasets.is_empty());
    }

    #[test]
    fn test_import_options_builder() {
        let options = ImportOptions::new()
            .with_dataset_display_name("Sales.pbix")
            .with_name_conflict("CreateOrOverwrite");
        assert_eq!(options.dataset_display_name.as_deref(), Some("Sales.pbix"));
        assert!(!options.skip_report);
    }
}
