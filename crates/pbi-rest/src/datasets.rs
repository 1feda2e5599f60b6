//! Dataset types: metadata, parameters, datasources and refresh schedules.
//!
//! See: https://learn.microsoft.com/rest/api/power-bi/datasets

use serde::{Deserialize, Serialize};

/// A dataset within a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub id: String,
    pub name: String,
    #[serde(rename = "addRowsAPIEnabled")]
    pub add_rows_api_enabled: bool,
    pub configured_by: String,
    pub is_refreshable: bool,
    pub is_effective_identity_required: bool,
    pub is_effective_identity_roles_required: bool,
    pub target_storage_mode: String,
}

/// A mashup parameter of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatasetParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: String,
    pub is_required: bool,
    pub current_value: String,
}

/// Request to change parameter values.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParametersRequest {
    pub update_details: Vec<UpdateParameterDetail>,
}

/// New value for one parameter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParameterDetail {
    pub name: String,
    pub new_value: String,
}

/// A datasource used by a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Datasource {
    pub datasource_id: String,
    pub datasource_type: String,
    pub gateway_id: String,
    pub name: String,
    pub connection_string: String,
    pub connection_details: ConnectionDetails,
}

/// Connection details of a datasource. Which fields are set depends on the
/// datasource type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Request to repoint datasources.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDatasourcesRequest {
    pub update_details: Vec<UpdateDatasourceDetail>,
}

/// Selects one datasource and gives its new connection details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDatasourceDetail {
    pub datasource_selector: DatasourceSelector,
    pub connection_details: ConnectionDetails,
}

/// Matches a datasource by type and current connection details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasourceSelector {
    pub datasource_type: String,
    pub connection_details: ConnectionDetails,
}

/// A dataset refresh schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefreshSchedule {
    pub enabled: bool,
    pub days: Vec<String>,
    pub times: Vec<String>,
    pub local_time_zone_id: String,
    pub notify_option: String,
}

/// Partial update of a refresh schedule. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshScheduleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub times: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_time_zone_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_option: Option<String>,
}

/// Body of a refresh schedule PATCH.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct RefreshScheduleUpdateBody<'a> {
    pub value: &'a RefreshScheduleUpdate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_deserialization() {
        let json = r#"{
            "id": "cfafbeb1-8037-4d0c-896e-a46fb27ff229",
            "name": "SalesMarketing",
            "addRowsAPIEnabled": false,
            "configuredBy": "john@contoso.com",
            "isRefreshable": true,
            "isEffectiveIdentityRequired": false,
            "isEffectiveIdentityRolesRequired": false,
            "targetStorageMode": "Import"
        }"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.name, "SalesMarketing");
        assert!(dataset.is_refreshable);
        assert_eq!(dataset.target_storage_mode, "Import");
    }

    #[test]
    fn test_parameter_type_field() {
        let json = r#"{"name":"ServerName","type":"Text","isRequired":true,"currentValue":"MyTestServer"}"#;
        let parameter: DatasetParameter = serde_json::from_str(json).unwrap();
        assert_eq!(parameter.parameter_type, "Text");
        assert_eq!(parameter.current_value, "MyTestServer");
    }

    #[test]
    fn test_update_datasources_omits_unset_details() {
        let request = UpdateDatasourcesRequest {
            update_details: vec![UpdateDatasourceDetail {
                datasource_selector: DatasourceSelector {
                    datasource_type: "Sql".to_string(),
                    connection_details: ConnectionDetails {
                        server: Some("old.database.windows.net".to_string()),
                        database: Some("sales".to_string()),
                        url: None,
                    },
                },
                connection_details: ConnectionDetails {
                    server: Some("new.database.windows.net".to_string()),
                    database: Some("sales".to_string()),
                    url: None,
                },
            }],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "updateDetails": [{
                    "datasourceSelector": {
                        "datasourceType": "Sql",
                        "connectionDetails": {
                            "server": "old.database.windows.net",
                            "database": "sales"
                        }
                    },
                    "connectionDetails": {
                        "server": "new.database.windows.net",
                        "database": "sales"
                    }
                }]
            })
        );
    }

    #[test]
    fn test_refresh_schedule_update_omits_unset_fields() {
        let update = RefreshScheduleUpdate {
            enabled: Some(false),
            local_time_zone_id: Some("UTC".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(RefreshScheduleUpdateBody { value: &update }).unwrap(),
            serde_json::json!({"value": {"enabled": false, "localTimeZoneId": "UTC"}})
        );
    }
}
