use powerbi_client::{RequestMethod, Result};
use tracing::instrument;

use crate::group_users::GroupUser;
use crate::types::ODataList;

impl super::PowerBiClient {
    /// List the principals with access to a workspace.
    #[instrument(skip(self))]
    pub async fn get_group_users(&self, group_id: &str) -> Result<ODataList<GroupUser>> {
        self.http
            .get_json(&self.url(&["groups", group_id, "users"]))
            .await
    }

    /// Grant a principal access to a workspace.
    #[instrument(skip(self, user), fields(identifier = %user.identifier))]
    pub async fn add_group_user(&self, group_id: &str, user: &GroupUser) -> Result<()> {
        let url = self.url(&["groups", group_id, "users"]);
        self.http
            .do_json_unit(RequestMethod::Post, &url, Some(user))
            .await
    }

    /// Change a principal's access to a workspace.
    #[instrument(skip(self, user), fields(identifier = %user.identifier))]
    pub async fn update_group_user(&self, group_id: &str, user: &GroupUser) -> Result<()> {
        let url = self.url(&["groups", group_id, "users"]);
        self.http
            .do_json_unit(RequestMethod::Put, &url, Some(user))
            .await
    }

    /// Remove a principal's access to a workspace. `user` is an email
    /// address or an object id.
    #[instrument(skip(self))]
    pub async fn delete_user_in_group(&self, group_id: &str, user: &str) -> Result<()> {
        self.http
            .delete(&self.url(&["groups", group_id, "users", user]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::test_support::client;
    use crate::group_users::GroupUser;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn member() -> GroupUser {
        GroupUser {
            email_address: "john@contoso.com".to_string(),
            group_user_access_right: "Member".to_string(),
            identifier: "john@contoso.com".to_string(),
            principal_type: "User".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_group_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1.0/myorg/groups/g1/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "value": [{
                    "displayName": "John Nick",
                    "emailAddress": "john@contoso.com",
                    "groupUserAccessRight": "Admin",
                    "identifier": "john@contoso.com",
                    "principalType": "User"
                }]
            })))
            .mount(&server)
            .await;

        let users = client(&server).get_group_users("g1").await.unwrap();
        assert_eq!(users.value[0].display_name, "John Nick");
        assert_eq!(users.value[0].group_user_access_right, "Admin");
    }

    #[tokio::test]
    async fn test_add_and_update_group_user() {
        let server = MockServer::start().await;
        let expected = serde_json::json!({
            "emailAddress": "john@contoso.com",
            "groupUserAccessRight": "Member",
            "identifier": "john@contoso.com",
            "principalType": "User"
        });
        Mock::given(method("POST"))
            .and(path("/v1.0/myorg/groups/g1/users"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/v1.0/myorg/groups/g1/users"))
            .and(body_json(&expected))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client.add_group_user("g1", &member()).await.unwrap();
        client.update_group_user("g1", &member()).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_user_in_group() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1.0/myorg/groups/g1/users/john%40contoso.com"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .delete_user_in_group("g1", "john@contoso.com")
            .await
            .unwrap();
    }
}
