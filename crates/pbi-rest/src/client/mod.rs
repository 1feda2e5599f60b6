//! Power BI REST API client.
//!
//! This client wraps `PowerBiHttpClient` from `powerbi-client` and provides
//! typed methods for the workspace, dataset, report, import and user
//! endpoints.

use std::sync::Arc;

use powerbi_auth::{AuthConfig, BearerTokenLayer, Credentials, TokenClient};
use powerbi_client::{ClientConfig, Middleware, PowerBiHttpClient, Result};
use url::Url;

mod admin;
mod capacities;
mod datasets;
mod group_users;
mod groups;
mod imports;
mod push_datasets;
mod reports;
mod users;

/// Power BI REST API client.
///
/// Every request is authenticated with a bearer token obtained from Azure
/// AD on first use, and goes through the rate limit and transient error
/// retry layers.
///
/// # Example
///
/// ```rust,ignore
/// use powerbi_rest::PowerBiClient;
///
/// let client = PowerBiClient::with_client_credentials("tenant", "client-id", "secret")?;
///
/// let groups = client.get_groups(None, None, None).await?;
/// for group in groups.value {
///     println!("{} {}", group.id, group.name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PowerBiClient {
    http: PowerBiHttpClient,
}

impl PowerBiClient {
    /// Authenticate as a user with the password grant.
    pub fn with_password_auth(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let creds = Credentials::password(tenant_id, client_id, client_secret, username, password);
        Self::from_credentials(creds, ClientConfig::default(), AuthConfig::default())
    }

    /// Authenticate as a service principal with the client credentials grant.
    pub fn with_client_credentials(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self> {
        let creds = Credentials::client_credentials(tenant_id, client_id, client_secret);
        Self::from_credentials(creds, ClientConfig::default(), AuthConfig::default())
    }

    /// Build the full authenticated chain from credentials.
    pub fn from_credentials(
        credentials: Credentials,
        config: ClientConfig,
        auth_config: AuthConfig,
    ) -> Result<Self> {
        let tokens = TokenClient::new(credentials, auth_config, config.clone())?;
        let auth: Arc<dyn Middleware> = Arc::new(BearerTokenLayer::new(tokens));
        let http = PowerBiHttpClient::with_layers(config, vec![auth])?;
        Ok(Self { http })
    }

    /// Load credentials from the `POWERBI_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let creds = Credentials::from_env()?;
        Self::from_credentials(creds, ClientConfig::default(), AuthConfig::default())
    }

    /// Use an already configured HTTP client.
    pub fn with_http_client(http: PowerBiHttpClient) -> Self {
        Self { http }
    }

    /// Get the underlying HTTP client.
    pub fn inner(&self) -> &PowerBiHttpClient {
        &self.http
    }

    /// Build an API URL from path segments, escaping each one.
    pub(crate) fn url(&self, segments: &[&str]) -> String {
        let path = segments
            .iter()
            .map(|s| urlencoding::encode(s))
            .collect::<Vec<_>>()
            .join("/");
        self.http.api_url(&path)
    }

    /// Like [`url`](Self::url) with a query string. Empty values are skipped.
    pub(crate) fn url_with_query(&self, segments: &[&str], query: &[(&str, String)]) -> Result<String> {
        let mut url = Url::parse(&self.url(segments))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                if !value.is_empty() {
                    pairs.append_pair(name, value);
                }
            }
        }

        // An empty serializer still leaves a trailing '?'.
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url.into())
    }
}
