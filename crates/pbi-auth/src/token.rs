//! Azure AD v2 token endpoint client.

use powerbi_client::{ApiRequest, ClientConfig, PowerBiHttpClient, RequestMethod};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::credentials::{Credentials, Grant};
use crate::error::{Error, ErrorKind, Result};
use crate::{DEFAULT_AUTHORITY_URL, POWERBI_SCOPE};

/// Where and for what tokens are requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Azure AD authority, without the tenant segment.
    pub authority_url: String,
    /// OAuth2 scope requested for the token.
    pub scope: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            authority_url: DEFAULT_AUTHORITY_URL.to_string(),
            scope: POWERBI_SCOPE.to_string(),
        }
    }
}

impl AuthConfig {
    /// Use a different authority (national clouds, mock servers).
    pub fn with_authority_url(mut self, url: impl Into<String>) -> Self {
        self.authority_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Request a different scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Token endpoint for a tenant. The tenant is path-escaped.
    pub fn token_url(&self, tenant_id: &str) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_url,
            urlencoding::encode(tenant_id)
        )
    }
}

/// Successful token endpoint response.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Fetches access tokens with the credentials' grant.
///
/// Uses its own unauthenticated HTTP client, so token requests never pass
/// through the bearer token layer or the API retry layers.
#[derive(Clone)]
pub struct TokenClient {
    credentials: Credentials,
    config: AuthConfig,
    http: PowerBiHttpClient,
}

impl std::fmt::Debug for TokenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenClient")
            .field("credentials", &self.credentials)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TokenClient {
    /// Create a token client. Transport settings are taken from
    /// `client_config`; its retry settings are ignored.
    pub fn new(
        credentials: Credentials,
        config: AuthConfig,
        client_config: ClientConfig,
    ) -> Result<Self> {
        credentials.validate()?;
        let http = PowerBiHttpClient::unauthenticated(client_config)?;
        Ok(Self {
            credentials,
            config,
            http,
        })
    }

    /// The credentials tokens are requested for.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Request a new access token.
    #[instrument(skip(self), fields(tenant = %self.credentials.tenant_id(), grant = ?self.credentials.grant()))]
    pub async fn fetch_token(&self) -> Result<TokenResponse> {
        let url = self.config.token_url(self.credentials.tenant_id());

        let grant = self.credentials.grant();
        let mut form = vec![
            ("grant_type", grant.as_str()),
            ("client_id", self.credentials.client_id()),
            ("client_secret", self.credentials.client_secret()),
            ("scope", self.config.scope.as_str()),
        ];
        if grant == Grant::Password {
            if let (Some(username), Some(password)) =
                (self.credentials.username(), self.credentials.user_password())
            {
                form.push(("username", username));
                form.push(("password", password));
            }
        }

        let request = ApiRequest::new(RequestMethod::Post, &url)?.form(&form)?;
        let response = self.http.execute(request).await?;
        let token: TokenResponse = serde_json::from_slice(response.body())?;

        if token.access_token.is_empty() {
            return Err(Error::new(ErrorKind::Other(
                "token endpoint returned an empty access_token".to_string(),
            )));
        }

        debug!(expires_in = ?token.expires_in, "Acquired access token");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer, credentials: Credentials) -> TokenClient {
        TokenClient::new(
            credentials,
            AuthConfig::default().with_authority_url(server.uri()),
            ClientConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_token_url_escapes_tenant() {
        let config = AuthConfig::default();
        assert_eq!(
            config.token_url("contoso.onmicrosoft.com"),
            "https://login.microsoftonline.com/contoso.onmicrosoft.com/oauth2/v2.0/token"
        );
        assert_eq!(
            config.token_url("a/b c"),
            "https://login.microsoftonline.com/a%2Fb%20c/oauth2/v2.0/token"
        );
    }

    #[test]
    fn test_token_response_debug_redacts_token() {
        let token = TokenResponse {
            access_token: "eyJ0eXAi.secret".to_string(),
            token_type: Some("Bearer".to_string()),
            expires_in: Some(3599),
        };
        let debug_output = format!("{:?}", token);
        assert!(!debug_output.contains("eyJ0eXAi"));
    }

    #[tokio::test]
    async fn test_client_credentials_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=client-1"))
            .and(body_string_contains(
                "scope=https%3A%2F%2Fanalysis.windows.net%2Fpowerbi%2Fapi%2F.default",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer",
                "expires_in": 3599,
                "access_token": "abc123"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = client(
            &server,
            Credentials::client_credentials("tenant-1", "client-1", "secret"),
        );
        let token = tokens.fetch_token().await.unwrap();
        assert_eq!(token.access_token, "abc123");
        assert_eq!(token.expires_in, Some(3599));
    }

    #[tokio::test]
    async fn test_password_grant() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .and(body_string_contains("grant_type=password"))
            .and(body_string_contains("username=user%40contoso.com"))
            .and(body_string_contains("password=pw"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "user-token"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let tokens = client(
            &server,
            Credentials::password("tenant-1", "client-1", "secret", "user@contoso.com", "pw"),
        );
        assert_eq!(tokens.fetch_token().await.unwrap().access_token, "user-token");
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": "invalid_client",
                "error_description": "AADSTS7000215: Invalid client secret provided."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = client(
            &server,
            Credentials::client_credentials("tenant-1", "client-1", "wrong"),
        );
        let err = tokens.fetch_token().await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::OAuth { ref error, .. } if error == "invalid_client"));
    }

    #[tokio::test]
    async fn test_token_endpoint_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = client(
            &server,
            Credentials::client_credentials("tenant-1", "client-1", "secret"),
        );
        let err = tokens.fetch_token().await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Http(_)));
    }

    #[tokio::test]
    async fn test_malformed_token_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let tokens = client(
            &server,
            Credentials::client_credentials("tenant-1", "client-1", "secret"),
        );
        let err = tokens.fetch_token().await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    async fn fetch_with_logs(level: tracing::Level) -> String {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "abc123",
                "expires_in": 3599
            })))
            .mount(&server)
            .await;

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        client(&server, Credentials::client_credentials("tenant-1", "client-1", "secret"))
            .fetch_token()
            .await
            .unwrap();

        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_token_acquisition_logs_at_debug() {
        let debug = fetch_with_logs(tracing::Level::DEBUG).await;
        assert!(debug.contains("Acquired access token"));
        assert!(!debug.contains("abc123"));

        let info = fetch_with_logs(tracing::Level::INFO).await;
        assert!(!info.contains("Acquired access token"));
    }
}
