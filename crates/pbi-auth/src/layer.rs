//! Middleware that authenticates requests with a bearer token.

use powerbi_client::{Error, ErrorKind, Extensions, Middleware, Next};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response};

use crate::cache::TokenCache;
use crate::token::TokenClient;

/// Adds `Authorization: Bearer <token>` to every request.
///
/// The token is fetched on first use and cached. A 401 from the API is
/// passed through unchanged.
#[derive(Debug, Clone)]
pub struct BearerTokenLayer {
    tokens: TokenClient,
    cache: TokenCache,
}

impl BearerTokenLayer {
    pub fn new(tokens: TokenClient) -> Self {
        Self {
            tokens,
            cache: TokenCache::new(),
        }
    }

    /// The token cache, e.g. to invalidate it after a 401.
    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    async fn authenticate(&self, request: &mut Request) -> powerbi_client::Result<()> {
        let token = self
            .cache
            .get_or_fetch(|| async {
                let response = self.tokens.fetch_token().await?;
                Ok(response.access_token)
            })
            .await?;

        let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            Error::with_source(
                ErrorKind::Authentication("access token is not a valid header value".to_string()),
                e,
            )
        })?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}

#[async_trait::async_trait]
impl Middleware for BearerTokenLayer {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        self.authenticate(&mut req).await?;
        next.run(req, extensions).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Credentials;
    use crate::token::AuthConfig;
    use powerbi_client::{ClientConfig, PowerBiHttpClient};
    use std::sync::Arc;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_token(server: &MockServer, token: &str, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"access_token": token})),
            )
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    fn authenticated_client(server: &MockServer) -> (PowerBiHttpClient, Arc<BearerTokenLayer>) {
        let config = ClientConfig::builder()
            .with_api_base_url(format!("{}/v1.0/myorg", server.uri()))
            .without_retry()
            .build();
        let tokens = TokenClient::new(
            Credentials::client_credentials("tenant-1", "client-1", "secret"),
            AuthConfig::default().with_authority_url(server.uri()),
            config.clone(),
        )
        .unwrap();
        let layer = Arc::new(BearerTokenLayer::new(tokens));
        let outer: Arc<dyn Middleware> = layer.clone();
        let http = PowerBiHttpClient::with_layers(config, vec![outer]).unwrap();
        (http, layer)
    }

    #[tokio::test]
    async fn test_sets_bearer_header() {
        let server = MockServer::start().await;
        mount_token(&server, "abc123", 1).await;
        Mock::given(method("GET"))
            .and(path("/v1.0/myorg/groups"))
            .and(header("authorization", "Bearer abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"value": []})))
            .expect(2)
            .mount(&server)
            .await;

        let (http, layer) = authenticated_client(&server);
        let url = http.api_url("groups");
        let _: serde_json::Value = http.get_json(&url).await.unwrap();
        let _: serde_json::Value = http.get_json(&url).await.unwrap();

        assert_eq!(layer.cache().get().as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_concurrent_requests_fetch_one_token() {
        let server = MockServer::start().await;
        mount_token(&server, "shared", 1).await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer shared"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(8)
            .mount(&server)
            .await;

        let (http, _) = authenticated_client(&server);
        let url = http.api_url("groups");
        let results = futures::future::join_all(
            (0..8).map(|_| http.get_json::<serde_json::Value>(&url)),
        )
        .await;

        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[tokio::test]
    async fn test_token_failure_is_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tenant-1/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "AADSTS50126"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (http, layer) = authenticated_client(&server);
        let err = http
            .get_json::<serde_json::Value>(&http.api_url("groups"))
            .await
            .unwrap_err();

        assert!(err.is_auth_error());
        assert!(err.to_string().contains("invalid_grant"));
        assert!(layer.cache().get().is_none());
    }

    #[tokio::test]
    async fn test_api_401_is_passed_through() {
        let server = MockServer::start().await;
        mount_token(&server, "stale", 1).await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let (http, _) = authenticated_client(&server);
        let err = http
            .get_json::<serde_json::Value>(&http.api_url("groups"))
            .await
            .unwrap_err();
        assert!(err.is_http_401());
    }
}
