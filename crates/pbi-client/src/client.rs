//! The client facade: the composed middleware chain plus typed helpers.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncRead;
use tracing::instrument;

use reqwest_middleware::{ClientWithMiddleware, Middleware};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::middleware::build_chain;
use crate::request::{ApiRequest, RequestMethod};
use crate::response::ApiResponse;
use crate::transport::http_client;

/// HTTP client for the Power BI REST API.
///
/// Every request passes through the same chain, outermost first:
///
/// ```text
/// caller-supplied layers (e.g. bearer auth)
///   -> error normalizer
///   -> transient error retry
///   -> rate limit retry
///   -> reqwest
/// ```
///
/// Cloning is cheap; clones share the connection pool and the chain.
#[derive(Debug, Clone)]
pub struct PowerBiHttpClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    chain: ClientWithMiddleware,
    config: ClientConfig,
}

impl PowerBiHttpClient {
    /// Client with the standard chain and no authentication.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_layers(config, Vec::new())
    }

    /// Client with `outer_layers` placed above the standard chain.
    pub fn with_layers(
        config: ClientConfig,
        outer_layers: Vec<Arc<dyn Middleware>>,
    ) -> Result<Self> {
        let client = http_client(&config)?;
        Self::with_reqwest_client(config, outer_layers, client)
    }

    /// Client built around an existing `reqwest::Client`.
    pub fn with_reqwest_client(
        config: ClientConfig,
        outer_layers: Vec<Arc<dyn Middleware>>,
        client: reqwest::Client,
    ) -> Result<Self> {
        if let Some(transient) = &config.transient_retry {
            if transient.statuses.contains(&429) {
                return Err(Error::new(ErrorKind::Config(
                    "429 is handled by the rate limit layer and cannot be a transient status"
                        .to_string(),
                )));
            }
        }

        let chain = build_chain(client, &config, outer_layers);
        Ok(Self {
            inner: Arc::new(Inner { chain, config }),
        })
    }

    /// Client for endpoints that must not carry a bearer token.
    ///
    /// Only the error normalizer runs; the token endpoint is never retried.
    pub fn unauthenticated(config: ClientConfig) -> Result<Self> {
        let config = ClientConfig {
            rate_limit_retry: None,
            transient_retry: None,
            ..config
        };
        Self::new(config)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Resolve a path relative to the API base URL. Absolute URLs are
    /// returned unchanged.
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.inner.config.api_base_url,
                path.trim_start_matches('/')
            )
        }
    }

    /// Send a request through the chain.
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let response = self.inner.chain.execute(request.into_reqwest()).await?;
        ApiResponse::read(response).await
    }

    /// Send an optional JSON body and decode a JSON response.
    pub async fn do_json<B, T>(&self, method: RequestMethod, url: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send_json(method, url, body).await?;
        response.json()
    }

    /// Send an optional JSON body and discard the response body.
    pub async fn do_json_unit<B>(&self, method: RequestMethod, url: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.send_json(method, url, body).await?;
        Ok(())
    }

    /// Upload `reader` as a single-part multipart body and decode a JSON
    /// response.
    pub async fn do_multipart<R, T>(&self, method: RequestMethod, url: &str, reader: R) -> Result<T>
    where
        R: AsyncRead + Unpin,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(method, url)?.multipart(reader).await?;
        self.execute(request).await?.json()
    }

    /// POST a form-encoded body and decode a JSON response.
    pub async fn post_form<F, T>(&self, url: &str, form: &F) -> Result<T>
    where
        F: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = ApiRequest::new(RequestMethod::Post, url)?.form(form)?;
        self.execute(request).await?.json()
    }

    /// GET and decode a JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.do_json::<(), T>(RequestMethod::Get, url, None).await
    }

    /// DELETE a resource.
    pub async fn delete(&self, url: &str) -> Result<()> {
        self.do_json_unit::<()>(RequestMethod::Delete, url, None).await
    }

    async fn send_json<B>(&self, method: RequestMethod, url: &str, body: Option<&B>) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let mut request = ApiRequest::new(method, url)?;
        if let Some(body) = body {
            request = request.json(body)?;
        }
        self.execute(request).await
    }
}
