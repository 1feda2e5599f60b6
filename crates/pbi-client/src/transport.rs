//! Network transport backed by reqwest.

use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::Next;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};

/// Build the pooled reqwest client at the bottom of the chain.
pub(crate) fn http_client(config: &ClientConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .pool_idle_timeout(config.pool_idle_timeout)
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .user_agent(&config.user_agent);

    if config.accept_compressed {
        builder = builder.gzip(true).deflate(true);
    } else {
        builder = builder.gzip(false).deflate(false);
    }

    // rustls never negotiates anything older than TLS 1.2.
    builder
        .build()
        .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))
}

/// Innermost layer: logs every attempt that goes over the wire, retries
/// included.
#[derive(Debug, Clone, Copy, Default)]
pub struct WireLoggingLayer;

#[async_trait::async_trait]
impl reqwest_middleware::Middleware for WireLoggingLayer {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        debug!(method = %req.method(), url = %req.url(), "Sending request");

        let response = next.run(req, extensions).await?;

        let status = response.status().as_u16();
        let content_length = response.content_length();
        if response.status().is_success() {
            debug!(status, content_length, "Response received");
        } else {
            info!(status, content_length, "Non-success response");
        }

        Ok(response)
    }
}
