//! Middleware chain.
//!
//! Layers are `reqwest_middleware::Middleware` implementations composed
//! once, when the client is built. A request enters the first attached
//! layer, each layer decides whether to forward it through
//! [`Next::run`](reqwest_middleware::Next::run), and the innermost call
//! reaches the pooled `reqwest::Client`.

use std::sync::Arc;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, Middleware};

use crate::config::ClientConfig;
use crate::retry::{RateLimitRetryLayer, TransientRetryLayer};
use crate::transport::WireLoggingLayer;
use crate::unsuccessful::ErrorOnUnsuccessfulLayer;

/// Compose the standard chain beneath `outer_layers`:
///
/// ```text
/// outer layers -> error normalizer -> transient retry -> rate limit retry
///   -> wire logging -> reqwest
/// ```
pub(crate) fn build_chain(
    client: reqwest::Client,
    config: &ClientConfig,
    outer_layers: Vec<Arc<dyn Middleware>>,
) -> ClientWithMiddleware {
    let mut builder = ClientBuilder::new(client);
    for layer in outer_layers {
        builder = builder.with_arc(layer);
    }

    builder = builder.with(ErrorOnUnsuccessfulLayer);
    if let Some(transient) = &config.transient_retry {
        builder = builder.with(TransientRetryLayer::new(transient.clone()));
    }
    if let Some(rate_limit) = &config.rate_limit_retry {
        builder = builder.with(RateLimitRetryLayer::new(rate_limit.clone()));
    }
    if config.enable_tracing {
        builder = builder.with(WireLoggingLayer);
    }

    builder.build()
}


#[cfg(test)]
mod tests {
    use super::testing::Scripted;
    use super::*;
    use crate::retry::{RateLimitRetryConfig, TransientRetryConfig};
    use http::Extensions;
    use reqwest::header::HeaderValue;
    use reqwest::{Request, Response};
    use reqwest_middleware::Next;

    /// Appends its name to the `x-trail` header.
    struct Tag(&'static str);

    #[async_trait::async_trait]
    impl Middleware for Tag {
        async fn handle(
            &self,
            mut req: Request,
            extensions: &mut Extensions,
            next: Next<'_>,
        ) -> reqwest_middleware::Result<Response> {
            let trail = match req.headers().get("x-trail") {
                Some(v) => format!("{},{}", v.to_str().unwrap(), self.0),
                None => self.0.to_string(),
            };
            req.headers_mut()
                .insert("x-trail", HeaderValue::from_str(&trail).unwrap());
            next.run(req, extensions).await
        }
    }

    fn request() -> Request {
        Request::new(
            reqwest::Method::GET,
            "https://api.powerbi.com/v1.0/myorg/groups".parse().unwrap(),
        )
    }

    #[tokio::test]
    async fn test_layers_run_in_attach_order() {
        let scripted = Arc::new(Scripted::statuses(&[200]));
        let chain = ClientBuilder::new(reqwest::Client::new())
            .with(Tag("auth"))
            .with(Tag("errors"))
            .with(Tag("retry"))
            .with_arc(scripted.clone())
            .build();

        let response = chain.execute(request()).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(scripted.trails(), vec![Some("auth,errors,retry".to_string())]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_outer_layers_see_one_call_per_logical_request() {
        // A retried exchange passes the outer layer only once.
        let scripted = Arc::new(Scripted::statuses(&[429, 500, 200]));
        let config = ClientConfig::builder()
            .with_rate_limit_retry(RateLimitRetryConfig::default())
            .with_transient_retry(TransientRetryConfig::default())
            .with_tracing(false)
            .build();

        let client = reqwest::Client::new();
        let outer: Arc<dyn Middleware> = Arc::new(Tag("auth"));
        let chain = ClientBuilder::from_client(build_chain(client, &config, vec![outer]))
            .with_arc(scripted.clone())
            .build();

        let response = chain.execute(request()).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(scripted.call_count(), 3);
        assert!(scripted
            .trails()
            .iter()
            .all(|t| t.as_deref() == Some("auth")));
    }
}
