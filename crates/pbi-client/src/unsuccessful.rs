//! Turns non-2xx responses into errors.

use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::Next;

use crate::error::{Error, ErrorKind, HttpUnsuccessful};
use crate::request::ApiRequest;
use crate::response::ApiResponse;

/// Converts any response outside 2xx into [`ErrorKind::Unsuccessful`].
///
/// Sits above the retry layers, so it only sees the final response of a
/// retried exchange.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorOnUnsuccessfulLayer;

#[async_trait::async_trait]
impl reqwest_middleware::Middleware for ErrorOnUnsuccessfulLayer {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let sent = req.try_clone().unwrap_or_else(|| {
            let mut head = Request::new(req.method().clone(), req.url().clone());
            *head.headers_mut() = req.headers().clone();
            head
        });

        let response = next.run(req, extensions).await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let response = ApiResponse::read(response).await?;
        Err(Error::new(ErrorKind::Unsuccessful(HttpUnsuccessful::new(
            ApiRequest::from_reqwest(&sent),
            response,
        )))
        .into())
    }
}
