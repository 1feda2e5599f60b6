//! Owned, cloneable HTTP requests.
//!
//! Bodies are held as [`Bytes`], so the `reqwest::Request` built from an
//! [`ApiRequest`] can be cloned by the retry layers without copying the
//! payload.

use std::fmt;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};
use url::Url;

use crate::error::{Error, ErrorKind, Result};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> Method {
        match self {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
            RequestMethod::Patch => Method::PATCH,
            RequestMethod::Put => Method::PUT,
            RequestMethod::Delete => Method::DELETE,
        }
    }
}

/// A fully built request travelling through the middleware chain.
#[derive(Clone)]
pub struct ApiRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(name, value)| {
                let value = if name == AUTHORIZATION {
                    "[REDACTED]"
                } else {
                    value.to_str().unwrap_or("[binary]")
                };
                (name.as_str(), value)
            })
            .collect();

        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &headers)
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .finish()
    }
}

impl ApiRequest {
    /// Create a request without a body.
    pub fn new(method: RequestMethod, url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        Ok(Self {
            method: method.to_reqwest(),
            url,
            headers: HeaderMap::new(),
            body: None,
        })
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable request headers.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Request body, if any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Build the `reqwest::Request` that enters the middleware chain.
    pub fn into_reqwest(self) -> reqwest::Request {
        let mut request = reqwest::Request::new(self.method, self.url);
        *request.headers_mut() = self.headers;
        if let Some(body) = self.body {
            *request.body_mut() = Some(reqwest::Body::from(body));
        }
        request
    }

    /// Copy a request seen inside the chain. Streaming bodies are dropped.
    pub fn from_reqwest(request: &reqwest::Request) -> Self {
        Self {
            method: request.method().clone(),
            url: request.url().clone(),
            headers: request.headers().clone(),
            body: request
                .body()
                .and_then(reqwest::Body::as_bytes)
                .map(Bytes::copy_from_slice),
        }
    }

    /// Set a header, replacing any previous value.
    pub fn header(mut self, name: HeaderName, value: &str) -> Result<Self> {
        let value = HeaderValue::from_str(value).map_err(|e| {
            Error::with_source(
                ErrorKind::Other(format!("invalid value for header '{}'", name)),
                e,
            )
        })?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Set the `Authorization: Bearer` header.
    pub fn bearer_auth(self, token: &str) -> Result<Self> {
        self.header(AUTHORIZATION, &format!("Bearer {}", token))
    }

    /// Set a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let data = serde_json::to_vec(body)?;
        self.body = Some(Bytes::from(data));
        self.header(CONTENT_TYPE, "application/json")
    }

    /// Set a form-encoded body.
    pub fn form<T: Serialize + ?Sized>(mut self, form: &T) -> Result<Self> {
        let data = serde_urlencoded::to_string(form)?;
        self.body = Some(Bytes::from(data));
        self.header(CONTENT_TYPE, "application/x-www-form-urlencoded")
    }

    /// Set a `multipart/form-data` body holding a single unnamed part.
    ///
    /// The source is read straight into the encoded body buffer.
    pub async fn multipart<R>(mut self, mut reader: R) -> Result<Self>
    where
        R: AsyncRead + Unpin,
    {
        let boundary = uuid::Uuid::new_v4().simple().to_string();

        let mut data = Vec::with_capacity(8 * 1024);
        data.extend_from_slice(format!("--{}\r\n\r\n", boundary).as_bytes());
        reader.read_to_end(&mut data).await?;
        data.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        self.body = Some(Bytes::from(data));
        self.header(
            CONTENT_TYPE,
            &format!("multipart/form-data; boundary={}", boundary),
        )
    }
}
