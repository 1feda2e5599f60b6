//! Error types for pbi-client.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::request::ApiRequest;
use crate::response::ApiResponse;

/// Result type alias for pbi-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for pbi-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// The unsuccessful HTTP exchange behind this error, if any.
    pub fn unsuccessful(&self) -> Option<&HttpUnsuccessful> {
        match &self.kind {
            ErrorKind::Unsuccessful(details) => Some(details),
            _ => None,
        }
    }

    /// HTTP status code of the response that caused this error.
    pub fn status(&self) -> Option<u16> {
        self.unsuccessful().map(HttpUnsuccessful::status)
    }

    /// Returns true if the API answered 404 Not Found.
    pub fn is_http_404(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns true if the API answered 401 Unauthorized.
    pub fn is_http_401(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns true if the API was still rate limiting after all retries.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Returns true if acquiring a bearer token failed.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication(_))
    }

    /// Returns true if a polled operation did not finish in time.
    pub fn is_operation_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::OperationTimeout { .. })
    }
}

/// Returns true if `err` carries a 404 response.
pub fn is_http_404_error(err: &Error) -> bool {
    err.is_http_404()
}

/// Returns true if `err` carries a 401 response.
pub fn is_http_401_error(err: &Error) -> bool {
    err.is_http_401()
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The API answered with a status outside 2xx.
    #[error("{0}")]
    Unsuccessful(HttpUnsuccessful),

    /// Acquiring a bearer token failed.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A polled operation did not complete before its deadline.
    #[error("Timed out waiting for {operation} to complete. Operation taking longer than {} seconds", timeout.as_secs_f64())]
    OperationTimeout {
        operation: String,
        timeout: Duration,
    },

    /// An import job finished in a state other than `Succeeded`.
    #[error("Import {import_id} completed with invalid state '{state}'")]
    ImportFailed { import_id: String, state: String },

    /// Other error.
    #[error("{0}")]
    Other(String),
}

/// A non-2xx response together with the request that produced it.
///
/// The response body is kept verbatim; `error_body` holds the
/// `{"error": {"code", "message"}}` payload when the body had that shape.
#[derive(Debug, Clone)]
pub struct HttpUnsuccessful {
    /// The request as it was dispatched.
    pub request: ApiRequest,
    /// The buffered response.
    pub response: ApiResponse,
    /// Parsed Power BI error payload.
    pub error_body: Option<ApiErrorBody>,
}

impl HttpUnsuccessful {
    /// Build from a request/response pair, parsing the body on a best-effort basis.
    pub fn new(request: ApiRequest, response: ApiResponse) -> Self {
        let error_body = if response.body().is_empty() {
            None
        } else {
            serde_json::from_slice::<ErrorResponse>(response.body())
                .ok()
                .map(|parsed| parsed.error)
        };

        Self {
            request,
            response,
            error_body,
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.response.status()
    }

    /// Raw response body bytes.
    pub fn raw_body(&self) -> &[u8] {
        self.response.body()
    }
}

impl fmt::Display for HttpUnsuccessful {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status code '{}'", self.response.status_code())?;

        match &self.error_body {
            Some(body) if !body.code.is_empty() && !body.message.is_empty() => {
                write!(f, " with code '{}' and message '{}'", body.code, body.message)
            }
            Some(body) if !body.code.is_empty() => write!(f, " with code '{}'", body.code),
            _ if !self.raw_body().is_empty() => {
                write!(f, " with body {}", String::from_utf8_lossy(self.raw_body()))
            }
            _ => Ok(()),
        }
    }
}

/// Error payload returned by the Power BI API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiErrorBody,
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if err.is_builder() {
            ErrorKind::Config(err.to_string())
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

/// Recovers errors raised inside the middleware chain.
impl From<reqwest_middleware::Error> for Error {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(err) => err.into(),
            reqwest_middleware::Error::Middleware(err) => match err.downcast::<Error>() {
                Ok(err) => err,
                Err(other) => Error {
                    kind: ErrorKind::Other(other.to_string()),
                    source: Some(other.into()),
                },
            },
        }
    }
}

/// Carries a structured error through the middleware chain.
impl From<Error> for reqwest_middleware::Error {
    fn from(err: Error) -> Self {
        reqwest_middleware::Error::middleware(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        Error::with_source(ErrorKind::Other(format!("form encoding: {}", err)), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Other(format!("IO error: {}", err)), err)
    }
}
