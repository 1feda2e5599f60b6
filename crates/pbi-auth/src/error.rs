//! Error types for powerbi-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

/// Result type alias for powerbi-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for powerbi-auth operations.
///
/// Error messages are sanitized to prevent accidental credential exposure.
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
}

/// The kind of error that occurred.
///
/// Error messages avoid including credential values.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// OAuth error response from Azure AD.
    #[error("OAuth error: {error} - {description}")]
    OAuth { error: String, description: String },

    /// Invalid credentials configuration.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// HTTP error during authentication.
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Environment variable not set.
    #[error("Environment variable not set: {0}")]
    EnvVar(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<powerbi_client::Error> for Error {
    fn from(err: powerbi_client::Error) -> Self {
        // Azure AD error bodies are JSON with `error` and `error_description`.
        if let Some(details) = err.unsuccessful() {
            if let Ok(oauth) = serde_json::from_slice::<OAuthErrorResponse>(details.raw_body()) {
                return Error::with_source(
                    ErrorKind::OAuth {
                        error: oauth.error,
                        description: oauth.error_description,
                    },
                    err,
                );
            }
        }

        // Sanitize any potential credential exposure
        let message = err.to_string();
        let sanitized = if message.contains("Bearer") || message.contains("password") {
            "Client error (details redacted for security)".to_string()
        } else {
            message
        };
        Error::with_source(ErrorKind::Http(sanitized), err)
    }
}

/// Auth failures surface through the middleware chain as
/// [`powerbi_client::ErrorKind::Authentication`].
impl From<Error> for powerbi_client::Error {
    fn from(err: Error) -> Self {
        powerbi_client::Error::with_source(
            powerbi_client::ErrorKind::Authentication(err.to_string()),
            err,
        )
    }
}

#[derive(Debug, serde::Deserialize)]
struct OAuthErrorResponse {
    error: String,
    #[serde(default)]
    error_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use powerbi_client::{ApiRequest, ApiResponse, HttpUnsuccessful, RequestMethod};

    fn unsuccessful(status: u16, body: &'static str) -> powerbi_client::Error {
        let request = ApiRequest::new(
            RequestMethod::Post,
            "https://login.microsoftonline.com/tenant/oauth2/v2.0/token",
        )
        .unwrap();
        let response = ApiResponse::new(
            status.try_into().unwrap(),
            Default::default(),
            Bytes::from_static(body.as_bytes()),
        );
        powerbi_client::Error::new(powerbi_client::ErrorKind::Unsuccessful(
            HttpUnsuccessful::new(request, response),
        ))
    }

    #[test]
    fn test_error_kind_display() {
        let err = ErrorKind::OAuth {
            error: "invalid_client".to_string(),
            description: "AADSTS7000215: Invalid client secret provided.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "OAuth error: invalid_client - AADSTS7000215: Invalid client secret provided."
        );

        let err = ErrorKind::EnvVar("POWERBI_TENANT_ID".to_string());
        assert_eq!(
            err.to_string(),
            "Environment variable not set: POWERBI_TENANT_ID"
        );
    }

    #[test]
    fn test_azure_ad_error_body_becomes_oauth_error() {
        let err: Error = unsuccessful(
            400,
            r#"{"error":"invalid_grant","error_description":"AADSTS50126: Error validating credentials"}"#,
        )
        .into();

        match err.kind {
            ErrorKind::OAuth { error, description } => {
                assert_eq!(error, "invalid_grant");
                assert!(description.starts_with("AADSTS50126"));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_other_failures_become_http_errors() {
        let err: Error = unsuccessful(503, "Service Unavailable").into();
        assert!(matches!(err.kind, ErrorKind::Http(_)));
    }

    #[test]
    fn test_converts_to_client_authentication_error() {
        let err = Error::new(ErrorKind::InvalidCredentials("empty tenant".to_string()));
        let client_err: powerbi_client::Error = err.into();
        assert!(client_err.is_auth_error());
        assert_eq!(
            client_err.to_string(),
            "Authentication error: Invalid credentials: empty tenant"
        );
    }
}
