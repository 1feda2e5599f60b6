//! # powerbi-auth
//!
//! Azure AD authentication for the Power BI REST API.
//!
//! ## Security
//!
//! - Client secrets, passwords and tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Error messages avoid echoing credential data
//!
//! ## Supported Grants
//!
//! - **Client credentials** - service principal authentication
//! - **Password** - a user account, when both username and password are set
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use powerbi_auth::{AuthConfig, BearerTokenLayer, Credentials, TokenClient};
//! use powerbi_client::{ClientConfig, PowerBiHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), powerbi_client::Error> {
//!     let creds = Credentials::from_env()?;
//!     let config = ClientConfig::default();
//!
//!     let tokens = TokenClient::new(creds, AuthConfig::default(), config.clone())?;
//!     let auth = Arc::new(BearerTokenLayer::new(tokens));
//!     let client = PowerBiHttpClient::with_layers(config, vec![auth])?;
//!
//!     Ok(())
//! }
//! ```

mod cache;
mod credentials;
mod error;
mod layer;
mod token;

pub use cache::TokenCache;
pub use credentials::{Credentials, Grant};
pub use error::{Error, ErrorKind, Result};
pub use layer::BearerTokenLayer;
pub use token::{AuthConfig, TokenClient, TokenResponse};

/// Azure AD authority for the public cloud.
pub const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com";

/// OAuth2 scope granting the Power BI API permissions of the app registration.
pub const POWERBI_SCOPE: &str = "https://analysis.windows.net/powerbi/api/.default";
