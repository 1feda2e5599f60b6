//! # powerbi-api
//!
//! A Power BI REST API client library for Rust.
//!
//! Requests go through a layered HTTP client: bearer token authentication,
//! structured errors for non-2xx responses, bounded retry of HTTP 429 and
//! of intermittent server errors.
//!
//! ## Security
//!
//! - Client secrets, passwords and tokens are redacted in Debug output
//! - Tracing/logging skips credential parameters
//! - Error messages avoid echoing credential data
//!
//! ## Crates
//!
//! - **powerbi-client** - Core HTTP client: middleware chain, retry layers, error normalization, polling
//! - **powerbi-auth** - Azure AD token acquisition, token cache, bearer token middleware
//! - **powerbi-rest** - Typed API: workspaces, datasets, push datasets, reports, imports, users
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use powerbi_api::PowerBiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads POWERBI_TENANT_ID, POWERBI_CLIENT_ID, POWERBI_CLIENT_SECRET
//!     let client = PowerBiClient::from_env()?;
//!
//!     let groups = client.get_groups(None, None, None).await?;
//!     for group in groups {
//!         println!("{} {}", group.id, group.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use powerbi_auth as auth;
#[cfg(feature = "client")]
pub use powerbi_client as client;
#[cfg(feature = "rest")]
pub use powerbi_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use powerbi_auth::{AuthConfig, Credentials};
#[cfg(feature = "client")]
pub use powerbi_client::{ClientConfig, Error, ErrorKind, PowerBiHttpClient, Result};
#[cfg(feature = "rest")]
pub use powerbi_rest::PowerBiClient;
