//! # powerbi-client
//!
//! Core HTTP client infrastructure for the Power BI REST API.
//!
//! This crate provides the layered HTTP client with:
//! - A composable middleware chain built on `reqwest-middleware`
//! - Conversion of non-2xx responses into structured errors
//! - Bounded retry of HTTP 429 honoring `Retry-After`
//! - Bounded retry of intermittent server errors
//! - JSON and multipart request helpers
//! - Polling of long-running operations with a deadline
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (powerbi-rest)                                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  PowerBiHttpClient                          │
//! │  - do_json / do_multipart / post_form                       │
//! │  - Outer layers (bearer auth from powerbi-auth)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ErrorOnUnsuccessfulLayer → TransientRetryLayer             │
//! │    → RateLimitRetryLayer → WireLoggingLayer → reqwest       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use powerbi_client::{ClientConfig, PowerBiHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), powerbi_client::Error> {
//!     let client = PowerBiHttpClient::new(ClientConfig::default())?;
//!
//!     let groups: serde_json::Value = client
//!         .get_json(&client.api_url("groups"))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod middleware;
mod poll;
mod request;
mod response;
mod retry;
mod transport;
mod unsuccessful;

pub use client::PowerBiHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{
    is_http_401_error, is_http_404_error, ApiErrorBody, Error, ErrorKind, HttpUnsuccessful, Result,
};
pub use poll::{poll_until, PollStatus};
pub use request::{ApiRequest, RequestMethod};
pub use response::ApiResponse;
pub use retry::{
    RateLimitRetryConfig, RateLimitRetryLayer, RetryDelay, RetrySchedule, TransientRetryConfig,
    TransientRetryLayer,
};
pub use transport::WireLoggingLayer;
pub use unsuccessful::ErrorOnUnsuccessfulLayer;

// Layers are plain reqwest_middleware middleware.
pub use http::Extensions;
pub use reqwest_middleware::{Middleware, Next};

/// Default Power BI REST API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.powerbi.com/v1.0/myorg";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("powerbi-api/", env!("CARGO_PKG_VERSION"));
