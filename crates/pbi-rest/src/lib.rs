//! # powerbi-rest
//!
//! Typed client for the Power BI REST API.
//!
//! ## Features
//!
//! - **Workspaces** - Create, list, look up, delete, assign to capacity, rename as admin
//! - **Datasets** - Metadata, parameters, datasources, refresh schedules, take over
//! - **Push datasets** - Create, list and replace tables, append rows
//! - **Reports** - List and delete
//! - **Imports** - Upload `.pbix` files and wait for them to publish
//! - **Access** - Workspace users, capacities, permission refresh
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use powerbi_rest::{ImportOptions, PowerBiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), powerbi_rest::Error> {
//!     let client = PowerBiClient::from_env()?;
//!
//!     let import = client
//!         .post_import_file_in_group(
//!             "f089354e-8366-4e18-aea3-4cb4a3a50b48",
//!             &ImportOptions::new().with_name_conflict("CreateOrOverwrite"),
//!             "Sales.pbix",
//!         )
//!         .await?;
//!
//!     let import = client
//!         .wait_for_import_to_succeed(&import.id, Duration::from_secs(300))
//!         .await?;
//!     println!("published {} dataset(s)", import.datasets.len());
//!
//!     Ok(())
//! }
//! ```

mod client;

pub mod capacities;
pub mod datasets;
pub mod group_users;
pub mod groups;
pub mod imports;
pub mod push_datasets;
pub mod reports;
pub mod types;

pub use client::PowerBiClient;
pub use imports::{Import, ImportOptions};
pub use types::ODataList;

pub use powerbi_client::{Error, ErrorKind, Result};
