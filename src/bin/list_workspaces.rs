//! List the workspaces visible to the configured credentials.
//!
//! ```sh
//! export POWERBI_TENANT_ID=...
//! export POWERBI_CLIENT_ID=...
//! export POWERBI_CLIENT_SECRET=...
//! RUST_LOG=powerbi_client=debug cargo run --bin list-workspaces -- "startswith(name,'Sales')"
//! ```

use powerbi_rest::PowerBiClient;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let filter = std::env::args().nth(1);

    let client = PowerBiClient::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        eprintln!();
        eprintln!("  Set POWERBI_TENANT_ID, POWERBI_CLIENT_ID and POWERBI_CLIENT_SECRET,");
        eprintln!("  plus POWERBI_USERNAME and POWERBI_PASSWORD to sign in as a user.");
        std::process::exit(1);
    });

    let groups = client
        .get_groups(filter.as_deref(), None, None)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Error: Failed to list workspaces: {e}");
            std::process::exit(1);
        });

    if groups.value.is_empty() {
        println!("No workspaces found");
        return;
    }

    for group in groups {
        let capacity = if group.is_on_dedicated_capacity {
            group.capacity_id.as_deref().unwrap_or("dedicated")
        } else {
            "shared"
        };
        println!("{}  {}  ({})", group.id, group.name, capacity);
    }
}
