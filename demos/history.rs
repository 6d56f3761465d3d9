//! Connection history walkthrough.
//!
//! Records a handful of connections in a throwaway history file, shows
//! eviction, and prints the most recently used entry.
//!
//! Usage:
//!   cargo run --example history
//!
//! Environment:
//!   CONNECTION_HISTORY_MAX_ITEMS - history cap (default: 100, demo uses 3 if unset)
//!   CONNECTION_HISTORY_FILE      - history file (default: a temp file)
//!   RUST_LOG                     - log filter (default: info)

use connection_history::{HistoryConfig, HistoryEntry, HistoryStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows every load, save and eviction.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut config = HistoryConfig::from_env()?;
    if std::env::var(connection_history::config::ENV_MAX_ITEMS).is_err() {
        config.max_items = 3;
    }
    if config.history_file.is_none() {
        let file = std::env::temp_dir()
            .join(format!("connection-history-demo-{}", std::process::id()))
            .join("history.json");
        config.history_file = Some(file);
    }

    let mut store = HistoryStore::from_config(&config)?;
    tracing::info!(
        path = %store.loader().path().display(),
        max_items = store.max_items(),
        "using history file"
    );

    let connections = [
        ("dev", "eks", "arn:aws:eks:eu-west-1:123:cluster/dev"),
        ("test", "aks", "/subscriptions/abc/resourceGroups/rg/test"),
        ("staging", "eks", "arn:aws:eks:eu-west-1:123:cluster/staging"),
        ("prod", "aks", "/subscriptions/abc/resourceGroups/rg/prod"),
    ];

    for (i, (name, provider, id)) in connections.iter().enumerate() {
        let entry = HistoryEntry::new(*name, *provider, *id)
            .with_last_updated(1_600_000_000 + i as u64);
        store.add(entry).await?;
    }
    store.set_alias("prod", "p").await?;

    println!("═══ History (oldest first) ═══");
    for entry in &store.get_all().await? {
        println!(
            "  {:<10} {:<5} {}{}",
            entry.name,
            entry.spec.provider,
            entry.spec.provider_id,
            entry
                .spec
                .alias
                .as_deref()
                .map(|a| format!("  (alias: {})", a))
                .unwrap_or_default()
        );
    }

    let latest = store.get_last_modified().await?;
    println!();
    println!("Last used: {}", latest.name);

    Ok(())
}
