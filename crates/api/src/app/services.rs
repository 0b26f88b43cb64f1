use anyhow::Context;

use stockroom_infra::{csv_io, AppConfig, InventoryStore};

/// Shared handles for request handlers, built once at startup.
#[derive(Debug, Clone)]
pub struct AppServices {
    store: InventoryStore,
}

impl AppServices {
    pub fn new(store: InventoryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &InventoryStore {
        &self.store
    }
}

/// Open the store named by `config`, ensure its schema, and seed it from the
/// configured CSV file when it is empty.
///
/// A seed file that cannot be read is logged and skipped; the server still
/// starts.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let store = InventoryStore::open(&config.database_url)
        .await
        .with_context(|| format!("failed to open inventory database {}", config.database_url))?;

    if let Some(path) = &config.seed_csv {
        match csv_io::seed_from_csv(&store, path).await {
            Ok(Some(report)) => tracing::info!(
                path = %path.display(),
                imported = report.imported,
                failed = report.failed(),
                "seeded inventory"
            ),
            Ok(None) => {}
            Err(err) => tracing::warn!(path = %path.display(), "failed to seed inventory: {err}"),
        }
    }

    Ok(AppServices::new(store))
}
