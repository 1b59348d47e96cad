//! Wiring & DI. Entry point: bootstrap adapters, seed the store, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use media_catalog::adapters::gate::EmailGate;
use media_catalog::adapters::media::HttpMediaResolver;
use media_catalog::adapters::persistence::{JsonCatalogRepo, MemoryCatalogRepo, default_catalog};
use media_catalog::adapters::ui::TuiInputPort;
use media_catalog::domain::{CatalogSnapshot, CatalogStore};
use media_catalog::ports::{AccessGatePort, CatalogRepoPort, InputPort, MediaResolverPort};
use media_catalog::shared::config::{AppConfig, StorageKind};
use media_catalog::usecases::{
    AccessService, CatalogView, CategoryService, ContentService, PersistenceWorker,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!("no .env found"),
    }

    media_catalog::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        AppConfig::default()
    });

    // --- Persistence ---
    let storage = cfg.storage_or_default().map_err(|e| anyhow::anyhow!(e))?;
    let repo: Arc<dyn CatalogRepoPort> = match storage {
        StorageKind::Json => {
            let path = cfg.catalog_path();
            info!(path = %path.display(), "catalog storage: json file");
            Arc::new(JsonCatalogRepo::new(path))
        }
        StorageKind::Memory => {
            info!("catalog storage: process memory (lost on exit)");
            Arc::new(MemoryCatalogRepo::new())
        }
    };

    // --- Store: stored catalog, else seed ---
    let initial = match repo.load().await.map_err(|e| anyhow::anyhow!("{}", e))? {
        Some(snapshot) => snapshot,
        None if cfg.seed_defaults_or_default() => {
            info!("no stored catalog, starting from built-in seed");
            default_catalog()
        }
        None => CatalogSnapshot::default(),
    };
    info!(
        categories = initial.categories.len(),
        items = initial.items.len(),
        revision = initial.revision,
        "catalog initialised"
    );
    let store = Arc::new(
        CatalogStore::with_seed(initial).map_err(|e| anyhow::anyhow!("invalid catalog: {}", e))?,
    );

    // --- Persistence worker (saves after each change) ---
    let worker = PersistenceWorker::new(Arc::clone(&store), Arc::clone(&repo));
    let (stop_tx, stop_rx) = oneshot::channel();
    let worker_handle = tokio::spawn(worker.run(stop_rx));

    // --- Services ---
    let categories = Arc::new(CategoryService::new(Arc::clone(&store)));
    let content = Arc::new(ContentService::new(
        Arc::clone(&store),
        Arc::clone(&categories),
    ));
    let view = Arc::new(CatalogView::new(Arc::clone(&store)));

    let gate: Arc<dyn AccessGatePort> = Arc::new(EmailGate::new(
        cfg.allowed_domains_or_default(),
        cfg.allowed_domain_fragments_or_default(),
    ));
    let access = Arc::new(AccessService::new(gate));

    let media: Arc<dyn MediaResolverPort> = Arc::new(HttpMediaResolver::new(Duration::from_secs(
        cfg.media_timeout_secs_or_default(),
    )));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        access, categories, content, view, media,
    ));

    // --- Run (main menu -> Viewer / Admin) ---
    let outcome = input_port.run().await;

    // Worker flushes unsaved changes before exiting, even if the UI failed.
    let _ = stop_tx.send(());
    if let Err(e) = worker_handle.await {
        warn!(error = %e, "persistence worker did not shut down cleanly");
    }

    outcome.map_err(|e| anyhow::anyhow!("{}", e))
}
