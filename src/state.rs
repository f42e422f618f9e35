use std::sync::Arc;

use crate::clients::jikan::JikanClient;
use crate::config::Config;
use crate::db::{MangaStore, StoreHandle};
use crate::services::{CatalogService, IngestPipeline, QueryService};

/// Build a shared HTTP client for upstream calls.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("mangadb/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Arc<StoreHandle>,

    pub pipeline: IngestPipeline,

    pub query: QueryService,

    pub catalog: Arc<CatalogService>,
}

impl SharedState {
    /// Wires the services together. The store is not contacted here; it
    /// connects on first use.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = Arc::new(StoreHandle::new(&config.general));
        let http_client = build_shared_http_client(config.jikan.request_timeout_seconds)?;
        let jikan = Arc::new(JikanClient::with_shared_client(
            http_client,
            config.jikan.base_url.clone(),
        ));

        let dyn_store = store.clone() as Arc<dyn MangaStore>;
        let pipeline = IngestPipeline::new(dyn_store.clone(), config.ingest.delay());
        let query = QueryService::new(dyn_store);
        let catalog = Arc::new(CatalogService::new(jikan, pipeline.clone()));

        Ok(Self {
            config: Arc::new(config),
            store,
            pipeline,
            query,
            catalog,
        })
    }
}
