use axum::{
    Router,
    http::{HeaderValue, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::StoreHandle;
use crate::services::{CatalogService, QueryService};
use crate::state::SharedState;

mod error;
mod ingest;
mod manga;
mod types;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,
}

impl AppState {
    #[must_use]
    pub fn store(&self) -> &Arc<StoreHandle> {
        &self.shared.store
    }

    #[must_use]
    pub fn query(&self) -> &QueryService {
        &self.shared.query
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<CatalogService> {
        &self.shared.catalog
    }
}

#[must_use]
pub fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    Arc::new(AppState { shared })
}

pub fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config)?);
    Ok(create_app_state(shared))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(manga_list_router())
        .route("/store-manga", post(manga::store_manga))
        .route("/ingest/search", post(ingest::ingest_search))
        .route("/ingest/{source}", post(ingest::ingest_source))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `/manga-list` answers browsers directly, so both the listing and its
/// preflight carry permissive CORS headers regardless of the request.
fn manga_list_router() -> Router<Arc<AppState>> {
    let cors_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ));

    Router::new()
        .route(
            "/manga-list",
            get(manga::list_manga).options(manga::manga_list_preflight),
        )
        .layer(cors_headers)
}
