use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, AppState, SearchRequest, StoredMangaResponse};
use crate::services::{IngestSource, SourceReport};

pub async fn ingest_source(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
) -> Result<Json<SourceReport>, ApiError> {
    let source: IngestSource = source.parse()?;
    let report = state.catalog().ingest_source(source).await?;
    Ok(Json(report))
}

pub async fn ingest_search(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredMangaResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::body(&e, "Failed to search manga"))?;
    let outcome = state.catalog().ingest_search(&request.manga_name).await?;
    Ok((
        StatusCode::CREATED,
        Json(StoredMangaResponse {
            message: outcome.message,
            manga: outcome.manga,
        }),
    ))
}
