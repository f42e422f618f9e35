use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Value, json};
use std::sync::Arc;

use super::{
    ApiError, AppState, MISSING_FIELDS_MESSAGE, MangaListQuery, MangaListResponse,
    StoreMangaRequest, StoredMangaResponse,
};
use crate::db::MangaStore;
use crate::services::build_filter;

const STORE_FAILED: &str = "Failed to store manga";

pub async fn list_manga(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MangaListQuery>,
) -> Result<Json<MangaListResponse>, ApiError> {
    let filter = build_filter(
        params.name.as_deref(),
        params.genres.as_deref(),
        params.status.as_deref(),
    );

    let listing = state
        .query()
        .list(&filter)
        .await
        .map_err(|e| ApiError::store(e, "Failed to fetch manga list"))?;

    Ok(Json(MangaListResponse {
        success: true,
        count: listing.count,
        manga_list: listing.manga,
    }))
}

pub async fn manga_list_preflight() -> Json<Value> {
    Json(json!({}))
}

pub async fn store_manga(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StoreMangaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredMangaResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::body(&e, STORE_FAILED))?;

    let input = request
        .into_input()
        .ok_or_else(|| ApiError::validation(MISSING_FIELDS_MESSAGE))?;

    let manga = state
        .store()
        .create(input)
        .await
        .map_err(|e| ApiError::store(e, STORE_FAILED))?;

    Ok((
        StatusCode::CREATED,
        Json(StoredMangaResponse {
            message: "Manga stored successfully".to_string(),
            manga,
        }),
    ))
}
