use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::db::StoreError;
use crate::services::CatalogError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    /// Any failure the client cannot fix; `context` is the message returned
    /// to the client.
    InternalError { context: String, details: String },

    ExternalApiError { service: String, message: String },

    ValidationError(String),

    Conflict(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::InternalError { context, details } => write!(f, "{context}: {details}"),
            Self::ExternalApiError { service, message } => {
                write!(f, "{service} error: {message}")
            }
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(msg)),
            Self::InternalError { context, details } => {
                tracing::error!("{}: {}", context, details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::with_details(context, details),
                )
            }
            Self::ExternalApiError { service, message } => {
                tracing::warn!("{} API error: {}", service, message);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody::with_details(format!("{service} service is unavailable"), message),
                )
            }
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            Self::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::new(msg)),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownSource(_) | CatalogError::EmptyQuery => {
                Self::ValidationError(err.to_string())
            }
            CatalogError::NotFound => Self::NotFound(err.to_string()),
            CatalogError::Upstream(upstream) => Self::jikan_error(upstream.to_string()),
            CatalogError::Store(store) => Self::store(store, "Failed to store manga"),
        }
    }
}

impl ApiError {
    /// Maps a store failure, using `context` as the 500 message.
    pub fn store(err: StoreError, context: &str) -> Self {
        match err {
            StoreError::Validation(_) => Self::ValidationError(err.to_string()),
            StoreError::Conflict { .. } => Self::Conflict(err.to_string()),
            StoreError::Unavailable(details) => Self::InternalError {
                context: context.to_string(),
                details,
            },
        }
    }

    /// Maps a body that could not be read or decoded, using `context` as the
    /// 500 message.
    pub fn body(rejection: &JsonRejection, context: &str) -> Self {
        Self::InternalError {
            context: context.to_string(),
            details: rejection.body_text(),
        }
    }

    pub fn jikan_error(msg: impl Into<String>) -> Self {
        Self::ExternalApiError {
            service: "Jikan".to_string(),
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_status_codes() {
        let conflict = ApiError::store(
            StoreError::Conflict {
                manga_id: "13".to_string(),
            },
            "Failed to store manga",
        );
        assert!(matches!(&conflict, ApiError::Conflict(msg) if msg == "Manga with this ID already exists"));
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);

        let down = ApiError::store(
            StoreError::Unavailable("timed out".to_string()),
            "Failed to fetch manga list",
        );
        assert!(matches!(
            &down,
            ApiError::InternalError { context, details }
                if context == "Failed to fetch manga list" && details == "timed out"
        ));
        assert_eq!(
            down.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn catalog_errors_map_to_status_codes() {
        let cases = [
            (CatalogError::EmptyQuery, StatusCode::BAD_REQUEST),
            (
                CatalogError::UnknownSource("weekly".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (CatalogError::NotFound, StatusCode::NOT_FOUND),
            (
                CatalogError::Upstream(crate::clients::jikan::UpstreamError::Decode(
                    "missing data".to_string(),
                )),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
