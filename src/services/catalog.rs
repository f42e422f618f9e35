//! Drives ingestion from the upstream catalog: fetch a listing, run it
//! through the pipeline and phrase the outcome for the caller.

use crate::clients::jikan::{JikanClient, UpstreamError};
use crate::db::StoreError;
use crate::models::manga::MangaRecord;
use crate::services::ingest::{IngestPipeline, IngestReport};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Upstream listings that can be ingested in bulk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IngestSource {
    Recommended,
    Top,
    Popular,
}

impl IngestSource {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Top => "top",
            Self::Popular => "popular",
        }
    }
}

impl fmt::Display for IngestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IngestSource {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Self::Recommended),
            "top" => Ok(Self::Top),
            "popular" => Ok(Self::Popular),
            other => Err(CatalogError::UnknownSource(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown source '{0}'. Use one of: recommended, top, popular")]
    UnknownSource(String),

    #[error("Please enter a manga name")]
    EmptyQuery,

    #[error("No manga found with that name")]
    NotFound,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReport {
    pub source: IngestSource,
    #[serde(flatten)]
    pub report: IngestReport,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub manga: MangaRecord,
    pub message: String,
}

pub struct CatalogService {
    jikan: Arc<JikanClient>,
    pipeline: IngestPipeline,
}

impl CatalogService {
    #[must_use]
    pub const fn new(jikan: Arc<JikanClient>, pipeline: IngestPipeline) -> Self {
        Self { jikan, pipeline }
    }

    pub async fn fetch(&self, source: IngestSource) -> Result<Vec<Value>, UpstreamError> {
        match source {
            IngestSource::Recommended => self.jikan.recommendations().await,
            IngestSource::Top => self.jikan.top().await,
            IngestSource::Popular => self.jikan.popular().await,
        }
    }

    pub async fn ingest_source(&self, source: IngestSource) -> Result<SourceReport, CatalogError> {
        let items = self.fetch(source).await?;
        info!("Fetched {} {} manga from Jikan", items.len(), source);

        let report = self.pipeline.ingest(&items).await;
        let message = format!(
            "Stored {} {} manga. {} failed.",
            report.success_count, source, report.error_count
        );

        Ok(SourceReport {
            source,
            report,
            message,
        })
    }

    /// Stores the best upstream match for `name`.
    pub async fn ingest_search(&self, name: &str) -> Result<SearchOutcome, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyQuery);
        }

        let item = self
            .jikan
            .search(name)
            .await?
            .ok_or(CatalogError::NotFound)?;

        let manga = self.pipeline.store_one(&item).await?;
        let message = format!("Successfully stored: {}", manga.manga_name);

        Ok(SearchOutcome { manga, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_sources() {
        assert_eq!("top".parse::<IngestSource>().unwrap(), IngestSource::Top);
        assert_eq!(
            "recommended".parse::<IngestSource>().unwrap(),
            IngestSource::Recommended
        );
        assert!(matches!(
            "weekly".parse::<IngestSource>(),
            Err(CatalogError::UnknownSource(s)) if s == "weekly"
        ));
    }

    #[test]
    fn source_report_flattens_counts() {
        let report = SourceReport {
            source: IngestSource::Popular,
            report: IngestReport {
                success_count: 24,
                error_count: 1,
                errors: vec![],
            },
            message: "Stored 24 popular manga. 1 failed.".to_string(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["source"], "popular");
        assert_eq!(json["successCount"], 24);
        assert_eq!(json["message"], "Stored 24 popular manga. 1 failed.");
    }
}
