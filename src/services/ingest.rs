//! Sequential, throttled bulk insert of upstream items.

use crate::db::{MangaStore, StoreError};
use crate::models::manga::MangaRecord;
use crate::services::normalize::normalize;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Aggregate outcome of one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub success_count: usize,
    pub error_count: usize,
    /// `"<mangaName>: <reason>"` for every failure other than a duplicate.
    pub errors: Vec<String>,
}

#[derive(Clone)]
pub struct IngestPipeline {
    store: Arc<dyn MangaStore>,
    delay: Duration,
}

impl IngestPipeline {
    #[must_use]
    pub fn new(store: Arc<dyn MangaStore>, delay: Duration) -> Self {
        Self { store, delay }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Stores `items` one after another, waiting `delay` between positions.
    ///
    /// Never aborts: invalid items, duplicates and store failures are all
    /// tallied and the run moves on. Invalid items still occupy a position
    /// and are followed by the delay like any other item.
    pub async fn ingest(&self, items: &[Value]) -> IngestReport {
        let mut report = IngestReport::default();
        let total = items.len();

        for (index, raw) in items.iter().enumerate() {
            let input = normalize(raw);

            if input.is_ingestible() {
                let name = input.manga_name.clone();
                match self.store.create(input).await {
                    Ok(record) => {
                        debug!(manga_id = %record.manga_id, "Ingested {}", record.manga_name);
                        report.success_count += 1;
                    }
                    Err(err) => {
                        report.error_count += 1;
                        if err.is_conflict() {
                            debug!("Skipping duplicate: {}", name);
                        } else {
                            warn!("Failed to store {}: {}", name, err);
                            report.errors.push(format!("{name}: {err}"));
                        }
                    }
                }
            } else {
                debug!(position = index, "Skipping item without name, id or poster");
                report.error_count += 1;
            }

            if index + 1 < total {
                tokio::time::sleep(self.delay).await;
            }
        }

        info!(
            "Ingestion finished: {} stored, {} failed ({} items)",
            report.success_count, report.error_count, total
        );

        report
    }

    /// Normalizes and stores a single item.
    pub async fn store_one(&self, raw: &Value) -> Result<MangaRecord, StoreError> {
        let input = normalize(raw);
        if !input.is_ingestible() {
            return Err(StoreError::Validation(input.missing_fields()));
        }
        self.store.create(input).await
    }
}
