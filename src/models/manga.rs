use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A manga as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaRecord {
    pub id: i32,
    pub manga_name: String,
    pub manga_poster: String,
    pub manga_id: String,
    pub genres: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Canonical input shape for a new record: a [`MangaRecord`] without the
/// store-assigned id and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaInput {
    pub manga_name: String,
    pub manga_poster: String,
    pub manga_id: String,
    pub genres: Vec<String>,
    pub status: String,
}

impl MangaInput {
    /// Names of the required string fields that are empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.manga_name.is_empty() {
            missing.push("mangaName");
        }
        if self.manga_poster.is_empty() {
            missing.push("mangaPoster");
        }
        if self.manga_id.is_empty() {
            missing.push("mangaId");
        }
        if self.status.is_empty() {
            missing.push("status");
        }
        missing
    }

    /// Whether the item carries enough to be worth sending to the store.
    ///
    /// Status is not part of this gate: normalization always fills it in.
    #[must_use]
    pub fn is_ingestible(&self) -> bool {
        !self.manga_name.is_empty() && !self.manga_id.is_empty() && !self.manga_poster.is_empty()
    }
}
