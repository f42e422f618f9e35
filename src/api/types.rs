use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::manga::{MangaInput, MangaRecord};

pub const MISSING_FIELDS_MESSAGE: &str =
    "Missing required fields. Required: mangaName, mangaPoster, mangaId, genres, status";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MangaListQuery {
    pub name: Option<String>,
    pub genres: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaListResponse {
    pub success: bool,
    pub count: usize,
    pub manga_list: Vec<MangaRecord>,
}

fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Body of `POST /store-manga`. Every field is optional here so that a
/// missing field yields the 400 message rather than a decode rejection.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoreMangaRequest {
    pub manga_name: Option<String>,
    pub manga_poster: Option<String>,
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    pub manga_id: Option<String>,
    pub genres: Option<Vec<String>>,
    pub status: Option<String>,
}

impl StoreMangaRequest {
    /// The complete input, or `None` when a field is absent or an empty string.
    #[must_use]
    pub fn into_input(self) -> Option<MangaInput> {
        let text = |v: Option<String>| v.filter(|s| !s.is_empty());

        Some(MangaInput {
            manga_name: text(self.manga_name)?,
            manga_poster: text(self.manga_poster)?,
            manga_id: text(self.manga_id)?,
            genres: self.genres?,
            status: text(self.status)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StoredMangaResponse {
    pub message: String,
    pub manga: MangaRecord,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub manga_name: String,
}
