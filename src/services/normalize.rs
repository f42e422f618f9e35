//! Mapping of upstream catalog items onto [`MangaInput`].
//!
//! Normalization is total: anything missing or malformed degrades to an empty
//! value and is rejected later by the ingestion gate, never here.

use crate::models::manga::MangaInput;
use serde_json::Value;

const UNKNOWN_STATUS: &str = "Unknown";

const POSTER_PATHS: [&str; 3] = [
    "/images/jpg/large_image_url",
    "/images/jpg/image_url",
    "/image_url",
];

/// The two shapes an upstream item arrives in.
#[derive(Debug, Clone, Copy)]
pub enum RawManga<'a> {
    /// `{ "manga": { .. }, .. }` as returned by recommendation listings.
    Wrapped(&'a Value),
    /// The manga object itself.
    Bare(&'a Value),
}

impl<'a> RawManga<'a> {
    #[must_use]
    pub fn classify(raw: &'a Value) -> Self {
        match raw.get("manga") {
            Some(inner) if inner.is_object() => Self::Wrapped(inner),
            _ => Self::Bare(raw),
        }
    }

    #[must_use]
    pub const fn manga(self) -> &'a Value {
        match self {
            Self::Wrapped(manga) | Self::Bare(manga) => manga,
        }
    }
}

#[must_use]
pub fn normalize(raw: &Value) -> MangaInput {
    let manga = RawManga::classify(raw).manga();

    MangaInput {
        manga_name: first_text(manga, &["/title", "/name"]),
        manga_poster: first_text(manga, &POSTER_PATHS),
        manga_id: first_text(manga, &["/mal_id", "/id"]),
        genres: genres(manga),
        status: manga
            .get("status")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_STATUS)
            .to_string(),
    }
}

fn first_text(manga: &Value, pointers: &[&str]) -> String {
    pointers
        .iter()
        .find_map(|p| manga.pointer(p).and_then(scalar_text))
        .unwrap_or_default()
}

fn genres(manga: &Value) -> Vec<String> {
    let Some(items) = manga.get("genres").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|genre| match genre {
            Value::Object(obj) => obj.get("name").and_then(scalar_text),
            other => scalar_text(other),
        })
        .collect()
}

/// Text of a scalar the way upstream ids and titles are used: non-empty
/// strings as-is, non-zero numbers in their JSON form. Everything else counts
/// as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
