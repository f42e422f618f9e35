use crate::db::{MangaStore, StoreError};
use crate::models::filter::MangaFilter;
use crate::models::manga::MangaRecord;
use std::sync::Arc;

/// Builds a [`MangaFilter`] from raw request parameters.
///
/// Empty strings behave like absent parameters. `genres_csv` is split on
/// commas; tokens are trimmed and empty ones dropped.
#[must_use]
pub fn build_filter(
    name: Option<&str>,
    genres_csv: Option<&str>,
    status: Option<&str>,
) -> MangaFilter {
    let genres = genres_csv
        .map(|csv| {
            csv.split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(ToString::to_string)
                .collect::<Vec<_>>()
        })
        .filter(|tokens| !tokens.is_empty());

    MangaFilter {
        name: non_empty(name),
        genres,
        status: non_empty(status),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(ToString::to_string)
}

/// Result of a list query.
#[derive(Debug, Clone)]
pub struct MangaListing {
    pub count: usize,
    pub manga: Vec<MangaRecord>,
}

#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn MangaStore>,
}

impl QueryService {
    #[must_use]
    pub fn new(store: Arc<dyn MangaStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, filter: &MangaFilter) -> Result<MangaListing, StoreError> {
        let manga = self.store.list(filter).await?;
        Ok(MangaListing {
            count: manga.len(),
            manga,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::manga::MangaInput;
    use crate::services::ingest::tests::MemoryStore;

    fn record(name: &str, genres: &[&str], status: &str) -> MangaRecord {
        let now = chrono::Utc::now();
        MangaRecord {
            id: 1,
            manga_name: name.to_string(),
            manga_poster: "p".to_string(),
            manga_id: name.to_lowercase(),
            genres: genres.iter().map(|g| (*g).to_string()).collect(),
            status: status.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn absent_parameters_match_everything() {
        let filter = build_filter(None, None, None);
        assert!(filter.is_empty());
        assert!(filter.matches(&record("Anything", &[], "Finished")));

        let filter = build_filter(Some(""), Some(" , ,"), Some(""));
        assert!(filter.is_empty());
    }

    #[test]
    fn genres_csv_matches_any_token() {
        let filter = build_filter(None, Some("Action, Drama"), None);
        assert_eq!(
            filter.genres,
            Some(vec!["Action".to_string(), "Drama".to_string()])
        );

        assert!(filter.matches(&record("Berserk", &["Action", "Horror"], "Publishing")));
        assert!(filter.matches(&record("Monster", &["Drama"], "Finished")));
        assert!(!filter.matches(&record("Nichijou", &["Comedy"], "Finished")));
    }

    #[test]
    fn name_is_case_insensitive_substring() {
        let filter = build_filter(Some("one"), None, None);
        assert!(filter.matches(&record("One Punch Man", &[], "Publishing")));
        assert!(filter.matches(&record("One Piece", &[], "Publishing")));
        assert!(!filter.matches(&record("Chainsaw Man", &[], "Publishing")));
    }

    #[test]
    fn status_is_exact() {
        let filter = build_filter(None, None, Some("Publishing"));
        assert!(filter.matches(&record("Berserk", &[], "Publishing")));
        assert!(!filter.matches(&record("Monster", &[], "Finished")));
        assert!(!filter.matches(&record("Kingdom", &[], "publishing")));
    }

    #[tokio::test]
    async fn list_counts_filtered_records() {
        let store = Arc::new(MemoryStore::default());
        for (id, name, status) in [
            ("1", "Monster", "Finished"),
            ("2", "Berserk", "Publishing"),
            ("3", "Kingdom", "Publishing"),
        ] {
            store
                .create(MangaInput {
                    manga_name: name.to_string(),
                    manga_poster: "p".to_string(),
                    manga_id: id.to_string(),
                    genres: vec![],
                    status: status.to_string(),
                })
                .await
                .unwrap();
        }

        let service = QueryService::new(store);
        let listing = service
            .list(&build_filter(None, None, Some("Publishing")))
            .await
            .unwrap();

        assert_eq!(listing.count, 2);
        let names: Vec<&str> = listing.manga.iter().map(|m| m.manga_name.as_str()).collect();
        assert_eq!(names, vec!["Kingdom", "Berserk"]);
    }
}
