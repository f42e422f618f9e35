use crate::db::StoreError;
use crate::entities::{manga_list, prelude::*};
use crate::models::filter::MangaFilter;
use crate::models::manga::{MangaInput, MangaRecord};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::{debug, info};

pub struct MangaRepository {
    conn: DatabaseConnection,
}

impl MangaRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model_to_record(model: manga_list::Model) -> MangaRecord {
        MangaRecord {
            id: model.id,
            manga_name: model.manga_name,
            manga_poster: model.manga_poster,
            manga_id: model.manga_id,
            genres: serde_json::from_str(&model.genres).unwrap_or_default(),
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }

    pub async fn find_one(&self, manga_id: &str) -> Result<Option<MangaRecord>, StoreError> {
        let model = MangaList::find()
            .filter(manga_list::Column::MangaId.eq(manga_id))
            .one(&self.conn)
            .await?;

        Ok(model.map(Self::map_model_to_record))
    }

    pub async fn create(&self, input: MangaInput) -> Result<MangaRecord, StoreError> {
        let missing = input.missing_fields();
        if !missing.is_empty() {
            return Err(StoreError::Validation(missing));
        }

        // Fast path only; the unique index on manga_id decides races.
        if self.find_one(&input.manga_id).await?.is_some() {
            return Err(StoreError::Conflict {
                manga_id: input.manga_id,
            });
        }

        let manga_id = input.manga_id.clone();
        let active_model = manga_list::ActiveModel {
            manga_name: Set(input.manga_name),
            manga_poster: Set(input.manga_poster),
            manga_id: Set(input.manga_id),
            genres: Set(serde_json::to_string(&input.genres).unwrap_or_else(|_| "[]".to_string())),
            status: Set(input.status),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .map_err(|e| Self::map_insert_error(e, manga_id))?;

        info!(manga_id = %model.manga_id, "Stored manga: {}", model.manga_name);
        Ok(Self::map_model_to_record(model))
    }

    fn map_insert_error(err: DbErr, manga_id: String) -> StoreError {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::Conflict { manga_id },
            _ => StoreError::from(err),
        }
    }

    pub async fn list(&self, filter: &MangaFilter) -> Result<Vec<MangaRecord>, StoreError> {
        let rows = MangaList::find()
            .filter(Self::condition(filter))
            .order_by_desc(manga_list::Column::CreatedAt)
            .order_by_desc(manga_list::Column::Id)
            .all(&self.conn)
            .await?;

        // Name matching folds Unicode case, which SQLite LIKE cannot.
        let records: Vec<MangaRecord> = rows
            .into_iter()
            .map(Self::map_model_to_record)
            .filter(|record| filter.matches_name(record))
            .collect();

        debug!(count = records.len(), "Listed manga");
        Ok(records)
    }

    fn condition(filter: &MangaFilter) -> Condition {
        let mut condition = Condition::all();

        if let Some(genres) = filter.genres.as_ref().filter(|g| !g.is_empty()) {
            let placeholders = vec!["?"; genres.len()].join(", ");
            condition = condition.add(Expr::cust_with_values(
                format!(
                    r#"EXISTS (SELECT 1 FROM json_each("manga_list"."genres") WHERE json_each.value IN ({placeholders}))"#
                ),
                genres.iter().cloned(),
            ));
        }

        if let Some(status) = &filter.status {
            condition = condition.add(manga_list::Column::Status.eq(status.as_str()));
        }

        condition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MangaStore, Store};

    async fn temp_store() -> Store {
        let path =
            std::env::temp_dir().join(format!("mangadb-repo-test-{}.db", uuid::Uuid::new_v4()));
        Store::new(&format!("sqlite:{}", path.display()))
            .await
            .expect("failed to open store")
    }

    fn input(id: &str, name: &str, genres: &[&str], status: &str) -> MangaInput {
        MangaInput {
            manga_name: name.to_string(),
            manga_poster: format!("https://cdn.example/{id}.jpg"),
            manga_id: id.to_string(),
            genres: genres.iter().map(|g| (*g).to_string()).collect(),
            status: status.to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_find_one() {
        let store = temp_store().await;
        let created = store
            .create(input("13", "One Piece", &["Action", "Adventure"], "Publishing"))
            .await
            .unwrap();

        assert_eq!(created.genres, vec!["Action", "Adventure"]);
        assert_eq!(created.created_at, created.updated_at);

        let found = store.find_one("13").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(store.find_one("14").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id() {
        let store = temp_store().await;
        store
            .create(input("2", "Berserk", &["Action"], "Publishing"))
            .await
            .unwrap();

        let err = store
            .create(input("2", "Berserk (again)", &[], "Publishing"))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        let all = store.list(&MangaFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_missing_fields() {
        let store = temp_store().await;
        let err = store
            .create(input("", "Nameless", &[], "Unknown"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(ref f) if f == &vec!["mangaId"]));
    }

    #[tokio::test]
    async fn unique_index_reports_conflict_without_precheck() {
        let store = temp_store().await;
        store
            .create(input("7", "Monster", &[], "Finished"))
            .await
            .unwrap();

        let duplicate = manga_list::ActiveModel {
            manga_name: Set("Monster".to_string()),
            manga_poster: Set("p".to_string()),
            manga_id: Set("7".to_string()),
            genres: Set("[]".to_string()),
            status: Set("Finished".to_string()),
            ..Default::default()
        };
        let err = duplicate.insert(&store.conn).await.unwrap_err();
        let mapped = MangaRepository::map_insert_error(err, "7".to_string());
        assert!(mapped.is_conflict());
    }

    #[tokio::test]
    async fn name_filter_folds_non_ascii_case() {
        let store = temp_store().await;
        store
            .create(input("887", "Pokémon Adventures", &["Adventure"], "Publishing"))
            .await
            .unwrap();
        store
            .create(input("1", "Monster", &["Drama"], "Finished"))
            .await
            .unwrap();

        let filter = crate::services::build_filter(Some("POKÉMON"), None, None);
        let hits = store.list(&filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].manga_id, "887");

        let filter = crate::services::build_filter(Some("émon adv"), Some("Adventure"), None);
        assert_eq!(store.list(&filter).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_applies_filters_newest_first() {
        let store = temp_store().await;
        store
            .create(input("1", "One Piece", &["Action", "Adventure"], "Publishing"))
            .await
            .unwrap();
        store
            .create(input("2", "Chainsaw Man", &["Action", "Horror"], "Publishing"))
            .await
            .unwrap();
        store
            .create(input("3", "Nichijou", &["Comedy"], "Finished"))
            .await
            .unwrap();
        store
            .create(input("4", "100%_Pure", &["Romance"], "Finished"))
            .await
            .unwrap();

        let all = store.list(&MangaFilter::default()).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|m| m.manga_id.as_str()).collect();
        assert_eq!(ids, vec!["4", "3", "2", "1"]);

        let by_name = MangaFilter {
            name: Some("ONE".to_string()),
            ..Default::default()
        };
        let names: Vec<String> = store
            .list(&by_name)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.manga_name)
            .collect();
        assert_eq!(names, vec!["One Piece"]);

        let literal = MangaFilter {
            name: Some("%_".to_string()),
            ..Default::default()
        };
        let hits = store.list(&literal).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].manga_id, "4");

        let by_genre = MangaFilter {
            genres: Some(vec!["Horror".to_string(), "Comedy".to_string()]),
            ..Default::default()
        };
        let ids: Vec<String> = store
            .list(&by_genre)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.manga_id)
            .collect();
        assert_eq!(ids, vec!["3", "2"]);

        let by_status = MangaFilter {
            status: Some("Publishing".to_string()),
            genres: Some(vec!["Adventure".to_string()]),
            ..Default::default()
        };
        let hits = store.list(&by_status).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].manga_id, "1");
    }
}
