use crate::config::GeneralConfig;
use crate::models::filter::MangaFilter;
use crate::models::manga::{MangaInput, MangaRecord};
use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Failures surfaced by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("Manga with this ID already exists")]
    Conflict { manga_id: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Operations the ingestion pipeline and the query service need from
/// persistence.
#[async_trait::async_trait]
pub trait MangaStore: Send + Sync {
    async fn find_one(&self, manga_id: &str) -> Result<Option<MangaRecord>, StoreError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Validation`] when a required field is empty
    /// - [`StoreError::Conflict`] when a record with the same `manga_id` exists
    /// - [`StoreError::Unavailable`] on any database failure
    async fn create(&self, input: MangaInput) -> Result<MangaRecord, StoreError>;

    /// Records matching `filter`, newest first.
    async fn list(&self, filter: &MangaFilter) -> Result<Vec<MangaRecord>, StoreError>;
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn manga_repo(&self) -> repositories::manga::MangaRepository {
        repositories::manga::MangaRepository::new(self.conn.clone())
    }
}

#[async_trait::async_trait]
impl MangaStore for Store {
    async fn find_one(&self, manga_id: &str) -> Result<Option<MangaRecord>, StoreError> {
        self.manga_repo().find_one(manga_id).await
    }

    async fn create(&self, input: MangaInput) -> Result<MangaRecord, StoreError> {
        self.manga_repo().create(input).await
    }

    async fn list(&self, filter: &MangaFilter) -> Result<Vec<MangaRecord>, StoreError> {
        self.manga_repo().list(filter).await
    }
}

/// Process-wide handle to the store that connects on first use and reuses
/// the pool afterwards.
pub struct StoreHandle {
    db_url: String,
    max_connections: u32,
    min_connections: u32,
    store: OnceCell<Store>,
}

impl StoreHandle {
    #[must_use]
    pub fn new(general: &GeneralConfig) -> Self {
        Self {
            db_url: general.database_path.clone(),
            max_connections: general.max_db_connections,
            min_connections: general.min_db_connections,
            store: OnceCell::new(),
        }
    }

    /// Returns the connected store, connecting and migrating if this is the
    /// first call. A failed attempt leaves the handle unconnected so the next
    /// call retries.
    pub async fn acquire(&self) -> Result<&Store, StoreError> {
        self.store
            .get_or_try_init(|| async {
                Store::with_pool_options(&self.db_url, self.max_connections, self.min_connections)
                    .await
                    .map_err(|e| StoreError::Unavailable(format!("{e:#}")))
            })
            .await
    }
}

#[async_trait::async_trait]
impl MangaStore for StoreHandle {
    async fn find_one(&self, manga_id: &str) -> Result<Option<MangaRecord>, StoreError> {
        self.acquire().await?.find_one(manga_id).await
    }

    async fn create(&self, input: MangaInput) -> Result<MangaRecord, StoreError> {
        self.acquire().await?.create(input).await
    }

    async fn list(&self, filter: &MangaFilter) -> Result<Vec<MangaRecord>, StoreError> {
        self.acquire().await?.list(filter).await
    }
}
