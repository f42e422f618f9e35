use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_manga_list_created_at")
                    .table(MangaList::Table)
                    .col(MangaList::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_manga_list_created_at")
                    .table(MangaList::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum MangaList {
    Table,
    CreatedAt,
}
